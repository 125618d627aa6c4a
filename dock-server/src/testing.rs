//! Test doubles shared by the view-model tests.

use futures::future::BoxFuture;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{
    BoundingBox, Location, Occupancy, StationDetail, StationId, StationSummary,
};
use crate::tfl::{StationSource, TflError};

/// A request the view model made, waiting for the test to answer it.
pub enum Call {
    Region {
        bbox: BoundingBox,
        reply: oneshot::Sender<Result<Vec<StationSummary>, TflError>>,
    },
    Detail {
        id: StationId,
        reply: oneshot::Sender<Result<StationDetail, TflError>>,
    },
}

impl Call {
    pub fn into_region(
        self,
    ) -> (
        BoundingBox,
        oneshot::Sender<Result<Vec<StationSummary>, TflError>>,
    ) {
        match self {
            Call::Region { bbox, reply } => (bbox, reply),
            Call::Detail { id, .. } => panic!("expected region call, got detail for {id}"),
        }
    }

    pub fn into_detail(self) -> (StationId, oneshot::Sender<Result<StationDetail, TflError>>) {
        match self {
            Call::Detail { id, reply } => (id, reply),
            Call::Region { .. } => panic!("expected detail call, got region"),
        }
    }
}

/// Station source whose responses are released by the test, in any order.
///
/// Each call is announced on the receiver returned by [`GatedSource::new`]
/// and completes only when the test sends a reply.
pub struct GatedSource {
    calls: mpsc::UnboundedSender<Call>,
}

impl GatedSource {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Call>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { calls: tx }, rx)
    }
}

impl StationSource for GatedSource {
    fn stations_in_region(
        &self,
        bbox: BoundingBox,
    ) -> BoxFuture<'_, Result<Vec<StationSummary>, TflError>> {
        Box::pin(async move {
            let (reply, rx) = oneshot::channel();
            self.calls
                .send(Call::Region { bbox, reply })
                .expect("test dropped the call receiver");
            rx.await.expect("test dropped the reply")
        })
    }

    fn station_detail<'a>(
        &'a self,
        id: &'a StationId,
    ) -> BoxFuture<'a, Result<StationDetail, TflError>> {
        Box::pin(async move {
            let (reply, rx) = oneshot::channel();
            self.calls
                .send(Call::Detail {
                    id: id.clone(),
                    reply,
                })
                .expect("test dropped the call receiver");
            rx.await.expect("test dropped the reply")
        })
    }
}

pub fn id(s: &str) -> StationId {
    StationId::parse(s).unwrap()
}

pub fn summary(s: &str, name: &str, lat: f64, lon: f64) -> StationSummary {
    StationSummary {
        id: id(s),
        name: name.to_string(),
        location: Location::new(lat, lon),
    }
}

pub fn detail(s: &str, name: &str, occupancy: Option<(u32, u32)>) -> StationDetail {
    StationDetail {
        summary: summary(s, name, 51.5, -0.12),
        occupancy: occupancy.map(|(bikes, empty)| Occupancy::new(bikes, empty)),
    }
}

pub fn not_found(s: &str) -> TflError {
    TflError::NotFound(id(s))
}
