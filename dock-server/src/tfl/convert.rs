//! Conversion from wire records to domain types.

use crate::domain::{
    BIKES_KEY, InvalidStationId, Location, Occupancy, StationDetail, StationId, StationSummary,
};

use super::types::BikePointDto;

/// A BikePoint record that could not be turned into a domain value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("bad id {id:?}: {source}")]
    InvalidId {
        id: String,
        #[source]
        source: InvalidStationId,
    },

    #[error("station {id} has non-finite coordinates")]
    InvalidLocation { id: String },
}

/// Convert a record to station metadata, ignoring its properties.
pub fn convert_summary(dto: &BikePointDto) -> Result<StationSummary, ConversionError> {
    let id = StationId::parse(&dto.id).map_err(|source| ConversionError::InvalidId {
        id: dto.id.clone(),
        source,
    })?;

    if !dto.lat.is_finite() || !dto.lon.is_finite() {
        return Err(ConversionError::InvalidLocation { id: dto.id.clone() });
    }

    Ok(StationSummary {
        id,
        name: dto.common_name.clone(),
        location: Location::new(dto.lat, dto.lon),
    })
}

/// Convert a record to a full station, extracting occupancy if both
/// counts are present.
pub fn convert_detail(dto: &BikePointDto) -> Result<StationDetail, ConversionError> {
    let summary = convert_summary(dto)?;

    let occupancy = Occupancy::from_properties(
        dto.additional_properties
            .iter()
            .map(|p| (p.key.as_str(), p.value.as_str())),
    )
    .map(|occ| {
        let updated_at = dto
            .additional_properties
            .iter()
            .find(|p| p.key == BIKES_KEY)
            .and_then(|p| p.modified);
        occ.with_updated_at(updated_at)
    });

    Ok(StationDetail { summary, occupancy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfl::types::AdditionalPropertyDto;

    fn prop(key: &str, value: &str) -> AdditionalPropertyDto {
        AdditionalPropertyDto {
            category: Some("Description".into()),
            key: key.into(),
            value: value.into(),
            modified: None,
        }
    }

    fn dto(id: &str, props: Vec<AdditionalPropertyDto>) -> BikePointDto {
        BikePointDto {
            id: id.into(),
            common_name: "River Street , Clerkenwell".into(),
            lat: 51.529163,
            lon: -0.10997,
            additional_properties: props,
        }
    }

    #[test]
    fn detail_with_both_counts() {
        let detail = convert_detail(&dto(
            "BikePoints_1",
            vec![prop("NbBikes", "5"), prop("NbEmptyDocks", "3")],
        ))
        .unwrap();

        assert_eq!(detail.id().as_str(), "BikePoints_1");
        assert_eq!(detail.occupancy.unwrap().capacity_text(), "5/8");
    }

    #[test]
    fn detail_missing_empty_docks_has_no_occupancy() {
        let detail = convert_detail(&dto("BikePoints_1", vec![prop("NbBikes", "5")])).unwrap();
        assert!(detail.occupancy.is_none());
    }

    #[test]
    fn updated_at_comes_from_bike_count() {
        let mut bikes = prop("NbBikes", "2");
        bikes.modified = Some("2026-10-16T08:15:00Z".parse().unwrap());
        let detail =
            convert_detail(&dto("BikePoints_1", vec![prop("NbEmptyDocks", "1"), bikes])).unwrap();

        let occ = detail.occupancy.unwrap();
        assert_eq!(
            occ.updated_at.unwrap().to_rfc3339(),
            "2026-10-16T08:15:00+00:00"
        );
    }

    #[test]
    fn invalid_id_is_rejected() {
        let err = convert_summary(&dto("", vec![])).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidId { .. }));
    }

    #[test]
    fn non_finite_location_is_rejected() {
        let mut record = dto("BikePoints_1", vec![]);
        record.lat = f64::NAN;
        let err = convert_summary(&record).unwrap_err();
        assert_eq!(
            err,
            ConversionError::InvalidLocation {
                id: "BikePoints_1".into()
            }
        );
    }
}
