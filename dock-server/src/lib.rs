//! Bike dock tracker server.
//!
//! A local web application for picking Santander Cycles docking stations on
//! a map, keeping a list of favourites, and checking how many bikes and
//! free docks each favourite has right now.

pub mod config;
pub mod domain;
pub mod favorites_list;
pub mod picker;
pub mod sequence;
pub mod store;
pub mod tfl;
pub mod web;

#[cfg(test)]
mod testing;
