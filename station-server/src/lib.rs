//! Bike-share station availability.
//!
//! Loads the current station list from either the open data search API or
//! a bundled extract, normalizes both into [`domain::Station`], and serves
//! the list with each station colored by its availability tier.

pub mod config;
pub mod domain;
pub mod sources;
pub mod web;
