//! Domain types for bike-share station availability.
//!
//! Every source, whatever its wire format, ends up producing [`Station`]
//! values through [`normalize`]. Availability tiers are derived on demand
//! with [`classify`] and never stored.

mod normalize;
mod station;
mod tier;

pub use normalize::normalize;
pub use station::{FieldQuality, Provenance, Station, UNKNOWN_ADDRESS};
pub use tier::{AvailabilityTier, Color, NORMAL_THRESHOLD, classify};
