//! Data transfer objects for web responses.

use serde::Serialize;

use crate::domain::{AvailabilityTier, Provenance, Station};

/// A station in the JSON listing.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Street address
    pub address: String,

    /// Bikes ready to rent
    pub bikes_available: i32,

    /// Empty docks
    pub free_slots: i32,

    /// Availability tier derived from the bike count
    pub tier: AvailabilityTier,

    /// Which fields were defaulted by the source
    pub provenance: Provenance,
}

impl StationResult {
    /// Create from a domain Station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            address: station.address().to_string(),
            bikes_available: station.bikes_available(),
            free_slots: station.free_slots(),
            tier: station.tier(),
            provenance: station.provenance(),
        }
    }
}

/// Response for `GET /api/stations`.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    /// Source that produced the list (`remote` or `local`)
    pub source: &'static str,

    /// RFC 3339 timestamp of the load
    pub fetched_at: String,

    /// Stations in source order
    pub stations: Vec<StationResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
