//! The canonical station record.

use std::fmt;

use serde::Serialize;

use super::tier::{AvailabilityTier, classify};

/// Placeholder address used when the remote feed omits one.
pub const UNKNOWN_ADDRESS: &str = "Unknown";

/// Whether a field came straight from the source or was filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldQuality {
    /// The source supplied a usable value.
    Exact,
    /// The source value was absent or unparseable and a default was used.
    Defaulted,
}

impl FieldQuality {
    /// `Exact` when the value was present, `Defaulted` otherwise.
    pub fn of<T>(value: &Option<T>) -> Self {
        if value.is_some() {
            FieldQuality::Exact
        } else {
            FieldQuality::Defaulted
        }
    }
}

/// Per-field quality tags for a [`Station`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Provenance {
    pub address: FieldQuality,
    pub bikes_available: FieldQuality,
    pub free_slots: FieldQuality,
}

impl Provenance {
    /// Every field supplied by the source.
    pub const EXACT: Provenance = Provenance {
        address: FieldQuality::Exact,
        bikes_available: FieldQuality::Exact,
        free_slots: FieldQuality::Exact,
    };

    /// Whether any field had to be defaulted.
    pub fn any_defaulted(&self) -> bool {
        [self.address, self.bikes_available, self.free_slots].contains(&FieldQuality::Defaulted)
    }
}

/// One bike-share dock, fully populated.
///
/// Stations are built by the normalizer (or [`Station::new`]) and never
/// mutated afterwards. Two stations with the same address are still two
/// separate entries; nothing deduplicates them.
///
/// # Examples
///
/// ```
/// use station_server::domain::{AvailabilityTier, Station};
///
/// let station = Station::new("Plaza Mayor", 3, 12);
/// assert_eq!(station.address(), "Plaza Mayor");
/// assert_eq!(station.tier(), AvailabilityTier::Low);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Station {
    address: String,
    bikes_available: i32,
    free_slots: i32,
    provenance: Provenance,
}

impl Station {
    /// Create a station whose fields were all reported by the source.
    pub fn new(address: impl Into<String>, bikes_available: i32, free_slots: i32) -> Self {
        Self::with_provenance(address, bikes_available, free_slots, Provenance::EXACT)
    }

    /// Create a station with explicit per-field provenance.
    pub fn with_provenance(
        address: impl Into<String>,
        bikes_available: i32,
        free_slots: i32,
        provenance: Provenance,
    ) -> Self {
        Self {
            address: address.into(),
            bikes_available,
            free_slots,
            provenance,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Number of bikes ready to rent. Not clamped: a misbehaving feed may
    /// report negative values and they are kept as-is.
    pub fn bikes_available(&self) -> i32 {
        self.bikes_available
    }

    /// Number of empty docks.
    pub fn free_slots(&self) -> i32 {
        self.free_slots
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Availability tier, derived from the bike count on every call.
    pub fn tier(&self) -> AvailabilityTier {
        classify(self.bikes_available)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} bikes, {} free)",
            self.address, self.bikes_available, self.free_slots
        )
    }
}
