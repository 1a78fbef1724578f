//! Defaulting of raw source fields into a [`Station`].

use super::station::{FieldQuality, Provenance, Station, UNKNOWN_ADDRESS};

/// Build a [`Station`] from possibly-missing fields.
///
/// Missing addresses become [`UNKNOWN_ADDRESS`], missing counts become 0.
/// Present values are kept verbatim, negatives included. Each field's
/// [`FieldQuality`] records whether it was defaulted.
///
/// # Examples
///
/// ```
/// use station_server::domain::{normalize, UNKNOWN_ADDRESS};
///
/// let station = normalize(None, Some(3), None);
/// assert_eq!(station.address(), UNKNOWN_ADDRESS);
/// assert_eq!(station.bikes_available(), 3);
/// assert_eq!(station.free_slots(), 0);
/// ```
pub fn normalize(address: Option<&str>, available: Option<i32>, free: Option<i32>) -> Station {
    let provenance = Provenance {
        address: FieldQuality::of(&address),
        bikes_available: FieldQuality::of(&available),
        free_slots: FieldQuality::of(&free),
    };

    Station::with_provenance(
        address.unwrap_or(UNKNOWN_ADDRESS),
        available.unwrap_or(0),
        free.unwrap_or(0),
        provenance,
    )
}
