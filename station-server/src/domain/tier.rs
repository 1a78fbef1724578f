//! Availability classification.

use std::fmt;

use serde::Serialize;

/// Stations with at least this many bikes are considered well stocked.
pub const NORMAL_THRESHOLD: i32 = 5;

/// Three-way classification of a station's bike count.
///
/// Only used to pick colors when presenting a station; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityTier {
    /// No bikes to rent.
    Empty,
    /// Between one and four bikes.
    Low,
    /// Five or more bikes.
    Normal,
}

/// Classify a bike count.
///
/// Counts at or below zero are `Empty`; the boundary at
/// [`NORMAL_THRESHOLD`] belongs to `Normal`.
///
/// # Examples
///
/// ```
/// use station_server::domain::{AvailabilityTier, classify};
///
/// assert_eq!(classify(0), AvailabilityTier::Empty);
/// assert_eq!(classify(4), AvailabilityTier::Low);
/// assert_eq!(classify(5), AvailabilityTier::Normal);
/// ```
pub fn classify(bikes_available: i32) -> AvailabilityTier {
    match bikes_available {
        // Negative counts share the empty tier (and its red background),
        // not the low one.
        i32::MIN..=0 => AvailabilityTier::Empty,
        n if n < NORMAL_THRESHOLD => AvailabilityTier::Low,
        _ => AvailabilityTier::Normal,
    }
}

/// A display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Yellow,
    Green,
    White,
    Black,
}

impl Color {
    /// CSS color keyword.
    pub fn css(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl AvailabilityTier {
    /// Background color for the bike count cell.
    pub fn background(&self) -> Color {
        match self {
            AvailabilityTier::Empty => Color::Red,
            AvailabilityTier::Low => Color::Yellow,
            AvailabilityTier::Normal => Color::Green,
        }
    }

    /// Text color that contrasts with [`background`](Self::background).
    ///
    /// The low-stock background is light, so it gets dark text.
    pub fn foreground(&self) -> Color {
        match self {
            AvailabilityTier::Low => Color::Black,
            AvailabilityTier::Empty | AvailabilityTier::Normal => Color::White,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityTier::Empty => "empty",
            AvailabilityTier::Low => "low",
            AvailabilityTier::Normal => "normal",
        }
    }
}

impl fmt::Display for AvailabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(classify(0), AvailabilityTier::Empty);
        assert_eq!(classify(1), AvailabilityTier::Low);
        assert_eq!(classify(4), AvailabilityTier::Low);
        assert_eq!(classify(5), AvailabilityTier::Normal);
        assert_eq!(classify(1000), AvailabilityTier::Normal);
    }

    #[test]
    fn negative_counts_are_empty() {
        assert_eq!(classify(-1), AvailabilityTier::Empty);
        assert_eq!(classify(i32::MIN), AvailabilityTier::Empty);
        assert_eq!(classify(-1).background(), Color::Red);
    }

    #[test]
    fn palette() {
        assert_eq!(AvailabilityTier::Empty.background(), Color::Red);
        assert_eq!(AvailabilityTier::Empty.foreground(), Color::White);
        assert_eq!(AvailabilityTier::Low.background(), Color::Yellow);
        assert_eq!(AvailabilityTier::Low.foreground(), Color::Black);
        assert_eq!(AvailabilityTier::Normal.background(), Color::Green);
        assert_eq!(AvailabilityTier::Normal.foreground(), Color::White);
    }

    #[test]
    fn display() {
        assert_eq!(AvailabilityTier::Low.to_string(), "low");
        assert_eq!(Color::Yellow.css(), "yellow");
    }
}
