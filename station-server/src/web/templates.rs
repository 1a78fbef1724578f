//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::Station;

/// Station list page.
#[derive(Template)]
#[template(path = "stations.html")]
pub struct StationListTemplate {
    pub source: &'static str,
    pub fetched_at: String,
    pub stations: Vec<StationView>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

/// Station view model for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationView {
    pub address: String,
    pub free_slots: i32,
    pub bikes_available: i32,
    /// CSS background of the bikes cell
    pub background: &'static str,
    /// CSS text color of the bikes cell
    pub foreground: &'static str,
    pub tier: &'static str,
    pub defaulted: bool,
}

impl StationView {
    /// Create from a domain Station, classifying it on the way.
    pub fn from_station(station: &Station) -> Self {
        let tier = station.tier();
        Self {
            address: station.address().to_string(),
            free_slots: station.free_slots(),
            bikes_available: station.bikes_available(),
            background: tier.background().css(),
            foreground: tier.foreground().css(),
            tier: tier.as_str(),
            defaulted: station.provenance().any_defaulted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_colors_follow_tier() {
        let empty = StationView::from_station(&Station::new("Plaza Mayor", 0, 12));
        assert_eq!((empty.background, empty.foreground), ("red", "white"));

        let low = StationView::from_station(&Station::new("Av. Central", 4, 2));
        assert_eq!((low.background, low.foreground), ("yellow", "black"));

        let normal = StationView::from_station(&Station::new("Puerto", 9, 1));
        assert_eq!((normal.background, normal.foreground), ("green", "white"));
    }

    #[test]
    fn renders_rows_in_order() {
        let template = StationListTemplate {
            source: "local",
            fetched_at: "2026-01-01T00:00:00Z".to_string(),
            stations: vec![
                StationView::from_station(&Station::new("Plaza Mayor", 0, 12)),
                StationView::from_station(&Station::new("Puerto", 9, 1)),
            ],
        };
        let html = template.render().unwrap();

        let plaza = html.find("Plaza Mayor").unwrap();
        let puerto = html.find("Puerto").unwrap();
        assert!(plaza < puerto);
        assert!(html.contains("background: red; color: white"));
        assert!(html.contains("background: green; color: white"));
    }

    #[test]
    fn renders_empty_list() {
        let template = StationListTemplate {
            source: "remote",
            fetched_at: String::new(),
            stations: Vec::new(),
        };
        let html = template.render().unwrap();
        assert!(html.contains("No stations available"));
    }

    #[test]
    fn escapes_addresses() {
        let template = StationListTemplate {
            source: "local",
            fetched_at: String::new(),
            stations: vec![StationView::from_station(&Station::new("<b>x</b>", 1, 1))],
        };
        let html = template.render().unwrap();
        assert!(!html.contains("<b>x</b>"));
    }
}
