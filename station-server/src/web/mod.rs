//! Web layer for the station availability list.
//!
//! Every request performs one fresh load from the configured source; no
//! station data is kept between requests.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, StationBoard, create_router, load_board};
pub use state::AppState;
pub use templates::*;
