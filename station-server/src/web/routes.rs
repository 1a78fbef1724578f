//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Local, SecondsFormat};
use tracing::{error, info};

use crate::domain::Station;
use crate::sources::StationSource;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(station_page))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .with_state(state)
}

/// The result of one load, ready to present.
#[derive(Debug, Clone)]
pub struct StationBoard {
    pub source: &'static str,
    pub fetched_at: DateTime<Local>,
    pub stations: Vec<Station>,
}

/// Load the current stations once.
///
/// A failed load is logged and presented as an empty list; the cause never
/// reaches the user.
pub async fn load_board<S: StationSource>(source: &S) -> StationBoard {
    let fetched_at = Local::now();
    let stations = match source.stations().await {
        Ok(stations) => {
            info!(source = source.name(), count = stations.len(), "stations loaded");
            stations
        }
        Err(e) => {
            error!(source = source.name(), error = %e, "failed to load stations");
            Vec::new()
        }
    };

    StationBoard {
        source: source.name(),
        fetched_at,
        stations,
    }
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// HTML station list.
async fn station_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let board = load_board(state.source.as_ref()).await;

    let template = StationListTemplate {
        source: board.source,
        fetched_at: format_timestamp(&board.fetched_at),
        stations: board.stations.iter().map(StationView::from_station).collect(),
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok(Html(html).into_response())
}

/// JSON station list.
async fn list_stations(State(state): State<AppState>) -> Json<StationListResponse> {
    let board = load_board(state.source.as_ref()).await;

    Json(StationListResponse {
        source: board.source,
        fetched_at: format_timestamp(&board.fetched_at),
        stations: board
            .stations
            .iter()
            .map(StationResult::from_station)
            .collect(),
    })
}

fn format_timestamp(at: &DateTime<Local>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Internal { message } = self;
        error!("{message}");

        let page = ErrorTemplate {
            title: "Something went wrong".to_string(),
            message: message.clone(),
        };
        match page.render() {
            Ok(html) => (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response(),
            Err(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: message }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{
        ConfiguredSource, LocalSourceConfig, LocalStationSource, RemoteSourceConfig,
        RemoteStationSource,
    };
    use tempfile::{TempDir, tempdir};

    fn local_state(contents: Option<&str>) -> (TempDir, AppState) {
        let dir = tempdir().unwrap();
        if let Some(contents) = contents {
            std::fs::write(dir.path().join("stations.csv"), contents).unwrap();
        }
        let source = LocalStationSource::new(LocalSourceConfig::new(dir.path()));
        (dir, AppState::new(ConfiguredSource::Local(source)))
    }

    async fn serve(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_router(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn load_board_degrades_to_empty() {
        let (_dir, state) = local_state(None);
        let board = load_board(state.source.as_ref()).await;
        assert_eq!(board.source, "local");
        assert!(board.stations.is_empty());
    }

    #[tokio::test]
    async fn remote_failure_degrades_to_empty() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = RemoteStationSource::new(
            RemoteSourceConfig::new().with_base_url(format!("http://{addr}")),
        )
        .unwrap();
        let board = load_board(&ConfiguredSource::Remote(source)).await;
        assert_eq!(board.source, "remote");
        assert!(board.stations.is_empty());
    }

    #[tokio::test]
    async fn json_listing() {
        let (_dir, state) =
            local_state(Some("header\nPlaza Mayor;0;12\nAv. Central;4;2\nPuerto;9;1"));
        let base = serve(state).await;

        let body: serde_json::Value = reqwest::get(format!("{base}/api/stations"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["source"], "local");
        let tiers: Vec<_> = body["stations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["tier"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(tiers, vec!["empty", "low", "normal"]);
    }

    #[tokio::test]
    async fn html_page_renders_on_failure() {
        let (_dir, state) = local_state(None);
        let base = serve(state).await;

        let response = reqwest::get(format!("{base}/")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let html = response.text().await.unwrap();
        assert!(html.contains("No stations available"));
    }

    #[tokio::test]
    async fn health_check() {
        let (_dir, state) = local_state(None);
        let base = serve(state).await;

        let body = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }
}
