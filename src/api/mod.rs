//! Classboard HTTP Server
//!
//! Hosts the dashboard, built with Axum. Every request re-reads the roster
//! and runs one render pass.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /?mode=student&student=Asha` - HTML page
//! - `GET /?mode=subject&subject=Math` - HTML page
//!
//! ## JSON
//! - `GET /api/v1/dashboard` - View description (same query parameters)
//! - `GET /api/v1/chart` - Chart only (same query parameters)
//! - `GET /api/v1/roster` - Loaded roster
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use classboard::api::{serve, AppState};
//! use classboard::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let server = config.server.clone();
//!     serve(AppState::new(config), &server).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/dashboard", get(routes::dashboard::dashboard_json))
        .route("/chart", get(routes::dashboard::chart_json))
        .route("/roster", get(routes::dashboard::roster_json));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::dashboard_page))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the dashboard server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Classboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Classboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::io::Write;
    use std::path::Path;
    use tower::util::ServiceExt;

    const ROSTER_CSV: &str = "\
Name,Roll No,Grade,Division,Class Teacher,Profile Picture URL,Math,English,Science,History,Marathi
Asha,1,7,A,Mrs. Kulkarni,https://example.com/asha.png,80,75,90,60,70
Ravi,2,7,A,Mrs. Kulkarni,,55,65,45,72,81
Meera,3,7,A,Mrs. Kulkarni,,90,88,92,85,79
Kabir,4,7,A,Mrs. Kulkarni,,66,71,58,77,69
Zoya,5,7,A,Mrs. Kulkarni,,73,82,64,59,88
";

    fn app_for(path: &Path) -> Router {
        let mut config = Config::default();
        config.roster.path = path.to_path_buf();
        build_router(AppState::new(config))
    }

    fn create_test_app() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(ROSTER_CSV.as_bytes()).unwrap();

        (app_for(&path), dir)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _dir) = create_test_app();
        let (status, _) = get(app, "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (app, _dir) = create_test_app();
        let (status, _) = get(app, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_not_ready_without_roster() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_for(&dir.path().join("missing.xlsx"));

        let (status, _) = get(app.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, body) = get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["roster"], "error");
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Grade: 7, Division: A"));
        assert_eq!(body.matches(r#"<div class="card">"#).count(), 5);
        assert!(body.contains("Performance of Asha"));
    }

    #[tokio::test]
    async fn test_dashboard_page_subject_mode() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/?mode=subject&subject=History").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("History Performance"));
        assert!(body.contains(r#"<option value="subject" selected>Subject Performance</option>"#));
    }

    #[tokio::test]
    async fn test_dashboard_page_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_for(&dir.path().join("Student Dash-2.xlsx"));

        let (status, body) = get(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("Error loading spreadsheet").count(), 1);
        assert!(!body.contains(r#"<div class="card">"#));
        assert!(!body.contains("<svg"));
    }

    #[tokio::test]
    async fn test_invalid_mode_rejected() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/?mode=teacher").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_subject_rejected() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/api/v1/chart?mode=subject&subject=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_chart_json_student() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/api/v1/chart?mode=student&student=Asha").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["title"], "Performance of Asha");
        let bars = json["bars"].as_array().unwrap();
        let pairs: Vec<(String, f64)> = bars
            .iter()
            .map(|b| {
                (
                    b["category"].as_str().unwrap().to_string(),
                    b["value"].as_f64().unwrap(),
                )
            })
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Math".to_string(), 80.0),
                ("English".to_string(), 75.0),
                ("Science".to_string(), 90.0),
                ("History".to_string(), 60.0),
                ("Marathi".to_string(), 70.0),
            ]
        );
    }

    #[tokio::test]
    async fn test_chart_json_subject() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/api/v1/chart?mode=subject&subject=Math").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["title"], "Math Performance");
        assert_eq!(json["bars"].as_array().unwrap().len(), 5);
        assert_eq!(json["bars"][1]["category"], "Ravi");
        assert_eq!(json["bars"][1]["value"], 55.0);
    }

    #[tokio::test]
    async fn test_chart_json_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_for(&dir.path().join("missing.csv"));

        let (status, body) = get(app, "/api/v1/chart").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["code"], "ROSTER_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_dashboard_json() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/api/v1/dashboard?mode=subject").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["content"]["status"], "ready");
        assert_eq!(json["content"]["controls"]["selected_entity"], "Math");
        assert_eq!(json["content"]["cards"]["rows"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_roster_json() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/api/v1/roster").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["total"], 5);
        assert_eq!(json["class"]["class_teacher"], "Mrs. Kulkarni");
        assert_eq!(json["students"][0]["name"], "Asha");
    }
}
