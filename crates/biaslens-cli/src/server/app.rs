//! Axum application setup.

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // The frontend is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Datasets and analyses
        .route("/upload", post(handlers::upload_dataset))
        .route("/analyze", post(handlers::analyze_dataset))
        .route("/analysis/:id", get(handlers::get_analysis))
        // Reports
        .route("/bias-report/:id", get(handlers::get_bias_report))
        .route("/download-report/:id", get(handlers::download_report))
        // Suggestions
        .route("/suggestion/:id", get(handlers::get_suggestion))
        .route("/suggestions/:id", get(handlers::list_suggestions))
        .route("/apply-fixes/:id", post(handlers::apply_fixes));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Start the web server and run until Ctrl+C.
pub async fn run_server(
    state: AppState,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;

    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use biaslens::{BiasLens, BiasLensConfig};
    use tempfile::TempDir;
    use tower::ServiceExt;

    const HIRING: &str = "Target,Predicted,Gender\n\
                          hired,hired,male\n\
                          not hired,not hired,male\n\
                          hired,not hired,female\n\
                          hired,hired,male\n";

    const BOUNDARY: &str = "biaslens-test-boundary";

    fn test_state(dir: &TempDir) -> AppState {
        let lens = BiasLens::in_memory(BiasLensConfig::new().with_data_dir(dir.path()));
        AppState::new(Arc::new(lens))
    }

    fn multipart_body(field: &str, file_name: &str, content: &str) -> String {
        format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: text/csv\r\n\r\n\
             {content}\r\n\
             --{b}--\r\n",
            b = BOUNDARY,
        )
    }

    fn upload_request(field: &str, content: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(field, "hiring.csv", content)))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Upload and analyze the hiring fixture, returning the analysis id.
    async fn analyzed(state: &AppState) -> u64 {
        let response = create_router(state.clone())
            .oneshot(upload_request("file", HIRING))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let dataset_id = json_body(response).await["dataset_id"].as_u64().unwrap();

        let response = create_router(state.clone())
            .oneshot(post_json(
                "/api/analyze",
                json!({"dataset_id": dataset_id, "sensitive_feature": "gender"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await["analysis_id"].as_u64().unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = TempDir::new().unwrap();
        let response = create_router(test_state(&dir))
            .oneshot(get("/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_upload_returns_created() {
        let dir = TempDir::new().unwrap();
        let response = create_router(test_state(&dir))
            .oneshot(upload_request("file", HIRING))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["message"], "File uploaded successfully!");
        assert_eq!(body["dataset_id"], 1);
    }

    #[tokio::test]
    async fn test_upload_without_file_field() {
        let dir = TempDir::new().unwrap();
        let response = create_router(test_state(&dir))
            .oneshot(upload_request("attachment", HIRING))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_flow() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let id = analyzed(&state).await;

        let response = create_router(state)
            .oneshot(get(&format!("/api/analysis/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["accuracy"], 75.0);
        assert_eq!(body["bias_score"], 1.0);
        assert_eq!(body["sensitive_feature"], "gender");
    }

    #[tokio::test]
    async fn test_analyze_missing_columns() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let response = create_router(state.clone())
            .oneshot(upload_request("file", "gender,score\nmale,1\n"))
            .await
            .unwrap();
        let dataset_id = json_body(response).await["dataset_id"].as_u64().unwrap();

        let response = create_router(state.clone())
            .oneshot(post_json(
                "/api/analyze",
                json!({"dataset_id": dataset_id, "sensitive_feature": "gender"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "Missing columns: target, predicted"
        );

        let response = create_router(state)
            .oneshot(get("/api/analysis/1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_analyze_unknown_dataset() {
        let dir = TempDir::new().unwrap();
        let response = create_router(test_state(&dir))
            .oneshot(post_json(
                "/api/analyze",
                json!({"dataset_id": 99, "sensitive_feature": "gender"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bias_report_endpoint() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let id = analyzed(&state).await;

        let response = create_router(state)
            .oneshot(get(&format!("/api/bias-report/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["message"], "Report data retrieved");
        assert_eq!(body["data"]["male_percentage"], 75.0);
        assert_eq!(body["data"]["female_percentage"], 25.0);
        assert_eq!(body["data"]["heatmap_data"][0]["size"], 500);
    }

    #[tokio::test]
    async fn test_suggestion_then_apply_fixes() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let id = analyzed(&state).await;

        let response = create_router(state.clone())
            .oneshot(get(&format!("/api/suggestion/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let categories: Vec<&str> = body["suggestions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["category"].as_str().unwrap())
            .collect();
        assert_eq!(categories, vec!["data", "model", "feature"]);

        let apply = format!("/api/apply-fixes/{}", id);
        let response = create_router(state.clone())
            .oneshot(post_json(&apply, json!({})))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["applied"], 3);

        let response = create_router(state.clone())
            .oneshot(post_json(&apply, json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["applied"], 0);

        let response = create_router(state)
            .oneshot(get(&format!("/api/suggestions/{}", id)))
            .await
            .unwrap();
        let listed = json_body(response).await;
        assert!(listed
            .as_array()
            .unwrap()
            .iter()
            .all(|s| s["applied"] == true));
    }

    #[tokio::test]
    async fn test_download_report() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let id = analyzed(&state).await;

        let response = create_router(state)
            .oneshot(get(&format!("/api/download-report/{}", id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            format!("attachment; filename=\"bias_report_{}.pdf\"", id).as_str()
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_unknown_analysis_is_not_found() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        for uri in [
            "/api/analysis/42",
            "/api/bias-report/42",
            "/api/suggestion/42",
            "/api/download-report/42",
        ] {
            let response = create_router(state.clone()).oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        }
    }
}
