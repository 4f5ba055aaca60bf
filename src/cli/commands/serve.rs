//! Web interface and HTTP API.
//!
//! Serves the single-page UI and the endpoints it calls. API keys arrive with
//! each request and are used only for that request.

use crate::cli::Output;
use crate::config::Settings;
use crate::credentials::Credentials;
use crate::error::{BlogcastError, ErrorKind};
use crate::orchestrator::{Orchestrator, Podcast};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// File name offered when downloading a podcast.
const PODCAST_FILENAME: &str = "podcast.wav";
/// File name offered when downloading a summary.
const SUMMARY_FILENAME: &str = "summary.txt";
const PODCAST_MIME: &str = "audio/wav";

/// Shared application state.
pub struct AppState {
    orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }
}

/// Run the web server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let artifact_dir = settings.artifact_dir();
    let retention = settings.artifacts.max_files;

    let state = Arc::new(AppState::new(Orchestrator::new(settings)?));
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Blogcast");
    println!();
    Output::success(&format!("Open http://{} in your browser", addr));
    println!();
    Output::kv("Podcasts", &artifact_dir.display().to_string());
    Output::kv(
        "Retention",
        &retention.map_or_else(|| "keep all".to_string(), |n| format!("keep latest {}", n)),
    );
    println!();
    println!("Endpoints:");
    Output::kv("Web UI", "GET  /");
    Output::kv("Health", "GET  /health");
    Output::kv("Generate", "POST /api/podcast");
    Output::kv("Audio", "GET  /api/podcast/{id}/audio");
    Output::kv("Download", "GET  /api/podcast/{id}/download");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/podcast", post(generate))
        .route("/api/podcast/{id}/audio", get(audio))
        .route("/api/podcast/{id}/download", get(download))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct PodcastRequest {
    url: String,
    #[serde(default)]
    openai_api_key: String,
    #[serde(default)]
    elevenlabs_api_key: String,
    #[serde(default)]
    firecrawl_api_key: String,
}

impl PodcastRequest {
    fn credentials(&self) -> Credentials {
        Credentials::new(
            self.openai_api_key.as_str(),
            self.elevenlabs_api_key.as_str(),
            self.firecrawl_api_key.as_str(),
        )
    }
}

/// Everything the page needs to present a finished podcast.
#[derive(Serialize, Deserialize, Debug)]
struct PodcastView {
    id: String,
    source_url: String,
    audio_url: String,
    download_url: String,
    filename: String,
    mime_type: String,
    summary: Option<String>,
    summary_filename: String,
}

impl From<Podcast> for PodcastView {
    fn from(podcast: Podcast) -> Self {
        let id = podcast.artifact.id.to_string();
        Self {
            audio_url: format!("/api/podcast/{}/audio", id),
            download_url: format!("/api/podcast/{}/download", id),
            id,
            source_url: podcast.source_url.to_string(),
            filename: PODCAST_FILENAME.to_string(),
            mime_type: PODCAST_MIME.to_string(),
            summary: podcast.summary,
            summary_filename: SUMMARY_FILENAME.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    kind: ErrorKind,
    error: String,
}

/// A pipeline error rendered as one user-facing message.
struct ApiError(BlogcastError);

impl From<BlogcastError> for ApiError {
    fn from(e: BlogcastError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match (&self.0, self.0.kind()) {
            (BlogcastError::ArtifactNotFound(_), _) => StatusCode::NOT_FOUND,
            (_, ErrorKind::Configuration) | (_, ErrorKind::Input) => StatusCode::BAD_REQUEST,
            (_, ErrorKind::Orchestration) | (_, ErrorKind::EmptyResult) => StatusCode::BAD_GATEWAY,
        };

        let body = ErrorResponse {
            kind: self.0.kind(),
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

// === Handlers ===

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PodcastRequest>,
) -> Result<Json<PodcastView>, ApiError> {
    let podcast = state
        .orchestrator
        .generate(&req.credentials(), &req.url)
        .await
        .inspect_err(|e| warn!("Podcast request failed ({}): {}", e.kind(), e))?;

    Ok(Json(podcast.into()))
}

async fn audio(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    serve_artifact(&state, &id, "inline").await
}

async fn download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    serve_artifact(&state, &id, "attachment").await
}

async fn serve_artifact(state: &AppState, id: &str, disposition: &str) -> Result<Response, ApiError> {
    let path = state.orchestrator.store().path_for(id)?;
    let bytes = tokio::fs::read(&path).await.map_err(BlogcastError::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, PODCAST_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("{}; filename=\"{}\"", disposition, PODCAST_FILENAME),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactStore;
    use crate::config::Prompts;
    use crate::orchestrator::tests::{keys, summary_output, MockRuntime};
    use crate::orchestrator::RunOutput;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::sync::atomic::Ordering;
    use tower::ServiceExt;

    fn app(runtime: Arc<MockRuntime>, dir: &std::path::Path) -> Router {
        let orchestrator =
            Orchestrator::with_components(runtime, ArtifactStore::new(dir), Prompts::default());
        router(Arc::new(AppState::new(orchestrator)))
    }

    fn post_podcast(url: &str, creds: &Credentials) -> Request<Body> {
        let body = serde_json::json!({
            "url": url,
            "openai_api_key": creds.openai,
            "elevenlabs_api_key": creds.elevenlabs,
            "firecrawl_api_key": creds.firecrawl,
        });
        Request::builder()
            .method("POST")
            .uri("/api/podcast")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn file_count(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).map(|e| e.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn test_index_page() {
        let temp = tempfile::tempdir().unwrap();
        let app = app(Arc::new(MockRuntime::returning(summary_output())), temp.path());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Generate Podcast"));
        assert!(html.contains("type=\"password\""));
    }

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let runtime = Arc::new(MockRuntime::returning(summary_output()));
        let app = app(runtime.clone(), temp.path());

        let response = app.oneshot(post_podcast("not a url", &keys())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["kind"], "input");
        assert!(body["error"].as_str().unwrap().contains("valid URL"));
        assert_eq!(runtime.calls.load(Ordering::SeqCst), 0);
        assert_eq!(file_count(temp.path()), 0);
    }

    #[tokio::test]
    async fn test_missing_keys_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let runtime = Arc::new(MockRuntime::returning(summary_output()));
        let app = app(runtime.clone(), temp.path());

        let creds = Credentials::new("sk-test", "el-test", "");
        let response = app
            .oneshot(post_podcast("https://example.com/post", &creds))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["kind"], "configuration");
        assert_eq!(runtime.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_runtime_failure_single_error() {
        let temp = tempfile::tempdir().unwrap();
        let runtime = Arc::new(MockRuntime::failing(BlogcastError::Scrape(
            "401 Unauthorized".to_string(),
        )));
        let app = app(runtime, temp.path());

        let response = app
            .oneshot(post_podcast("https://example.com/post", &keys()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = json_body(response).await;
        assert_eq!(body["kind"], "orchestration");
        assert!(body["error"].as_str().unwrap().contains("401 Unauthorized"));
        assert_eq!(file_count(temp.path()), 0);
    }

    #[tokio::test]
    async fn test_empty_audio_reported() {
        let temp = tempfile::tempdir().unwrap();
        let runtime = Arc::new(MockRuntime::returning(RunOutput {
            audio: Vec::new(),
            output: None,
        }));
        let app = app(runtime, temp.path());

        let response = app
            .oneshot(post_podcast("https://example.com/post", &keys()))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["kind"], "empty_result");
        assert_eq!(file_count(temp.path()), 0);
    }

    #[tokio::test]
    async fn test_full_podcast_flow() {
        let temp = tempfile::tempdir().unwrap();
        let app = app(Arc::new(MockRuntime::returning(summary_output())), temp.path());

        let response = app
            .clone()
            .oneshot(post_podcast("https://blog.example.com/post", &keys()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let view: PodcastView = serde_json::from_value(json_body(response).await).unwrap();
        assert_eq!(view.summary.as_deref(), Some("summary text"));
        assert_eq!(view.filename, "podcast.wav");
        assert_eq!(view.mime_type, "audio/wav");
        assert_eq!(view.summary_filename, "summary.txt");
        assert_eq!(file_count(temp.path()), 1);

        let response = app
            .clone()
            .oneshot(Request::builder().uri(&view.download_url).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/wav");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"podcast.wav\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"RIFF-fake-wav");

        let response = app
            .oneshot(Request::builder().uri(&view.audio_url).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_artifact_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let app = app(Arc::new(MockRuntime::returning(summary_output())), temp.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/podcast/not-a-uuid/audio")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
