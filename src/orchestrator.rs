//! Pipeline orchestrator for Blogcast.
//!
//! Coordinates one podcast request from URL validation to a stored audio file.

use crate::agent::{Agent, AgentResponse, ToolContext};
use crate::artifact::{Artifact, ArtifactStore};
use crate::config::{AgentPrompts, Prompts, Settings};
use crate::credentials::Credentials;
use crate::error::{BlogcastError, Result};
use crate::openai::create_client;
use crate::scraper::FirecrawlScraper;
use crate::speech::{AudioPayload, ElevenLabsSynthesizer};
use crate::validation::parse_source_url;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use url::Url;

/// The instruction handed to the runtime for one source URL.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRequest {
    pub url: Url,
    pub instruction: String,
}

impl TaskRequest {
    /// Build the request for a validated URL.
    pub fn new(url: Url, prompts: &AgentPrompts) -> Self {
        let instruction = prompts.task_for(url.as_str());
        Self { url, instruction }
    }
}

/// What the runtime hands back: any audio produced and the final text.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    pub audio: Vec<AudioPayload>,
    pub output: Option<String>,
}

impl From<AgentResponse> for RunOutput {
    fn from(response: AgentResponse) -> Self {
        let output = Some(response.content.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            audio: response.audio,
            output,
        }
    }
}

/// The external orchestration boundary.
///
/// One call per podcast. Implementations receive credentials explicitly and
/// must not rely on process-wide state.
#[async_trait]
pub trait PodcastRuntime: Send + Sync {
    async fn run(&self, credentials: &Credentials, request: &TaskRequest) -> Result<RunOutput>;
}

/// Runtime backed by an OpenAI tool-calling agent with Firecrawl and ElevenLabs tools.
pub struct AgentRuntime {
    settings: Settings,
    prompts: Prompts,
}

impl AgentRuntime {
    pub fn new(settings: Settings, prompts: Prompts) -> Self {
        Self { settings, prompts }
    }
}

#[async_trait]
impl PodcastRuntime for AgentRuntime {
    async fn run(&self, credentials: &Credentials, request: &TaskRequest) -> Result<RunOutput> {
        let client = create_client(&credentials.openai, &self.settings.openai)?;
        let scraper = FirecrawlScraper::new(&credentials.firecrawl, &self.settings.firecrawl)?;
        let synthesizer =
            ElevenLabsSynthesizer::new(&credentials.elevenlabs, &self.settings.elevenlabs)?;

        let tools = ToolContext::new(Arc::new(scraper), Arc::new(synthesizer))
            .with_max_content_chars(self.settings.firecrawl.max_content_chars)
            .with_max_speech_chars(self.settings.agent.max_summary_chars);

        let system_prompt = self
            .prompts
            .agent
            .system_prompt(self.settings.agent.max_summary_chars);

        let agent = Agent::new(client, tools, &self.settings.openai.model)
            .with_system_prompt(&system_prompt)
            .with_max_iterations(self.settings.agent.max_iterations);

        let response = agent.run(&request.instruction).await?;
        info!(
            "Agent finished in {} iteration(s) with {} tool call(s)",
            response.iterations,
            response.tool_calls.len()
        );
        for call in &response.tool_calls {
            debug!(success = call.success, "Tool call {}", call);
        }

        Ok(response.into())
    }
}

/// Steps of a single podcast request. Every request starts and ends in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Validating,
    Invoking,
    Persisting,
    Presenting,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Idle => write!(f, "idle"),
            Stage::Validating => write!(f, "validating"),
            Stage::Invoking => write!(f, "invoking"),
            Stage::Persisting => write!(f, "persisting"),
            Stage::Presenting => write!(f, "presenting"),
        }
    }
}

/// A finished podcast.
#[derive(Debug, Clone)]
pub struct Podcast {
    pub source_url: Url,
    pub artifact: Artifact,
    pub summary: Option<String>,
}

/// The main orchestrator for the Blogcast pipeline.
pub struct Orchestrator {
    runtime: Arc<dyn PodcastRuntime>,
    store: ArtifactStore,
    prompts: Prompts,
}

impl Orchestrator {
    /// Create an orchestrator using the agent runtime.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
        let store = ArtifactStore::new(settings.artifact_dir())
            .with_max_files(settings.artifacts.max_files);
        let runtime = Arc::new(AgentRuntime::new(settings, prompts.clone()));

        Ok(Self::with_components(runtime, store, prompts))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        runtime: Arc<dyn PodcastRuntime>,
        store: ArtifactStore,
        prompts: Prompts,
    ) -> Self {
        Self {
            runtime,
            store,
            prompts,
        }
    }

    /// Get the artifact store.
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Turn a blog URL into a stored podcast.
    ///
    /// Nothing is called or written unless the credentials are complete and
    /// the URL is valid. Runtime failures are logged here and not retried.
    #[instrument(skip(self, credentials), fields(url = %url))]
    pub async fn generate(&self, credentials: &Credentials, url: &str) -> Result<Podcast> {
        let result = self.run_stages(credentials, url).await;
        debug!(stage = %Stage::Idle, success = result.is_ok(), "Request finished");
        result
    }

    async fn run_stages(&self, credentials: &Credentials, url: &str) -> Result<Podcast> {
        info!(stage = %Stage::Validating, "Checking request");
        credentials.require_ready()?;
        let source_url = parse_source_url(url)?;

        info!(stage = %Stage::Invoking, "Running agent");
        let request = TaskRequest::new(source_url.clone(), &self.prompts.agent);
        let output = match self.runtime.run(credentials, &request).await {
            Ok(output) => output,
            Err(e) => {
                error!(error = ?e, "Error during podcast generation: {}", e);
                return Err(e);
            }
        };

        info!(stage = %Stage::Persisting, "Saving audio ({} payload(s))", output.audio.len());
        let artifact = self.store.persist(&output.audio)?;

        info!(stage = %Stage::Presenting, "Podcast {} ready", artifact.id);
        Ok(Podcast {
            source_url,
            artifact,
            summary: output.output,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Runtime that returns a canned result and counts calls.
    pub(crate) struct MockRuntime {
        pub calls: AtomicUsize,
        result: std::sync::Mutex<Option<Result<RunOutput>>>,
        repeat: Option<RunOutput>,
    }

    impl MockRuntime {
        pub(crate) fn returning(output: RunOutput) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: std::sync::Mutex::new(None),
                repeat: Some(output),
            }
        }

        pub(crate) fn failing(error: BlogcastError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: std::sync::Mutex::new(Some(Err(error))),
                repeat: None,
            }
        }
    }

    #[async_trait]
    impl PodcastRuntime for MockRuntime {
        async fn run(&self, _credentials: &Credentials, _request: &TaskRequest) -> Result<RunOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(output) = &self.repeat {
                return Ok(output.clone());
            }
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(BlogcastError::Agent("called twice".to_string())))
        }
    }

    pub(crate) fn keys() -> Credentials {
        Credentials::new("sk-test", "el-test", "fc-test")
    }

    pub(crate) fn summary_output() -> RunOutput {
        RunOutput {
            audio: vec![AudioPayload::from_bytes(b"RIFF-fake-wav", "audio/wav")],
            output: Some("summary text".to_string()),
        }
    }

    fn orchestrator(runtime: Arc<MockRuntime>, dir: &std::path::Path) -> Orchestrator {
        Orchestrator::with_components(runtime, ArtifactStore::new(dir), Prompts::default())
    }

    fn wav_files(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().extension().is_some_and(|x| x == "wav"))
                    .count()
            })
            .unwrap_or(0)
    }

    #[test]
    fn test_task_request_instruction() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        let request = TaskRequest::new(url, &AgentPrompts::default());
        assert_eq!(
            request.instruction,
            "Convert the blog to a podcast: https://blog.example.com/post"
        );
    }

    #[test]
    fn test_run_output_from_agent_response() {
        let response = AgentResponse {
            content: "  \n".to_string(),
            audio: Vec::new(),
            tool_calls: Vec::new(),
            iterations: 1,
        };
        let output: RunOutput = response.into();
        assert!(output.output.is_none());
        assert!(output.audio.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_makes_no_call() {
        let temp = tempfile::tempdir().unwrap();
        let runtime = Arc::new(MockRuntime::returning(summary_output()));
        let orch = orchestrator(runtime.clone(), temp.path());

        let err = orch.generate(&keys(), "not a url").await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Input);
        assert_eq!(runtime.calls.load(Ordering::SeqCst), 0);
        assert_eq!(wav_files(temp.path()), 0);
    }

    #[tokio::test]
    async fn test_missing_keys_make_no_call() {
        let temp = tempfile::tempdir().unwrap();
        let runtime = Arc::new(MockRuntime::returning(summary_output()));
        let orch = orchestrator(runtime.clone(), temp.path());

        let creds = Credentials::new("sk-test", "", "fc-test");
        let err = orch.generate(&creds, "https://example.com/post").await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
        assert_eq!(runtime.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_runtime_failure_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let runtime = Arc::new(MockRuntime::failing(BlogcastError::OpenAI(
            "Agent API error: 429 quota exceeded".to_string(),
        )));
        let orch = orchestrator(runtime.clone(), temp.path());

        let err = orch.generate(&keys(), "https://example.com/post").await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Orchestration);
        assert!(err.user_message().contains("quota exceeded"));
        assert_eq!(runtime.calls.load(Ordering::SeqCst), 1);
        assert_eq!(wav_files(temp.path()), 0);
    }

    #[tokio::test]
    async fn test_empty_audio_is_distinct_error() {
        let temp = tempfile::tempdir().unwrap();
        let runtime = Arc::new(MockRuntime::returning(RunOutput {
            audio: Vec::new(),
            output: Some("summary text".to_string()),
        }));
        let orch = orchestrator(runtime, temp.path());

        let err = orch.generate(&keys(), "https://example.com/post").await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::EmptyResult);
        assert_eq!(wav_files(temp.path()), 0);
    }

    #[tokio::test]
    async fn test_successful_generation() {
        let temp = tempfile::tempdir().unwrap();
        let runtime = Arc::new(MockRuntime::returning(summary_output()));
        let orch = orchestrator(runtime, temp.path());

        let podcast = orch
            .generate(&keys(), "https://blog.example.com/post")
            .await
            .unwrap();

        assert_eq!(wav_files(temp.path()), 1);
        assert_eq!(podcast.summary.as_deref(), Some("summary text"));
        assert_eq!(std::fs::read(&podcast.artifact.path).unwrap(), b"RIFF-fake-wav");
    }

    #[tokio::test]
    async fn test_two_runs_two_artifacts() {
        let temp = tempfile::tempdir().unwrap();
        let runtime = Arc::new(MockRuntime::returning(summary_output()));
        let orch = orchestrator(runtime, temp.path());

        let a = orch.generate(&keys(), "https://example.com/a").await.unwrap();
        let b = orch.generate(&keys(), "https://example.com/b").await.unwrap();

        assert_ne!(a.artifact.path, b.artifact.path);
        assert_eq!(wav_files(temp.path()), 2);
        assert!(orch.store().read(&a.artifact.id.to_string()).is_ok());
        assert!(orch.store().read(&b.artifact.id.to_string()).is_ok());
    }

    async fn scrape_page() -> axum::Json<serde_json::Value> {
        axum::Json(serde_json::json!({
            "success": true,
            "data": {"markdown": "# Rust\nRust is fast and safe.", "metadata": {"title": "Rust"}}
        }))
    }

    async fn speak(headers: axum::http::HeaderMap) -> (axum::http::StatusCode, Vec<u8>) {
        match headers.get("xi-api-key").and_then(|v| v.to_str().ok()) {
            Some("el-test") => (axum::http::StatusCode::OK, vec![0, 0, 1, 0, 2, 0, 3, 0]),
            _ => (axum::http::StatusCode::UNAUTHORIZED, Vec::new()),
        }
    }

    #[tokio::test]
    async fn test_agent_runtime_end_to_end() {
        use crate::agent::runner::tests::{final_reply, model_router, serve, tool_reply};
        use axum::routing::post;
        use serde_json::json;

        let (router, model) = model_router(vec![
            tool_reply(&[("scrape_website", json!({"url": "https://blog.example.com/post"}))]),
            tool_reply(&[("text_to_speech", json!({"text": "Rust is fast and safe."}))]),
            final_reply("Rust is fast and safe."),
        ]);
        let router = router
            .route("/v1/scrape", post(scrape_page))
            .route("/v1/text-to-speech/{voice_id}", post(speak));
        let base = serve(router).await;

        let temp = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.openai.api_base = Some(format!("{}/v1", base));
        settings.firecrawl.base_url = base.clone();
        settings.elevenlabs.base_url = base;
        settings.artifacts.dir = temp.path().display().to_string();

        let orch = Orchestrator::new(settings).unwrap();
        let podcast = orch
            .generate(&keys(), "https://blog.example.com/post")
            .await
            .unwrap();

        assert_eq!(model.requests.load(Ordering::SeqCst), 3);
        assert_eq!(podcast.summary.as_deref(), Some("Rust is fast and safe."));
        assert_eq!(wav_files(temp.path()), 1);

        let reader = hound::WavReader::open(&podcast.artifact.path).unwrap();
        assert_eq!(reader.spec().sample_rate, 24_000);
        assert_eq!(reader.len(), 4);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::Idle.to_string(), "idle");
        assert_eq!(Stage::Presenting.to_string(), "presenting");
    }
}
