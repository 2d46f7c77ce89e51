//! Summarization and urgency classification with offline fallback
//!
//! Results are best effort. A remote answer is used when the backend is
//! usable and responds with well-formed output; otherwise the deterministic
//! heuristics in [`super::offline`] answer instead. Callers cannot tell the
//! two apart and no remote failure is ever returned.

use super::config::{ConfigResolver, IntelligenceConfig};
use super::models::{ClassificationResult, UrgencyLabel};
use super::offline::{classify_offline, clamp_token_budget, summarize_offline};
use super::remote::{ChatCompletionClient, CompletionBackend, CompletionRequest, RemoteError};
use crate::metrics::{ResultSource, METRICS};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

const SUMMARIZE_SYSTEM_PROMPT: &str =
    "You summarize notification text concisely, in at most one short sentence.";

const CLASSIFY_SYSTEM_PROMPT: &str = "Classify notification urgency. Respond ONLY with a JSON object like \
     {\"urgency\": 0.75, \"label\": \"urgent\"} where urgency is a number in [0,1].";

const CLASSIFY_MAX_TOKENS: usize = 30;

/// Text intelligence engine
pub struct TextIntelligence {
    resolver: ConfigResolver,
    backend: Arc<dyn CompletionBackend>,
}

impl TextIntelligence {
    /// Create an engine over an arbitrary backend
    pub fn new(resolver: ConfigResolver, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { resolver, backend }
    }

    /// Create an engine talking to the configured chat completions endpoint
    pub fn from_config(config: IntelligenceConfig) -> Result<Self, RemoteError> {
        let client = ChatCompletionClient::new(config.timeout())?;
        Ok(Self::new(ConfigResolver::with_config(config), Arc::new(client)))
    }

    /// The configuration used when a call passes no override
    pub fn config(&self) -> &IntelligenceConfig {
        self.resolver.resolve()
    }

    /// Summarize `text` within a token budget.
    ///
    /// `max_tokens` is clamped into `[16, 200]`, unset or zero meaning 60.
    pub async fn summarize(
        &self,
        text: &str,
        max_tokens: Option<i64>,
        config: Option<&IntelligenceConfig>,
    ) -> String {
        let start = Instant::now();
        let config = self.resolver.resolve_with(config);
        let budget = clamp_token_budget(max_tokens);

        if !config.is_usable() {
            METRICS.record_intelligence("summarize", ResultSource::Offline, start.elapsed().as_secs_f64());
            return summarize_offline(text, budget);
        }

        let request = CompletionRequest {
            system: SUMMARIZE_SYSTEM_PROMPT.to_string(),
            user: format!("{}\n\nReturn at most {} tokens.", text, budget),
            temperature: 0.2,
            max_tokens: budget,
        };

        match self.backend.complete(config, request).await {
            Ok(summary) => {
                debug!("Remote summary produced ({} chars)", summary.chars().count());
                METRICS.record_intelligence("summarize", ResultSource::Remote, start.elapsed().as_secs_f64());
                summary
            }
            Err(e) => {
                warn!("Remote summarize failed, using offline summary: {}", e);
                METRICS.record_remote_failure("summarize", e.reason());
                METRICS.record_intelligence("summarize", ResultSource::Fallback, start.elapsed().as_secs_f64());
                summarize_offline(text, budget)
            }
        }
    }

    /// Score the urgency of `text`, optionally boosted by priority hints
    pub async fn classify(
        &self,
        text: &str,
        hints: &[String],
        config: Option<&IntelligenceConfig>,
    ) -> ClassificationResult {
        let start = Instant::now();
        let config = self.resolver.resolve_with(config);

        if !config.is_usable() {
            METRICS.record_intelligence("classify", ResultSource::Offline, start.elapsed().as_secs_f64());
            return classify_offline(text, hints);
        }

        let mut user = text.to_string();
        if !hints.is_empty() {
            user.push_str("\nPriority hints: ");
            user.push_str(&hints.join(", "));
        }

        let request = CompletionRequest {
            system: CLASSIFY_SYSTEM_PROMPT.to_string(),
            user,
            temperature: 0.1,
            max_tokens: CLASSIFY_MAX_TOKENS,
        };

        let outcome = self
            .backend
            .complete(config, request)
            .await
            .and_then(|content| parse_classification(&content));

        match outcome {
            Ok(result) => {
                METRICS.record_intelligence("classify", ResultSource::Remote, start.elapsed().as_secs_f64());
                result
            }
            Err(e) => {
                warn!("Remote classify failed, using offline heuristic: {}", e);
                METRICS.record_remote_failure("classify", e.reason());
                METRICS.record_intelligence("classify", ResultSource::Fallback, start.elapsed().as_secs_f64());
                classify_offline(text, hints)
            }
        }
    }
}

/// Parse a `{"urgency": .., "label": ..}` payload returned by the backend.
///
/// The label is advisory: the returned label is always derived from the
/// clamped, rounded urgency.
fn parse_classification(content: &str) -> Result<ClassificationResult, RemoteError> {
    let payload: Value =
        serde_json::from_str(content).map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;

    let object = payload
        .as_object()
        .ok_or_else(|| RemoteError::InvalidResponse("expected a JSON object".to_string()))?;

    let urgency = match object.get("urgency") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or(RemoteError::MissingField("urgency"))?;

    let result = ClassificationResult::from_score(urgency)
        .ok_or_else(|| RemoteError::InvalidResponse(format!("urgency {} is not finite", urgency)))?;

    if let Some(reported) = object.get("label").and_then(Value::as_str) {
        if UrgencyLabel::parse(reported) != Some(result.label) {
            debug!(
                "Remote label '{}' ignored; urgency {} maps to '{}'",
                reported,
                result.urgency,
                result.label.as_str()
            );
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Backend that returns a fixed outcome and records the prompts it saw
    struct ScriptedBackend {
        reply: Result<String, fn() -> RemoteError>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedBackend {
        fn replying(content: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(content.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(error: fn() -> RemoteError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(error),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(
            &self,
            _config: &IntelligenceConfig,
            request: CompletionRequest,
        ) -> Result<String, RemoteError> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Ok(content) => Ok(content.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn engine(backend: Arc<ScriptedBackend>, config: IntelligenceConfig) -> TextIntelligence {
        TextIntelligence::new(ConfigResolver::with_config(config), backend)
    }

    fn hints(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_disabled_never_calls_backend() {
        let backend = ScriptedBackend::replying("remote summary");
        let engine = engine(backend.clone(), IntelligenceConfig::disabled());

        let summary = engine.summarize("Rent due tomorrow", None, None).await;
        assert_eq!(summary, "Summary: Rent due tomorrow");

        let result = engine.classify("Rent due tomorrow", &[], None).await;
        assert_eq!(result.urgency, 0.55);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_enabled_without_key_stays_offline() {
        let backend = ScriptedBackend::replying("remote summary");
        let mut config = IntelligenceConfig::disabled();
        config.use_remote = true;
        let engine = engine(backend.clone(), config);

        let summary = engine.summarize("Rent due tomorrow", None, None).await;
        assert!(summary.starts_with("Summary: "));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_remote_summary_used() {
        let backend = ScriptedBackend::replying("Rent is due tomorrow.");
        let engine = engine(backend.clone(), IntelligenceConfig::remote("sk-test"));

        let summary = engine.summarize("Your rent is due tomorrow", Some(500), None).await;
        assert_eq!(summary, "Rent is due tomorrow.");

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0].max_tokens, 200);
        assert!(seen[0].user.ends_with("Return at most 200 tokens."));
    }

    #[tokio::test]
    async fn test_summary_failure_matches_offline() {
        let text = "Incident triggered on api-prod-1. ".repeat(12);
        let backend = ScriptedBackend::failing(|| RemoteError::Timeout("deadline elapsed".into()));
        let failing = engine(backend.clone(), IntelligenceConfig::remote("sk-test"));
        let offline = engine(ScriptedBackend::replying("unused"), IntelligenceConfig::disabled());

        assert_eq!(
            failing.summarize(&text, Some(20), None).await,
            offline.summarize(&text, Some(20), None).await
        );
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_remote_classification_clamped_and_relabelled() {
        let backend = ScriptedBackend::replying(r#"{"urgency": 1.4, "label": "critical"}"#);
        let engine = engine(backend, IntelligenceConfig::remote("sk-test"));

        let result = engine.classify("Server on fire", &[], None).await;
        assert_eq!(result.urgency, 1.0);
        assert_eq!(result.label, UrgencyLabel::Urgent);
    }

    #[tokio::test]
    async fn test_remote_label_never_contradicts_urgency() {
        let backend = ScriptedBackend::replying(r#"{"urgency": 0.2, "label": "urgent"}"#);
        let engine = engine(backend, IntelligenceConfig::remote("sk-test"));

        let result = engine.classify("Newsletter", &[], None).await;
        assert_eq!(result.urgency, 0.2);
        assert_eq!(result.label, UrgencyLabel::Normal);
    }

    #[tokio::test]
    async fn test_classify_prompt_includes_hints() {
        let backend = ScriptedBackend::replying(r#"{"urgency": 0.7}"#);
        let engine = engine(backend.clone(), IntelligenceConfig::remote("sk-test"));

        let result = engine
            .classify("Weekly update from Product team", &hints(&["product team", "ceo"]), None)
            .await;
        assert_eq!(result.urgency, 0.7);

        let seen = backend.seen.lock().unwrap();
        assert!(seen[0].user.ends_with("\nPriority hints: product team, ceo"));
        assert_eq!(seen[0].max_tokens, 30);
    }

    #[tokio::test]
    async fn test_malformed_classification_matches_offline() {
        let text = "Weekly update from Product team";
        let h = hints(&["product team"]);
        let offline = classify_offline(text, &h);

        for reply in ["not json", r#"{"label": "urgent"}"#, r#"{"urgency": "high"}"#, "[0.9]"] {
            let engine = engine(ScriptedBackend::replying(reply), IntelligenceConfig::remote("sk-test"));
            assert_eq!(engine.classify(text, &h, None).await, offline, "reply: {reply}");
        }

        let failures: [fn() -> RemoteError; 2] = [
            || RemoteError::Upstream { status: 503 },
            || RemoteError::Timeout("deadline elapsed".into()),
        ];
        for failure in failures {
            let backend = ScriptedBackend::failing(failure);
            let engine = engine(backend.clone(), IntelligenceConfig::remote("sk-test"));
            assert_eq!(engine.classify(text, &h, None).await, offline);
            assert_eq!(backend.calls(), 1);
        }
    }

    #[tokio::test]
    async fn test_explicit_config_overrides_for_one_call() {
        let backend = ScriptedBackend::replying("remote summary");
        let engine = engine(backend.clone(), IntelligenceConfig::disabled());
        let explicit = IntelligenceConfig::remote("sk-override");

        assert_eq!(engine.summarize("hello", None, Some(&explicit)).await, "remote summary");
        assert_eq!(engine.summarize("hello", None, None).await, "Summary: hello");
        assert_eq!(backend.calls(), 1);
    }

    #[test]
    fn test_parse_numeric_string_urgency() {
        let result = parse_classification(r#"{"urgency": "0.657"}"#).unwrap();
        assert_eq!(result.urgency, 0.66);
        assert!(result.is_urgent());
    }

    #[test]
    fn test_parse_rejects_missing_urgency() {
        assert!(matches!(
            parse_classification(r#"{"label": "normal"}"#),
            Err(RemoteError::MissingField("urgency"))
        ));
    }
}
