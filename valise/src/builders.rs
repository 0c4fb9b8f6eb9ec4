//! Stable session construction surface for facade consumers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use vchat::AssistantSession;
use vprovider::{
    ProviderError, ReplicateGenerator, ReplicateHttpTransport, SecretString, resolve_api_token,
};

#[derive(Debug, Clone)]
pub struct SessionBuildConfig {
    pub api_token: String,
    pub model: Option<String>,
    pub timeout: Duration,
}

impl SessionBuildConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            model: None,
            timeout: Duration::from_secs(90),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub fn replicate_session(
    api_token: impl Into<String>,
) -> Result<AssistantSession, ProviderError> {
    replicate_session_with_config(SessionBuildConfig::new(api_token))
}

/// Builds a session from `REPLICATE_API_TOKEN` when no explicit token is
/// at hand. An unconfigured session is returned if the variable is unset,
/// so the caller can still `configure` later.
pub fn replicate_session_from_env() -> Result<AssistantSession, ProviderError> {
    match resolve_api_token(None) {
        Some(token) => {
            replicate_session_with_config(SessionBuildConfig::new(token.expose()))
        }
        None => Ok(AssistantSession::unconfigured()),
    }
}

pub fn replicate_session_with_config(
    config: SessionBuildConfig,
) -> Result<AssistantSession, ProviderError> {
    let api_token = config.api_token.trim().to_string();
    if api_token.is_empty() {
        return Err(ProviderError::authentication(
            "Replicate API token must not be empty",
        ));
    }

    let http = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;

    let transport = Arc::new(ReplicateHttpTransport::new(http));
    let mut generator = ReplicateGenerator::new(transport, SecretString::new(api_token));
    if let Some(model) = config.model {
        generator = generator.with_model(model);
    }

    Ok(AssistantSession::new(Arc::new(generator)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vprovider::ProviderErrorKind;

    #[test]
    fn blank_token_is_rejected_before_building_a_client() {
        let error = replicate_session("   ").expect_err("blank token must fail");
        assert_eq!(error.kind, ProviderErrorKind::Authentication);
    }

    #[test]
    fn valid_token_builds_a_configured_session() {
        let session = replicate_session("r8_test_token").expect("session should build");
        assert!(session.is_configured());
    }

    #[test]
    fn config_accepts_model_and_timeout_overrides() {
        let config = SessionBuildConfig::new("r8_test_token")
            .with_model("meta/meta-llama-3-70b-instruct")
            .with_timeout(Duration::from_secs(10));

        let session = replicate_session_with_config(config).expect("session should build");
        assert!(session.is_configured());
    }
}
