//! Replicate adapter implemented over a narrow prediction transport.

use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    GenerationRequest, GeneratorFuture, ProviderError, SecretString, TextGenerator,
};

pub const REPLICATE_BASE_URL: &str = "https://api.replicate.com/v1";
pub const DEFAULT_MODEL: &str = "meta/meta-llama-3-8b-instruct";

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_LENGTH: u32 = 1024;
const DEFAULT_TOP_P: f32 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionInput {
    pub prompt: String,
    pub temperature: f32,
    pub max_length: u32,
    pub top_p: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub input: PredictionInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub output: Option<PredictionOutput>,
    #[serde(default)]
    pub error: Option<String>,
}

// Replicate returns language-model output as a list of text chunks; other
// model families return one plain string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PredictionOutput {
    Chunks(Vec<String>),
    Text(String),
}

impl PredictionResponse {
    pub fn into_text(self) -> Result<String, ProviderError> {
        if let Some(error) = self.error {
            return Err(ProviderError::transport(format!(
                "prediction failed: {error}"
            )));
        }

        if self.status.as_deref() == Some("failed") {
            return Err(ProviderError::transport("prediction reported failure"));
        }

        match self.output {
            Some(PredictionOutput::Chunks(chunks)) => Ok(chunks.concat()),
            Some(PredictionOutput::Text(text)) => Ok(text),
            None => Err(ProviderError::unavailable(
                "prediction returned no output",
            )),
        }
    }
}

pub trait ReplicateTransport: Send + Sync {
    fn predict<'a>(
        &'a self,
        model: &'a str,
        request: PredictionRequest,
        token: &'a SecretString,
    ) -> GeneratorFuture<'a, Result<PredictionResponse, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct ReplicateHttpTransport {
    client: Client,
    base_url: String,
}

impl ReplicateHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: REPLICATE_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}/predictions",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("Replicate request failed with status {status}"));

        warn!(status = %status, "replicate prediction request failed");
        error_for_status(status, message)
    }
}

impl ReplicateTransport for ReplicateHttpTransport {
    fn predict<'a>(
        &'a self,
        model: &'a str,
        request: PredictionRequest,
        token: &'a SecretString,
    ) -> GeneratorFuture<'a, Result<PredictionResponse, ProviderError>> {
        Box::pin(async move {
            let url = self.endpoint(model);
            debug!(model, "sending replicate prediction request");

            let response = self
                .client
                .post(url)
                .bearer_auth(token.expose())
                .header("Prefer", "wait")
                .json(&request)
                .send()
                .await
                .map_err(|err| {
                    if err.is_timeout() {
                        ProviderError::timeout(err.to_string())
                    } else {
                        ProviderError::transport(err.to_string())
                    }
                })?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            response
                .json::<PredictionResponse>()
                .await
                .map_err(|err| ProviderError::transport(err.to_string()))
        })
    }
}

fn error_for_status(status: StatusCode, message: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::authentication(message)
        }
        StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ProviderError::timeout(message)
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::invalid_request(message)
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
            ProviderError::unavailable(message)
        }
        _ => ProviderError::transport(message),
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    parsed
        .get("detail")
        .or_else(|| parsed.get("error"))
        .and_then(serde_json::Value::as_str)
        .map(ToString::to_string)
}

pub struct ReplicateGenerator {
    transport: Arc<dyn ReplicateTransport>,
    token: SecretString,
    model: String,
}

impl ReplicateGenerator {
    pub fn new(transport: Arc<dyn ReplicateTransport>, token: SecretString) -> Self {
        Self {
            transport,
            token,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn default_http_transport(client: Client) -> ReplicateHttpTransport {
        ReplicateHttpTransport::new(client)
    }

    fn build_prediction(&self, request: GenerationRequest) -> PredictionRequest {
        PredictionRequest {
            input: PredictionInput {
                prompt: request.prompt,
                temperature: request.options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
                max_length: request.options.max_tokens.unwrap_or(DEFAULT_MAX_LENGTH),
                top_p: request.options.top_p.unwrap_or(DEFAULT_TOP_P),
            },
        }
    }
}

impl TextGenerator for ReplicateGenerator {
    fn generate<'a>(
        &'a self,
        request: GenerationRequest,
    ) -> GeneratorFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let prediction = self.build_prediction(request);
            let response = self
                .transport
                .predict(&self.model, prediction, &self.token)
                .await?;

            let text = response.into_text()?;
            debug!(chars = text.len(), "replicate prediction completed");
            Ok(text)
        })
    }
}
