//! Session adapter: one blocking round-trip to the generator per turn,
//! with an append-only conversation history owned by the session.

use std::sync::Arc;

use tracing::debug;
use vcommon::GenerationOptions;
use vparse::{ParseResult, ResponseParser};
use vprovider::{GenerationRequest, TextGenerator};

use crate::prompt::build_instructions;
use crate::{ChatError, ConversationTurn, Role, TurnRequest};

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_TOP_P: f32 = 1.0;

pub struct AssistantSession {
    generator: Option<Arc<dyn TextGenerator>>,
    parser: ResponseParser,
    history: Vec<ConversationTurn>,
}

impl std::fmt::Debug for AssistantSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantSession")
            .field("configured", &self.generator.is_some())
            .field("history_len", &self.history.len())
            .finish()
    }
}

impl AssistantSession {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
            parser: ResponseParser::new(),
            history: Vec::new(),
        }
    }

    /// A session without a generator. Every `send` fails with
    /// `NotConfigured` until `configure` supplies one.
    pub fn unconfigured() -> Self {
        Self {
            generator: None,
            parser: ResponseParser::new(),
            history: Vec::new(),
        }
    }

    pub fn with_parser(mut self, parser: ResponseParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub fn configure(&mut self, generator: Arc<dyn TextGenerator>) {
        self.generator = Some(generator);
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub async fn send(&mut self, request: TurnRequest) -> Result<ParseResult, ChatError> {
        let Some(generator) = &self.generator else {
            return Err(ChatError::not_configured(
                "no text generator is configured; supply an API token and retry",
            ));
        };

        if request.prompt.trim().is_empty() {
            return Err(ChatError::invalid_request("prompt must not be empty"));
        }

        let instructions = build_instructions(&request);
        let options = GenerationOptions {
            temperature: Some(
                request.options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            ),
            max_tokens: Some(request.options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)),
            top_p: Some(request.options.top_p.unwrap_or(DEFAULT_TOP_P)),
        };

        debug!(tools = request.tools.len(), "sending turn to generator");
        let raw = generator
            .generate(GenerationRequest::new(instructions).with_options(options))
            .await?;

        let result = self.parser.parse(&raw, &request.tools);
        debug!(invocations = result.invocations.len(), "turn parsed");

        self.history
            .push(ConversationTurn::new(Role::User, request.prompt));
        self.history
            .push(ConversationTurn::new(Role::Assistant, result.content.clone()));

        Ok(result)
    }
}
