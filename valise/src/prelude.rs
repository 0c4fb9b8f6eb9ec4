//! Convenient single-import surface for applications.

pub use crate::builders::{
    SessionBuildConfig, replicate_session, replicate_session_from_env,
    replicate_session_with_config,
};
pub use vchat::{
    AssistantSession, ChatError, ChatErrorKind, ConversationTurn, DEFAULT_SYSTEM_PROMPT, Role,
    TurnRequest,
};
pub use vcommon::GenerationOptions;
pub use vparse::{
    ArgMap, ArgValue, DescriptionTemplates, Invocation, ParseResult, ResponseParser, ToolSpec,
};
pub use vprovider::{
    DEFAULT_MODEL, GenerationRequest, ProviderError, ProviderErrorKind, ReplicateGenerator,
    SecretString, StaticTextGenerator, TextGenerator, resolve_api_token,
};
