//! Unified facade over the valise workspace crates.
//!
//! This crate is designed to be the single dependency for most
//! applications. It re-exports the core valise crates and provides
//! convenience constructors for the common Replicate-backed setup.
//!
//! ```rust
//! use valise::prelude::*;
//!
//! let parser = ResponseParser::new();
//! let tools = vec![ToolSpec::new("book_hotel", "Books a hotel by ID")];
//! let result = parser.parse("TOOL_CALL: book_hotel(hotel_id=7)", &tools);
//!
//! assert_eq!(result.content, "I'll book hotel ID 7 for you.");
//! ```

pub mod builders;
pub mod prelude;

pub use vchat;
pub use vcommon;
pub use vparse;
pub use vprovider;

pub use builders::{
    SessionBuildConfig, replicate_session, replicate_session_from_env,
    replicate_session_with_config,
};
pub use vchat::{
    AssistantSession, ChatError, ChatErrorKind, ConversationTurn, DEFAULT_SYSTEM_PROMPT, Role,
    TurnRequest,
};
pub use vcommon::{BoxFuture, GenerationOptions};
pub use vparse::{
    ArgMap, ArgValue, DescriptionTemplates, Invocation, InvocationMatch, ParseResult,
    ResponseParser, ToolSpec, coerce_arguments, find_marked, match_standalone,
};
pub use vprovider::{
    DEFAULT_MODEL, GenerationRequest, GeneratorFuture, ProviderError, ProviderErrorKind,
    REPLICATE_API_TOKEN_ENV, REPLICATE_BASE_URL, ReplicateGenerator, ReplicateHttpTransport,
    ReplicateTransport, SecretString, StaticTextGenerator, TextGenerator, resolve_api_token,
};
