//! Text-generation collaborator contract and the Replicate adapter.

mod credentials;
mod error;
mod generator;
mod request;

pub mod replicate;

pub use credentials::{REPLICATE_API_TOKEN_ENV, SecretString, resolve_api_token};
pub use error::{ProviderError, ProviderErrorKind};
pub use generator::{GeneratorFuture, StaticTextGenerator, TextGenerator};
pub use replicate::{
    DEFAULT_MODEL, REPLICATE_BASE_URL, ReplicateGenerator, ReplicateHttpTransport,
    ReplicateTransport,
};
pub use request::GenerationRequest;
