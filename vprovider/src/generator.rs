//! Text-generation contract consumed by the chat layer.
//!
//! ```rust
//! use vprovider::{GenerationRequest, StaticTextGenerator, TextGenerator};
//!
//! let generator = StaticTextGenerator::new("Hello there!");
//! let request = GenerationRequest::new("Say hello");
//! let _future = generator.generate(request);
//! ```

use vcommon::BoxFuture;

use crate::{GenerationRequest, ProviderError};

pub type GeneratorFuture<'a, T> = BoxFuture<'a, T>;

pub trait TextGenerator: Send + Sync {
    fn generate<'a>(
        &'a self,
        request: GenerationRequest,
    ) -> GeneratorFuture<'a, Result<String, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct StaticTextGenerator {
    response: String,
}

impl StaticTextGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl TextGenerator for StaticTextGenerator {
    fn generate<'a>(
        &'a self,
        request: GenerationRequest,
    ) -> GeneratorFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            Ok(self.response.clone())
        })
    }
}
