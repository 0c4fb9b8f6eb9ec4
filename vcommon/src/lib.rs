//! Shared future alias and generation settings for the valise workspace crates.
//!
//! ```rust
//! use vcommon::GenerationOptions;
//!
//! let options = GenerationOptions::default()
//!     .with_temperature(0.7)
//!     .with_max_tokens(1024)
//!     .with_top_p(1.0);
//!
//! assert_eq!(options.temperature, Some(0.7));
//! assert_eq!(options.max_tokens, Some(1024));
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use vcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod options {
    //! Generation settings passed to the text-generation collaborator.
    //!
    //! ```rust
    //! use vcommon::GenerationOptions;
    //!
    //! let options = GenerationOptions::default()
    //!     .with_temperature(0.2)
    //!     .with_max_tokens(128);
    //!
    //! assert_eq!(options.temperature, Some(0.2));
    //! assert_eq!(options.top_p, None);
    //! ```

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GenerationOptions {
        pub temperature: Option<f32>,
        pub max_tokens: Option<u32>,
        pub top_p: Option<f32>,
    }

    impl GenerationOptions {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = Some(max_tokens);
            self
        }

        pub fn with_top_p(mut self, top_p: f32) -> Self {
            self.top_p = Some(top_p);
            self
        }
    }
}

pub use future::BoxFuture;
pub use options::GenerationOptions;
