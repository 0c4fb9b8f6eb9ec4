//! Interpretation of raw model output: argument coercion, invocation
//! matching, description synthesis, and response segmentation.
//!
//! ```rust
//! use vparse::{ResponseParser, ToolSpec};
//!
//! let parser = ResponseParser::new();
//! let tools = vec![ToolSpec::new("book_hotel", "Books a hotel by ID")];
//! let result = parser.parse("book_hotel(hotel_id=123)", &tools);
//!
//! assert_eq!(result.content, "I'll book hotel ID 123 for you.");
//! assert_eq!(result.invocations[0].id, "call_0");
//! ```

mod args;
mod describe;
mod matcher;
mod segment;

pub use args::{ArgMap, ArgValue, coerce_arguments};
pub use describe::DescriptionTemplates;
pub use matcher::{InvocationMatch, find_marked, match_standalone};
pub use segment::{Invocation, ParseResult, ResponseParser, ToolSpec};
