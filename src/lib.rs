#![forbid(unsafe_code)]

//! # twoslash-directives
//!
//! Extracts configuration directives embedded as comments in a code sample
//! and offers autocomplete for those directives inside a text editor.
//! Support library for an interactive code-playground feature.
//!
//! Two comment shapes are recognized:
//!
//! - `// @strict` — boolean shorthand
//! - `// @target: es2017` — valued directive
//!
//! Option metadata is supplied by the caller as an [`OptionRegistry`];
//! directive names not present in the registry are ignored.
//!
//! ## Example
//!
//! ```rust
//! use twoslash::{DirectiveExtractor, OptionDescriptor, OptionRegistry};
//!
//! let registry = OptionRegistry::new([
//!     OptionDescriptor::boolean("strict"),
//!     OptionDescriptor::list("lib", "string"),
//! ]);
//!
//! let extractor = DirectiveExtractor::new(&registry);
//! let options = extractor.extract("// @strict\n// @lib: dom,es2015\nconst x = 1;\n");
//!
//! assert_eq!(options.len(), 2);
//! assert_eq!(options.get("strict").and_then(|v| v.as_bool()), Some(true));
//! ```

pub mod complete;
pub mod diagnostics;
pub mod error;
pub mod parse;
pub mod registry;

// Re-exports
pub use complete::{
    CompletionKind, CompletionSuggestion, Completions, DirectiveCompletions, Position,
    PSEUDO_DIRECTIVES,
};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use error::{DirectiveError, Result};
pub use parse::{parse_primitive, DirectiveExtractor, OptionValue, ParsedOptions};
pub use registry::{OptionDescriptor, OptionRegistry, OptionType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
