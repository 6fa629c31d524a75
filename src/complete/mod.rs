//! Autocomplete for directive names.
//!
//! Suggests candidates while the user types the first word of a `//`
//! comment, once that word starts with `@`. Candidates are the fixed
//! pseudo-directives followed by every registry option name.

use serde::Serialize;

use crate::registry::OptionRegistry;

/// Directive names with no backing option descriptor; they control sample
/// display behavior rather than compiler configuration.
pub const PSEUDO_DIRECTIVES: [&str; 7] = [
    "noErrors",
    "errors",
    "showEmit",
    "showEmittedFile",
    "noStaticSemanticInfo",
    "emit",
    "noErrorValidation",
];

const DIRECTIVE_DETAIL: &str = "Twoslash comment";

/// Kind tag carried by every directive suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    Directive,
}

/// One completion candidate, in the editor contract's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSuggestion {
    pub label: String,
    pub kind: CompletionKind,
    pub detail: String,
    pub insert_text: String,
}

/// Completion response; the editor contract wraps candidates in a
/// `suggestions` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Completions {
    pub suggestions: Vec<CompletionSuggestion>,
}

/// Zero-based cursor position within a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Suggests directive names for an in-progress `// @` comment.
///
/// Stateless; every call is independent and idempotent given the same
/// inputs.
pub struct DirectiveCompletions<'a> {
    registry: &'a OptionRegistry,
}

impl<'a> DirectiveCompletions<'a> {
    pub fn new(registry: &'a OptionRegistry) -> Self {
        Self { registry }
    }

    /// Complete against a plain text buffer and a cursor position,
    /// considering only the current line up to the cursor.
    pub fn complete_at(&self, text: &str, position: Position) -> Completions {
        let Some(line) = text.split('\n').nth(position.line as usize) else {
            return Completions::default();
        };
        let prefix: String = line.chars().take(position.column as usize).collect();
        self.complete_line(&prefix)
    }

    /// Complete against the current line's text up to the cursor.
    ///
    /// The prefix must start with the comment marker and hold exactly two
    /// space-separated words, the second starting with `@`; anything else
    /// gets no suggestions. The match on the typed text is a case-sensitive
    /// prefix match.
    pub fn complete_line(&self, line_prefix: &str) -> Completions {
        if !line_prefix.starts_with("//") {
            return Completions::default();
        }

        let line = line_prefix.replacen('\t', "", 1);
        let words: Vec<&str> = line.split(' ').collect();
        if words.len() != 2 {
            return Completions::default();
        }

        let Some(typed) = words[1].strip_prefix('@') else {
            return Completions::default();
        };

        let mut suggestions = Vec::new();
        for name in PSEUDO_DIRECTIVES {
            if name.starts_with(typed) {
                suggestions.push(suggestion(name));
            }
        }
        for name in self.registry.names() {
            if name.starts_with(typed) {
                suggestions.push(suggestion(name));
            }
        }

        Completions { suggestions }
    }
}

fn suggestion(name: &str) -> CompletionSuggestion {
    CompletionSuggestion {
        label: name.to_string(),
        kind: CompletionKind::Directive,
        detail: DIRECTIVE_DETAIL.to_string(),
        insert_text: name.to_string(),
    }
}
