//! Directive extraction from code samples.
//!
//! Scans sample text for two single-line comment shapes and coerces the
//! matched values against the option registry:
//!
//! - `// @name` — boolean shorthand, coerced from the literal `"true"`
//! - `// @name: value` — valued form, the rest of the line is the raw value
//!
//! Unknown names and bad values never raise; the option is simply not set
//! and, where a descriptor was involved, a diagnostic is reported.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::registry::{OptionRegistry, OptionType};

/// Boolean shorthand: directive name only, no value.
static BOOLEAN_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//\s?@(\w+)$").unwrap());

/// Valued form: name, colon, then the raw value to the end of the line.
/// At most one space after the colon is swallowed.
static VALUED_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//\s?@(\w+):\s?(.+)$").unwrap());

static DEFAULT_SINK: TracingSink = TracingSink;

/// A coerced directive value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Number(f64),
    String(String),
    List(Vec<OptionValue>),
    /// Value bound to an enum label in the descriptor's map.
    Enum(Value),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            OptionValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&Value> {
        match self {
            OptionValue::Enum(bound) => Some(bound),
            _ => None,
        }
    }
}

/// Options recognized in a code sample, keyed by canonical descriptor name.
///
/// Best-effort and partial: an absent key may mean "not specified" or
/// "specified but invalid"; only diagnostics tell the two apart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedOptions {
    #[serde(flatten)]
    options: BTreeMap<String, OptionValue>,
}

impl ParsedOptions {
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> + '_ {
        self.options
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn into_map(self) -> BTreeMap<String, OptionValue> {
        self.options
    }

    fn insert(&mut self, name: String, value: OptionValue) {
        self.options.insert(name, value);
    }
}

/// Extracts directive options from multi-line sample text.
pub struct DirectiveExtractor<'a> {
    registry: &'a OptionRegistry,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> DirectiveExtractor<'a> {
    /// Extractor reporting diagnostics through `tracing`.
    pub fn new(registry: &'a OptionRegistry) -> Self {
        Self {
            registry,
            sink: &DEFAULT_SINK,
        }
    }

    /// Extractor reporting diagnostics to the supplied sink.
    pub fn with_sink(registry: &'a OptionRegistry, sink: &'a dyn DiagnosticSink) -> Self {
        Self { registry, sink }
    }

    /// Scan `source` line by line and coerce every recognized directive.
    ///
    /// Boolean shorthand always coerces the literal `"true"`, whatever the
    /// descriptor's type: `// @name` on a number option yields NaN and on a
    /// list option yields `["true"]`. Downstream consumers depend on the
    /// lenient form, so the shorthand is not restricted to boolean
    /// descriptors.
    pub fn extract(&self, source: &str) -> ParsedOptions {
        let mut options = ParsedOptions::default();
        for line in source.split('\n') {
            if let Some(captures) = BOOLEAN_DIRECTIVE.captures(line) {
                if self.registry.contains(&captures[1]) {
                    self.set_option(&captures[1], "true", &mut options);
                }
            } else if let Some(captures) = VALUED_DIRECTIVE.captures(line) {
                if self.registry.contains(&captures[1]) {
                    self.set_option(&captures[1], &captures[2], &mut options);
                }
            }
        }
        options
    }

    fn set_option(&self, name: &str, value: &str, options: &mut ParsedOptions) {
        let Some(descriptor) = self.registry.get(name) else {
            return;
        };
        match &descriptor.option_type {
            OptionType::Number | OptionType::String | OptionType::Boolean => {
                let keyword = descriptor.option_type.keyword();
                if let Some(parsed) = parse_primitive(value, keyword, self.sink) {
                    options.insert(descriptor.name.clone(), parsed);
                }
            }
            OptionType::List { element } => {
                let items = value
                    .split(',')
                    .filter_map(|item| parse_primitive(item, element, self.sink))
                    .collect();
                options.insert(descriptor.name.clone(), OptionValue::List(items));
            }
            OptionType::Enum(entries) => match entries.get(&value.to_lowercase()) {
                Some(bound) => {
                    options.insert(descriptor.name.clone(), OptionValue::Enum(bound.clone()));
                }
                None => self.sink.report(Diagnostic::InvalidEnumValue {
                    option: descriptor.name.clone(),
                    value: value.to_string(),
                    allowed: entries.keys().cloned().collect(),
                }),
            },
        }
    }
}

/// Coerce a raw string by primitive keyword.
///
/// Numbers follow loose numeric conversion: empty input becomes 0 and
/// anything unparseable becomes NaN. Booleans are true for `"true"` in any
/// casing or for an empty value. An unknown keyword reports a diagnostic
/// and yields no value.
pub fn parse_primitive(
    value: &str,
    primitive: &str,
    sink: &dyn DiagnosticSink,
) -> Option<OptionValue> {
    match primitive {
        "number" => Some(OptionValue::Number(to_number(value))),
        "string" => Some(OptionValue::String(value.to_string())),
        "boolean" => Some(OptionValue::Boolean(
            value.to_lowercase() == "true" || value.is_empty(),
        )),
        _ => {
            sink.report(Diagnostic::UnknownPrimitiveType {
                primitive: primitive.to_string(),
                value: value.to_string(),
            });
            None
        }
    }
}

fn to_number(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}
