//! Option metadata registry.
//!
//! Descriptors come from an external enumerable source, typically a JSON
//! dump of the upstream compiler's option metadata. Lookup keys are always
//! lowercase; canonical casing is preserved separately for display and for
//! the keys of parsed results.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::Result;

/// Value shape for a configurable option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionType {
    Number,
    String,
    Boolean,
    /// Comma-separated list; elements are coerced by the named primitive.
    ///
    /// The element keyword is kept open rather than enumerated: metadata may
    /// carry element types the coercer does not know, and those surface as
    /// diagnostics at parse time instead of load failures.
    List { element: String },
    /// Enumerated mapping from lowercase label to the bound value.
    Enum(BTreeMap<String, Value>),
}

impl OptionType {
    /// Keyword form of the shape, as it appears in metadata.
    pub fn keyword(&self) -> &'static str {
        match self {
            OptionType::Number => "number",
            OptionType::String => "string",
            OptionType::Boolean => "boolean",
            OptionType::List { .. } => "list",
            OptionType::Enum(_) => "enum",
        }
    }
}

/// Metadata describing one configurable option.
///
/// Deserializes from the metadata shape `{ "name", "type", "element"? }`
/// where `type` is a keyword string or an enum map, and `element` names the
/// primitive for `list` options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "DescriptorRepr")]
pub struct OptionDescriptor {
    /// Canonical name, in the casing the metadata source uses.
    pub name: String,
    pub option_type: OptionType,
}

impl OptionDescriptor {
    pub fn new(name: impl Into<String>, option_type: OptionType) -> Self {
        Self {
            name: name.into(),
            option_type,
        }
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, OptionType::Number)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, OptionType::String)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, OptionType::Boolean)
    }

    pub fn list(name: impl Into<String>, element: impl Into<String>) -> Self {
        Self::new(
            name,
            OptionType::List {
                element: element.into(),
            },
        )
    }

    pub fn enumeration<K, I>(name: impl Into<String>, entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map = entries
            .into_iter()
            .map(|(label, bound)| (label.into(), bound))
            .collect();
        Self::new(name, OptionType::Enum(map))
    }
}

impl Serialize for OptionDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let fields = match self.option_type {
            OptionType::List { .. } => 3,
            _ => 2,
        };
        let mut state = serializer.serialize_struct("OptionDescriptor", fields)?;
        state.serialize_field("name", &self.name)?;
        match &self.option_type {
            OptionType::Enum(entries) => state.serialize_field("type", entries)?,
            OptionType::List { element } => {
                state.serialize_field("type", "list")?;
                state.serialize_field(
                    "element",
                    &ElementRepr {
                        element_type: element.clone(),
                    },
                )?;
            }
            primitive => state.serialize_field("type", primitive.keyword())?,
        }
        state.end()
    }
}

/// Wire shape of a descriptor before validation.
#[derive(Deserialize)]
struct DescriptorRepr {
    name: String,
    #[serde(rename = "type")]
    option_type: TypeRepr,
    #[serde(default)]
    element: Option<ElementRepr>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRepr {
    Keyword(String),
    Enum(BTreeMap<String, Value>),
}

#[derive(Serialize, Deserialize)]
struct ElementRepr {
    #[serde(rename = "type")]
    element_type: String,
}

impl TryFrom<DescriptorRepr> for OptionDescriptor {
    type Error = String;

    fn try_from(repr: DescriptorRepr) -> std::result::Result<Self, String> {
        let option_type = match repr.option_type {
            TypeRepr::Enum(entries) => OptionType::Enum(entries),
            TypeRepr::Keyword(keyword) => match keyword.as_str() {
                "number" => OptionType::Number,
                "string" => OptionType::String,
                "boolean" => OptionType::Boolean,
                "list" => {
                    let element = repr.element.ok_or_else(|| {
                        format!("list option {} is missing an element type", repr.name)
                    })?;
                    OptionType::List {
                        element: element.element_type,
                    }
                }
                other => {
                    return Err(format!("unknown option type {} for {}", other, repr.name));
                }
            },
        };
        Ok(OptionDescriptor {
            name: repr.name,
            option_type,
        })
    }
}

/// Read-only collection of option descriptors, indexed by lowercase name.
///
/// Enumeration order follows the source: completion candidates come out in
/// the same order the metadata listed them. When two descriptors collide on
/// a lowercase name, the later one wins for lookup while both remain
/// enumerable.
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    descriptors: Vec<OptionDescriptor>,
    by_lower: HashMap<String, usize>,
}

impl OptionRegistry {
    pub fn new<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = OptionDescriptor>,
    {
        let descriptors: Vec<OptionDescriptor> = descriptors.into_iter().collect();
        let mut by_lower = HashMap::with_capacity(descriptors.len());
        for (index, descriptor) in descriptors.iter().enumerate() {
            by_lower.insert(descriptor.name.to_lowercase(), index);
        }
        Self {
            descriptors,
            by_lower,
        }
    }

    /// Build a registry from a JSON array of descriptors.
    pub fn from_json_str(metadata: &str) -> Result<Self> {
        let descriptors: Vec<OptionDescriptor> = serde_json::from_str(metadata)?;
        Ok(Self::new(descriptors))
    }

    /// Build a registry from a JSON metadata file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let metadata = std::fs::read_to_string(path)?;
        Self::from_json_str(&metadata)
    }

    /// Look up a descriptor by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&OptionDescriptor> {
        self.by_lower
            .get(&name.to_lowercase())
            .map(|index| &self.descriptors[*index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_lower.contains_key(&name.to_lowercase())
    }

    /// Canonical option names in source enumeration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.descriptors
            .iter()
            .map(|descriptor| descriptor.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionDescriptor> + '_ {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_registry() -> OptionRegistry {
        OptionRegistry::new([
            OptionDescriptor::boolean("noImplicitAny"),
            OptionDescriptor::enumeration("target", [("es5", json!(1)), ("es2015", json!(2))]),
            OptionDescriptor::list("lib", "string"),
        ])
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = sample_registry();
        assert!(registry.contains("noimplicitany"));
        assert!(registry.contains("NOIMPLICITANY"));
        assert!(!registry.contains("noImplicitThis"));
    }

    #[test]
    fn test_lookup_preserves_canonical_casing() {
        let registry = sample_registry();
        let descriptor = registry.get("noimplicitany").unwrap();
        assert_eq!(descriptor.name, "noImplicitAny");
    }

    #[test]
    fn test_names_follow_source_order() {
        let registry = sample_registry();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ["noImplicitAny", "target", "lib"]);
    }

    #[test]
    fn test_duplicate_lowercase_name_last_wins() {
        let registry = OptionRegistry::new([
            OptionDescriptor::boolean("Strict"),
            OptionDescriptor::string("strict"),
        ]);
        let descriptor = registry.get("STRICT").unwrap();
        assert_eq!(descriptor.name, "strict");
        assert_eq!(descriptor.option_type, OptionType::String);
        // Both entries stay enumerable for completion.
        assert_eq!(registry.names().count(), 2);
    }

    #[test]
    fn test_from_json_str() {
        let metadata = r#"[
            {"name": "strict", "type": "boolean"},
            {"name": "maxNodeModuleJsDepth", "type": "number"},
            {"name": "outDir", "type": "string"},
            {"name": "lib", "type": "list", "element": {"type": "string"}},
            {"name": "target", "type": {"es5": 1, "es2015": 2, "es2017": 4}}
        ]"#;

        let registry = OptionRegistry::from_json_str(metadata).unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(
            registry.get("lib").unwrap().option_type,
            OptionType::List {
                element: "string".to_string()
            }
        );
        match &registry.get("target").unwrap().option_type {
            OptionType::Enum(entries) => assert_eq!(entries.get("es2017"), Some(&json!(4))),
            other => panic!("expected enum type, got {:?}", other),
        }
    }

    #[test]
    fn test_list_without_element_is_rejected() {
        let metadata = r#"[{"name": "lib", "type": "list"}]"#;
        assert!(OptionRegistry::from_json_str(metadata).is_err());
    }

    #[test]
    fn test_unknown_type_keyword_is_rejected() {
        let metadata = r#"[{"name": "weird", "type": "bignum"}]"#;
        assert!(OptionRegistry::from_json_str(metadata).is_err());
    }

    #[test]
    fn test_descriptor_serialization_round_trips() {
        let descriptors = vec![
            OptionDescriptor::boolean("strict"),
            OptionDescriptor::list("types", "string"),
            OptionDescriptor::enumeration("jsx", [("preserve", json!(1)), ("react", json!(2))]),
        ];

        let json = serde_json::to_string(&descriptors).unwrap();
        let parsed: Vec<OptionDescriptor> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, descriptors);
    }
}
