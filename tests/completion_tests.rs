//! End-to-end completion provider tests.

use pretty_assertions::assert_eq;
use serde_json::json;

use twoslash::{DirectiveCompletions, OptionDescriptor, OptionRegistry, Position};

fn compiler_registry() -> OptionRegistry {
    OptionRegistry::new([
        OptionDescriptor::boolean("strict"),
        OptionDescriptor::boolean("noImplicitAny"),
        OptionDescriptor::boolean("noEmit"),
        OptionDescriptor::boolean("esModuleInterop"),
        OptionDescriptor::string("outDir"),
        OptionDescriptor::enumeration("target", [("es5", json!(1)), ("es2017", json!(4))]),
    ])
}

fn labels(provider: &DirectiveCompletions<'_>, line: &str) -> Vec<String> {
    provider
        .complete_line(line)
        .suggestions
        .into_iter()
        .map(|suggestion| suggestion.label)
        .collect()
}

#[test]
fn test_prefix_filtering_excludes_non_matches() {
    let registry = compiler_registry();
    let provider = DirectiveCompletions::new(&registry);

    let labels = labels(&provider, "// @noEr");
    assert!(labels.contains(&"noErrors".to_string()));
    assert!(!labels.contains(&"noEmit".to_string()));
}

#[test]
fn test_candidates_are_pseudo_directives_then_registry_names() {
    let registry = compiler_registry();
    let provider = DirectiveCompletions::new(&registry);

    assert_eq!(
        labels(&provider, "// @e"),
        vec!["errors".to_string(), "emit".to_string(), "esModuleInterop".to_string()]
    );
}

#[test]
fn test_non_comment_line_yields_nothing() {
    let registry = compiler_registry();
    let provider = DirectiveCompletions::new(&registry);
    assert!(labels(&provider, "hello @wor").is_empty());
}

#[test]
fn test_extra_word_yields_nothing() {
    let registry = compiler_registry();
    let provider = DirectiveCompletions::new(&registry);
    assert!(labels(&provider, "// @opt extra").is_empty());
}

#[test]
fn test_registry_casing_is_preserved_in_labels() {
    let registry = compiler_registry();
    let provider = DirectiveCompletions::new(&registry);
    assert_eq!(labels(&provider, "// @noImp"), vec!["noImplicitAny".to_string()]);
}

#[test]
fn test_complete_at_mid_document() {
    let registry = compiler_registry();
    let provider = DirectiveCompletions::new(&registry);
    let text = "// @strict\nfunction f() {}\n// @ta\n";

    let completions = provider.complete_at(text, Position::new(2, 6));
    let labels: Vec<&str> = completions
        .suggestions
        .iter()
        .map(|suggestion| suggestion.label.as_str())
        .collect();
    assert_eq!(labels, ["target"]);
}

#[test]
fn test_completions_serialize_to_editor_contract_shape() {
    let registry = compiler_registry();
    let provider = DirectiveCompletions::new(&registry);

    let completions = provider.complete_line("// @outD");
    let value = serde_json::to_value(&completions).unwrap();
    assert_eq!(
        value,
        json!({
            "suggestions": [{
                "label": "outDir",
                "kind": "directive",
                "detail": "Twoslash comment",
                "insertText": "outDir",
            }]
        })
    );
}

#[test]
fn test_completion_is_idempotent() {
    let registry = compiler_registry();
    let provider = DirectiveCompletions::new(&registry);

    let first = provider.complete_line("// @no");
    let second = provider.complete_line("// @no");
    assert_eq!(first, second);
}
