//! Placeholder resolution through the public API.

use cfgplate::placeholder::system::{SystemPlaceholders, clear_system_property, set_system_property};
use cfgplate::placeholder::{
    ChainResolver, PlaceholderEngine, PlaceholderHelper, ResolutionErrorKind, Segment,
};
use cfgplate::test_utils::{init_test_logging, property_map};
use serial_test::serial;
use std::collections::HashMap;

fn engine() -> PlaceholderEngine {
    PlaceholderEngine::new("#{", "}", Some(":"), Some('\\'), false).unwrap()
}

#[test]
fn test_greeting_with_fallback() {
    init_test_logging(None);
    let props = property_map(&[]);
    assert_eq!(engine().resolve("Hello #{name:Guest}!", &props).unwrap(), "Hello Guest!");

    let props = property_map(&[("name", "Ada")]);
    assert_eq!(engine().resolve("Hello #{name:Guest}!", &props).unwrap(), "Hello Ada!");
}

#[test]
fn test_environment_selected_key() {
    let props = property_map(&[
        ("env", "staging"),
        ("staging.db.host", "db.staging.internal"),
        ("prod.db.host", "db.prod.internal"),
    ]);
    let resolved = engine().resolve("jdbc://#{#{env}.db.host}:#{db.port:5432}/app", &props).unwrap();
    assert_eq!(resolved, "jdbc://db.staging.internal:5432/app");
}

#[test]
fn test_fallback_chain() {
    let props = property_map(&[("default.url", "https://fallback")]);
    let resolved = engine().resolve("#{primary.url:#{secondary.url:#{default.url}}}", &props).unwrap();
    assert_eq!(resolved, "https://fallback");
}

#[test]
fn test_escaped_placeholder_is_literal() {
    let props = property_map(&[("a", "1")]);
    assert_eq!(engine().resolve("\\#{a} is #{a}", &props).unwrap(), "#{a} is 1");
}

#[test]
fn test_cycle_is_reported() {
    let props = property_map(&[("a", "#{b}"), ("b", "#{c}"), ("c", "#{a}")]);
    let error = engine().resolve("#{a}", &props).unwrap_err();

    assert_eq!(error.kind(), ResolutionErrorKind::CircularReference);
    assert_eq!(error.key(), "a");
    assert!(error.to_string().starts_with("Circular placeholder reference 'a'"));
}

#[test]
fn test_unresolvable_error_chain() {
    let props = property_map(&[("outer", "x #{inner}")]);
    let error = engine().resolve("#{outer}", &props).unwrap_err();

    assert_eq!(error.kind(), ResolutionErrorKind::Unresolvable);
    assert_eq!(error.key(), "inner");
    assert_eq!(error.values().last().map(String::as_str), Some("#{outer}"));
}

#[test]
fn test_parse_exposes_structure() {
    let parsed = engine().parse("a #{b:c} #{#{d}}");
    assert_eq!(parsed.placeholder_keys(), vec!["b".to_string(), "d".to_string()]);
    assert!(matches!(parsed.segments()[1], Segment::Simple { .. }));
    assert!(matches!(parsed.segments()[3], Segment::Nested { .. }));

    let props = property_map(&[("b", "B"), ("d", "x"), ("x", "X")]);
    assert_eq!(parsed.resolve(&engine(), &props).unwrap(), "a B X");
}

#[test]
fn test_helper_with_map_and_closure() {
    let helper = PlaceholderHelper::new("${", "}").unwrap();
    let values = HashMap::from([("user".to_string(), "ada".to_string())]);
    assert_eq!(helper.replace_placeholders("${user}@${host}", &values).unwrap(), "ada@${host}");

    let resolved = helper
        .replace_placeholders_with_resolver("${user}", |key| Some(key.to_uppercase()))
        .unwrap();
    assert_eq!(resolved, "USER");
}

#[test]
fn test_chain_prefers_earlier_sources() {
    let overrides = property_map(&[("port", "9090")]);
    let defaults = property_map(&[("port", "8080"), ("host", "localhost")]);
    let chain = ChainResolver::new().with(&overrides).with(&defaults);

    assert_eq!(engine().resolve("#{host}:#{port}", &chain).unwrap(), "localhost:9090");
}

#[test]
#[serial]
fn test_system_placeholders() {
    set_system_property("cfgplate.it.user", "svc");
    let strict = SystemPlaceholders::new();
    assert_eq!(strict.resolve("#{cfgplate.it.user}@#{cfgplate.it.host:local}").unwrap(), "svc@local");
    assert!(strict.resolve("#{cfgplate.it.missing}").is_err());

    let lenient = SystemPlaceholders::lenient();
    assert_eq!(lenient.resolve("#{cfgplate.it.missing}").unwrap(), "#{cfgplate.it.missing}");

    clear_system_property("cfgplate.it.user");
}
