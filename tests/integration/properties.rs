//! Property files loaded from disk and resolved against themselves.

use cfgplate::config::PlaceholderSettings;
use cfgplate::placeholder::{ChainResolver, PlaceholderEngine};
use cfgplate::properties::{PropertiesError, PropertyMap};
use cfgplate::test_utils::{init_test_logging, property_map, write_file};
use tempfile::TempDir;

#[tokio::test]
async fn test_yaml_file_resolves_in_place() {
    init_test_logging(None);
    let temp = TempDir::new().unwrap();
    let path = write_file(
        temp.path(),
        "app.yaml",
        "env: prod\nprod:\n  host: db.prod\nurl: \"jdbc://#{#{env}.host}:#{port:5432}\"\nservers:\n  - a\n  - \"#{env}-b\"\n",
    );

    let engine = PlaceholderSettings::default().to_engine().unwrap();
    let resolved = PropertyMap::load(&path).await.unwrap().resolve_values(&engine).unwrap();

    assert_eq!(resolved.get("url"), Some("jdbc://db.prod:5432"));
    assert_eq!(resolved.get("servers[1]"), Some("prod-b"));
    assert_eq!(resolved.get("prod.host"), Some("db.prod"));
}

#[tokio::test]
async fn test_layered_files() {
    let temp = TempDir::new().unwrap();
    let base = write_file(temp.path(), "base.toml", "[db]\nhost = \"localhost\"\nport = 5432\n");
    let local = write_file(temp.path(), "local.json", r#"{"db": {"host": "127.0.0.1"}}"#);

    let mut merged = PropertyMap::load(&base).await.unwrap();
    merged.merge(PropertyMap::load(&local).await.unwrap());

    let engine = PlaceholderEngine::new("#{", "}", Some(":"), Some('\\'), false).unwrap();
    assert_eq!(engine.resolve("#{db.host}:#{db.port}", &merged).unwrap(), "127.0.0.1:5432");
}

#[tokio::test]
async fn test_assignments_shadow_file_values() {
    let temp = TempDir::new().unwrap();
    let path = write_file(temp.path(), "app.yml", "greeting: Hello\nname: file\n");
    let file = PropertyMap::load(&path).await.unwrap();
    let overrides = property_map(&[("name", "cli")]);

    let chain = ChainResolver::new().with(&overrides).with(&file);
    let engine = PlaceholderSettings::default().to_engine().unwrap();
    assert_eq!(engine.resolve("#{greeting}, #{name}", &chain).unwrap(), "Hello, cli");
}

#[tokio::test]
async fn test_unresolvable_property_names_key() {
    let temp = TempDir::new().unwrap();
    let path = write_file(temp.path(), "app.json", r##"{"a": "ok", "b": "#{missing}"}"##);

    let engine = PlaceholderSettings::default().to_engine().unwrap();
    let error = PropertyMap::load(&path).await.unwrap().resolve_values(&engine).unwrap_err();
    match error {
        PropertiesError::Resolution {
            key,
            source,
        } => {
            assert_eq!(key, "b");
            assert_eq!(source.key(), "missing");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unsupported_and_invalid_files() {
    let temp = TempDir::new().unwrap();
    let ini = write_file(temp.path(), "app.ini", "a=b");
    let broken = write_file(temp.path(), "broken.yaml", "a: [");

    assert!(matches!(
        PropertyMap::load(&ini).await,
        Err(PropertiesError::UnsupportedFormat { .. })
    ));
    assert!(matches!(PropertyMap::load(&broken).await, Err(PropertiesError::Yaml { .. })));
}
