use std::io::Write;
use std::sync::Arc;
use webext_compat::descriptor::{DescriptorError, DescriptorLoader, VersionAdded};
use webext_compat::{
    AddressingMode, Diagnostic, RuntimeIdentity, StaticNamespace, SupportResolver,
};

const BCD_JSON: &str = r#"{
  "webextensions": {
    "api": {
      "alarms": {
        "__compat": { "support": { "chrome": { "version_added": "22" } } },
        "create": {
          "__compat": {
            "support": {
              "chrome": { "version_added": "22" },
              "firefox": [
                { "version_added": "45" },
                { "version_added": "40", "flags": [{ "type": "preference" }] }
              ]
            }
          }
        },
        "onAlarm": {
          "__compat": { "support": { "chrome": { "version_added": "22" } } }
        }
      }
    }
  }
}"#;

const YAML: &str = r#"
storage:
  local:
    __compat:
      support:
        chrome: { version_added: "88" }
        safari: { version_added: false }
      status:
        deprecated: false
        experimental: true
"#;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[tokio::test]
async fn test_load_bcd_json_and_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "browser-compat.json", BCD_JSON);

    let descriptor = DescriptorLoader::new().unwrap().load_from_file(&path).await.unwrap();
    assert_eq!(descriptor.areas().collect::<Vec<_>>(), vec!["alarms"]);
    assert!(descriptor.compat("alarms.create").is_some());

    // History arrays: the first statement is the current one.
    let firefox = descriptor
        .compat("alarms.create")
        .and_then(|c| c.statement_for("firefox"))
        .unwrap();
    assert_eq!(firefox.version_added, Some(VersionAdded::Version("45".into())));

    let ns = StaticNamespace::new();
    ns.insert_object("alarms");
    let runtime = RuntimeIdentity::builder("firefox")
        .version("44.0.2")
        .namespace(ns.into_arc())
        .build();
    let resolver = SupportResolver::new(Arc::new(descriptor));
    assert_eq!(
        resolver.resolve("alarms", "create", &runtime, AddressingMode::Prefixed),
        Diagnostic::failed("alarms.create", "requires: firefox >= 45")
    );
}

#[tokio::test]
async fn test_load_yaml_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "storage.yaml", YAML);

    let descriptor = DescriptorLoader::new().unwrap().load_from_file(&path).await.unwrap();
    let block = descriptor.compat("storage.local").unwrap();
    assert!(block.is_experimental("chrome"));
    assert!(!block.is_deprecated("chrome"));

    let safari = RuntimeIdentity::builder("safari").version("17").build();
    let resolver = SupportResolver::new(Arc::new(descriptor));
    assert_eq!(
        resolver.check_static("storage", "local", &safari).message(),
        Some("not implemented")
    );
}

#[tokio::test]
async fn test_byte_order_mark_is_stripped() {
    let dir = tempfile::tempdir().unwrap();
    let content = format!("\u{feff}{}", BCD_JSON);
    let path = write_file(&dir, "bom.json", &content);

    let descriptor = DescriptorLoader::new().unwrap().load_from_file(&path).await.unwrap();
    assert_eq!(descriptor.len(), 3);
}

#[tokio::test]
async fn test_schema_violation_is_reported_with_hint() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "bad.json",
        r#"{ "tabs": { "query": { "__compat": { "support": { "chrome": { "version_added": 20 } } } } } }"#,
    );

    let err = DescriptorLoader::new().unwrap().load_from_file(&path).await.unwrap_err();
    match &err {
        DescriptorError::SchemaError { errors, hint } => {
            assert!(!errors.is_empty());
            assert!(hint.is_some());
        }
        other => panic!("expected a schema error, got {:?}", other),
    }
    assert!(err.to_string().contains("version_added"));
}

#[tokio::test]
async fn test_invalid_syntax_and_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "broken.json", "{ not json");
    let loader = DescriptorLoader::without_validation();

    let err = loader.load_from_file(&path).await.unwrap_err();
    assert!(matches!(err, DescriptorError::ParseError { .. }));

    let err = loader
        .load_from_file(dir.path().join("absent.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, DescriptorError::LoadError { .. }));
}

#[tokio::test]
async fn test_load_by_name_from_base_path() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir, "webextensions.yml", YAML);

    let loader = DescriptorLoader::without_validation().with_base_path(dir.path());
    let descriptor = loader.load("webextensions").await.unwrap();
    assert_eq!(descriptor.paths().collect::<Vec<_>>(), vec!["storage.local"]);

    let err = loader.load("missing-descriptor").await.unwrap_err();
    match err {
        DescriptorError::NotFound { name, hint } => {
            assert_eq!(name, "missing-descriptor");
            assert!(hint.unwrap().contains("WEBEXT_COMPAT_DESCRIPTOR"));
        }
        other => panic!("expected not found, got {:?}", other),
    }
}
