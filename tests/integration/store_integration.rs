//! Integration tests for the directory-backed context store

use ctxstore::endpoint::{
    AciEndpoint, DockerEndpoint, EndpointDescriptor, EndpointKind, ExampleEndpoint,
    KubernetesEndpoint, LocalEndpoint,
};
use ctxstore::error::ErrorKind;
use ctxstore::store::{ContextStore, FileContextStorage};
use ctxstore::Context;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn local() -> EndpointDescriptor {
    LocalEndpoint::default().into()
}

#[test]
fn test_records_are_pretty_json_files() {
    let temp_dir = TempDir::new().unwrap();
    let store = ContextStore::open(temp_dir.path()).unwrap();
    store
        .create("local1", EndpointKind::Local, "", local())
        .unwrap();

    let path = FileContextStorage::new(temp_dir.path()).path_for("local1");
    assert_eq!(path, temp_dir.path().join("contexts").join("local1.json"));

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains('\n'), "record should be pretty-printed");
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["name"], "local1");
    assert_eq!(json["context_type"], "local");
    assert_eq!(json["endpoints"]["local"]["kind"], "local");
}

#[test]
fn test_round_trip_every_field() {
    let temp_dir = TempDir::new().unwrap();
    let store = ContextStore::open(temp_dir.path()).unwrap();

    let mut context = Context::new(
        "full",
        "every endpoint kind",
        DockerEndpoint {
            host: Some("tcp://myserver:2376".to_string()),
            ca: Some("~/ca-file".to_string()),
            cert: Some("~/cert-file".to_string()),
            key: Some("~/key-file".to_string()),
            skip_tls_verify: Some(false),
        }
        .into(),
    );
    context.set_endpoint(
        KubernetesEndpoint {
            config_file: Some("/home/u/.kube/config".to_string()),
            context_override: Some("prod".to_string()),
            namespace_override: Some("staging".to_string()),
        }
        .into(),
    );
    context.set_endpoint(
        AciEndpoint {
            subscription_id: Some("sub".to_string()),
            resource_group: Some("rg".to_string()),
            location: Some("eastus".to_string()),
        }
        .into(),
    );
    let mut example = ExampleEndpoint::default();
    example.fields.insert("greeting".to_string(), "hello".to_string());
    context.set_endpoint(example.into());
    context.set_endpoint(local());
    context.default_stack_orchestrator = Some("swarm".to_string());

    store.create_context(&context).unwrap();

    // A second handle on the same root sees the identical record
    let reopened = ContextStore::open(temp_dir.path()).unwrap();
    assert_eq!(reopened.get("full").unwrap(), context);
}

#[test]
fn test_already_exists_leaves_bytes_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let store = ContextStore::open(temp_dir.path()).unwrap();
    store
        .create("dup", EndpointKind::Local, "original", local())
        .unwrap();

    let path = FileContextStorage::new(temp_dir.path()).path_for("dup");
    let before = fs::read(&path).unwrap();

    let err = store
        .create(
            "dup",
            EndpointKind::Kubernetes,
            "replacement",
            KubernetesEndpoint::default().into(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_no_temp_files_left_behind() {
    let temp_dir = TempDir::new().unwrap();
    let store = ContextStore::open(temp_dir.path()).unwrap();
    store.create("a", EndpointKind::Local, "", local()).unwrap();
    let _ = store.create("a", EndpointKind::Local, "", local());

    let mut ctx = store.get("a").unwrap();
    ctx.description = "updated".to_string();
    store.update(&ctx).unwrap();

    let entries: Vec<String> = fs::read_dir(temp_dir.path().join("contexts"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["a.json".to_string()]);
    assert_eq!(store.get("a").unwrap().description, "updated");
}

#[test]
fn test_empty_name_has_no_filesystem_effect() {
    let temp_dir = TempDir::new().unwrap();
    let store = ContextStore::open(temp_dir.path()).unwrap();

    let err = store.create("", EndpointKind::Local, "", local()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidName);
    assert_eq!(
        fs::read_dir(temp_dir.path().join("contexts")).unwrap().count(),
        0
    );
}

#[test]
fn test_list_ignores_foreign_files() {
    let temp_dir = TempDir::new().unwrap();
    let store = ContextStore::open(temp_dir.path()).unwrap();
    store.create("real", EndpointKind::Local, "", local()).unwrap();

    let dir = temp_dir.path().join("contexts");
    fs::write(dir.join("notes.txt"), "not a record").unwrap();
    fs::write(dir.join(".real.123.0.tmp"), "{").unwrap();
    fs::write(dir.join("default.json"), "{}").unwrap();

    let list = store.list().unwrap();
    assert_eq!(list.names(), &["real".to_string()]);
}

#[test]
fn test_corrupt_record_is_persistence_failure() {
    let temp_dir = TempDir::new().unwrap();
    let store = ContextStore::open(temp_dir.path()).unwrap();
    fs::write(temp_dir.path().join("contexts").join("broken.json"), "{ nope").unwrap();

    let err = store.get("broken").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PersistenceFailure);
    assert!(!err.is_transient());
}

#[test]
fn test_remove_deletes_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = ContextStore::open(temp_dir.path()).unwrap();
    store.create("gone", EndpointKind::Local, "", local()).unwrap();

    store.remove("gone").unwrap();
    assert!(!temp_dir.path().join("contexts").join("gone.json").exists());
    assert_eq!(store.remove("gone").unwrap_err().kind(), ErrorKind::NotFound);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_list_is_sorted_and_complete(names in prop::collection::btree_set("[a-z][a-z0-9_-]{0,11}", 1..8)) {
        let temp_dir = TempDir::new().unwrap();
        let store = ContextStore::open(temp_dir.path()).unwrap();
        let names: BTreeSet<String> = names
            .into_iter()
            .filter(|n| n != "default")
            .collect();
        for name in names.iter().rev() {
            store.create(name, EndpointKind::Local, "", local()).unwrap();
        }

        let listed: Vec<String> = store
            .list()
            .unwrap()
            .iter()
            .map(|s| s.unwrap().name)
            .collect();
        let expected: Vec<String> = names.into_iter().collect();
        prop_assert_eq!(listed, expected);
    }
}
