//! CLI routing tests: parse real argument vectors and execute them against a
//! directory-backed store.

use clap::Parser;
use ctxstore::cli::{exit_code, map_error, Cli, RunContext};
use ctxstore::config::CtxConfig;
use ctxstore::error::ApiError;
use ctxstore::EndpointKind;
use tempfile::TempDir;

fn run_context(temp_dir: &TempDir, current: Option<&str>) -> RunContext {
    let config = CtxConfig {
        current_context: current.map(str::to_string),
        ..Default::default()
    };
    RunContext::from_config(config, Some(temp_dir.path().to_path_buf())).unwrap()
}

fn run(ctx: &RunContext, args: &[&str]) -> Result<String, ApiError> {
    let cli = Cli::try_parse_from(std::iter::once("ctxstore").chain(args.iter().copied()))
        .unwrap();
    ctx.execute(&cli.command)
}

#[test]
fn test_full_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = run_context(&temp_dir, None);

    let created = run(&ctx, &["create", "local", "local1"]).unwrap();
    assert!(created.contains("\"local1\""));

    run(
        &ctx,
        &["create", "k8s1", "--kubernetes", "config-file=/home/u/.kube/config"],
    )
    .unwrap();
    run(
        &ctx,
        &["create", "k8s2", "--kubernetes", "from=k8s1,namespace-override=staging"],
    )
    .unwrap();

    assert_eq!(run(&ctx, &["ls", "-q"]).unwrap(), "k8s1\nk8s2\nlocal1");

    let listing: serde_json::Value =
        serde_json::from_str(&run(&ctx, &["list", "--format", "json"]).unwrap()).unwrap();
    assert_eq!(listing["total"], 3);
    assert_eq!(listing["contexts"][1]["name"], "k8s2");
    assert_eq!(listing["contexts"][1]["context_type"], "kubernetes");

    let inspected: serde_json::Value =
        serde_json::from_str(&run(&ctx, &["inspect", "k8s2"]).unwrap()).unwrap();
    assert_eq!(
        inspected["endpoints"]["kubernetes"]["config_file"],
        "/home/u/.kube/config"
    );
    assert_eq!(
        inspected["endpoints"]["kubernetes"]["namespace_override"],
        "staging"
    );

    assert_eq!(run(&ctx, &["rm", "local1"]).unwrap(), "local1");
    assert_eq!(run(&ctx, &["ls", "-q"]).unwrap(), "k8s1\nk8s2");
}

#[test]
fn test_from_flag_copies_whole_context() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = run_context(&temp_dir, None);
    run(
        &ctx,
        &[
            "create",
            "src",
            "--docker",
            "host=ssh://me@box",
            "--kubernetes",
            "context-override=prod",
            "--default-stack-orchestrator",
            "swarm",
        ],
    )
    .unwrap();
    run(&ctx, &["create", "copy", "--from", "src", "--description", "copied"]).unwrap();

    let copy = ctx.store().get("copy").unwrap();
    let src = ctx.store().get("src").unwrap();
    assert_eq!(copy.endpoints, src.endpoints);
    assert_eq!(copy.context_type, EndpointKind::Docker);
    assert_eq!(copy.description, "copied");
}

#[test]
fn test_errors_map_to_exit_codes() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = run_context(&temp_dir, Some("pinned"));
    run(&ctx, &["create", "pinned"]).unwrap();

    let in_use = run(&ctx, &["rm", "pinned"]).unwrap_err();
    assert_eq!(exit_code(&in_use), 1);
    assert!(map_error(&in_use).contains("current context"));

    let conflict = run(
        &ctx,
        &["create", "x", "--from", "pinned", "--docker", "from=other"],
    )
    .unwrap_err();
    assert_eq!(exit_code(&conflict), 2);

    let duplicate = run(&ctx, &["create", "pinned"]).unwrap_err();
    assert_eq!(exit_code(&duplicate), 1);
    assert!(map_error(&duplicate).contains("already exists"));

    let reserved = run(&ctx, &["create", "default"]).unwrap_err();
    assert_eq!(exit_code(&reserved), 2);
}

#[test]
fn test_create_requires_a_name() {
    assert!(Cli::try_parse_from(["ctxstore", "create"]).is_err());
    assert!(Cli::try_parse_from(["ctxstore", "create", "local"]).is_err());
    assert!(Cli::try_parse_from(["ctxstore", "create", "aci", "cloud"]).is_ok());
}
