//! Integration tests for the folio CLI
//!
//! Each test runs the binary with an isolated HOME and working directory so
//! that no user configuration leaks in.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the folio binary, sandboxed under `sandbox`.
///
/// HOME is `sandbox/home` and the working directory is `sandbox/work`, so
/// global and local config files land in different places.
#[allow(deprecated)]
fn folio(sandbox: &Path) -> Command {
    let home = sandbox.join("home");
    let work = sandbox.join("work");
    std::fs::create_dir_all(&home).expect("Failed to create home dir");
    std::fs::create_dir_all(&work).expect("Failed to create work dir");

    let mut cmd = Command::cargo_bin("folio").expect("Failed to find folio binary");
    cmd.current_dir(work)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .env_remove("FOLIO_CONFIG")
        .env_remove("FOLIO_SERVER_URL")
        .env_remove("FOLIO_CATALOG")
        .env_remove("FOLIO_BIND");
    cmd
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write file");
    path
}

const COLLIDING_CATALOG: &str = r#"[
  {"image": "", "category": ["Rust"], "name": "Alpha One", "description": "first", "link": "", "github": ""},
  {"image": "", "category": ["Go"], "name": "Alpha One!", "description": "second", "link": "", "github": ""}
]"#;

// ============================================================================
// List Command Tests
// ============================================================================

#[test]
fn test_list_builtin_catalog() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal Portfolio"))
        .stdout(predicate::str::contains("Page 1 of 2 (10 projects)"));
}

#[test]
fn test_list_json_envelope() {
    let home = TempDir::new().unwrap();

    let output = folio(home.path())
        .args(["list", "--output", "json", "--page", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
    assert_eq!(body["meta"]["page"], 2);
    assert_eq!(body["meta"]["limit"], 6);
    assert_eq!(body["meta"]["total"], 10);
    assert_eq!(body["meta"]["totalPages"], 2);
    assert_eq!(body["meta"]["hasNextPage"], false);
    assert_eq!(body["meta"]["hasPrevPage"], true);
}

#[test]
fn test_list_category_filter_is_exact() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["list", "--category", "react"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Realtime Chat"))
        .stdout(predicate::str::contains("Fitness Tracker").not())
        .stdout(predicate::str::contains("Page 1 of 1 (4 projects)"));
}

#[test]
fn test_list_page_past_end_is_empty() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["list", "--page", "9"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No projects found"));
}

#[test]
fn test_list_rejects_zero_limit() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["list", "--limit", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pagination parameters"));
}

#[test]
fn test_list_uses_configured_page_size() {
    let home = TempDir::new().unwrap();
    let config = write_file(&home, "folio.toml", "[client]\npage_size = 3\n");

    let output = folio(home.path())
        .args(["--config"])
        .arg(&config)
        .args(["list", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["meta"]["limit"], 3);
    assert_eq!(body["meta"]["totalPages"], 4);
}

// ============================================================================
// Categories / Show / Slug Tests
// ============================================================================

#[test]
fn test_categories_sorted() {
    let home = TempDir::new().unwrap();

    let output = folio(home.path()).arg("categories").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.first(), Some(&"Docker"));
    assert!(lines.contains(&"React Native"));
    let mut sorted = lines.clone();
    sorted.sort();
    assert_eq!(lines, sorted);
}

#[test]
fn test_show_project_by_slug() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["show", "ecommerce-store"])
        .assert()
        .success()
        .stdout(predicate::str::contains("E-Commerce Store"))
        .stdout(predicate::str::contains("Slug:       ecommerce-store"));
}

#[test]
fn test_show_slug_is_case_insensitive_json() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["show", "Personal-Portfolio", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Personal Portfolio\""));
}

#[test]
fn test_show_unknown_slug_fails() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["show", "no-such-project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project not found"));
}

#[test]
fn test_slug_conversion() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["slug", "Alpha   One!"])
        .assert()
        .success()
        .stdout("alpha-one\n");

    folio(home.path())
        .args(["slug", "--reverse", "alpha-one"])
        .assert()
        .success()
        .stdout("alpha one\n");
}

#[test]
fn test_slug_collisions_report() {
    let home = TempDir::new().unwrap();
    let catalog = write_file(&home, "projects.json", COLLIDING_CATALOG);

    folio(home.path())
        .arg("--catalog")
        .arg(&catalog)
        .args(["slug", "--collisions"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("alpha-one: Alpha One, Alpha One!"));

    folio(home.path())
        .args(["slug", "--collisions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No slug collisions"));
}

// ============================================================================
// Catalog File Tests
// ============================================================================

#[test]
fn test_catalog_file_first_collision_wins() {
    let home = TempDir::new().unwrap();
    let catalog = write_file(&home, "projects.json", COLLIDING_CATALOG);

    folio(home.path())
        .arg("--catalog")
        .arg(&catalog)
        .args(["show", "alpha-one", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"description\": \"first\""));
}

#[test]
fn test_catalog_file_strict_slugs_rejects_collision() {
    let home = TempDir::new().unwrap();
    let catalog = write_file(&home, "projects.json", COLLIDING_CATALOG);

    folio(home.path())
        .arg("--catalog")
        .arg(&catalog)
        .args(["--strict-slugs", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog"));
}

#[test]
fn test_toml_catalog_file() {
    let home = TempDir::new().unwrap();
    let catalog = write_file(
        &home,
        "projects.toml",
        r#"
[[projects]]
image = "/img/folio.png"
category = ["Rust", "Axum"]
name = "Folio"
description = "Catalog service"
link = ""
github = "https://github.com/example/folio"
"#,
    );

    folio(home.path())
        .arg("--catalog")
        .arg(&catalog)
        .arg("categories")
        .assert()
        .success()
        .stdout("Axum\nRust\n");
}

#[test]
fn test_missing_catalog_file_fails() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["--catalog", "does-not-exist.json", "list"])
        .assert()
        .failure();
}

// ============================================================================
// Browse Command Tests
// ============================================================================

#[test]
fn test_browse_session() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .arg("browse")
        .write_stdin("category react\nnext\nclear\npage 2\ncategories\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 2 (10 projects)"))
        .stdout(predicate::str::contains("Filters: category=react"))
        .stdout(predicate::str::contains("Page 1 of 1 (4 projects)"))
        .stdout(predicate::str::contains("Page 2 of 2 (10 projects)"))
        .stdout(predicate::str::contains("Categories: Docker, Firebase"))
        .stderr(predicate::str::contains("Already on the last page"));
}

#[test]
fn test_browse_carousel_page_size() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["browse", "--mode", "carousel"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 1 (10 projects)"));
}

#[test]
fn test_browse_reports_bad_commands_and_continues() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .arg("browse")
        .write_stdin("jump 3\npage x\nsearch globe\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown command: 'jump'"))
        .stderr(predicate::str::contains("Invalid page number"))
        .stdout(predicate::str::contains("Globe Explorer"));
}

// ============================================================================
// Remote Backend Tests
// ============================================================================

/// Serve the built-in catalog on an ephemeral port from a background thread.
fn spawn_server() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            let catalog = std::sync::Arc::new(folio_core::Catalog::builtin().unwrap());
            let app = folio_server::app(folio_server::AppState::new(catalog));
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{}", addr)
}

#[test]
fn test_remote_backend_round_trip() {
    let home = TempDir::new().unwrap();
    let url = spawn_server();

    folio(home.path())
        .args(["--server-url", &url, "list", "--search", "photos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Globe Explorer"))
        .stdout(predicate::str::contains("Page 1 of 1 (1 project)"));

    folio(home.path())
        .args(["--server-url", &url, "show", "url-shortener-api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("URL Shortener API"));

    folio(home.path())
        .args(["--server-url", &url, "show", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project not found"));

    folio(home.path())
        .args(["--server-url", &url, "list", "--limit", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pagination parameters"));
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn test_config_list_defaults() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Folio Configuration"))
        .stdout(predicate::str::contains("[server]"))
        .stdout(predicate::str::contains("[server.cache.list]"));
}

#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["config", "set", "client.page_size", "16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in local config"));
    assert!(home.path().join("work/.folio/config.toml").exists());
    assert!(!home.path().join("home/.folio/config.toml").exists());

    folio(home.path())
        .args(["config", "get", "client.page_size"])
        .assert()
        .success()
        .stdout("16\n");

    folio(home.path())
        .args(["config", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"source\": \"local\""));
}

#[test]
fn test_config_set_global() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["config", "set", "--global", "logging.level", "warn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in global config"));

    folio(home.path())
        .args(["config", "get", "logging.level"])
        .assert()
        .success()
        .stdout("warn\n");
}

#[test]
fn test_config_set_invalid_value_fails() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["config", "set", "client.page_size", "0"])
        .assert()
        .failure();

    folio(home.path())
        .args(["config", "set", "nonexistent.key", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown or read-only configuration key"));
}

#[test]
fn test_config_set_repairs_invalid_local_config() {
    let home = TempDir::new().unwrap();
    let local_dir = home.path().join("work/.folio");
    std::fs::create_dir_all(&local_dir).unwrap();
    std::fs::write(local_dir.join("config.toml"), "[client]\npage_size = 0\n").unwrap();

    folio(home.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));

    folio(home.path())
        .args(["config", "get", "client.page_size"])
        .assert()
        .success()
        .stdout("0\n");

    folio(home.path())
        .args(["config", "set", "client.page_size", "6"])
        .assert()
        .success();

    folio(home.path()).arg("list").assert().success();
}

#[test]
fn test_config_get_unknown_key() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["config", "get", "nonexistent.key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_config_path_json() {
    let home = TempDir::new().unwrap();

    folio(home.path())
        .args(["config", "path", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"local_exists\": false"));
}
