//! End-to-end CLI tests for the locker-dl binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Command isolated from the user's config file.
fn locker_dl(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("locker-dl").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_binary_help_displays_usage() {
    let config_home = TempDir::new().unwrap();
    locker_dl(&config_home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("share links"));
}

#[test]
fn test_binary_rejects_unsupported_site_before_reading_links() {
    let config_home = TempDir::new().unwrap();
    locker_dl(&config_home)
        .args(["--site", "dropbox", "--links", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn test_binary_missing_links_file_fails() {
    let config_home = TempDir::new().unwrap();
    locker_dl(&config_home)
        .args(["--site", "mediafire", "--links", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read links file"));
}

#[test]
fn test_binary_empty_links_file_succeeds() {
    let config_home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let links = work.path().join("links.txt");
    std::fs::write(&links, "# nothing yet\n\n").unwrap();

    locker_dl(&config_home)
        .arg("--site")
        .arg("qiwi")
        .arg("--links")
        .arg(&links)
        .assert()
        .success();
}

#[test]
fn test_binary_invalid_config_file_fails() {
    let config_home = TempDir::new().unwrap();
    let dir = config_home.path().join("locker-dl");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "max_hops = 0\n").unwrap();

    locker_dl(&config_home)
        .args(["--site", "mediafire"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_hops"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_downloads_links_and_reports_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"doc part 1.pdf\"")
                .set_body_bytes(b"pdf".to_vec()),
        )
        .mount(&server)
        .await;

    let config_home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let out = work.path().join("out");
    let links = work.path().join("links.txt");
    std::fs::write(
        &links,
        format!("{uri}/ok\n{uri}/missing\n", uri = server.uri()),
    )
    .unwrap();

    locker_dl(&config_home)
        .arg("--site")
        .arg("mediafire")
        .arg("--links")
        .arg(&links)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure();

    assert_eq!(
        std::fs::read(out.join("doc").join("doc part 1.pdf")).unwrap(),
        b"pdf"
    );
}
