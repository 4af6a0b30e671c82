use assert_cmd::Command;
use predicates::prelude::*;

fn secure_repo() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("secure-repo");
    cmd.env_remove("GITHUB_TOKEN").env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    secure_repo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("audit"))
        .stdout(predicate::str::contains("list-checks"));
}

#[test]
fn list_checks_shows_every_check() {
    secure_repo()
        .args(["list-checks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checks"))
        .stdout(predicate::str::contains("actions_secrets"))
        .stdout(predicate::str::contains("environment_secrets"))
        .stdout(predicate::str::contains("branch_policy"))
        .stdout(predicate::str::contains("allowed_actions"))
        .stdout(predicate::str::contains("workflow_perms"))
        .stdout(predicate::str::contains("security_analysis"))
        .stdout(predicate::str::contains("fork_workflow_approval"))
        .stdout(predicate::str::contains("DISABLED").not());
}

#[test]
fn list_checks_honors_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("secure-repo.toml");
    std::fs::write(&config, "[checks]\nfork_workflow_approval = false\n").unwrap();

    secure_repo()
        .args(["list-checks", "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("DISABLED"));
}

#[test]
fn invalid_config_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("secure-repo.toml");
    std::fs::write(&config, "fail_on = \"catastrophic\"\n").unwrap();

    secure_repo()
        .args(["list-checks", "--config", config.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn missing_config_file_exits_2() {
    secure_repo()
        .args(["audit", "octo/repo", "--config", "does/not/exist.toml"])
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn audit_requires_a_repo() {
    secure_repo().args(["audit"]).assert().code(2);
}

#[test]
fn malformed_repo_exits_2() {
    secure_repo()
        .args(["audit", "not-a-repo"])
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("owner/repo"));
}

#[test]
fn dot_segment_repo_exits_2() {
    for repo in ["../octo", "octo/.."] {
        secure_repo()
            .args(["audit", repo])
            .env("GITHUB_TOKEN", "test-token")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("not a valid repository name"));
    }
}

#[test]
fn missing_token_exits_2() {
    secure_repo()
        .args(["audit", "octo/repo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("GITHUB_TOKEN must be provided"));
}

#[test]
fn blank_token_is_treated_as_missing() {
    secure_repo()
        .args(["audit", "octo/repo"])
        .env("GITHUB_TOKEN", "   ")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("GITHUB_TOKEN must be provided"));
}

#[test]
fn unknown_fail_on_kind_is_rejected() {
    secure_repo()
        .args(["audit", "octo/repo", "--fail-on", "catastrophic"])
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .code(2);
}

#[test]
fn invalid_api_url_exits_2() {
    secure_repo()
        .args(["audit", "octo/repo", "--api-url", "not a url"])
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn unreachable_api_exits_2() {
    secure_repo()
        .args(["audit", "octo/repo", "--api-url", "http://127.0.0.1:9"])
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("GitHub API error"));
}

#[test]
fn token_is_read_from_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "GITHUB_TOKEN=dotenv-token\n").unwrap();

    // Gets past the token check and fails on the unreachable API instead.
    secure_repo()
        .current_dir(dir.path())
        .args(["audit", "octo/repo", "--api-url", "http://127.0.0.1:9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("GitHub API error"))
        .stderr(predicate::str::contains("must be provided").not());
}

#[test]
fn fail_on_floor_kind_is_rejected() {
    for kind in ["good", "info"] {
        secure_repo()
            .args(["audit", "octo/repo", "--fail-on", kind])
            .env("GITHUB_TOKEN", "test-token")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("not an issue kind"));
    }
}

#[test]
fn fail_on_floor_kind_in_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("secure-repo.toml");
    std::fs::write(&config, "fail_on = \"good\"\n").unwrap();

    secure_repo()
        .args(["list-checks", "--config", config.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not an issue kind"));
}
