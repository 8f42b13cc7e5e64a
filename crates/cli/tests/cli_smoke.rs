//! Smoke tests for command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("bookshelf-cli").unwrap();
    // Keep the developer's config files and .env out of the picture.
    let empty = std::env::temp_dir().join("bookshelf-cli-no-config");
    cmd.env("BOOKSHELF_CONFIG_DIR", &empty).current_dir(std::env::temp_dir());
    cmd
}

#[test]
fn test_help_lists_commands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init-db"))
        .stdout(predicate::str::contains("check-config"));
}

#[test]
fn test_check_config_redacts_password() {
    cli()
        .arg("check-config")
        .env("BOOKSHELF_ENV", "local")
        .env("MYSQL_PASSWORD", "hunter2")
        .env("MYSQL_HOST", "db.internal")
        .assert()
        .success()
        .stdout(predicate::str::contains("db.internal"))
        .stdout(predicate::str::contains("<redacted>"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_unknown_environment_fails() {
    cli()
        .arg("check-config")
        .env("BOOKSHELF_ENV", "qa")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported environment"));
}
