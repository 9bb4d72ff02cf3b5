mod common;

use common::{API_PATH, TestContext, completion_body};
use mockito::{Matcher, Mock, Server, ServerGuard};
use predicates::prelude::*;
use std::fs;

fn mock_completion(server: &mut ServerGuard, content: &str, hits: usize) -> Mock {
    server
        .mock("POST", API_PATH)
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(content))
        .expect(hits)
        .create()
}

fn generate_args<'a>(release: &'a str, category: &'a str, id: &'a str) -> Vec<&'a str> {
    vec![
        "generate",
        "--release",
        release,
        "--category",
        category,
        "--id",
        id,
        "--title",
        "Export button",
        "--description",
        "Users can export reports.",
    ]
}

#[test]
fn generate_saves_entry_and_show_prints_document() {
    let ctx = TestContext::new();
    let mut server = Server::new();
    let mock = mock_completion(
        &mut server,
        "<think>plan the note</think>Reports can now be exported to CSV.",
        1,
    );
    ctx.write_config(&server.url());

    ctx.cli()
        .args(generate_args("v4.21.0", "User Story", "JBSV-3048"))
        .assert()
        .success()
        .stdout(predicate::str::contains("###[JBSV-3048] Export button"))
        .stdout(predicate::str::contains("✅ Saved [JBSV-3048] to version v4.21.0"));

    mock.assert();
    assert!(ctx.database_path().exists());

    ctx.cli()
        .args(["show", "--release", "v4.21.0"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[[_TOC_]]"))
        .stdout(predicate::str::contains("##User Story\n###[JBSV-3048] Export button"))
        .stdout(predicate::str::contains("Reports can now be exported to CSV."))
        .stdout(predicate::str::contains("<think>").not());
}

#[test]
fn generate_preview_does_not_save() {
    let ctx = TestContext::new();
    let mut server = Server::new();
    let mock = mock_completion(&mut server, "Fixed the crash on save.", 1);
    ctx.write_config(&server.url());

    let mut args = generate_args("v1.0.0", "bug", "BUG-7");
    args.push("--preview");
    ctx.cli()
        .args(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains("###[BUG-7] Export button"))
        .stdout(predicate::str::contains("Preview only"));

    mock.assert();

    ctx.cli()
        .args(["show", "-r", "v1.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks added yet for this version."));
}

#[test]
fn generate_reports_api_failure_and_persists_nothing() {
    let ctx = TestContext::new();
    let mut server = Server::new();
    let mock = server
        .mock("POST", API_PATH)
        .with_status(500)
        .with_body("upstream exploded")
        .expect(1)
        .create();
    ctx.write_config(&server.url());

    ctx.cli()
        .args(generate_args("v2.0.0", "Bug", "BUG-1"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Completion API error (500)"));

    mock.assert();

    ctx.cli()
        .args(["stats", "-r", "v2.0.0", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 0"));
}

#[test]
fn generate_requires_api_key() {
    let ctx = TestContext::new();
    let mut server = Server::new();
    let mock = mock_completion(&mut server, "unused", 0);
    ctx.write_config(&server.url());

    ctx.cli()
        .env_remove("GROQ_API_KEY")
        .args(generate_args("v1.0.0", "Bug", "BUG-1"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("GROQ_API_KEY environment variable not set"));

    mock.assert();
}

#[test]
fn generate_rejects_unknown_category() {
    let ctx = TestContext::new();
    let mut server = Server::new();
    let mock = mock_completion(&mut server, "unused", 0);
    ctx.write_config(&server.url());

    ctx.cli()
        .args(generate_args("v1.0.0", "Feature", "F-1"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid category 'Feature'"));

    mock.assert();
}

#[test]
fn show_orders_sections_by_category_precedence() {
    let ctx = TestContext::new();
    let mut server = Server::new();
    let _mock = mock_completion(&mut server, "Generated text.", 3);
    ctx.write_config(&server.url());

    for (category, id) in [("Technical Debt", "TD-1"), ("Improvement", "IMP-1"), ("story", "US-1")]
    {
        ctx.cli().args(generate_args("v3.0.0", category, id)).assert().success();
    }

    let output = ctx.cli().args(["show", "-r", "v3.0.0"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let story = stdout.find("##User Story").unwrap();
    let improvement = stdout.find("##Improvement").unwrap();
    let debt = stdout.find("##Technical Debt").unwrap();
    assert!(story < improvement && improvement < debt, "unexpected order:\n{stdout}");
    assert!(!stdout.contains("##Bug"));
}

#[test]
fn regenerating_a_ticket_replaces_its_entry() {
    let ctx = TestContext::new();
    let mut server = Server::new();
    let _mock = mock_completion(&mut server, "Generated text.", 2);
    ctx.write_config(&server.url());

    ctx.cli().args(generate_args("v3.1.0", "Bug", "BUG-9")).assert().success();
    ctx.cli().args(generate_args("v3.1.0", "Improvement", "BUG-9")).assert().success();

    ctx.cli()
        .args(["stats", "-r", "v3.1.0", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 1"))
        .stdout(predicate::str::contains("\"improvements\": 1"))
        .stdout(predicate::str::contains("\"bugs\": 0"));
}

#[test]
fn edit_from_file_overrides_document_until_reset() {
    let ctx = TestContext::new();
    let mut server = Server::new();
    let _mock = mock_completion(&mut server, "Generated text.", 1);
    ctx.write_config(&server.url());

    ctx.cli().args(generate_args("v5.0.0", "Bug", "BUG-2")).assert().success();

    let edited = ctx.work_dir().join("edited.md");
    fs::write(&edited, "# Hand written notes\n\nEverything is better.\n").unwrap();

    ctx.cli()
        .args(["edit", "-r", "v5.0.0", "--yes", "--file"])
        .arg(&edited)
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Saved manual edit for version v5.0.0"));

    ctx.cli()
        .args(["show", "-r", "v5.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Hand written notes"))
        .stdout(predicate::str::contains("###[BUG-2]").not());

    ctx.cli()
        .args(["stats", "-r", "v5.0.0", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"overridden\": true"));

    ctx.cli().args(["version", "reset", "v5.0.0"]).assert().success();

    ctx.cli()
        .args(["show", "-r", "v5.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Hand written notes").not());
}

#[test]
fn edit_reads_document_from_stdin() {
    let ctx = TestContext::new();
    ctx.cli().args(["version", "create", "v6.0.0"]).assert().success();

    ctx.cli()
        .args(["edit", "-r", "v6.0.0", "-y", "-f", "-"])
        .write_stdin("Piped notes\n")
        .assert()
        .success();

    ctx.cli()
        .args(["show", "-r", "v6.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Piped notes"));
}

#[test]
fn edit_rejects_missing_version_before_reading_input() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["edit", "-r", "v0.9.0", "-y", "-f", "does-not-exist.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Version 'v0.9.0' not found"));
}

#[test]
fn edit_rejects_blank_document_and_keeps_entries() {
    let ctx = TestContext::new();
    let mut server = Server::new();
    let _mock = mock_completion(&mut server, "Generated text.", 1);
    ctx.write_config(&server.url());

    ctx.cli().args(generate_args("v6.1.0", "Bug", "BUG-4")).assert().success();

    ctx.cli()
        .args(["edit", "-r", "v6.1.0", "-y", "-f", "-"])
        .write_stdin("  \n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Edited document is empty"));

    ctx.cli()
        .args(["show", "-r", "v6.1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("###[BUG-4] Export button"));
}

#[test]
fn delete_removes_version_and_rejects_missing_one() {
    let ctx = TestContext::new();
    let mut server = Server::new();
    let _mock = mock_completion(&mut server, "Generated text.", 1);
    ctx.write_config(&server.url());

    ctx.cli().args(generate_args("v7.0.0", "Bug", "BUG-3")).assert().success();

    ctx.cli()
        .args(["delete", "v7.0.0", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Deleted version v7.0.0"));

    ctx.cli()
        .args(["show", "-r", "v7.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks added yet for this version."));

    ctx.cli()
        .args(["rm", "v7.0.0", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Version 'v7.0.0' not found"));
}

#[test]
fn export_writes_default_file_name() {
    let ctx = TestContext::new();
    let mut server = Server::new();
    let _mock = mock_completion(&mut server, "Generated text.", 1);
    ctx.write_config(&server.url());

    ctx.cli().args(generate_args("v8.1.0", "Improvement", "IMP-4")).assert().success();

    ctx.cli()
        .args(["export", "-r", "v8.1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("release_notes_v8.1.0.md"));

    let exported = ctx.read("release_notes_v8.1.0.md");
    assert!(exported.starts_with("[[_TOC_]]"));
    assert!(exported.contains("##Improvement\n###[IMP-4] Export button"));
}

#[test]
fn created_version_becomes_default_target() {
    let ctx = TestContext::new();
    let mut server = Server::new();
    let _mock = mock_completion(&mut server, "Generated text.", 1);
    ctx.write_config(&server.url());

    ctx.cli()
        .args(["version", "create", "v9.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Version v9.0.0 is now active"));

    ctx.cli()
        .args([
            "generate",
            "-c",
            "Bug",
            "-i",
            "BUG-5",
            "-t",
            "Login fails",
            "-d",
            "Login failed on Safari.",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Saved [BUG-5] to version v9.0.0"));

    ctx.cli()
        .args(["version", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"v9.0.0\""))
        .stdout(predicate::str::contains("\"is_active\": true"))
        .stdout(predicate::str::contains("\"task_count\": 1"));

    ctx.cli()
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("###[BUG-5] Login fails"));
}

#[test]
fn purge_removes_every_version() {
    let ctx = TestContext::new();
    ctx.cli().args(["version", "create", "v1.0.0"]).assert().success();
    ctx.cli().args(["version", "create", "v1.1.0"]).assert().success();

    ctx.cli()
        .args(["purge", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Removed all versions"));

    ctx.cli()
        .args(["version", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No versions yet."));
}

#[test]
fn db_flag_overrides_configured_database() {
    let ctx = TestContext::new();
    ctx.write_config("http://127.0.0.1:9");
    let db = ctx.work_dir().join("elsewhere/custom.db");

    ctx.cli().arg("--db").arg(&db).args(["version", "create", "v1.0.0"]).assert().success();

    assert!(db.exists());
    assert!(!ctx.database_path().exists());

    ctx.cli().args(["version", "create", "v2.0.0"]).assert().success();
    assert!(ctx.database_path().exists());

    ctx.cli()
        .args(["version", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("v2.0.0"))
        .stdout(predicate::str::contains("v1.0.0").not());
}

#[test]
fn explicit_missing_config_fails() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["--config", "nope.toml", "version", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn temperature_env_is_sent_in_request() {
    let ctx = TestContext::new();
    let mut server = Server::new();
    let mock = server
        .mock("POST", API_PATH)
        .match_body(Matcher::PartialJson(serde_json::json!({ "temperature": 0.25 })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("Generated text."))
        .expect(1)
        .create();
    ctx.write_config(&server.url());

    let mut args = generate_args("v1.0.0", "Bug", "BUG-1");
    args.push("--preview");
    ctx.cli().env("TEMPERATURE", "0.25").args(&args).assert().success();

    mock.assert();
}
