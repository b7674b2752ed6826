//! End-to-end pipeline tests against a mock GitHub API.
//!
//! Each test stands up a mockito server, points the verifier at it and
//! asserts on the recorded result log and the overall verdict.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use labelcheck::config::{Profile, VerifyConfig};
use labelcheck::verify::{CheckStatus, Verifier};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use serial_test::serial;
use std::env;

const ORG: &str = "test-org";
const REPO: &str = "GIT-HUB";
const TABLE_HEADER: &str = "| 标签名称 | 颜色值 | 描述 |";

const EXPECTED_LABELS: &[&str] = &[
    "bug",
    "enhancement",
    "documentation",
    "feature",
    "question",
    "help-wanted",
    "good-first-issue",
    "priority-high",
    "priority-medium",
    "priority-low",
    "status-in-progress",
    "status-review",
    "status-done",
    "status-blocked",
    "wontfix",
];

const CORE_LABELS: &[&str] = &[
    "bug",
    "enhancement",
    "documentation",
    "priority-high",
    "priority-medium",
    "priority-low",
];

fn set_credentials() {
    env::set_var("GITHUB_TOKEN", "dummy-token");
    env::set_var("GITHUB_ORG", ORG);
}

fn verifier(server: &ServerGuard, profile: Profile) -> Verifier {
    Verifier::new(VerifyConfig::for_profile(profile), profile).with_api_base(&server.url())
}

fn repo_path(suffix: &str) -> String {
    format!("/repos/{ORG}/{REPO}{suffix}")
}

/// A compliant label document: header, separator, one row per name.
fn document_markdown(names: &[&str]) -> String {
    let mut doc = format!("# Labels\n\n{TABLE_HEADER}\n|---|---|---|\n");
    for name in names {
        doc.push_str(&format!("| {name} | #d73a4a | desc |\n"));
    }
    doc
}

fn contents_body(markdown: &str) -> String {
    json!({ "content": STANDARD.encode(markdown) }).to_string()
}

fn labels_json(names: &[&str]) -> serde_json::Value {
    json!(names
        .iter()
        .map(|name| json!({ "name": name, "color": "d73a4a" }))
        .collect::<Vec<_>>())
}

fn mock_repo_root(server: &mut ServerGuard) {
    server
        .mock("GET", repo_path("").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create();
}

fn mock_branch(server: &mut ServerGuard, branch: &str) {
    server
        .mock("GET", repo_path(&format!("/branches/{branch}")).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "name": branch }).to_string())
        .create();
}

fn mock_document(server: &mut ServerGuard, doc_file: &str, markdown: &str) {
    server
        .mock("GET", repo_path(&format!("/contents/{doc_file}")).as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(contents_body(markdown))
        .create();
}

fn mock_issues(server: &mut ServerGuard, issues: serde_json::Value) {
    server
        .mock("GET", repo_path("/issues").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(issues.to_string())
        .create();
}

#[test]
#[serial]
fn full_pipeline_passes_for_compliant_repository() {
    set_credentials();
    let mut server = Server::new();

    mock_repo_root(&mut server);
    mock_branch(&mut server, "feat/label-standardization");
    mock_document(
        &mut server,
        "docs/labels-standard.md",
        &document_markdown(EXPECTED_LABELS),
    );
    mock_issues(
        &mut server,
        json!([
            { "number": 5, "title": "Fix bug" },
            {
                "number": 1,
                "title": "标签标准化需求",
                "body": "标签体系 颜色规范 标准化需求\n## 问题描述\n## 预期标准\n## 标签清单",
                "labels": labels_json(EXPECTED_LABELS),
            },
        ]),
    );
    server
        .mock("GET", repo_path("/pulls").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([{
                "number": 2,
                "title": "实施标签标准化",
                "body": "Closes #1\n## 修改摘要\n## 标签变更\n## 测试结果",
                "labels": labels_json(CORE_LABELS),
            }])
            .to_string(),
        )
        .create();
    server
        .mock("GET", repo_path("/issues/1/comments").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([{ "body": "已验证，见 pull/2" }]).to_string())
        .create();
    server
        .mock("GET", repo_path("/labels").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(labels_json(EXPECTED_LABELS).to_string())
        .create();

    let mut verifier = verifier(&server, Profile::Full);
    assert!(verifier.run());

    let log = verifier.log();
    assert_eq!(log.count(CheckStatus::Critical), 0);
    assert_eq!(log.count(CheckStatus::Warning), 0);
    // Environment, branch, document, issue, PR, label coverage, comments,
    // consistency, core labels.
    assert_eq!(log.count(CheckStatus::Success), 9);
}

#[test]
#[serial]
fn unreachable_api_is_critical_and_halts() {
    set_credentials();
    let mut server = Server::new();
    server
        .mock("GET", repo_path("").as_str())
        .with_status(500)
        .create();
    let branch = server
        .mock("GET", Matcher::Regex("/branches/".to_string()))
        .expect(0)
        .create();

    let mut verifier = verifier(&server, Profile::Full);
    assert!(!verifier.run());

    let log = verifier.log();
    assert_eq!(log.outcomes().len(), 1);
    assert_eq!(log.outcomes()[0].status, CheckStatus::Critical);
    branch.assert();
}

#[test]
#[serial]
fn missing_token_is_critical() {
    env::remove_var("GITHUB_TOKEN");
    env::set_var("GITHUB_ORG", ORG);
    let server = Server::new();

    let mut verifier = verifier(&server, Profile::Full);
    assert!(!verifier.run());

    let log = verifier.log();
    assert_eq!(log.outcomes().len(), 1);
    assert_eq!(log.outcomes()[0].status, CheckStatus::Critical);
    assert!(log.outcomes()[0].message.contains("GITHUB_TOKEN"));
}

#[test]
#[serial]
fn missing_branch_halts_before_document_check() {
    set_credentials();
    let mut server = Server::new();
    mock_repo_root(&mut server);
    // No branch mock: 501 from mockito for unmatched routes.
    let contents = server
        .mock("GET", Matcher::Regex("/contents/".to_string()))
        .expect(0)
        .create();

    let mut verifier = verifier(&server, Profile::Full);
    assert!(!verifier.run());

    let log = verifier.log();
    assert_eq!(log.outcomes().len(), 2);
    assert_eq!(log.outcomes()[1].status, CheckStatus::Critical);
    contents.assert();
}

#[test]
#[serial]
fn full_profile_halts_when_issue_is_missing() {
    set_credentials();
    let mut server = Server::new();
    mock_repo_root(&mut server);
    mock_branch(&mut server, "feat/label-standardization");
    mock_document(
        &mut server,
        "docs/labels-standard.md",
        &document_markdown(EXPECTED_LABELS),
    );
    mock_issues(&mut server, json!([{ "number": 5, "title": "Fix bug" }]));
    let pulls = server
        .mock("GET", Matcher::Regex("/pulls".to_string()))
        .expect(0)
        .create();

    let mut verifier = verifier(&server, Profile::Full);
    assert!(!verifier.run());
    assert_eq!(verifier.log().count(CheckStatus::Critical), 1);
    pulls.assert();
}

#[test]
#[serial]
fn full_profile_document_shortfall_is_critical() {
    set_credentials();
    let mut server = Server::new();
    mock_repo_root(&mut server);
    mock_branch(&mut server, "feat/label-standardization");
    mock_document(
        &mut server,
        "docs/labels-standard.md",
        &document_markdown(&["bug", "enhancement"]),
    );

    let mut verifier = verifier(&server, Profile::Full);
    assert!(!verifier.run());

    let last = verifier.log().outcomes().last().unwrap();
    assert_eq!(last.status, CheckStatus::Critical);
    assert!(last.message.contains("at least 15"));
}

#[test]
#[serial]
fn quick_profile_downgrades_document_shortfall_to_warning() {
    set_credentials();
    let mut server = Server::new();
    mock_repo_root(&mut server);
    mock_branch(&mut server, "main");
    // Heuristic-parseable rows without the strict header, below the minimum.
    mock_document(
        &mut server,
        "docs/label-color-standardization.md",
        "| bug | #d73a4a | desc |\n| docs | #0075ca | desc |\n",
    );
    mock_issues(&mut server, json!([]));

    let mut verifier = verifier(&server, Profile::Quick);
    // Two warnings (document shortfall, missing issue), no critical.
    assert!(verifier.run());

    let log = verifier.log();
    assert_eq!(log.count(CheckStatus::Critical), 0);
    assert_eq!(log.count(CheckStatus::Warning), 2);
    assert_eq!(log.count(CheckStatus::Success), 2);
}

#[test]
#[serial]
fn quick_profile_records_unreachable_issue_list_as_critical() {
    set_credentials();
    let mut server = Server::new();
    mock_repo_root(&mut server);
    mock_branch(&mut server, "main");
    mock_document(
        &mut server,
        "docs/label-color-standardization.md",
        &document_markdown(EXPECTED_LABELS),
    );
    // No issues mock: the listing cannot be fetched.

    let mut verifier = verifier(&server, Profile::Quick);
    // The critical issue-list result still fails the run overall.
    assert!(!verifier.run());

    let log = verifier.log();
    assert_eq!(log.count(CheckStatus::Critical), 1);
    assert_eq!(log.count(CheckStatus::Success), 3);
}

#[test]
#[serial]
fn warnings_alone_keep_the_run_successful() {
    set_credentials();
    let mut server = Server::new();
    mock_repo_root(&mut server);
    mock_branch(&mut server, "feat/label-standardization");
    mock_document(
        &mut server,
        "docs/labels-standard.md",
        &document_markdown(EXPECTED_LABELS),
    );
    mock_issues(
        &mut server,
        json!([{
            "number": 1,
            "title": "Label Standardization",
            "body": "no keywords here",
            "labels": [],
        }]),
    );
    server
        .mock("GET", repo_path("/pulls").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([{
                "number": 2,
                "title": "Label Standardization Implementation",
                "body": "",
                "labels": [],
            }])
            .to_string(),
        )
        .create();
    server
        .mock("GET", repo_path("/issues/1/comments").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();
    server
        .mock("GET", repo_path("/labels").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(labels_json(EXPECTED_LABELS).to_string())
        .create();

    let mut verifier = verifier(&server, Profile::Full);
    // Plenty of warnings, but nothing critical.
    assert!(verifier.run());

    let log = verifier.log();
    assert_eq!(log.count(CheckStatus::Critical), 0);
    assert!(log.count(CheckStatus::Warning) >= 5);
}
