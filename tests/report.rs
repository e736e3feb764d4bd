use std::path::Path;
use std::process::Command;

use vigil_core::filter_text_paths;
use vigil_git::repo::GitRepo;
use vigil_review::prompt::parse_triage_response;
use vigil_review::report::{append_file_links, links_section, rewrite_remote_url};

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .status()
        .expect("git available");
    assert!(status.success(), "git {args:?} failed");
}

fn repo_with_remote(dir: &Path, remote: &str) -> GitRepo {
    git(dir, &["init", "-q", "-b", "main"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "user.name", "Test"]);
    std::fs::write(dir.join("x.go"), "package main").unwrap();
    git(dir, &["add", "x.go"]);
    git(dir, &["commit", "-q", "-m", "add x"]);
    git(dir, &["remote", "add", "origin", remote]);
    GitRepo::new(dir)
}

#[test]
fn ssh_remote_yields_github_blob_link() {
    let dir = tempfile::tempdir().unwrap();
    let repo = repo_with_remote(dir.path(), "git@github.com:org/repo.git");

    let report = append_file_links(&repo, "Solid change.".into(), &["x.go".to_string()]);
    assert!(report.starts_with("Solid change."));
    assert!(report.contains("Changed Files:"));
    assert!(report.contains("- [x.go](https://github.com/org/repo/blob/main/x.go)"));
}

#[test]
fn unsupported_remote_leaves_review_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let repo = repo_with_remote(dir.path(), "ssh://git@github.com/org/repo.git");

    let report = append_file_links(&repo, "Solid change.".into(), &["x.go".to_string()]);
    assert_eq!(report, "Solid change.");
}

#[test]
fn empty_file_list_appends_no_section() {
    let dir = tempfile::tempdir().unwrap();
    let repo = repo_with_remote(dir.path(), "git@github.com:org/repo.git");

    let report = append_file_links(&repo, "Nothing to link.".into(), &[]);
    assert_eq!(report, "Nothing to link.");
}

#[test]
fn remote_rewrite_matches_link_section() {
    let base = rewrite_remote_url("git@github.com:org/repo.git").unwrap();
    let section = links_section(&base, "main", &["x.go".to_string()]);
    assert!(section.contains("https://github.com/org/repo/blob/main/x.go"));
}

#[test]
fn triage_noise_parses_then_filters() {
    // Mixed fence noise: the response is valid JSON, one entry wrapped
    // in backticks. After parsing and allowlist filtering, the binary
    // entry is gone and the backticked one survives cleaned.
    let response = r#"["a.go", "b.png", "`c.md`"]"#;
    let parsed = parse_triage_response(response).unwrap();
    let kept = filter_text_paths(parsed);
    assert_eq!(kept, vec!["a.go".to_string(), "c.md".to_string()]);
}
