use std::path::Path;
use std::process::Command;

use vigil_core::VigilError;
use vigil_git::changeset::extract_changeset;
use vigil_git::repo::GitRepo;
use vigil_git::resolve::{recent_messages, resolve_range, RangeSpec};

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .status()
        .expect("git available");
    assert!(status.success(), "git {args:?} failed");
}

fn init_repo(dir: &Path) {
    git(dir, &["init", "-q", "-b", "main"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "user.name", "Test"]);
}

fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    std::fs::write(dir.join(name), content).unwrap();
    git(dir, &["add", name]);
    git(dir, &["commit", "-q", "-m", message]);
}

#[test]
fn head_resolves_against_its_parent() {
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    commit_file(dir.path(), "a.rs", "fn a() {}", "first");
    commit_file(dir.path(), "a.rs", "fn a() { /* v2 */ }", "second");

    let repo = GitRepo::new(dir.path());
    let range = resolve_range(&repo, &RangeSpec::Head).unwrap();

    assert_eq!(range.newer.hash, repo.head().unwrap());
    assert_eq!(range.older.hash, repo.parent(&range.newer.hash).unwrap());
    assert_eq!(range.newer.message, "second");
    assert_eq!(range.older.message, "first");
}

#[test]
fn explicit_pair_is_returned_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    commit_file(dir.path(), "a.rs", "one", "first");
    commit_file(dir.path(), "a.rs", "two", "second");

    let repo = GitRepo::new(dir.path());
    let head = repo.head().unwrap();
    let parent = repo.parent(&head).unwrap();

    // Deliberately inverted: resolution must not reorder by ancestry.
    let spec = RangeSpec::Pair(parent.clone(), head.clone());
    let range = resolve_range(&repo, &spec).unwrap();
    assert_eq!(range.newer.hash, parent);
    assert_eq!(range.older.hash, head);
}

#[test]
fn root_commit_resolution_fails() {
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    commit_file(dir.path(), "a.rs", "fn a() {}", "initial");

    let repo = GitRepo::new(dir.path());
    let err = resolve_range(&repo, &RangeSpec::Head).unwrap_err();
    assert!(matches!(err, VigilError::NoParent(_)), "got {err}");
}

#[test]
fn unknown_revision_is_a_git_error_not_no_parent() {
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    commit_file(dir.path(), "a.rs", "one", "first");
    commit_file(dir.path(), "a.rs", "two", "second");

    let repo = GitRepo::new(dir.path());
    let err = repo.parent("deadbeef").unwrap_err();
    assert!(matches!(err, VigilError::Git(_)), "got {err}");
}

#[test]
fn changeset_covers_the_whole_range_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    commit_file(dir.path(), "base.rs", "base", "base");
    commit_file(dir.path(), "a.rs", "one", "touch a");
    commit_file(dir.path(), "logo.png", "\u{1}\u{2}", "binary asset");
    commit_file(dir.path(), "a.rs", "two", "touch a again");

    let repo = GitRepo::new(dir.path());
    let head = repo.head().unwrap();
    let base = repo.parent(&repo.parent(&repo.parent(&head).unwrap()).unwrap()).unwrap();

    let range = resolve_range(&repo, &RangeSpec::Pair(head, base)).unwrap();
    let changeset = extract_changeset(&repo, range).unwrap();

    // a.rs appears once despite two commits; the png is filtered out.
    assert_eq!(changeset.files, vec!["a.rs".to_string()]);
    assert!(changeset.diff.contains("a.rs"));
}

#[test]
fn recent_messages_skips_merge_subjects() {
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    commit_file(dir.path(), "a.rs", "one", "feat: start");
    commit_file(dir.path(), "a.rs", "two", "Merge branch 'dev' into main");
    commit_file(dir.path(), "a.rs", "three", "fix: cleanup");

    let repo = GitRepo::new(dir.path());
    let messages = recent_messages(&repo, 10, true).unwrap();
    assert!(messages.contains("feat: start"));
    assert!(messages.contains("fix: cleanup"));
    assert!(!messages.contains("Merge branch"));

    let with_merges = recent_messages(&repo, 10, false).unwrap();
    assert!(with_merges.contains("Merge branch 'dev' into main"));
}

#[test]
fn recent_messages_on_root_commit_reports_no_parent() {
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    commit_file(dir.path(), "a.rs", "one", "initial");

    let repo = GitRepo::new(dir.path());
    let err = recent_messages(&repo, 5, true).unwrap_err();
    assert!(matches!(err, VigilError::NoParent(_)));
}
