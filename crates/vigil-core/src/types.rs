use std::path::Path;

use serde::{Deserialize, Serialize};

/// A resolved commit: hash plus full message. Immutable once resolved.
///
/// # Examples
///
/// ```
/// use vigil_core::CommitRef;
///
/// let commit = CommitRef {
///     hash: "abc123".into(),
///     message: "fix: off-by-one in pager".into(),
/// };
/// assert_eq!(commit.hash, "abc123");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRef {
    /// Full commit hash.
    pub hash: String,
    /// Full commit message body.
    pub message: String,
}

/// An ordered pair of commits being compared: `(newer, older)`.
///
/// `older` is an ancestor of `newer` unless the pair was supplied
/// explicitly. Resolution never leaves either side empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRange {
    /// The commit under review.
    pub newer: CommitRef,
    /// The baseline commit.
    pub older: CommitRef,
}

/// The diff and changed-file list derived from a [`CommitRange`].
///
/// `files` covers every commit in the range, deduplicated in order of
/// first appearance and filtered through the text-extension allowlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeSet {
    /// The resolved commit pair.
    pub range: CommitRange,
    /// Unified diff between the two endpoints.
    pub diff: String,
    /// Changed file paths across the whole range.
    pub files: Vec<String>,
}

impl ChangeSet {
    /// Render the commit metadata + diff block sent to both model calls.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil_core::{ChangeSet, CommitRange, CommitRef};
    ///
    /// let changeset = ChangeSet {
    ///     range: CommitRange {
    ///         newer: CommitRef { hash: "abc".into(), message: "add pager".into() },
    ///         older: CommitRef { hash: "def".into(), message: "init".into() },
    ///     },
    ///     diff: "+pager".into(),
    ///     files: vec![],
    /// };
    /// let info = changeset.commit_summary();
    /// assert!(info.starts_with("Commit: abc"));
    /// assert!(info.contains("add pager"));
    /// assert!(info.ends_with("+pager"));
    /// ```
    pub fn commit_summary(&self) -> String {
        format!(
            "Commit: {}\n\nMessage: {}\n\nDiff:\n{}",
            self.range.newer.hash, self.range.newer.message, self.diff
        )
    }
}

/// Extensions considered human-readable text. Only files matching this
/// allowlist are sent to models or rendered as links.
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "rs", "go", "py", "js", "html", "css", "json", "xml", "yaml", "yml", "toml",
    "ini", "cfg", "conf",
];

/// Check whether a path has an allowlisted text extension.
///
/// The comparison is case-insensitive. Paths without an extension are
/// rejected.
///
/// # Examples
///
/// ```
/// use vigil_core::is_text_path;
///
/// assert!(is_text_path("src/main.rs"));
/// assert!(is_text_path("docs/README.MD"));
/// assert!(!is_text_path("logo.png"));
/// assert!(!is_text_path("Makefile"));
/// ```
pub fn is_text_path(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let ext = e.to_ascii_lowercase();
            TEXT_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Keep only allowlisted text paths, preserving order.
///
/// # Examples
///
/// ```
/// use vigil_core::filter_text_paths;
///
/// let kept = filter_text_paths(vec!["a.go".into(), "b.png".into(), "c.md".into()]);
/// assert_eq!(kept, vec!["a.go".to_string(), "c.md".to_string()]);
/// ```
pub fn filter_text_paths(paths: Vec<String>) -> Vec<String> {
    paths.into_iter().filter(|p| is_text_path(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowlist_accepts_known_extensions() {
        for path in ["a.txt", "b.md", "c.rs", "d.yaml", "e.conf", "f.json"] {
            assert!(is_text_path(path), "{path} should be allowed");
        }
    }

    #[test]
    fn allowlist_rejects_binaries_and_bare_names() {
        for path in ["a.png", "b.jpg", "c.bin", "Makefile", "d.", ""] {
            assert!(!is_text_path(path), "{path} should be rejected");
        }
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_text_path("README.MD"));
        assert!(is_text_path("config.TOML"));
    }

    #[test]
    fn filtering_is_idempotent() {
        let once = filter_text_paths(vec![
            "a.go".into(),
            "b.png".into(),
            "c.md".into(),
            "vendor/lib.so".into(),
        ]);
        let twice = filter_text_paths(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn commit_summary_contains_all_parts() {
        let changeset = ChangeSet {
            range: CommitRange {
                newer: CommitRef {
                    hash: "aaa111".into(),
                    message: "feat: add webhook".into(),
                },
                older: CommitRef {
                    hash: "bbb222".into(),
                    message: "chore: bump deps".into(),
                },
            },
            diff: "diff --git a/x b/x".into(),
            files: vec!["x.rs".into()],
        };
        let summary = changeset.commit_summary();
        assert!(summary.contains("Commit: aaa111"));
        assert!(summary.contains("Message: feat: add webhook"));
        assert!(summary.contains("Diff:\ndiff --git a/x b/x"));
        // metadata describes the newer side only
        assert!(!summary.contains("bbb222"));
    }
}
