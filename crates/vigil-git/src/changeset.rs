use vigil_core::{is_text_path, ChangeSet, CommitRange, Result};

use crate::repo::GitRepo;

/// Extract the diff and changed-file list for a resolved range.
///
/// The diff covers the two endpoints; the file list covers every commit
/// in `older..newer`, deduplicated in order of first appearance and
/// filtered through the text allowlist. Any git failure here is fatal —
/// a partial diff is not acceptable input to the review stage.
pub fn extract_changeset(repo: &GitRepo, range: CommitRange) -> Result<ChangeSet> {
    let diff = repo.diff(&range.older.hash, &range.newer.hash)?;
    let listing = repo.name_only_log(&range.older.hash, &range.newer.hash)?;
    let files = collect_changed_paths(&listing);

    Ok(ChangeSet { range, diff, files })
}

/// Clean up a `git log --name-only` listing into an ordered file set.
///
/// Blank lines are dropped, repeated paths collapse to their first
/// appearance, and non-text paths are excluded.
///
/// # Examples
///
/// ```
/// use vigil_git::changeset::collect_changed_paths;
///
/// let listing = "src/main.rs\n\nassets/logo.png\nsrc/main.rs\nREADME.md\n";
/// let files = collect_changed_paths(listing);
/// assert_eq!(files, vec!["src/main.rs".to_string(), "README.md".to_string()]);
/// ```
pub fn collect_changed_paths(listing: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| is_text_path(line))
        .filter(|line| seen.insert(line.to_string()))
        .map(str::to_string)
        .collect()
}
