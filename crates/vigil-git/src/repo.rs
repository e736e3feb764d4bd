use std::path::PathBuf;
use std::process::Command;

use vigil_core::{Result, VigilError};

/// Handle to a git repository, addressed by its working-tree root.
///
/// Every method shells out to `git -C <root> …` and returns stdout as
/// text. Non-zero exit status maps to [`VigilError::Git`] carrying the
/// trimmed stderr.
///
/// # Examples
///
/// ```
/// use vigil_git::repo::GitRepo;
///
/// let repo = GitRepo::new(".");
/// ```
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Create a handle for the repository at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The working-tree root this handle points at.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VigilError::Git(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Resolve the current `HEAD` to a full hash.
    pub fn head(&self) -> Result<String> {
        Ok(self.run(&["rev-parse", "HEAD"])?.trim().to_string())
    }

    /// Resolve the immediate parent of `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Git`] when `hash` itself is not a known
    /// revision, and [`VigilError::NoParent`] when it resolves but has
    /// no parent (a root commit).
    pub fn parent(&self, hash: &str) -> Result<String> {
        // An unknown revision must surface as a git error, not "no parent".
        let resolved = self.run(&["rev-parse", "--verify", hash])?;
        let rev = format!("{}^", resolved.trim());
        match self.run(&["rev-parse", "--verify", &rev]) {
            Ok(out) => Ok(out.trim().to_string()),
            Err(_) => Err(VigilError::NoParent(hash.to_string())),
        }
    }

    /// Full message body of a single commit.
    pub fn commit_message(&self, hash: &str) -> Result<String> {
        Ok(self
            .run(&["log", "-1", "--pretty=format:%B", hash])?
            .trim_end()
            .to_string())
    }

    /// Unified diff between two refs, restricted to the tree root.
    pub fn diff(&self, older: &str, newer: &str) -> Result<String> {
        self.run(&["diff", older, newer, "--", "."])
    }

    /// Name-only log listing for every commit in `older..newer`.
    ///
    /// The output is one path per line with blank separators; see
    /// [`crate::changeset::collect_changed_paths`] for the cleanup.
    pub fn name_only_log(&self, older: &str, newer: &str) -> Result<String> {
        let range = format!("{older}..{newer}");
        self.run(&["log", "--name-only", "--pretty=format:", &range])
    }

    /// Subject lines of the `count` most recent commits reachable from `hash`.
    pub fn recent_subjects(&self, hash: &str, count: usize) -> Result<Vec<String>> {
        let n = count.to_string();
        let out = self.run(&["log", "-n", &n, "--pretty=format:%s", hash])?;
        Ok(out.lines().map(|l| l.to_string()).collect())
    }

    /// Name of the currently checked-out branch.
    pub fn branch(&self) -> Result<String> {
        Ok(self
            .run(&["rev-parse", "--abbrev-ref", "HEAD"])?
            .trim()
            .to_string())
    }

    /// URL of the `origin` remote.
    pub fn remote_url(&self) -> Result<String> {
        Ok(self
            .run(&["config", "--get", "remote.origin.url"])?
            .trim()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Repository-backed behavior is covered by the pure helpers in
    // resolve/changeset; here we only pin the failure mapping.

    #[test]
    fn missing_repo_is_a_git_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = GitRepo::new(dir.path());
        let err = repo.head().unwrap_err();
        assert!(matches!(err, VigilError::Git(_)), "got {err}");
    }

    #[test]
    fn root_is_preserved() {
        let repo = GitRepo::new("/some/where");
        assert_eq!(repo.root(), &PathBuf::from("/some/where"));
    }
}
