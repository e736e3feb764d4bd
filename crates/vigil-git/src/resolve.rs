use vigil_core::{CommitRange, CommitRef, Result, VigilError};

use crate::repo::GitRepo;

/// Subject prefix that marks a merge commit.
const MERGE_MARKER: &str = "Merge";

/// How the caller asked for the commit range, before touching git.
///
/// # Examples
///
/// ```
/// use vigil_git::resolve::RangeSpec;
///
/// let spec = RangeSpec::from_hashes(&["abc".into(), "def".into()]).unwrap();
/// assert_eq!(spec, RangeSpec::Pair("abc".into(), "def".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeSpec {
    /// No hashes given: compare `HEAD` against its parent.
    Head,
    /// One hash given: compare it against its parent.
    Single(String),
    /// Two hashes given: compare them exactly as supplied `(newer, older)`.
    Pair(String, String),
}

impl RangeSpec {
    /// Classify zero, one, or two explicit hashes.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Config`] for three or more hashes.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil_git::resolve::RangeSpec;
    ///
    /// assert_eq!(RangeSpec::from_hashes(&[]).unwrap(), RangeSpec::Head);
    /// assert!(RangeSpec::from_hashes(&["a".into(), "b".into(), "c".into()]).is_err());
    /// ```
    pub fn from_hashes(hashes: &[String]) -> Result<Self> {
        match hashes {
            [] => Ok(Self::Head),
            [one] => Ok(Self::Single(one.clone())),
            [newer, older] => Ok(Self::Pair(newer.clone(), older.clone())),
            _ => Err(VigilError::Config(format!(
                "expected at most two commit hashes, got {}",
                hashes.len()
            ))),
        }
    }
}

/// Resolve a [`RangeSpec`] into a concrete [`CommitRange`].
///
/// An explicit pair is taken verbatim with no ancestry check. A single
/// hash or bare `HEAD` is paired with its immediate parent; a root
/// commit with no parent is a resolution error, not a guess.
///
/// # Errors
///
/// [`VigilError::Git`] on any lookup failure, [`VigilError::NoParent`]
/// when the newer commit has no parent.
pub fn resolve_range(repo: &GitRepo, spec: &RangeSpec) -> Result<CommitRange> {
    let (newer, older) = match spec {
        RangeSpec::Pair(newer, older) => (newer.clone(), older.clone()),
        RangeSpec::Single(hash) => {
            let parent = repo.parent(hash)?;
            (hash.clone(), parent)
        }
        RangeSpec::Head => {
            let head = repo.head()?;
            let parent = repo.parent(&head)?;
            (head, parent)
        }
    };

    let newer = CommitRef {
        message: repo.commit_message(&newer)?,
        hash: newer,
    };
    let older = CommitRef {
        message: repo.commit_message(&older)?,
        hash: older,
    };

    Ok(CommitRange { newer, older })
}

/// Gather the subjects of the `count` most recent commits, newest first.
///
/// Intended for metadata gathering before a review: the result is a
/// newline-joined block suitable for a prompt. When `skip_merges` is
/// set, subjects starting with the merge marker word are dropped.
///
/// # Errors
///
/// Returns [`VigilError::NoParent`] when `HEAD` is a root commit — the
/// caller decides whether that is benign (history mode treats it as
/// "nothing to report").
pub fn recent_messages(repo: &GitRepo, count: usize, skip_merges: bool) -> Result<String> {
    let head = repo.head()?;
    // A lone root commit has no history worth summarizing.
    repo.parent(&head)?;

    let subjects = repo.recent_subjects(&head, count)?;
    let kept = if skip_merges {
        drop_merge_subjects(subjects)
    } else {
        subjects
    };
    Ok(kept.join("\n"))
}

/// Drop subjects that begin with the merge marker word.
///
/// # Examples
///
/// ```
/// use vigil_git::resolve::drop_merge_subjects;
///
/// let kept = drop_merge_subjects(vec![
///     "Merge branch 'main'".into(),
///     "fix: typo".into(),
/// ]);
/// assert_eq!(kept, vec!["fix: typo".to_string()]);
/// ```
pub fn drop_merge_subjects(subjects: Vec<String>) -> Vec<String> {
    subjects
        .into_iter()
        .filter(|s| !s.starts_with(MERGE_MARKER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_hashes_means_head() {
        assert_eq!(RangeSpec::from_hashes(&[]).unwrap(), RangeSpec::Head);
    }

    #[test]
    fn one_hash_means_single() {
        let spec = RangeSpec::from_hashes(&["abc123".into()]).unwrap();
        assert_eq!(spec, RangeSpec::Single("abc123".into()));
    }

    #[test]
    fn two_hashes_keep_their_order() {
        let spec = RangeSpec::from_hashes(&["newer".into(), "older".into()]).unwrap();
        assert_eq!(spec, RangeSpec::Pair("newer".into(), "older".into()));
    }

    #[test]
    fn three_hashes_rejected() {
        let err = RangeSpec::from_hashes(&["a".into(), "b".into(), "c".into()]).unwrap_err();
        assert!(matches!(err, VigilError::Config(_)));
    }

    #[test]
    fn merge_subjects_are_dropped() {
        let kept = drop_merge_subjects(vec![
            "Merge pull request #42".into(),
            "feat: add webhook".into(),
            "Merge branch 'dev' into main".into(),
            "fix: parent resolution".into(),
        ]);
        assert_eq!(
            kept,
            vec![
                "feat: add webhook".to_string(),
                "fix: parent resolution".to_string()
            ]
        );
    }

    #[test]
    fn non_leading_merge_word_is_kept() {
        let kept = drop_merge_subjects(vec!["fix: Merge logic in resolver".into()]);
        assert_eq!(kept.len(), 1);
    }
}
