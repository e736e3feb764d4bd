use vigil_git::repo::GitRepo;

/// Rewrite a git remote URL into an `https` base usable for file links.
///
/// SSH-style remotes (`git@host:path`) become `https://host/path`;
/// `https` remotes are used as-is. A trailing `.git` is dropped either
/// way. Any other form returns `None` — links are cosmetic, so the
/// caller skips the section rather than failing.
///
/// # Examples
///
/// ```
/// use vigil_review::report::rewrite_remote_url;
///
/// assert_eq!(
///     rewrite_remote_url("git@github.com:org/repo.git").as_deref(),
///     Some("https://github.com/org/repo")
/// );
/// assert_eq!(
///     rewrite_remote_url("https://github.com/org/repo").as_deref(),
///     Some("https://github.com/org/repo")
/// );
/// assert!(rewrite_remote_url("ssh://weird/form").is_none());
/// ```
pub fn rewrite_remote_url(remote: &str) -> Option<String> {
    let url = remote.trim();
    let url = url.strip_suffix(".git").unwrap_or(url);
    if let Some(rest) = url.strip_prefix("git@") {
        let (host, path) = rest.split_once(':')?;
        Some(format!("https://{host}/{path}"))
    } else if url.starts_with("https://") {
        Some(url.to_string())
    } else {
        None
    }
}

/// Render the `Changed Files:` section with one Markdown link per file.
///
/// # Examples
///
/// ```
/// use vigil_review::report::links_section;
///
/// let section = links_section("https://github.com/org/repo", "main", &["x.go".into()]);
/// assert!(section.contains("- [x.go](https://github.com/org/repo/blob/main/x.go)"));
/// ```
pub fn links_section(base_url: &str, branch: &str, files: &[String]) -> String {
    let mut section = String::from("\n\nChanged Files:\n");
    for file in files {
        section.push_str(&format!("- [{file}]({base_url}/blob/{branch}/{file})\n"));
    }
    section
}

/// Append resolvable file links to the review text.
///
/// The link base comes from the `origin` remote and the current branch.
/// Every failure here is cosmetic: an unsupported remote form or a
/// failed lookup logs a warning and returns the review unchanged, as
/// does an empty file list.
pub fn append_file_links(repo: &GitRepo, review: String, files: &[String]) -> String {
    if files.is_empty() {
        return review;
    }

    let remote = match repo.remote_url() {
        Ok(url) => url,
        Err(e) => {
            eprintln!("warning: skipping file links: {e}");
            return review;
        }
    };
    let branch = match repo.branch() {
        Ok(branch) => branch,
        Err(e) => {
            eprintln!("warning: skipping file links: {e}");
            return review;
        }
    };
    let Some(base_url) = rewrite_remote_url(&remote) else {
        eprintln!("warning: unsupported git remote URL format: {remote}");
        return review;
    };

    let mut report = review;
    report.push_str(&links_section(&base_url, &branch, files));
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssh_remote_becomes_https_link_base() {
        let base = rewrite_remote_url("git@github.com:org/repo.git").unwrap();
        let section = links_section(&base, "main", &["x.go".to_string()]);
        assert!(section.contains("(https://github.com/org/repo/blob/main/x.go)"));
    }

    #[test]
    fn git_suffix_is_stripped_once() {
        assert_eq!(
            rewrite_remote_url("https://github.com/org/repo.git.git").as_deref(),
            Some("https://github.com/org/repo.git")
        );
    }

    #[test]
    fn https_remote_used_unchanged() {
        assert_eq!(
            rewrite_remote_url("https://gitlab.com/org/repo.git").as_deref(),
            Some("https://gitlab.com/org/repo")
        );
    }

    #[test]
    fn ssh_remote_without_colon_is_unsupported() {
        assert!(rewrite_remote_url("git@github.com/org/repo").is_none());
    }

    #[test]
    fn other_remote_forms_are_unsupported() {
        assert!(rewrite_remote_url("ssh://git@github.com/org/repo").is_none());
        assert!(rewrite_remote_url("/local/bare/repo.git").is_none());
        assert!(rewrite_remote_url("").is_none());
    }

    #[test]
    fn section_lists_every_file_in_order() {
        let section = links_section(
            "https://github.com/org/repo",
            "dev",
            &["a.rs".to_string(), "docs/b.md".to_string()],
        );
        let a = section.find("- [a.rs]").unwrap();
        let b = section.find("- [docs/b.md]").unwrap();
        assert!(a < b);
        assert!(section.contains("/blob/dev/docs/b.md"));
    }

    #[test]
    fn empty_file_list_appends_nothing() {
        // Lookups are never attempted when there is nothing to link.
        let repo = GitRepo::new("/definitely/not/a/repo");
        let report = append_file_links(&repo, "The review.".to_string(), &[]);
        assert_eq!(report, "The review.");
    }
}
