use std::path::Path;

use vigil_core::VigilError;

/// Placeholder in both templates for the commit metadata + diff block.
pub const COMMIT_INFO_SLOT: &str = "{commit_info}";
/// Placeholder in the triage template for the changed-file candidates.
pub const CHANGED_FILES_SLOT: &str = "{changed_files}";
/// Placeholder in the review template for the fetched file contents.
pub const FILE_CONTENTS_SLOT: &str = "{file_contents}";

const TRIAGE_PROMPT: &str = "\
You are assisting with a code review. Below is the metadata and diff of a
commit range, followed by the list of files that changed in the range.

{commit_info}

Changed files:
{changed_files}

Pick the files whose full contents a reviewer must read to judge this
change properly. Prefer few files over many.

Respond with ONLY a JSON array of file path strings, nothing else.
Example: [\"src/main.rs\", \"README.md\"]";

const REVIEW_PROMPT: &str = "\
You are a critical code reviewer. Below is the metadata and diff of a
commit range, followed by the full contents of the files selected for
inspection.

{commit_info}

File contents:
{file_contents}

Write a critical review of this change. Call out bugs, regressions,
missing error handling, and risky design decisions. Be specific and
reference file paths and code. Do not pad the review with praise.";

/// The pair of prompt templates driving the two model calls.
///
/// # Examples
///
/// ```
/// use vigil_review::prompt::PromptSet;
///
/// let prompts = PromptSet::builtin();
/// assert!(prompts.triage.contains("{commit_info}"));
/// assert!(prompts.review.contains("{file_contents}"));
/// ```
#[derive(Debug, Clone)]
pub struct PromptSet {
    /// Template for the triage (file-selection) call.
    pub triage: String,
    /// Template for the critical-review call.
    pub review: String,
}

impl PromptSet {
    /// The embedded default templates.
    pub fn builtin() -> Self {
        Self {
            triage: TRIAGE_PROMPT.to_string(),
            review: REVIEW_PROMPT.to_string(),
        }
    }

    /// Builtin templates with optional per-file overrides.
    ///
    /// # Errors
    ///
    /// An unreadable override file is fatal: the caller asked for a
    /// specific template and silently reviewing with the builtin one
    /// would be misleading.
    pub fn with_overrides(
        triage: Option<&Path>,
        review: Option<&Path>,
    ) -> Result<Self, VigilError> {
        let mut prompts = Self::builtin();
        if let Some(path) = triage {
            prompts.triage = read_template(path)?;
        }
        if let Some(path) = review {
            prompts.review = read_template(path)?;
        }
        Ok(prompts)
    }
}

fn read_template(path: &Path) -> Result<String, VigilError> {
    std::fs::read_to_string(path).map_err(|e| {
        VigilError::Config(format!("cannot read prompt file {}: {e}", path.display()))
    })
}

/// Render the triage prompt from its template.
///
/// # Examples
///
/// ```
/// use vigil_review::prompt::{render_triage, PromptSet};
///
/// let prompts = PromptSet::builtin();
/// let rendered = render_triage(&prompts.triage, "Commit: abc", "a.rs\nb.md");
/// assert!(rendered.contains("Commit: abc"));
/// assert!(rendered.contains("a.rs\nb.md"));
/// ```
pub fn render_triage(template: &str, commit_info: &str, changed_files: &str) -> String {
    template
        .replace(COMMIT_INFO_SLOT, commit_info)
        .replace(CHANGED_FILES_SLOT, changed_files)
}

/// Render the critical-review prompt from its template.
pub fn render_review(template: &str, commit_info: &str, file_contents: &str) -> String {
    template
        .replace(COMMIT_INFO_SLOT, commit_info)
        .replace(FILE_CONTENTS_SLOT, file_contents)
}

/// Parse the triage response into a list of file paths.
///
/// The model is expected to return a JSON array of strings. Surrounding
/// markdown code fences and per-entry backtick noise are stripped before
/// parsing. A response that still does not parse is fatal — the pipeline
/// cannot proceed without a valid file list.
///
/// # Errors
///
/// Returns [`VigilError::Llm`] when the cleaned response is not a JSON
/// array of strings.
///
/// # Examples
///
/// ```
/// use vigil_review::prompt::parse_triage_response;
///
/// let files = parse_triage_response("```json\n[\"a.rs\", \"`b.md`\"]\n```").unwrap();
/// assert_eq!(files, vec!["a.rs".to_string(), "b.md".to_string()]);
/// ```
pub fn parse_triage_response(response: &str) -> Result<Vec<String>, VigilError> {
    let cleaned = strip_code_fences(response);

    let files: Vec<String> = serde_json::from_str(cleaned)
        .map_err(|e| VigilError::Llm(format!("triage response is not a JSON file list: {e}")))?;

    Ok(files
        .into_iter()
        .map(|f| f.trim().trim_matches('`').trim().to_string())
        .filter(|f| !f.is_empty())
        .collect())
}

fn strip_code_fences(s: &str) -> &str {
    let trimmed = s.trim();
    if let Some(rest) = trimmed.strip_prefix("```json") {
        if let Some(inner) = rest.strip_suffix("```") {
            return inner.trim();
        }
    }
    if let Some(rest) = trimmed.strip_prefix("```") {
        if let Some(inner) = rest.strip_suffix("```") {
            return inner.trim();
        }
    }
    trimmed.trim_matches('`').trim()
}
