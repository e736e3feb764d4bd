use std::path::Path;

use serde::Serialize;
use vigil_core::{filter_text_paths, ChangeSet, VigilError};

use crate::llm::{ChatMessage, LlmClient};
use crate::prompt::{self, PromptSet};

/// Result of a completed pipeline run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    /// The critical-review text, verbatim from the high model.
    pub review: String,
    /// Files that were actually read and sent to the review call.
    pub files: Vec<String>,
    /// Statistics about the run.
    pub stats: ReviewStats,
}

/// Statistics about a pipeline run.
///
/// # Examples
///
/// ```
/// use vigil_review::pipeline::ReviewStats;
///
/// let stats = ReviewStats {
///     files_selected: 3,
///     files_read: 2,
///     low_model: "small".into(),
///     high_model: "large".into(),
/// };
/// assert!(stats.files_read <= stats.files_selected);
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    /// Paths the triage call selected (after allowlist re-validation).
    pub files_selected: usize,
    /// Paths whose contents were successfully read.
    pub files_read: usize,
    /// Model used for triage.
    pub low_model: String,
    /// Model used for the critical review.
    pub high_model: String,
}

/// Orchestrator for the two-stage review.
///
/// Stage one asks the low model which changed files merit a full read;
/// stage two sends the diff plus those files' contents to the high
/// model. The split keeps the expensive call's context bounded.
pub struct ReviewPipeline {
    llm: LlmClient,
    prompts: PromptSet,
    system_prompt: Option<String>,
}

impl ReviewPipeline {
    /// Create a pipeline from an LLM client, prompt templates, and an
    /// optional system instruction for the review call.
    pub fn new(llm: LlmClient, prompts: PromptSet, system_prompt: Option<String>) -> Self {
        Self {
            llm,
            prompts,
            system_prompt,
        }
    }

    /// Run the full pipeline over an extracted changeset.
    ///
    /// File contents are read from the working tree under `repo_root`;
    /// unreadable files are skipped with a warning. Everything else —
    /// either model call failing, or the triage response not parsing —
    /// is fatal.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Llm`] on model transport/API failure or an
    /// unparseable triage response.
    pub async fn run(
        &self,
        changeset: &ChangeSet,
        repo_root: &Path,
    ) -> Result<ReviewOutcome, VigilError> {
        let commit_info = changeset.commit_summary();

        // Stage one: triage.
        let triage_prompt = prompt::render_triage(
            &self.prompts.triage,
            &commit_info,
            &changeset.files.join("\n"),
        );
        let response = self
            .llm
            .chat(self.llm.low_model(), vec![ChatMessage::user(triage_prompt)])
            .await?;

        // The model's judgment is not trusted for file-type validity:
        // re-run the same allowlist used on git-derived paths.
        let selected = filter_text_paths(prompt::parse_triage_response(&response)?);
        let files_selected = selected.len();

        let contents = read_files(repo_root, &selected);
        let files_read = contents.len();

        // Stage two: critical review.
        let review_prompt = prompt::render_review(
            &self.prompts.review,
            &commit_info,
            &content_blocks(&contents),
        );
        let full_prompt = match &self.system_prompt {
            Some(system) => format!("{system}\n\n{review_prompt}"),
            None => review_prompt,
        };
        let review = self
            .llm
            .chat(self.llm.high_model(), vec![ChatMessage::user(full_prompt)])
            .await?;

        Ok(ReviewOutcome {
            review,
            files: contents.into_iter().map(|(path, _)| path).collect(),
            stats: ReviewStats {
                files_selected,
                files_read,
                low_model: self.llm.low_model().to_string(),
                high_model: self.llm.high_model().to_string(),
            },
        })
    }
}

/// Read each selected file from the working tree.
///
/// Unreadable files are dropped with a stderr warning; a thinner review
/// beats no review. Order follows the triage selection.
fn read_files(root: &Path, files: &[String]) -> Vec<(String, String)> {
    let mut contents = Vec::new();
    for file in files {
        match std::fs::read_to_string(root.join(file)) {
            Ok(text) => contents.push((file.clone(), text)),
            Err(e) => eprintln!("warning: skipping {file}: {e}"),
        }
    }
    contents
}

/// Concatenate file contents into `--- path ---` blocks for the prompt.
fn content_blocks(contents: &[(String, String)]) -> String {
    use std::fmt::Write;
    let mut out = String::new();
    for (path, text) in contents {
        let _ = write!(out, "\n--- {path} ---\n{text}\n");
    }
    out
}
