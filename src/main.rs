use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{Context, IntoDiagnostic, Result};

use vigil_core::{VigilConfig, VigilError};
use vigil_git::changeset::extract_changeset;
use vigil_git::repo::GitRepo;
use vigil_git::resolve::{recent_messages, resolve_range, RangeSpec};
use vigil_review::llm::LlmClient;
use vigil_review::pipeline::ReviewPipeline;
use vigil_review::prompt::PromptSet;
use vigil_review::{report, webhook};

#[derive(Parser)]
#[command(
    name = "vigil",
    version,
    about = "AI commit-range review — triage with a cheap model, review with a strong one",
    long_about = "Vigil reviews a range of git commits with two model calls: a cheap\n\
                   triage call picks the files worth reading in full, and a strong model\n\
                   writes the critical review from the diff plus those files.\n\n\
                   Examples:\n  \
                     vigil review                   Review HEAD against its parent\n  \
                     vigil review abc123            Review a commit against its parent\n  \
                     vigil review abc123 def456     Review an explicit pair (newer older)\n  \
                     vigil history --count 20       Print recent non-merge commit subjects"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .vigil.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Load environment from this file instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run the two-stage review over a commit range
    #[command(long_about = "Run the two-stage review over a commit range.\n\n\
        With no hashes, HEAD is compared against its parent. One hash is\n\
        compared against its parent. Two hashes are compared exactly as\n\
        given, newer first, with no ancestry check.\n\n\
        Examples:\n  vigil review\n  vigil review abc123\n  vigil review abc123 def456 --webhook https://hooks.example.com/r")]
    Review {
        /// Zero, one, or two commit hashes (newer first)
        #[arg(num_args = 0..=2)]
        hashes: Vec<String>,

        /// Repository path (default: current directory)
        #[arg(long, default_value = ".")]
        repo: PathBuf,

        /// Webhook URL to POST the final report to
        #[arg(long)]
        webhook: Option<String>,

        /// System instruction prepended to the review prompt
        #[arg(long)]
        system: Option<String>,

        /// File containing a custom triage prompt template
        #[arg(long)]
        triage_prompt: Option<PathBuf>,

        /// File containing a custom review prompt template
        #[arg(long)]
        review_prompt: Option<PathBuf>,
    },
    /// Print recent commit subjects for review context
    #[command(long_about = "Print recent commit subjects for review context.\n\n\
        Merge commits are skipped unless --include-merges is given or\n\
        skip_merge_commits is disabled in .vigil.toml. A repository whose\n\
        HEAD is a root commit has nothing to report and exits 0.")]
    History {
        /// Number of commits to list
        #[arg(long, default_value = "10")]
        count: usize,

        /// Include merge commits in the listing
        #[arg(long)]
        include_merges: bool,

        /// Repository path (default: current directory)
        #[arg(long, default_value = ".")]
        repo: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .into_diagnostic()
                .wrap_err(format!("loading env file {}", path.display()))?;
        }
        None => {
            let _ = dotenvy::dotenv();
        }
    }

    let mut config = match &cli.config {
        Some(path) => VigilConfig::from_file(path).into_diagnostic()?,
        None => {
            let default_path = std::path::Path::new(".vigil.toml");
            if default_path.exists() {
                VigilConfig::from_file(default_path).into_diagnostic()?
            } else {
                VigilConfig::default()
            }
        }
    };
    config.apply_env();

    match cli.command {
        None => {
            print_welcome();
            Ok(())
        }
        Some(Command::Review {
            hashes,
            repo,
            webhook,
            system,
            triage_prompt,
            review_prompt,
        }) => {
            if let Some(url) = webhook {
                config.review.webhook = Some(url);
            }
            if let Some(instruction) = system {
                config.review.system_prompt = Some(instruction);
            }
            run_review(
                config,
                cli.verbose,
                &hashes,
                repo,
                triage_prompt.as_deref(),
                review_prompt.as_deref(),
            )
            .await
        }
        Some(Command::History {
            count,
            include_merges,
            repo,
        }) => run_history(&config, count, include_merges, repo),
    }
}

async fn run_review(
    config: VigilConfig,
    verbose: bool,
    hashes: &[String],
    repo_root: PathBuf,
    triage_prompt: Option<&std::path::Path>,
    review_prompt: Option<&std::path::Path>,
) -> Result<()> {
    let repo = GitRepo::new(repo_root);

    let spec = RangeSpec::from_hashes(hashes).into_diagnostic()?;
    let range = resolve_range(&repo, &spec).into_diagnostic()?;
    let changeset = extract_changeset(&repo, range).into_diagnostic()?;

    if verbose {
        eprintln!(
            "comparing {}..{} ({} candidate files)",
            changeset.range.older.hash,
            changeset.range.newer.hash,
            changeset.files.len()
        );
    }

    let prompts = PromptSet::with_overrides(triage_prompt, review_prompt).into_diagnostic()?;
    let llm = LlmClient::new(&config.llm).into_diagnostic()?;
    let pipeline = ReviewPipeline::new(llm, prompts, config.review.system_prompt.clone());
    let outcome = pipeline.run(&changeset, repo.root()).await.into_diagnostic()?;

    if verbose {
        eprintln!(
            "triage ({}) selected {} files, {} read; review by {}",
            outcome.stats.low_model,
            outcome.stats.files_selected,
            outcome.stats.files_read,
            outcome.stats.high_model
        );
    }

    let final_report = report::append_file_links(&repo, outcome.review, &outcome.files);
    println!("{final_report}");

    if let Some(url) = &config.review.webhook {
        match webhook::send_report(url, &final_report).await {
            Ok(()) => eprintln!("Webhook sent successfully"),
            Err(e) => eprintln!("warning: {e}"),
        }
    }

    Ok(())
}

fn run_history(
    config: &VigilConfig,
    count: usize,
    include_merges: bool,
    repo_root: PathBuf,
) -> Result<()> {
    let repo = GitRepo::new(repo_root);
    let skip_merges = config.review.skip_merge_commits && !include_merges;

    match recent_messages(&repo, count, skip_merges) {
        Ok(messages) if messages.is_empty() => {
            eprintln!("no commit subjects to report");
            Ok(())
        }
        Ok(messages) => {
            println!("{messages}");
            Ok(())
        }
        // A root commit is a benign early exit in metadata mode.
        Err(VigilError::NoParent(hash)) => {
            eprintln!("commit {hash} has no parent; nothing to report");
            Ok(())
        }
        Err(e) => Err(e).into_diagnostic(),
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!("vigil v{version} — AI commit-range review\n");

    println!("Quick start:");
    println!("  vigil review                  Review HEAD against its parent");
    println!("  vigil review <hash>           Review a commit against its parent");
    println!("  vigil review <new> <old>      Review an explicit pair\n");

    println!("All commands:");
    println!("  review    Two-stage AI review of a commit range");
    println!("  history   Recent non-merge commit subjects\n");

    println!("Configuration: .vigil.toml, VIGIL_* env vars, or a .env file.");
    println!("Run 'vigil <command> --help' for details.");
}
