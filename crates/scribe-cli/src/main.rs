//! release-scribe — rewrite the latest release's notes with an LLM.
//!
//! Fetches the newest eligible release of a GitHub repository, rewrites its
//! notes through the OpenAI chat API, and writes the polished notes back to
//! the release record.
//!
//! Inputs follow the GitHub Actions convention: every flag can also be
//! supplied via an `INPUT_*` environment variable. On success the processed
//! release's `release`, `id`, and `description` are written to the file
//! named by `GITHUB_OUTPUT` (or stdout when unset); on failure a single
//! `::error::` line is emitted and the process exits non-zero.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, Level};

use scribe_core::{
    init_tracing, ExclusionPolicy, NotesPipeline, PipelineConfig, PipelineOutcome, RepoSlug,
};
use scribe_github::{GitHubConfig, GitHubReleaseSource};
use scribe_openai::{OpenAiCompletionBackend, OpenAiConfig};

#[derive(Parser)]
#[command(name = "release-scribe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rewrite the latest GitHub release's notes with an LLM", long_about = None)]
struct Cli {
    /// Repository to annotate, as "owner/name"
    #[arg(long, env = "INPUT_REPOSITORY")]
    repository: String,

    /// GitHub token used to list and update releases
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    /// OpenAI API key
    #[arg(long, env = "INPUT_OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,

    /// OpenAI model identifier (backend default when omitted)
    #[arg(long, env = "INPUT_OPENAI_MODEL")]
    openai_model: Option<String>,

    /// Comma-separated release states to skip: "prerelease", "draft"
    #[arg(long, env = "INPUT_EXCLUDES", default_value = "")]
    excludes: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let repository: RepoSlug = self
            .repository
            .parse()
            .with_context(|| format!("invalid repository input: {:?}", self.repository))?;

        let mut config = PipelineConfig::new(repository, &self.github_token, &self.openai_api_key)
            .with_excludes(ExclusionPolicy::parse(&self.excludes));
        if let Some(model) = &self.openai_model {
            config = config.with_model(model);
        }
        Ok(config)
    }
}

/// Render the structured outputs in `GITHUB_OUTPUT` file format.
///
/// `release` and `id` are plain `key=value` lines; the multi-line
/// `description` uses the heredoc form with a delimiter guaranteed not to
/// occur in the body.
fn render_outputs(outcome: &PipelineOutcome) -> String {
    let mut delimiter = String::from("SCRIBE_EOF");
    while outcome.description.contains(&delimiter) {
        delimiter.push('_');
    }

    format!(
        "release={}\nid={}\ndescription<<{delimiter}\n{}\n{delimiter}\n",
        outcome.release, outcome.id, outcome.description
    )
}

/// Append outputs to the `GITHUB_OUTPUT` file when set, else print them.
fn emit_outputs(outcome: &PipelineOutcome, output_file: Option<&Path>) -> Result<()> {
    let rendered = render_outputs(outcome);
    match output_file {
        Some(path) => {
            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open output file {}", path.display()))?;
            file.write_all(rendered.as_bytes())
                .context("failed to write outputs")?;
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let config = cli.pipeline_config()?;

    let source = Arc::new(GitHubReleaseSource::new(GitHubConfig::new(
        &config.github_token,
    )));
    let mut backend_config = OpenAiConfig::new(&config.openai_api_key);
    if let Some(model) = &config.openai_model {
        backend_config = backend_config.with_model(model);
    }
    let backend = Arc::new(OpenAiCompletionBackend::new(backend_config));

    match NotesPipeline::run(source, backend, &config).await {
        Ok(outcome) => {
            info!(release = %outcome.release, id = %outcome.id, "release notes rewritten");
            let output_file = std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from);
            emit_outputs(&outcome, output_file.as_deref())?;
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "release annotation failed");
            // Workflow-command form so CI surfaces the failure inline.
            println!("::error::{err}");
            std::process::exit(1);
        }
    }
}
