//! Command-line front end for the claim pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use esg_salience::claims::ScoreTableClassifier;
use esg_salience::pipeline::artifacts::{self, read_json_file, ArtifactStore};
use esg_salience::pipeline::{
    ClaimClassifier, CompanyProfileSource, Deadline, Pipeline, PipelineConfig, PipelineOutput, RunStatus,
    TracingObserver,
};
use esg_salience::session::{refresh_profile, ProfileStore, ProfileTableSource, SessionState};
use esg_salience::summarizer::LexicalEmbedder;
use esg_salience::{lexical, Claim};

#[derive(Debug, Parser)]
#[command(name = "esg-salience", version, about = "Claim scoring and thematic salience for sustainability reports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the full pipeline on a plain-text report.
    Run {
        /// Report text file.
        #[arg(long)]
        text: PathBuf,
        /// JSON object of sentence -> claim probability.
        #[arg(long)]
        scores: PathBuf,
        /// Output directory for the artifacts.
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Company the report belongs to; recorded in the session state.
        #[arg(long)]
        company: Option<String>,
        /// JSON object of company -> ESG profile; refreshes company_data.json.
        #[arg(long, requires = "company")]
        profiles: Option<PathBuf>,
    },
    /// Rank and summarize a persisted claims list.
    Rank {
        /// claims.json from a previous run.
        #[arg(long)]
        claims: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the lexical risk scores of a report as JSON.
    Lexical {
        #[arg(long)]
        text: PathBuf,
    },
    /// Print the last analyzed company.
    Session {
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Cli::parse().command {
        Command::Run {
            text,
            scores,
            out,
            config,
            company,
            profiles,
        } => run(
            &text,
            &scores,
            &out,
            config.as_deref(),
            company.as_deref(),
            profiles.as_deref(),
        ),
        Command::Rank {
            claims,
            out,
            config,
        } => rank(&claims, &out, config.as_deref()),
        Command::Lexical { text } => {
            let text = read_text(&text)?;
            println!("{}", serde_json::to_string_pretty(&lexical::score_document(&text))?);
            Ok(())
        }
        Command::Session { out } => {
            let path = out.join(artifacts::SESSION_META);
            let state = SessionState::load(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            match state.and_then(|s| s.last_analyzed_company) {
                Some(company) => println!("{company}"),
                None => bail!("no previous analysis found in {}", out.display()),
            }
            Ok(())
        }
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    PipelineConfig::resolve(path).context("loading pipeline configuration")
}

fn run(
    text: &Path,
    scores: &Path,
    out: &Path,
    config: Option<&Path>,
    company: Option<&str>,
    profiles: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let text = read_text(text)?;
    let table = ScoreTableClassifier::from_path(scores)
        .with_context(|| format!("loading claim scores from {}", scores.display()))?;

    let classifier: Box<dyn ClaimClassifier> = match config.capability_timeout() {
        Some(timeout) => Box::new(Deadline::new(table, timeout)),
        None => Box::new(table),
    };
    let pipeline = Pipeline::new(classifier, LexicalEmbedder::default(), &config);
    let output = pipeline.run(&text, &mut TracingObserver);

    let store = ArtifactStore::new(out)?;
    if let Some(company) = company {
        SessionState::for_company(company).save(store.path(artifacts::SESSION_META))?;
        if let Some(profiles) = profiles {
            let table = ProfileTableSource::from_path(profiles)
                .with_context(|| format!("loading company profiles from {}", profiles.display()))?;
            let source: Box<dyn CompanyProfileSource> = match config.capability_timeout() {
                Some(timeout) => Box::new(Deadline::new(table, timeout)),
                None => Box::new(table),
            };
            let profile_store = ProfileStore::new(store.path(artifacts::COMPANY_DATA));
            refresh_profile(source.as_ref(), &profile_store, company)?;
        }
    }
    finish(&output, &store)
}

fn rank(claims: &Path, out: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let claims: Vec<Claim> = read_json_file(claims)
        .with_context(|| format!("loading claims from {}", claims.display()))?;

    let pipeline = Pipeline::new(ScoreTableClassifier::default(), LexicalEmbedder::default(), &config);
    let output = pipeline.rank_claims(&claims, &mut TracingObserver);

    let store = ArtifactStore::new(out)?;
    finish(&output, &store)
}

fn finish(output: &PipelineOutput, store: &ArtifactStore) -> anyhow::Result<()> {
    output
        .write_to(store)
        .with_context(|| format!("writing artifacts to {}", store.dir().display()))?;

    match &output.status {
        RunStatus::Complete => {
            info!(
                out = %store.dir().display(),
                excluded = output.exclusions.len(),
                "artifacts written"
            );
            Ok(())
        }
        RunStatus::Failed { stage, error } => bail!("stage {stage} failed: {error}"),
    }
}
