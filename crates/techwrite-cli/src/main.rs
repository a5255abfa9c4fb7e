use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use serde::Deserialize;
use techwrite_core::{render_report, LlmSettings, OutputFormat, TechnicalWritingChecker};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "techwrite",
    author,
    version,
    about = "Technical Writing Checker CLI"
)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
struct Cli {
    /// Text to analyze
    text: Option<String>,

    /// Read text from file instead of command line
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Emit the analysis as JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Optional configuration file with an `[llm]` table (model, endpoint, timeout_secs)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    llm: FileLlmConfig,
}

#[derive(Debug, Default, Deserialize)]
struct FileLlmConfig {
    model: Option<String>,
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let text = read_input(&cli)?;
    let settings = load_settings(cli.config.as_deref())?;
    let checker = TechnicalWritingChecker::new(&settings)?;

    let analysis = checker.check_text_async(&text).await?;

    if cli.json {
        println!("{}", render_report(&analysis, OutputFormat::Json)?);
        return Ok(());
    }

    println!("\nAnalysis Results:");
    println!("{}", "=".repeat(50));
    println!("{}", checker.format_analysis(&analysis));
    Ok(())
}

fn read_input(cli: &Cli) -> Result<String> {
    let text = match (&cli.file, &cli.text) {
        (Some(path), _) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                bail!("file '{}' not found", path.display())
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read file '{}'", path.display()))
            }
        },
        (None, Some(text)) => text.clone(),
        (None, None) => String::new(),
    };

    if text.trim().is_empty() {
        bail!("no text provided for analysis");
    }
    Ok(text)
}

fn load_settings(config_path: Option<&Path>) -> Result<LlmSettings> {
    // Values already present in the environment win over `.env`.
    let _ = dotenvy::dotenv();
    let mut settings = LlmSettings::from_env()?;

    if let Some(path) = config_path {
        let file = load_file_config(path)?;
        debug!(path = %path.display(), "applying configuration file");
        settings.model = settings.model.or(file.llm.model);
        settings.endpoint = settings.endpoint.or(file.llm.endpoint);
        settings.timeout_secs = settings.timeout_secs.or(file.llm.timeout_secs);
    }
    Ok(settings)
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    config::Config::builder()
        .add_source(config::File::from(path))
        .build()
        .and_then(|cfg| cfg.try_deserialize::<FileConfig>())
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
