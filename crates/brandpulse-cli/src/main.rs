use std::path::{Path, PathBuf};

use anyhow::Context;
use brandpulse_ai::{ModelBundle, Predictor};
use brandpulse_core::extract_username;
use brandpulse_graph::config::{DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use brandpulse_graph::{GraphClient, GraphConfig};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod batch;
mod display;

#[derive(Parser)]
#[command(
    name = "brandpulse",
    version,
    about = "Brand sentiment prediction and Instagram engagement analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict the sentiment label of a single text.
    Predict {
        text: String,
        /// Brand the text is about; defaults to "unknown".
        #[arg(long)]
        brand: Option<String>,
        #[command(flatten)]
        models: ModelArgs,
    },
    /// Predict labels for JSON lines of `{"text": .., "brand": ..}`.
    PredictBatch {
        /// Input file, or `-` for stdin.
        #[arg(long, default_value = "-")]
        input: String,
        #[command(flatten)]
        models: ModelArgs,
    },
    /// Fetch engagement metrics for an Instagram business/creator profile.
    Analyze {
        /// Profile URL, e.g. https://www.instagram.com/nike/
        profile_url: String,
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
        posts_limit: u32,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        graph: GraphArgs,
    },
    /// Load the model bundle and print its shape.
    InspectModels {
        #[command(flatten)]
        models: ModelArgs,
    },
}

#[derive(Args)]
struct ModelArgs {
    /// Directory holding the four model artifacts.
    #[arg(long = "models", env = "BRANDPULSE_MODEL_DIR", default_value = "models")]
    dir: PathBuf,
}

#[derive(Args)]
struct GraphArgs {
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,
    #[arg(long, env = "IG_BUSINESS_ID")]
    ig_business_id: Option<String>,
    #[arg(long, env = "GRAPH_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,
    #[arg(long, env = "GRAPH_API_BASE", default_value = DEFAULT_BASE_URL)]
    api_base: String,
}

impl GraphArgs {
    fn into_config(self) -> anyhow::Result<GraphConfig> {
        let config = GraphConfig::new(
            self.access_token.unwrap_or_default(),
            self.ig_business_id.unwrap_or_default(),
        )
        .context("Graph API credentials")?
        .with_api_version(self.api_version)
        .with_base_url(self.api_base);
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("brandpulse v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Predict {
            text,
            brand,
            models,
        } => {
            let predictor = load_predictor(&models.dir)?;
            println!("{}", predictor.predict(&text, brand.as_deref()));
        }
        Command::PredictBatch { input, models } => {
            let predictor = load_predictor(&models.dir)?;
            let n = batch::run(&predictor, &input)?;
            tracing::info!(n, "batch prediction complete");
        }
        Command::Analyze {
            profile_url,
            posts_limit,
            json,
            graph,
        } => {
            let username = extract_username(&profile_url)?;
            let client = GraphClient::new(graph.into_config()?)?;
            let report = client
                .analyze(username, posts_limit)
                .await
                .with_context(|| format!("analyzing @{username}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                display::print_analysis(&report);
            }
        }
        Command::InspectModels { models } => {
            let bundle = ModelBundle::load(&models.dir)
                .with_context(|| format!("loading models from {}", models.dir.display()))?;
            display::print_model_summary(&models.dir, &bundle.summary());
        }
    }

    Ok(())
}

fn load_predictor(dir: &Path) -> anyhow::Result<Predictor> {
    Predictor::load(dir).with_context(|| format!("loading models from {}", dir.display()))
}
