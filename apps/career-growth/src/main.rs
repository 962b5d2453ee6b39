mod advisor;
mod config;
mod contract;
mod errors;
mod llm_client;
mod render;
mod roadmap;
mod speech;
mod video;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::render::SlideRenderer;
use crate::roadmap::RoadmapPipeline;
use crate::speech::SpeechClient;
use crate::video::FfmpegAssembler;

#[derive(Parser, Debug)]
#[command(name = "career-growth", version, about = "Career suggestions and roadmap videos")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the questionnaire on stdin and print four career suggestions
    Suggest,

    /// Generate a narrated six-slide roadmap video for a career
    Roadmap {
        /// Career title, e.g. "Data Science"
        #[arg(long)]
        career: String,

        /// Output video path; an existing file is replaced
        #[arg(long, short, default_value = "career_overview.mp4")]
        output: PathBuf,

        /// TrueType font for slide text; the built-in bitmap font is used if it can't be loaded
        #[arg(long, env = "SLIDE_FONT")]
        font: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration first; a missing key must fail before any network call
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            init_tracing("info");
            let code = err
                .downcast_ref::<AppError>()
                .map(|e| (e.code(), e.exit_code()))
                .unwrap_or(("INTERNAL_ERROR", 1));
            error!(code = code.0, "{err:#}");
            return ExitCode::from(code.1);
        }
    };

    init_tracing(&config.rust_log);
    info!("Starting career-growth v{}", env!("CARGO_PKG_VERSION"));

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.code(), "{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Structured logging to stderr; stdout belongs to the interactive printer.
fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(command: Command, config: &Config) -> Result<(), AppError> {
    let llm = LlmClient::new(
        config.api_key.clone(),
        &config.api_base,
        config.llm_model.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    match command {
        Command::Suggest => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            advisor::run_career_suggestions(&mut input, &mut output, &llm).await?;
        }
        Command::Roadmap {
            career,
            output,
            font,
        } => {
            let speech = SpeechClient::new(
                config.api_key.clone(),
                &config.api_base,
                config.tts_model.clone(),
                config.tts_voice.clone(),
            )?;
            let font_path = font.unwrap_or_else(|| PathBuf::from(&config.slide_font));
            let renderer = SlideRenderer::from_font_file(&font_path);

            let pipeline = RoadmapPipeline::new(
                Arc::new(llm),
                Arc::new(speech),
                renderer,
                Arc::new(FfmpegAssembler::new(&config.ffmpeg_bin)),
            );
            let report = pipeline.run(&career, &output).await?;
            info!(
                career = %report.career,
                slides = report.slide_count,
                seconds = report.total_duration.as_secs_f64(),
                "Roadmap video ready at {}",
                report.output.display()
            );
            println!("Video saved as {}", report.output.display());
        }
    }
    Ok(())
}
