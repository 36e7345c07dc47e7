// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::errors::{ErrorClass, ServiceError};

mod app_config;
mod app_controller;
mod errors;
mod language_utils;
mod providers;
mod subtitle_format;
mod title;
mod transcript;
mod video_id;

/// CLI Wrapper for ExportFormat selection
#[derive(Debug, Clone, ValueEnum)]
enum CliExportFormat {
    Srt,
    Vtt,
    Txt,
}

impl CliExportFormat {
    /// The request parameter value this choice stands for
    fn as_param(&self) -> &'static str {
        match self {
            CliExportFormat::Srt => "srt",
            CliExportFormat::Vtt => "vtt",
            CliExportFormat::Txt => "txt",
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List a video's title and available caption tracks
    Info {
        /// Video share URL
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Download captions for one language as SRT, VTT, or plain text
    Download {
        /// Video share URL
        #[arg(value_name = "URL")]
        url: String,

        /// Caption language code (e.g., 'en', 'ko', 'pt-BR')
        #[arg(short, long)]
        language: String,

        /// Export format
        #[arg(short = 'F', long, value_enum)]
        format: Option<CliExportFormat>,

        /// Output file path (defaults to the suggested filename in the
        /// current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the first caption fragments for one language
    Preview {
        /// Video share URL
        #[arg(value_name = "URL")]
        url: String,

        /// Caption language code (e.g., 'en', 'ko', 'pt-BR')
        #[arg(short, long)]
        language: String,
    },

    /// Generate shell completions for yacex
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// yacex - Yet Another Caption EXporter
///
/// Fetches caption metadata and caption content for videos identified by
/// their share URL, and exports them as SRT, WebVTT, or plain text.
#[derive(Parser, Debug)]
#[command(name = "yacex")]
#[command(version = "0.1.0")]
#[command(about = "Caption listing, preview, and export for video share URLs")]
#[command(long_about = "yacex lists, previews, and downloads video captions from share URLs.

EXAMPLES:
    yacex info https://youtu.be/dQw4w9WgXcQ                 # List caption tracks
    yacex download -l en https://youtu.be/dQw4w9WgXcQ       # Download English SRT
    yacex download -l ko -F vtt 'https://www.youtube.com/watch?v=dQw4w9WgXcQ'
    yacex preview -l en https://youtu.be/dQw4w9WgXcQ        # First ten fragments
    yacex completions bash > yacex.bash                     # Generate completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "yacex", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli.config_path, cli.log_level.as_ref())?;
    let controller = Controller::with_config(&config);

    let outcome = match &cli.command {
        Commands::Info { url } => run_info(&controller, url).await,
        Commands::Download {
            url,
            language,
            format,
            output,
        } => run_download(&controller, url, language, format.as_ref(), output.as_deref()).await,
        Commands::Preview { url, language } => run_preview(&controller, url, language).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    if let Err(error) = outcome {
        report_service_error(&error);
    }

    Ok(())
}

/// Load the configuration file, creating a default one when absent
fn load_config(config_path: &str, cli_log_level: Option<&CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        let content = std::fs::read_to_string(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    if let Some(log_level) = cli_log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    let level = match config.log_level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    };
    log::set_max_level(level);

    Ok(config)
}

/// Map a core error onto the process exit vocabulary
fn report_service_error(error: &ServiceError) -> ! {
    error!("{}", error);
    let code = match error.classification() {
        ErrorClass::BadRequest => 2,
        ErrorClass::NotFound => 3,
        ErrorClass::Unavailable => 4,
    };
    std::process::exit(code);
}

fn network_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

async fn run_info(controller: &Controller, url: &str) -> Result<(), ServiceError> {
    let spinner = network_spinner("Fetching caption metadata...");
    let result = controller.caption_info(url).await;
    spinner.finish_and_clear();

    let info = result?;
    info!("{} caption track(s) for: {}", info.available_captions.len(), info.title);

    let json = serde_json::to_string_pretty(&info)
        .unwrap_or_else(|e| format!("{{\"serialization error\": \"{}\"}}", e));
    println!("{}", json);

    Ok(())
}

async fn run_download(
    controller: &Controller,
    url: &str,
    language: &str,
    format: Option<&CliExportFormat>,
    output: Option<&Path>,
) -> Result<(), ServiceError> {
    if !language_utils::is_plausible_tag(language) {
        warn!("'{}' does not look like a language tag; trying it anyway", language);
    }

    let spinner = network_spinner("Downloading captions...");
    let result = controller
        .download(url, Some(language), format.map(|f| f.as_param()))
        .await;
    spinner.finish_and_clear();

    let download = result?;
    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&download.filename));

    if let Err(e) = std::fs::write(&output_path, &download.content) {
        error!("Failed to write {}: {}", output_path.display(), e);
        std::process::exit(1);
    }

    info!("Saved {} ({} bytes, {})", output_path.display(), download.content.len(), download.mime_type);
    Ok(())
}

async fn run_preview(controller: &Controller, url: &str, language: &str) -> Result<(), ServiceError> {
    if !language_utils::is_plausible_tag(language) {
        warn!("'{}' does not look like a language tag; trying it anyway", language);
    }

    let spinner = network_spinner("Fetching caption preview...");
    let result = controller.preview(url, Some(language)).await;
    spinner.finish_and_clear();

    let preview = result?;
    info!("Previewing '{}' captions for: {}", preview.language, preview.video_title);

    let json = serde_json::to_string_pretty(&preview)
        .unwrap_or_else(|e| format!("{{\"serialization error\": \"{}\"}}", e));
    println!("{}", json);

    Ok(())
}
