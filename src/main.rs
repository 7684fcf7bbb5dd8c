//! Magic Words - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Magic Words - terminal viewer for dialogue with inline glyphs and avatars
#[derive(Parser, Debug)]
#[command(name = "magic-words")]
#[command(version)]
#[command(about = "Scrollable viewer for dialogue mixing text, glyphs and avatars")]
pub struct Args {
    /// Path to a dialogue JSON document (`-` reads stdin; omit for the bundled sample)
    pub document: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Stop immediately when a drag is released
    #[arg(long)]
    pub no_inertia: bool,

    /// Hide the speaker label before each line
    #[arg(long)]
    pub no_speaker: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = magic_words::config::load_config_with_precedence(args.config.clone())?;
        let merged = magic_words::config::merge_config(config_file);
        let with_env = magic_words::config::apply_env_overrides(merged);

        // Flags only override when explicitly set
        let inertia_override = args.no_inertia.then_some(false);
        let speaker_override = args.no_speaker.then_some(false);

        magic_words::config::apply_cli_overrides(with_env, inertia_override, speaker_override)
            .sanitized()
    };

    magic_words::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let source = magic_words::source::detect_document_source(args.document.clone());

    magic_words::view::run_with_source(source, config)?;

    Ok(())
}
