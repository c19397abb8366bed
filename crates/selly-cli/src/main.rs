mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use cmd::letter::WriteArgs;
use selly_core::letter::{MAX_INTENSITY, MIN_INTENSITY};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "selly",
    about = "Dear Selly: write a letter at night, get a reply, grow a garden",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data directory (default: ~/.selly)
    #[arg(long, global = true, env = "SELLY_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tell Selly your name
    Onboard { name: String },

    /// Write tonight's letter and wait for Selly's reply
    Write {
        /// What's on your mind
        content: String,

        /// JOY, CALM, ANXIOUS, SAD, ANGRY or TIRED
        #[arg(long, short = 'e')]
        emotion: String,

        /// How strongly you feel it
        #[arg(
            long,
            short = 'i',
            default_value_t = 3,
            value_parser = clap::value_parser!(u8).range(MIN_INTENSITY as i64..=MAX_INTENSITY as i64)
        )]
        intensity: u8,

        /// Situation tag (repeatable), e.g. WORK, FAMILY. See `selly tags`
        #[arg(long = "context", short = 'c')]
        contexts: Vec<String>,

        /// Body/mind tag (repeatable), e.g. INSOMNIA, HEADACHE. See `selly tags`
        #[arg(long = "status", short = 's')]
        statuses: Vec<String>,
    },

    /// Open the latest unread reply
    Read,

    /// Plant the gift seed of a reply (default: the latest unread one)
    Plant {
        /// Reply id
        #[arg(long)]
        reply: Option<String>,
    },

    /// Show the garden
    Garden,

    /// Mood trend and emotion distribution
    Stats,

    /// Profile, counts and pending reply
    Status,

    /// List emotions and the grouped situation and body/mind tags
    Tags,

    /// Keep the garden growing in the foreground, printing stage changes
    Watch,

    /// Inspect and validate config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Watch => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Onboard { name } => cmd::onboard::run(&root, &name, cli.json),
        Commands::Write {
            content,
            emotion,
            intensity,
            contexts,
            statuses,
        } => cmd::letter::write(
            &root,
            WriteArgs {
                content,
                emotion,
                intensity,
                contexts,
                statuses,
            },
            cli.json,
        ),
        Commands::Read => cmd::letter::read(&root, cli.json),
        Commands::Plant { reply } => cmd::letter::plant(&root, reply.as_deref(), cli.json),
        Commands::Garden => cmd::garden::run(&root, cli.json),
        Commands::Stats => cmd::stats::run(&root, cli.json),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Tags => cmd::tags::run(cli.json),
        Commands::Watch => cmd::watch::run(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
