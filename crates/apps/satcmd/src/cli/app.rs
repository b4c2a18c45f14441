use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use satcmd_core::CommandError;
use std::io;
use std::path::PathBuf;

use crate::cli::commands_build;
use crate::cli::commands_config;
use crate::cli::commands_list;
use crate::cli::commands_time_sync;
use crate::cli::config::{default_config_path, load_settings, Settings};
use crate::cli::console::ConsoleInput;
use crate::cli::output::Output;

#[derive(Debug, Clone, Parser)]
#[command(name = "satcmd", about = "Payload command packet builder", version)]
pub struct Cli {
    /// Settings file (defaults to $SATCMD_CONFIG_ROOT/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
    #[arg(long)]
    pub quiet: bool,
    /// Log generation steps to stderr
    #[arg(short, long)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build a registry command interactively
    Build(BuildArgs),
    /// List the selectable commands
    List,
    /// Build a time-sync packet
    TimeSync(TimeSyncArgs),
    Config(ConfigCommand),
}

#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    /// Command index, slug or name; prompted when omitted
    #[arg(long)]
    pub command: Option<String>,
    /// Command identifier; prompted when omitted
    #[arg(long)]
    pub id: Option<u8>,
}

#[derive(Debug, Clone, Args)]
pub struct TimeSyncArgs {
    #[arg(long, conflicts_with = "now")]
    pub timestamp: Option<u32>,
    /// Use the current Unix time
    #[arg(long)]
    pub now: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    Show,
    Init {
        #[arg(long)]
        reference_millivolts: Option<u32>,
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug)]
pub struct RuntimeContext {
    pub cli: Cli,
    pub config_path: PathBuf,
    pub settings: Settings,
    pub output: Output,
}

impl RuntimeContext {
    pub fn load(cli: Cli) -> Result<Self> {
        let config_path = match cli.config.clone() {
            Some(path) => path,
            None => default_config_path()?,
        };
        let settings = load_settings(&config_path)?;
        let output = Output::new(cli.json || settings.json, cli.quiet);
        Ok(Self {
            cli,
            config_path,
            settings,
            output,
        })
    }
}

pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Exit status for a failed run: 2 when the operator's input ended or could
/// not be read, 1 for everything else.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CommandError>() {
        Some(err) if err.is_input_failure() => 2,
        _ => 1,
    }
}

pub fn run_cli(cli: Cli) -> Result<()> {
    let ctx = RuntimeContext::load(cli)?;
    let command = ctx.cli.command.clone().unwrap_or(Command::Build(BuildArgs::default()));
    match command {
        Command::List => commands_list::run(&ctx),
        Command::Config(command) => commands_config::run(&ctx, &command),
        Command::Build(args) => {
            let mut console = stdio_console(&ctx);
            commands_build::run(&ctx, &args, &mut console).map(|_| ())
        }
        Command::TimeSync(args) => {
            let mut console = stdio_console(&ctx);
            commands_time_sync::run(&ctx, &args, &mut console).map(|_| ())
        }
    }
}

fn stdio_console(ctx: &RuntimeContext) -> ConsoleInput<io::StdinLock<'static>, io::Stderr> {
    ConsoleInput::new(
        io::stdin().lock(),
        io::stderr(),
        ctx.settings.reference_millivolts,
    )
}
