mod replay;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use canvas::engine::Engine;
use clap::{Args, Parser, Subcommand};
use replay::ReplayError;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "inkplane", about = "Replay input scripts through the infinite canvas engine")]
struct Cli {
    #[arg(long, global = true, env = "INKPLANE_CONFIG", help = "JSON config file; defaults apply when omitted")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a JSON-lines event script to the engine and print summaries.
    Replay(ReplayArgs),
    /// Print the effective config as JSON.
    Config,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(long, default_value = "-", help = "Script path, or - for stdin")]
    script: String,

    #[arg(long, default_value_t = false, help = "Only print the final session summary")]
    summary_only: bool,
}

fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = replay::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Replay(args) => run_replay(config, &args),
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&config).map_err(ReplayError::Encode)?;
            println!("{rendered}");
            Ok(())
        }
    }
}

fn run_replay(config: canvas::config::CanvasConfig, args: &ReplayArgs) -> Result<(), ReplayError> {
    let reader: Box<dyn BufRead> = if args.script == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&args.script)?))
    };

    let mut engine = Engine::new(config);
    let mut stdout = io::stdout().lock();
    replay::run(&mut engine, reader, &mut stdout, args.summary_only)?;
    Ok(())
}
