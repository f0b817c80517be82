//! QuadCast CLI — LED control for HyperX QuadCast microphones.

use clap::Parser;

mod cli;

#[derive(Parser)]
#[command(
    name = "quadcast-cli",
    version,
    about = "LED control for HyperX QuadCast microphones"
)]
struct Args {
    /// Output as JSON (for check, status, devices, presets, config)
    #[arg(long, global = true)]
    json: bool,

    /// Show debug logging, including every external command run
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: cli::Command,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    if let Err(e) = cli::run(args.command, args.json) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
