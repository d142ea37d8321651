use crate::commands::*;
use anyhow::Result;
use clap::{self, Parser, Subcommand};

mod commands;
mod io;

#[cfg(not(windows))]
#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[derive(Subcommand, Debug)]
enum Command {
    Classify(classify::Args),
    Play(play::Args),
    Survey(survey::Args),
}

#[derive(Parser)]
#[command(about = "Analyze and play small impartial games")]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match args.command {
        Command::Classify(args) => classify::run(args),
        Command::Play(args) => play::run(args),
        Command::Survey(args) => survey::run(args),
    }
}
