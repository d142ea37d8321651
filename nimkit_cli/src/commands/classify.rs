use anyhow::{Context, Result};
use clap::{self, Parser};
use nimkit::impartial::{
    impartial_game::ImpartialGame,
    variant::{Analysis, Game, VariantKind},
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
struct Report {
    variant: VariantKind,
    position: String,
    winning: bool,
    legal_moves: Vec<String>,
    winning_moves: Vec<String>,
    cached_positions: usize,
}

/// Classify a single position as winning or losing for the player to move.
#[derive(Debug, Clone, Parser)]
pub struct Args {
    /// Game the position belongs to
    #[arg(long)]
    variant: VariantKind,

    /// Position as comma separated integers: pile sizes, tower bits, coin counts, or a single
    /// value for subtract-factor
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    position: Vec<u64>,

    /// Threshold for subtract-factor, take limit for split-cards
    #[arg(long)]
    extra: Option<u64>,
}

pub fn run(args: Args) -> Result<()> {
    let game = Game::from_sequence(args.variant, &args.position, args.extra)
        .context("Invalid position")?;
    let mut analysis = Analysis::for_kind(args.variant);

    let winning = analysis.is_winning(&game)?;
    let winning_moves = analysis.winning_moves(&game)?;
    log::info!("{game} classified, {} cached", analysis.cached_positions());

    let report = Report {
        variant: args.variant,
        position: game.to_string(),
        winning,
        legal_moves: game.legal_moves().iter().map(ToString::to_string).collect(),
        winning_moves: winning_moves.iter().map(ToString::to_string).collect(),
        cached_positions: analysis.cached_positions(),
    };
    println!("{}", serde_json::ser::to_string(&report)?);

    Ok(())
}
