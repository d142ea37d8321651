use crate::io::{FileOrStdin, FileOrStdout, write_json_line};
use anyhow::{Context, Result, bail};
use clap::{self, Parser};
use nimkit::impartial::{
    selector::Skill,
    session::{Phase, Session},
    variant::{Parameters, VariantKind},
};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Serialize)]
struct MoveReport {
    turn: usize,
    player: usize,
    position: String,
    winning: bool,
    selected: String,
}

#[derive(Debug, Clone, Serialize)]
struct Outcome {
    final_position: String,
    moves_played: usize,
    winner: usize,
    predicted_winner: usize,
}

fn parse_skill(level: &str) -> Result<Skill> {
    let level = level.parse::<u8>().context("Skill level must be an integer")?;
    Ok(Skill::new(level)?)
}

/// Let two computer players play a random game against each other.
#[derive(Debug, Clone, Parser)]
pub struct Args {
    /// Game to play with its default parameters
    #[arg(long, conflicts_with = "params")]
    variant: Option<VariantKind>,

    /// JSON file with game parameters, `-` for standard input
    #[arg(long)]
    params: Option<FileOrStdin>,

    /// Seed of the random number generator, random if absent
    #[arg(long)]
    seed: Option<u64>,

    /// Skill level of the player moving first
    #[arg(long, value_parser = parse_skill, default_value = "10")]
    first_skill: Skill,

    /// Skill level of the player moving second
    #[arg(long, value_parser = parse_skill, default_value = "10")]
    second_skill: Skill,

    /// Where to write the move log, `-` for standard output
    #[arg(long, default_value = "-")]
    output: FileOrStdout,
}

fn read_parameters(args: &Args) -> Result<Parameters> {
    match (&args.params, args.variant) {
        (Some(source), _) => {
            let reader = source
                .open()
                .with_context(|| format!("Could not open parameters '{source}'"))?;
            let parameters: Parameters =
                serde_json::from_reader(reader).context("Could not parse parameters")?;
            Ok(parameters)
        }
        (None, Some(variant)) => Ok(Parameters::default_for(variant)),
        (None, None) => bail!("Either --variant or --params must be given"),
    }
}

pub fn run(args: Args) -> Result<()> {
    let parameters = read_parameters(&args)?;
    parameters.validate().context("Invalid parameters")?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut output = args
        .output
        .create()
        .with_context(|| format!("Could not open output '{}'", args.output))?;

    let mut session = Session::new();
    session.initialize(parameters, &mut rng)?;
    let predicted_winner = if session.is_winning_position()? { 0 } else { 1 };

    let skills = [args.first_skill, args.second_skill];
    let mut phase = session.phase();
    while phase == Phase::InProgress {
        let turn = session.moves_played()?;
        let player = turn % 2;
        let position = session.game()?.to_string();
        let winning = session.is_winning_position()?;
        let selected = session.select_move(skills[player], &mut rng)?;
        phase = session.apply_move(selected)?;

        write_json_line(
            &mut output,
            &MoveReport {
                turn,
                player,
                position,
                winning,
                selected: selected.to_string(),
            },
        )?;
    }

    let moves_played = session.moves_played()?;
    if moves_played == 0 {
        bail!("Starting position has no legal moves");
    }
    write_json_line(
        &mut output,
        &Outcome {
            final_position: session.game()?.to_string(),
            moves_played,
            winner: (moves_played - 1) % 2,
            predicted_winner,
        },
    )?;
    output.flush()?;

    Ok(())
}
