use anyhow::{Result, bail};
use clap::{self, Parser};
use itertools::Itertools;
use nimkit::impartial::{
    survey,
    variant::{Game, VariantKind},
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
struct Report {
    position: String,
    winning: bool,
}

/// Classify every position of a game up to a given size.
#[derive(Debug, Clone, Parser)]
pub struct Args {
    #[arg(long)]
    variant: VariantKind,

    /// Longest sequence to generate. Ignored for subtract-factor
    #[arg(long, default_value_t = 4)]
    max_length: usize,

    /// Largest entry of the sequence. Tower bits are always 0 or 1
    #[arg(long, default_value_t = 4)]
    max_value: u64,

    /// Threshold for subtract-factor, take limit for split-cards
    #[arg(long)]
    extra: Option<u64>,

    /// Report only positions that are lost for the player to move
    #[arg(long, default_value_t = false)]
    losing_only: bool,
}

fn positions(args: &Args) -> Vec<Game> {
    let max_value = match args.variant {
        VariantKind::DawsonKayles => 1,
        _ => args.max_value,
    };

    let sequences: Vec<Vec<u64>> = match args.variant {
        VariantKind::SubtractFactor => (0..=max_value).map(|value| vec![value]).collect(),
        _ => (0..=args.max_length)
            .flat_map(|length| {
                (0..length)
                    .map(|_| 0..=max_value)
                    .multi_cartesian_product()
                    .collect::<Vec<_>>()
            })
            .collect(),
    };

    sequences
        .iter()
        .filter_map(|sequence| {
            Game::from_sequence(args.variant, sequence, args.extra)
                .inspect_err(|err| log::debug!("Skipping {sequence:?}: {err}"))
                .ok()
        })
        .unique()
        .collect()
}

/// Most sequences a single survey may generate
const MAX_SEQUENCES: u64 = 1_000_000;

/// Number of sequences `positions` would generate, `None` on overflow
fn sequence_count(args: &Args) -> Option<u64> {
    let choices = match args.variant {
        VariantKind::SubtractFactor => return args.max_value.checked_add(1),
        VariantKind::DawsonKayles => 2,
        _ => args.max_value.checked_add(1)?,
    };
    (0..=args.max_length).try_fold(0u64, |count, length| {
        let length = u32::try_from(length).ok()?;
        count.checked_add(choices.checked_pow(length)?)
    })
}

pub fn run(args: Args) -> Result<()> {
    match sequence_count(&args) {
        Some(count) if count <= MAX_SEQUENCES => log::debug!("Generating {count} sequences"),
        _ => bail!(
            "Survey would generate more than {MAX_SEQUENCES} sequences, lower --max-length or --max-value"
        ),
    }

    let positions = positions(&args);
    log::info!("Classifying {} positions", positions.len());

    for (position, winning) in survey::classify_all(positions) {
        if args.losing_only && winning {
            continue;
        }
        let report = Report {
            position: position.to_string(),
            winning,
        };
        println!("{}", serde_json::ser::to_string(&report)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(variant: VariantKind, max_length: usize, max_value: u64) -> Args {
        Args {
            variant,
            max_length,
            max_value,
            extra: None,
            losing_only: false,
        }
    }

    #[test]
    fn sequence_counts() {
        // Lengths 0, 1 and 2 over 0..=2: 1 + 3 + 9
        assert_eq!(sequence_count(&args(VariantKind::CardNim, 2, 2)), Some(13));
        assert_eq!(sequence_count(&args(VariantKind::DawsonKayles, 3, 9)), Some(15));
        assert_eq!(sequence_count(&args(VariantKind::SubtractFactor, 16, 99)), Some(100));
    }

    #[test]
    fn oversized_surveys_are_refused() {
        assert!(sequence_count(&args(VariantKind::CardNim, 16, 4)).unwrap() > MAX_SEQUENCES);
        assert_eq!(sequence_count(&args(VariantKind::TakeCoins, 64, u64::MAX)), None);
        assert!(run(args(VariantKind::CardNim, 16, 4)).is_err());
        assert!(run(args(VariantKind::SplitCards, 4, 1_000_000)).is_err());
    }
}
