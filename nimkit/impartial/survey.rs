//! Classify many independent positions at once

use crate::impartial::{
    classifier::{PositionClassifier, SearchClassifier},
    impartial_game::ImpartialGame,
};

#[cfg(feature = "rayon")]
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

/// Classify every position, returning them paired with "is winning for the player to move".
///
/// With the `rayon` feature positions are spread over the thread pool and every worker gets
/// its own [`SearchClassifier`], so no cache is shared between threads.
pub fn classify_all<G>(positions: Vec<G>) -> Vec<(G, bool)>
where
    G: ImpartialGame,
{
    #[cfg(feature = "rayon")]
    let classified = positions
        .into_par_iter()
        .map_init(SearchClassifier::new, |classifier, position| {
            let winning = classifier.is_winning(&position);
            (position, winning)
        })
        .collect();

    #[cfg(not(feature = "rayon"))]
    let classified = {
        let mut classifier = SearchClassifier::new();
        positions
            .into_iter()
            .map(|position| {
                let winning = classifier.is_winning(&position);
                (position, winning)
            })
            .collect()
    };

    classified
}
