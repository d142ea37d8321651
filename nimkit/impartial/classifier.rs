//! Classification of positions into winning (N-positions) and losing (P-positions) for the
//! player about to move.

use crate::impartial::{impartial_game::ImpartialGame, transposition_table::TranspositionTable};
use itertools::Itertools;

/// Decides if the player to move wins under optimal play of both sides
pub trait PositionClassifier<G> {
    /// Check if the position is winning for the player to move.
    /// Terminal positions are always losing.
    fn is_winning(&mut self, position: &G) -> bool;

    /// Forget everything learned so far. Called when a new game starts.
    fn reset(&mut self);
}

/// Partially expanded position on the search stack
struct Frame<G> {
    position: G,
    successors: Vec<G>,
    next: usize,
}

impl<G> Frame<G>
where
    G: ImpartialGame,
{
    fn new(position: G) -> Self {
        let successors = position
            .successors()
            .into_iter()
            .map(|successor| successor.canonical())
            .unique()
            .collect();
        Self {
            position,
            successors,
            next: 0,
        }
    }
}

/// Backward induction over the move relation with memoization.
///
/// Position is winning iff at least one successor is losing. The game tree is walked with an
/// explicit stack instead of recursion, so the depth of a game is not limited by the call stack.
/// Positions are cached by their [canonical form](ImpartialGame::canonical).
#[derive(Debug)]
pub struct SearchClassifier<G> {
    transposition_table: TranspositionTable<G>,
}

impl<G> SearchClassifier<G>
where
    G: ImpartialGame,
{
    /// Create classifier with empty cache
    #[inline]
    pub fn new() -> Self {
        Self {
            transposition_table: TranspositionTable::new(),
        }
    }

    /// Get the cache of already classified positions
    #[inline]
    pub const fn transposition_table(&self) -> &TranspositionTable<G> {
        &self.transposition_table
    }
}

impl<G> Default for SearchClassifier<G>
where
    G: ImpartialGame,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<G> PositionClassifier<G> for SearchClassifier<G>
where
    G: ImpartialGame,
{
    fn is_winning(&mut self, position: &G) -> bool {
        let root = position.canonical();
        if let Some(winning) = self.transposition_table.lookup_position(&root) {
            return winning;
        }

        let mut result = false;
        let mut stack = vec![Frame::new(root)];
        while let Some(frame) = stack.last_mut() {
            let mut unexplored = None;
            let mut winning = false;
            while let Some(successor) = frame.successors.get(frame.next) {
                match self.transposition_table.lookup_position(successor) {
                    Some(false) => {
                        winning = true;
                        break;
                    }
                    Some(true) => frame.next += 1,
                    None => {
                        unexplored = Some(successor.clone());
                        break;
                    }
                }
            }

            // Successor outcome is needed first, come back to this frame once it's known
            if let Some(successor) = unexplored {
                stack.push(Frame::new(successor));
                continue;
            }

            if let Some(done) = stack.pop() {
                self.transposition_table
                    .insert_position(done.position, winning);
                result = winning;
            }
        }

        log::trace!(
            "classified {} as {}, {} positions cached",
            position,
            if result { "winning" } else { "losing" },
            self.transposition_table.len()
        );
        result
    }

    fn reset(&mut self) {
        self.transposition_table.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impartial::games::dawson_kayles::DawsonKayles;

    #[test]
    fn terminal_position_is_losing() {
        let mut classifier = SearchClassifier::new();
        let position = DawsonKayles::from_bits(&[1, 0, 1, 0, 1]).unwrap();
        assert!(position.is_terminal());
        assert!(!classifier.is_winning(&position));
    }

    #[test]
    fn cache_is_filled_and_reset() {
        let mut classifier = SearchClassifier::new();
        let position = DawsonKayles::new_row(8);
        assert!(classifier.is_winning(&position));
        assert!(classifier.transposition_table().len() > 1);

        classifier.reset();
        assert!(classifier.transposition_table().is_empty());
    }

    #[test]
    fn long_game_does_not_recurse() {
        // Rows of 5, 9, 15 and 21 towers are the only losing rows up to 21
        let mut classifier = SearchClassifier::new();
        assert!(classifier.is_winning(&DawsonKayles::new_row(20)));
        assert!(!classifier.is_winning(&DawsonKayles::new_row(15)));
        assert!(classifier.is_winning(&DawsonKayles::new_row(14)));
    }
}
