//! Cache of classified positions

use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// Transposition table (cache) of positions and whether they are winning for the player to move.
///
/// Owned by a single classifier, so one table never serves two game sessions.
pub struct TranspositionTable<G> {
    positions: HashMap<G, bool, ahash::RandomState>,
}

impl<G> TranspositionTable<G>
where
    G: Eq + Hash,
{
    /// Create new empty transposition table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup a position outcome if exists
    #[inline]
    pub fn lookup_position(&self, position: &G) -> Option<bool> {
        self.positions.get(position).copied()
    }

    /// Save position and its outcome
    #[inline]
    pub fn insert_position(&mut self, position: G, winning: bool) {
        self.positions.insert(position, winning);
    }

    /// Forget all saved positions
    #[inline]
    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Get number of saved positions
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if table stores any position
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl<G> Debug for TranspositionTable<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("positions", &self.positions.len())
            .finish()
    }
}

impl<G> Default for TranspositionTable<G> {
    #[inline]
    fn default() -> Self {
        Self {
            positions: HashMap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_lookup_clear() {
        let mut table = TranspositionTable::new();
        assert!(table.is_empty());
        assert_eq!(table.lookup_position(&vec![1, 2]), None);

        table.insert_position(vec![1, 2], true);
        table.insert_position(vec![0], false);
        assert_eq!(table.lookup_position(&vec![1, 2]), Some(true));
        assert_eq!(table.lookup_position(&vec![0]), Some(false));
        assert_eq!(table.len(), 2);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.lookup_position(&vec![1, 2]), None);
    }
}
