//! Non-repeating rotation selector over a pool of candidate exercises.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::models::Exercise;

/// Rotation selector: hands out exercises from a shuffled pool without
/// repeating any until the pool is exhausted, then reshuffles and continues.
///
/// Created per preview build and discarded afterwards; holds no persistent
/// state.
pub struct ExercisePicker {
    pool: Vec<Exercise>,
    cursor: usize,
    rng: StdRng,
}

impl ExercisePicker {
    pub fn new(candidates: Vec<Exercise>) -> Self {
        Self::with_rng(candidates, StdRng::from_entropy())
    }

    /// Seeded constructor for deterministic tests.
    pub fn with_seed(candidates: Vec<Exercise>, seed: u64) -> Self {
        Self::with_rng(candidates, StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut candidates: Vec<Exercise>, mut rng: StdRng) -> Self {
        candidates.shuffle(&mut rng);
        Self {
            pool: candidates,
            cursor: 0,
            rng,
        }
    }

    /// Take the next `n` exercises from the rotation.
    ///
    /// A single call may wrap past the end of the pool: the pool is
    /// reshuffled in place, the cursor resets, and consumption continues.
    /// Guarantees exactly `n` items for a non-empty pool, with no duplicates
    /// within one uninterrupted scan (repeats may occur across a wrap
    /// boundary). An empty pool always yields an empty list.
    pub fn take(&mut self, n: usize) -> Vec<Exercise> {
        if self.pool.is_empty() {
            return Vec::new();
        }

        let mut picked = Vec::with_capacity(n);
        for _ in 0..n {
            if self.cursor >= self.pool.len() {
                self.pool.shuffle(&mut self.rng);
                self.cursor = 0;
            }
            picked.push(self.pool[self.cursor].clone());
            self.cursor += 1;
        }
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Discipline;
    use std::collections::HashSet;

    fn pool(n: usize) -> Vec<Exercise> {
        (0..n)
            .map(|i| Exercise {
                id: format!("e{}", i),
                name: format!("Exercise {}", i),
                category: "Test".to_string(),
                discipline: Discipline::Strength,
                image_url: None,
            })
            .collect()
    }

    #[test]
    fn test_take_from_empty_pool_is_empty() {
        let mut picker = ExercisePicker::with_seed(vec![], 7);
        assert!(picker.take(5).is_empty());
        assert!(picker.take(0).is_empty());
    }

    #[test]
    fn test_take_never_repeats_within_one_scan() {
        let mut picker = ExercisePicker::with_seed(pool(6), 42);

        let picked = picker.take(6);
        let ids: HashSet<String> = picked.iter().map(|e| e.id.clone()).collect();

        assert_eq!(picked.len(), 6);
        assert_eq!(ids.len(), 6, "one full scan must not repeat");
    }

    #[test]
    fn test_take_wraps_and_reshuffles_past_pool_end() {
        // Pool of 3, request 8: must wrap twice and still return 8 items
        let mut picker = ExercisePicker::with_seed(pool(3), 42);

        let picked = picker.take(8);

        assert_eq!(picked.len(), 8);
        // Every item still comes from the pool
        assert!(picked.iter().all(|e| e.id.starts_with('e')));
    }

    #[test]
    fn test_successive_takes_continue_the_same_scan() {
        let mut picker = ExercisePicker::with_seed(pool(6), 42);

        let first = picker.take(3);
        let second = picker.take(3);

        let ids: HashSet<String> = first
            .iter()
            .chain(second.iter())
            .map(|e| e.id.clone())
            .collect();
        assert_eq!(ids.len(), 6, "two takes within one scan share no items");
    }

    #[test]
    fn test_seeded_picker_is_deterministic() {
        let mut a = ExercisePicker::with_seed(pool(5), 99);
        let mut b = ExercisePicker::with_seed(pool(5), 99);

        assert_eq!(
            a.take(5).iter().map(|e| &e.id).collect::<Vec<_>>(),
            b.take(5).iter().map(|e| &e.id).collect::<Vec<_>>()
        );
    }
}
