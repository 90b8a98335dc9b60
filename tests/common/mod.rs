// Shared helpers for integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;

use rand::RngCore;
use scoreset::{Options, OrderedIndex};

/// RNG that replays a fixed script of `f64` draws in `[0, 1)`.
///
/// `Rng::gen::<f64>()` builds its value from the top 53 bits of
/// `next_u64()`, so each draw is encoded back into those bits. Once the script
/// runs out every draw is 0.99, which stops level promotion for any
/// probability below that.
pub struct ScriptedRng {
    draws: VecDeque<f64>,
}

impl ScriptedRng {
    pub fn new(draws: &[f64]) -> Self {
        ScriptedRng {
            draws: draws.iter().copied().collect(),
        }
    }

    /// Draws that make successive inserts land exactly at `levels` (0-based)
    /// with promotion probability 0.5. No stopping draw is taken at the cap.
    pub fn for_levels(max_level: usize, levels: &[usize]) -> Self {
        let mut draws = Vec::new();
        for &level in levels {
            assert!(level < max_level, "level {level} above cap");
            draws.extend(std::iter::repeat(0.1).take(level));
            if level + 1 < max_level {
                draws.push(0.9);
            }
        }
        Self::new(&draws)
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let draw = self.draws.pop_front().unwrap_or(0.99);
        ((draw * (1u64 << 53) as f64) as u64) << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Index with `max_level` levels, p = 0.5, whose inserts get the given
/// levels in order.
pub fn pinned(max_level: usize, levels: &[usize]) -> OrderedIndex<ScriptedRng> {
    OrderedIndex::with_rng(Options::new(max_level, 0.5), ScriptedRng::for_levels(max_level, levels))
}

/// Keys along one level, in traversal order.
pub fn level_keys<R>(idx: &OrderedIndex<R>, level: usize) -> Vec<String> {
    idx.level(level).map(|e| e.key.to_string()).collect()
}
