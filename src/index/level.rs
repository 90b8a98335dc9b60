use rand::Rng;

/// Pick the top level (0-based) for a new node.
///
/// Level 0 is always taken. Each further level is taken while a uniform draw
/// in `[0, 1)` falls below `p`, up to `max_level - 1`. The result is
/// geometric: a node reaches level `k` with probability `p^k`, so each level
/// holds roughly a `p` fraction of the level below.
///
/// No draw is consumed once the cap is reached.
pub fn random_level<R: Rng + ?Sized>(rng: &mut R, max_level: usize, p: f64) -> usize {
    let mut level = 0;
    while level + 1 < max_level && rng.r#gen::<f64>() < p {
        level += 1;
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn single_level_index_always_draws_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(random_level(&mut rng, 1, 0.99), 0);
        }
    }

    #[test]
    fn levels_never_reach_cap() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            assert!(random_level(&mut rng, 4, 0.9) < 4);
        }
    }

    #[test]
    fn distribution_is_roughly_geometric() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 100_000;
        let mut counts = [0usize; 16];
        for _ in 0..n {
            counts[random_level(&mut rng, 16, 0.5)] += 1;
        }
        // P(level >= 1) = 0.5, P(level >= 2) = 0.25
        let at_least_one: usize = counts[1..].iter().sum();
        let at_least_two: usize = counts[2..].iter().sum();
        let f1 = at_least_one as f64 / n as f64;
        let f2 = at_least_two as f64 / n as f64;
        assert!((f1 - 0.5).abs() < 0.02, "P(level >= 1) = {f1}");
        assert!((f2 - 0.25).abs() < 0.02, "P(level >= 2) = {f2}");
    }
}
