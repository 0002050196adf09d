use rand::Rng;

/// Samples an integer uniformly from the closed range `[min, max]`.
///
/// Callers narrow the range as they go, so `min > max` can only come from a
/// caller bug; the bounds are swapped instead of panicking.
pub fn random_in_interval(rng: &mut impl Rng, min: usize, max: usize) -> usize {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.random_range(lo..=hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn samples_stay_inside_closed_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let v = random_in_interval(&mut rng, 2, 5);
            assert!((2..=5).contains(&v));
            seen[v - 2] = true;
        }
        // Both ends of the range are reachable.
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn degenerate_range_returns_the_single_value() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(random_in_interval(&mut rng, 3, 3), 3);
    }
}
