/// First problem size of the sweep.
pub const MIN_SIZE: usize = 64;
/// Last problem size of the sweep.
pub const MAX_SIZE: usize = 32768;

/// Geometric sequence of square problem sizes: `min`, `2·min`, … while ≤ `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sweep {
    min: usize,
    max: usize,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            min: MIN_SIZE,
            max: MAX_SIZE,
        }
    }
}

impl Sweep {
    pub fn new(min: usize, max: usize) -> Self {
        assert!(min > 0, "sweep must start above zero");
        Self { min, max }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Sizes in strictly increasing order.
    pub fn sizes(self) -> impl Iterator<Item = usize> {
        let max = self.max;
        std::iter::successors(Some(self.min), |&n| n.checked_mul(2))
            .take_while(move |&n| n > 0 && n <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sweep() {
        let sizes: Vec<_> = Sweep::default().sizes().collect();
        assert_eq!(
            sizes,
            vec![64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768]
        );
    }

    #[test]
    fn test_max_not_power_of_min() {
        let sizes: Vec<_> = Sweep::new(4, 50).sizes().collect();
        assert_eq!(sizes, vec![4, 8, 16, 32]);
    }

    #[test]
    #[should_panic(expected = "sweep must start above zero")]
    fn test_zero_start_rejected() {
        Sweep::new(0, 64);
    }

    #[test]
    fn test_zero_start_yields_nothing() {
        // Only reachable from inside the module, but must still terminate.
        let sweep = Sweep { min: 0, max: 64 };
        assert_eq!(sweep.sizes().count(), 0);
    }

    #[test]
    fn test_empty_when_min_exceeds_max() {
        assert_eq!(Sweep::new(128, 64).sizes().count(), 0);
    }
}
