//! Table primitives used by profiles.

use rand::Rng;
use rand::distributions::uniform::SampleUniform;
use serde::{Deserialize, Serialize};

use crm_records::DealPhase;

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + PartialOrd> Band<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Pulls `value` into the band.
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

impl<T: Copy + PartialOrd + SampleUniform> Band<T> {
    /// Uniform draw from the band.
    pub fn sample(&self, rng: &mut impl Rng) -> T {
        rng.gen_range(self.min..=self.max)
    }
}

impl Band<u32> {
    /// Both bounds multiplied by `factor`, rounded, never below 1.
    pub fn scaled(&self, factor: f64) -> Band<u32> {
        let scale = |v: u32| ((f64::from(v) * factor).round() as u32).max(1);
        Band::new(scale(self.min), scale(self.max))
    }
}

/// Categorical distribution over items with integer weights.
///
/// Entries keep their declared order, which is also the order `items` yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weighted<T>(Vec<(T, u32)>);

impl<T> Weighted<T> {
    pub fn new(entries: Vec<(T, u32)>) -> Self {
        Self(entries)
    }

    /// Sum of all weights. Widened so no table can overflow it.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, w)| u64::from(*w)).sum()
    }

    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.0.iter().map(|(item, _)| item)
    }

    /// Draws one item in proportion to its weight.
    ///
    /// # Panics
    ///
    /// If the total weight is zero. Profile validation rejects such tables.
    pub fn sample(&self, rng: &mut impl Rng) -> &T {
        let total = self.total();
        assert!(total > 0, "cannot sample from an empty weighted table");
        let mut roll = rng.gen_range(0..total);
        for (item, weight) in &self.0 {
            let weight = u64::from(*weight);
            if roll < weight {
                return item;
            }
            roll -= weight;
        }
        unreachable!("roll is always below the total weight")
    }
}

/// One value per deal phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTable<T> {
    pub early: T,
    pub mid: T,
    pub late: T,
}

impl<T> PhaseTable<T> {
    pub fn get(&self, phase: DealPhase) -> &T {
        match phase {
            DealPhase::Early => &self.early,
            DealPhase::Mid => &self.mid,
            DealPhase::Late => &self.late,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_weighted_respects_zero_weights() {
        let table = Weighted::new(vec![("never", 0), ("always", 5)]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(*table.sample(&mut rng), "always");
        }
    }

    #[test]
    fn test_weighted_proportions() {
        let table = Weighted::new(vec![(2u32, 35), (3, 35), (4, 20), (5, 10)]);
        let mut rng = StdRng::seed_from_u64(42);
        let n = 10_000;
        let fives = (0..n).filter(|_| *table.sample(&mut rng) == 5).count();
        let share = fives as f64 / n as f64;
        assert!((0.08..0.12).contains(&share), "share of 5 was {share}");
    }

    #[test]
    fn test_weighted_total_past_u32() {
        let table = Weighted::new(vec![("a", u32::MAX), ("b", u32::MAX)]);
        assert_eq!(table.total(), 2 * u64::from(u32::MAX));
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            assert!(["a", "b"].contains(table.sample(&mut rng)));
        }
    }

    #[test]
    fn test_band_clamp_and_contains() {
        let band = Band::new(10u64, 20);
        assert_eq!(band.clamp(5), 10);
        assert_eq!(band.clamp(25), 20);
        assert_eq!(band.clamp(15), 15);
        assert!(band.contains(10) && band.contains(20));
        assert!(!band.contains(21));
    }

    #[test]
    fn test_band_sample_stays_inside() {
        let band = Band::new(0.2, 0.5);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert!(band.contains(band.sample(&mut rng)));
        }
    }

    #[test]
    fn test_scaled_band() {
        let band = Band::new(10u32, 20).scaled(1.4);
        assert_eq!((band.min, band.max), (14, 28));
        let tiny = Band::new(1u32, 2).scaled(0.1);
        assert_eq!((tiny.min, tiny.max), (1, 1));
    }
}
