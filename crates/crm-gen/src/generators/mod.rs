//! Record generators, one per pipeline stage.
//!
//! - [`AccountGenerator`]: companies with size, revenue and address
//! - [`ContactGenerator`]: people at each account
//! - [`DealGenerator`]: primary, self-serve and spawned deals
//! - [`ActivityGenerator`]: sales touches along each deal's timeline
//!
//! Every generator reads its tables from a [`Profile`](crate::profiles::Profile)
//! and draws from a caller-supplied random source, so one seeded rng threaded
//! through all four stages makes a run reproducible.

pub mod account;
pub mod activity;
pub mod contact;
pub mod deal;

pub use account::AccountGenerator;
pub use activity::{ActivityGenerator, ActivityOutput};
pub use contact::{ContactGenerator, ContactIndex};
pub use deal::DealGenerator;

use rand::Rng;
use time::{Date, Duration};

/// Uniform date in `[lo, hi]`. Returns `lo` when the range is empty.
pub(crate) fn random_date(rng: &mut impl Rng, lo: Date, hi: Date) -> Date {
    if hi <= lo {
        return lo;
    }
    let days = (hi - lo).whole_days();
    lo + Duration::days(rng.gen_range(0..=days))
}

/// Picks one element of a non-empty slice.
pub(crate) fn pick<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use time::macros::date;

    #[test]
    fn test_random_date_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let lo = date!(2024 - 01 - 01);
        let hi = date!(2024 - 01 - 10);
        for _ in 0..200 {
            let d = random_date(&mut rng, lo, hi);
            assert!(d >= lo && d <= hi);
        }
    }

    #[test]
    fn test_random_date_empty_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let lo = date!(2024 - 03 - 01);
        assert_eq!(random_date(&mut rng, lo, lo), lo);
        assert_eq!(random_date(&mut rng, lo, date!(2024 - 01 - 01)), lo);
    }
}
