use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::transaction::TransactionRecordType;

/// Amount numerators are drawn uniformly from this range
pub const NUMERATOR_RANGE: RangeInclusive<u32> = 1..=100;

/// Amount divisors are drawn uniformly from this set
pub const DIVISORS: [u32; 3] = [2, 3, 5];

/// Every random decision the generator makes, in one place so tests can script them.
pub trait RandomSource {
    /// Reorders `ids` into a uniformly random permutation
    fn shuffle(&mut self, ids: &mut [u32]);

    fn category(&mut self) -> TransactionRecordType;

    /// A client id in `0..client_count`. `client_count` is never zero.
    fn client(&mut self, client_count: u16) -> u16;

    /// A value in [`NUMERATOR_RANGE`]
    fn numerator(&mut self) -> u32;

    /// One of [`DIVISORS`]
    fn divisor(&mut self) -> u32;

    /// An index in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`] with uniform draws.
#[derive(Debug)]
pub struct RngSource<R: Rng>(R);

impl<R: Rng> RngSource<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        RngSource(rng)
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn shuffle(&mut self, ids: &mut [u32]) {
        ids.shuffle(&mut self.0);
    }

    fn category(&mut self) -> TransactionRecordType {
        let all = TransactionRecordType::ALL;
        all[self.0.gen_range(0..all.len())]
    }

    fn client(&mut self, client_count: u16) -> u16 {
        self.0.gen_range(0..client_count)
    }

    fn numerator(&mut self) -> u32 {
        self.0.gen_range(NUMERATOR_RANGE)
    }

    fn divisor(&mut self) -> u32 {
        DIVISORS[self.0.gen_range(0..DIVISORS.len())]
    }

    fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}
