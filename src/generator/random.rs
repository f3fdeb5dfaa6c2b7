/*
random.rs

Copyright 2025 Hervé Quatremain

This file is part of Maze Demo.

Maze Demo is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Maze Demo is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Maze Demo. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Sources of randomness for the maze generator and the blockage injector.
//!
//! Every random decision takes a [`RandomSource`] as an explicit parameter.
//! [`SeededRandom`] is a small linear congruential generator: the same seed always produces the
//! same maze and the same blockage.
//! [`AmbientRandom`] uses the thread random generator from [`rand`] when no seed is provided.

use rand::Rng;

/// LCG multiplier.
const MULTIPLIER: u64 = 9301;

/// LCG increment.
const INCREMENT: u64 = 49297;

/// LCG modulus. Outputs are `state / MODULUS`.
const MODULUS: u64 = 233280;

/// Source of floats in `[0, 1)`.
pub trait RandomSource {
    /// Return the next float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Return an index in `[start, end)`, or `start` when the range is empty.
    fn index_in(&mut self, start: usize, end: usize) -> usize {
        if end <= start {
            return start;
        }
        (self.next_f64() * (end - start) as f64).floor() as usize + start
    }

    /// Shuffle the slice in place (Fisher-Yates).
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j: usize = (self.next_f64() * (i + 1) as f64).floor() as usize;
            items.swap(i, j.min(i));
        }
    }
}

/// Deterministic linear congruential generator.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    /// Create a [`SeededRandom`] object from the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }
}

/// Non-deterministic source backed by [`rand::rng`].
#[derive(Debug, Default, Clone, Copy)]
pub struct AmbientRandom;

impl RandomSource for AmbientRandom {
    fn next_f64(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sequence_matches_lcg() {
        let mut rng = SeededRandom::new(42);

        // (42 * 9301 + 49297) % 233280 = 206659
        assert_eq!(rng.next_f64(), 206659.0 / 233280.0);
        // (206659 * 9301 + 49297) % 233280 = 190736
        assert_eq!(rng.next_f64(), 190736.0 / 233280.0);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SeededRandom::new(1234);
        let mut b = SeededRandom::new(1234);
        for _ in 0..1000 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn test_outputs_in_unit_interval() {
        let mut rng = SeededRandom::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
        let mut ambient = AmbientRandom;
        for _ in 0..100 {
            let v = ambient.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = SeededRandom::new(99);
        let mut items: Vec<usize> = (0..20).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<usize>>());
    }

    #[test]
    fn test_index_in_range() {
        let mut rng = SeededRandom::new(5);
        for _ in 0..500 {
            let i = rng.index_in(3, 7);
            assert!((3..7).contains(&i));
        }
        assert_eq!(rng.index_in(4, 4), 4);
    }
}
