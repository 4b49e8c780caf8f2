use rand::Rng;
use rand::seq::SliceRandom;
use rand::seq::index;

use crate::engine::Mode;

const TEST_KEY_RATIO: f64 = 0.6;
const TEST_KEY_CAP: usize = 20;

pub const RUKU_TEST_ALL_THRESHOLD: usize = 8;
pub const RUKU_TEST_MIN: usize = 8;
pub const RUKU_TEST_MAX: usize = 10;

pub const NEXT_RUKU_TEST_MIN: usize = 3;
pub const NEXT_RUKU_TEST_MAX: usize = 10;

/// How many ayahs the key drills pick from a selection of `n`.
pub fn key_sample_size(n: usize, mode: Mode) -> usize {
    match mode {
        Mode::Study => n,
        Mode::Test => ((n as f64 * TEST_KEY_RATIO).floor() as usize)
            .min(TEST_KEY_CAP)
            .min(n),
    }
}

/// Distinct indices in `0..n`, uniformly ordered. Study shuffles all of
/// them, Test samples [`key_sample_size`] without replacement.
pub fn pick_indices<R: Rng + ?Sized>(rng: &mut R, n: usize, mode: Mode) -> Vec<usize> {
    match mode {
        Mode::Study => {
            let mut all: Vec<usize> = (0..n).collect();
            all.shuffle(rng);
            all
        }
        Mode::Test => {
            let amount = key_sample_size(n, mode);
            index::sample(rng, n, amount).into_vec()
        }
    }
}

/// Which rukus the first/last-ayahs drills cover, as indices into the
/// group list, in random order.
pub fn pick_groups<R: Rng + ?Sized>(rng: &mut R, group_count: usize, mode: Mode) -> Vec<usize> {
    let amount = match mode {
        Mode::Study => group_count,
        Mode::Test if group_count <= RUKU_TEST_ALL_THRESHOLD => group_count,
        Mode::Test => rng.gen_range(RUKU_TEST_MIN..=RUKU_TEST_MAX.min(group_count)),
    };
    index::sample(rng, group_count, amount).into_vec()
}

/// How many following rukus the next-ruku drills walk.
pub fn next_ruku_count<R: Rng + ?Sized>(rng: &mut R, remaining: usize, mode: Mode) -> usize {
    match mode {
        Mode::Study => remaining,
        Mode::Test if remaining >= NEXT_RUKU_TEST_MIN => {
            rng.gen_range(NEXT_RUKU_TEST_MIN..=NEXT_RUKU_TEST_MAX.min(remaining))
        }
        Mode::Test => remaining,
    }
}
