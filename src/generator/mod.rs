pub mod random_keys;
pub mod range;
pub mod ruku;
pub mod sampling;
pub mod skip;

use chrono::{DateTime, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::corpus::{Ayah, Corpus};
use crate::engine::Mode;
use crate::engine::groups::{self, RukuGroup};
use crate::engine::subset::WorkingSubset;

use random_keys::{KeyTarget, RandomKeysDrill};
use range::{Direction, RangeDrill};
use ruku::{Edge, NextRukuDrill, RukuEdgeDrill};
use skip::SkipAyahDrill;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("no ayahs match the active ranges; select a broader range")]
    EmptySelection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillKind {
    RandomKeys,
    RandomKeysFollowing,
    RandomKeysPrevious,
    Range,
    ReverseRange,
    RukuFirst,
    RukuLast,
    NextRukuFirst,
    NextRukuLast,
    SkipAyah,
}

impl DrillKind {
    /// Every drill, in batch order.
    pub const ALL: [DrillKind; 10] = [
        DrillKind::RandomKeys,
        DrillKind::RandomKeysFollowing,
        DrillKind::RandomKeysPrevious,
        DrillKind::Range,
        DrillKind::ReverseRange,
        DrillKind::RukuFirst,
        DrillKind::RukuLast,
        DrillKind::NextRukuFirst,
        DrillKind::NextRukuLast,
        DrillKind::SkipAyah,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DrillKind::RandomKeys => "Random Keys",
            DrillKind::RandomKeysFollowing => "Following Ayah",
            DrillKind::RandomKeysPrevious => "Previous Ayah",
            DrillKind::Range => "Range Recall",
            DrillKind::ReverseRange => "Reverse Range Recall",
            DrillKind::RukuFirst => "First Ayahs of Ruku",
            DrillKind::RukuLast => "Last Ayahs of Ruku",
            DrillKind::NextRukuFirst => "Next Ruku Openings",
            DrillKind::NextRukuLast => "Next Ruku Endings",
            DrillKind::SkipAyah => "Skip Ayah",
        }
    }

    pub fn generator(self, rng: SmallRng) -> Box<dyn DrillGenerator> {
        match self {
            DrillKind::RandomKeys => Box::new(RandomKeysDrill::new(rng, KeyTarget::Itself)),
            DrillKind::RandomKeysFollowing => {
                Box::new(RandomKeysDrill::new(rng, KeyTarget::Following))
            }
            DrillKind::RandomKeysPrevious => {
                Box::new(RandomKeysDrill::new(rng, KeyTarget::Previous))
            }
            DrillKind::Range => Box::new(RangeDrill::new(rng, Direction::Forward)),
            DrillKind::ReverseRange => Box::new(RangeDrill::new(rng, Direction::Backward)),
            DrillKind::RukuFirst => Box::new(RukuEdgeDrill::new(rng, Edge::First)),
            DrillKind::RukuLast => Box::new(RukuEdgeDrill::new(rng, Edge::Last)),
            DrillKind::NextRukuFirst => Box::new(NextRukuDrill::new(rng, Edge::First)),
            DrillKind::NextRukuLast => Box::new(NextRukuDrill::new(rng, Edge::Last)),
            DrillKind::SkipAyah => Box::new(SkipAyahDrill::new(rng)),
        }
    }
}

/// A prompt and the ayahs expected in recitation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    pub kind: DrillKind,
    pub prompt: String,
    pub answers: Vec<Ayah>,
}

impl Question {
    pub fn new(kind: DrillKind, prompt: String, answers: Vec<Ayah>) -> Self {
        Self {
            kind,
            prompt,
            answers,
        }
    }
}

/// Read-only inputs shared by every drill of one generation event.
pub struct DrillContext<'a> {
    pub corpus: &'a Corpus,
    pub subset: &'a WorkingSubset,
    pub groups: &'a [RukuGroup],
    pub mode: Mode,
}

pub trait DrillGenerator {
    /// Returns `None` when the selection cannot support this drill.
    fn generate(&mut self, ctx: &DrillContext<'_>) -> Option<Question>;
}

/// The questions from one generation event.
#[derive(Clone, Debug, Serialize)]
pub struct Batch {
    pub questions: Vec<Question>,
    pub mode: Mode,
    pub seed: u64,
    pub selection_size: usize,
    pub generated_at: DateTime<Utc>,
}

/// Runs every drill once, in [`DrillKind::ALL`] order. Each drill gets its
/// own RNG stream derived from `seed`, so a batch is reproducible.
pub fn generate_batch(
    corpus: &Corpus,
    subset: &WorkingSubset,
    mode: Mode,
    seed: u64,
) -> Result<Batch, GenerateError> {
    if subset.is_empty() {
        return Err(GenerateError::EmptySelection);
    }

    let groups = groups::partition(subset);
    let ctx = DrillContext {
        corpus,
        subset,
        groups: &groups,
        mode,
    };

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut questions = Vec::with_capacity(DrillKind::ALL.len());
    for kind in DrillKind::ALL {
        let drill_rng = SmallRng::seed_from_u64(rng.r#gen());
        match kind.generator(drill_rng).generate(&ctx) {
            Some(question) => {
                debug!(kind = kind.label(), answers = question.answers.len(), "drill generated");
                questions.push(question);
            }
            None => debug!(kind = kind.label(), "drill omitted: selection too small"),
        }
    }

    info!(
        mode = %mode,
        seed,
        selection = subset.len(),
        rukus = groups.len(),
        questions = questions.len(),
        "generated batch"
    );

    Ok(Batch {
        questions,
        mode,
        seed,
        selection_size: subset.len(),
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{corpus_of, single_surah, subset_of};

    #[test]
    fn empty_selection_blocks_the_batch() {
        let ayahs = single_surah(&[3], 10);
        let corpus = corpus_of(&ayahs);
        let err = generate_batch(&corpus, &WorkingSubset::default(), Mode::Study, 1).unwrap_err();
        assert_eq!(err, GenerateError::EmptySelection);
    }

    #[test]
    fn full_batch_follows_fixed_order() {
        let ayahs = single_surah(&[7, 8, 5, 6], 6);
        let corpus = corpus_of(&ayahs);
        let subset = subset_of(&ayahs);
        for mode in [Mode::Study, Mode::Test] {
            let batch = generate_batch(&corpus, &subset, mode, 42).unwrap();
            let kinds: Vec<DrillKind> = batch.questions.iter().map(|q| q.kind).collect();
            assert_eq!(kinds, DrillKind::ALL.to_vec());
            assert_eq!(batch.selection_size, 26);
            assert!(batch.questions.iter().all(|q| !q.answers.is_empty()));
        }
    }

    #[test]
    fn single_ayah_omits_drills_without_failing() {
        let ayahs = single_surah(&[1], 10);
        let corpus = corpus_of(&ayahs);
        let subset = subset_of(&ayahs);
        let batch = generate_batch(&corpus, &subset, Mode::Study, 7).unwrap();
        let kinds: Vec<DrillKind> = batch.questions.iter().map(|q| q.kind).collect();
        assert!(kinds.contains(&DrillKind::RandomKeys));
        assert!(!kinds.contains(&DrillKind::RandomKeysFollowing));
        assert!(!kinds.contains(&DrillKind::RandomKeysPrevious));
        assert!(!kinds.contains(&DrillKind::NextRukuFirst));
        assert!(!kinds.contains(&DrillKind::NextRukuLast));
        assert!(!kinds.contains(&DrillKind::SkipAyah));
    }

    #[test]
    fn same_seed_same_batch() {
        let ayahs = single_surah(&[7, 8, 5, 9, 4], 5);
        let corpus = corpus_of(&ayahs);
        let subset = subset_of(&ayahs);
        let a = generate_batch(&corpus, &subset, Mode::Test, 99).unwrap();
        let b = generate_batch(&corpus, &subset, Mode::Test, 99).unwrap();
        assert_eq!(a.questions, b.questions);
    }
}
