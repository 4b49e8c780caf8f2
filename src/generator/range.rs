use rand::Rng;
use rand::rngs::SmallRng;

use crate::corpus::{Ayah, Corpus};
use crate::engine::Mode;
use crate::engine::subset::WorkingSubset;
use crate::generator::{DrillContext, DrillGenerator, DrillKind, Question};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

pub struct RangeDrill {
    rng: SmallRng,
    direction: Direction,
}

impl RangeDrill {
    pub fn new(rng: SmallRng, direction: Direction) -> Self {
        Self { rng, direction }
    }
}

impl DrillGenerator for RangeDrill {
    fn generate(&mut self, ctx: &DrillContext<'_>) -> Option<Question> {
        if ctx.subset.is_empty() {
            return None;
        }
        let anchor = self.rng.gen_range(0..ctx.subset.len());
        match self.direction {
            Direction::Forward => forward_range(ctx.corpus, ctx.subset, anchor, ctx.mode),
            Direction::Backward => backward_range(ctx.corpus, ctx.subset, anchor, ctx.mode),
        }
    }
}

/// The quarter after `(juz, quarter)`, rolling into the next juz after 4.
fn next_quarter(juz: u32, quarter: u8) -> (u32, u8) {
    if quarter >= 4 {
        (juz + 1, 1)
    } else {
        (juz, quarter + 1)
    }
}

/// The quarter before `(juz, quarter)`, rolling into the previous juz before 1.
fn previous_quarter(juz: u32, quarter: u8) -> (u32, u8) {
    if quarter <= 1 {
        (juz.saturating_sub(1), 4)
    } else {
        (juz, quarter - 1)
    }
}

fn quarter_of(ayah: &Ayah) -> (u32, u8) {
    (ayah.juz, ayah.quarter)
}

/// Ayahs from the anchor up to the end of its ruku (Study) or its quarter
/// (Test). The quarter search runs over the full corpus and can leave the
/// selection. With no boundary ahead the run ends at the selection's last ayah.
pub fn forward_range(
    corpus: &Corpus,
    subset: &WorkingSubset,
    anchor: usize,
    mode: Mode,
) -> Option<Question> {
    let start = subset.get(anchor)?;
    let to_selection_end = || -> Vec<Ayah> { subset.ayahs()[anchor..].to_vec() };

    let (answers, prompt) = match mode {
        Mode::Study => {
            let group = start.group();
            let boundary = subset.ayahs()[anchor + 1..]
                .iter()
                .position(|a| a.group() != group)
                .map(|offset| anchor + 1 + offset);
            match boundary {
                Some(end) => (
                    subset.ayahs()[anchor..end].to_vec(),
                    format!("Recite from {} to the end of its ruku ({group})", start.key),
                ),
                None => (
                    to_selection_end(),
                    format!("Recite from {} to the end of the selected range", start.key),
                ),
            }
        }
        Mode::Test => {
            let target = next_quarter(start.juz, start.quarter);
            let boundary = corpus.position(&start.key).and_then(|pos| {
                corpus.ayahs()[pos + 1..]
                    .iter()
                    .position(|a| quarter_of(a) == target)
                    .map(|offset| (pos, pos + 1 + offset))
            });
            match boundary {
                Some((pos, end)) => (
                    corpus.ayahs()[pos..end].to_vec(),
                    format!(
                        "Recite from {} to the end of Juz {} Quarter {}",
                        start.key, start.juz, start.quarter
                    ),
                ),
                None => (
                    to_selection_end(),
                    format!("Recite from {} to the end of the selected range", start.key),
                ),
            }
        }
    };

    Some(Question::new(DrillKind::Range, prompt, answers))
}

/// Mirror of [`forward_range`]: walks back from the anchor to the start of its
/// ruku (Study) or quarter (Test). The backward walk is reversed so the
/// answers read in recitation order and end at the anchor.
pub fn backward_range(
    corpus: &Corpus,
    subset: &WorkingSubset,
    anchor: usize,
    mode: Mode,
) -> Option<Question> {
    let end = subset.get(anchor)?;
    let to_selection_start = || -> Vec<Ayah> { subset.ayahs()[..=anchor].to_vec() };

    let (answers, prompt) = match mode {
        Mode::Study => {
            let group = end.group();
            let walked: Vec<&Ayah> = subset.ayahs()[..=anchor]
                .iter()
                .rev()
                .take_while(|a| a.group() == group)
                .collect();
            if walked.len() <= anchor {
                let mut answers: Vec<Ayah> = walked.into_iter().cloned().collect();
                answers.reverse();
                (
                    answers,
                    format!("Recite backward from {} to the start of its ruku ({group})", end.key),
                )
            } else {
                (
                    to_selection_start(),
                    format!("Recite backward from {} to the start of the selected range", end.key),
                )
            }
        }
        Mode::Test => {
            let target = previous_quarter(end.juz, end.quarter);
            let boundary = corpus.position(&end.key).and_then(|pos| {
                corpus.ayahs()[..pos]
                    .iter()
                    .rposition(|a| quarter_of(a) == target)
                    .map(|found| (found + 1, pos))
            });
            match boundary {
                Some((from, pos)) => (
                    corpus.ayahs()[from..=pos].to_vec(),
                    format!(
                        "Recite backward from {} to the start of Juz {} Quarter {}",
                        end.key, end.juz, end.quarter
                    ),
                ),
                None => (
                    to_selection_start(),
                    format!("Recite backward from {} to the start of the selected range", end.key),
                ),
            }
        }
    };

    Some(Question::new(DrillKind::ReverseRange, prompt, answers))
}
