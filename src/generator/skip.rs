use rand::Rng;
use rand::rngs::SmallRng;

use crate::engine::Mode;
use crate::engine::subset::WorkingSubset;
use crate::generator::{DrillContext, DrillGenerator, DrillKind, Question};

const MIN_STRIDE: usize = 2;
const MAX_STRIDE: usize = 5;
const STUDY_MAX_COUNT: usize = 5;
const TEST_MAX_COUNT: usize = 10;

pub fn max_count(mode: Mode) -> usize {
    match mode {
        Mode::Study => STUDY_MAX_COUNT,
        Mode::Test => TEST_MAX_COUNT,
    }
}

/// Every n-th ayah of the selection from a random start.
pub struct SkipAyahDrill {
    rng: SmallRng,
}

impl SkipAyahDrill {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }
}

impl DrillGenerator for SkipAyahDrill {
    fn generate(&mut self, ctx: &DrillContext<'_>) -> Option<Question> {
        if ctx.subset.len() <= 1 {
            return None;
        }
        let start = self.rng.gen_range(0..ctx.subset.len() - 1);
        let stride = self.rng.gen_range(MIN_STRIDE..=MAX_STRIDE);
        skip_question(ctx.subset, start, stride, max_count(ctx.mode))
    }
}

pub fn skip_question(
    subset: &WorkingSubset,
    start: usize,
    stride: usize,
    max_count: usize,
) -> Option<Question> {
    if subset.len() <= 1 || stride == 0 {
        return None;
    }
    let first = subset.get(start)?;

    let answers: Vec<_> = subset.ayahs()[start..]
        .iter()
        .step_by(stride)
        .take(max_count)
        .cloned()
        .collect();

    let prompt = if answers.len() < max_count {
        format!(
            "Starting from {}, recite every {} ayah until the end of the selected range",
            first.key,
            ordinal(stride)
        )
    } else {
        format!(
            "Starting from {}, recite every {} ayah for {max_count} ayahs",
            first.key,
            ordinal(stride)
        )
    };

    Some(Question::new(DrillKind::SkipAyah, prompt, answers))
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
