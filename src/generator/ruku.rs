use rand::Rng;
use rand::rngs::SmallRng;

use crate::corpus::Ayah;
use crate::engine::groups::RukuGroup;
use crate::engine::subset::WorkingSubset;
use crate::generator::sampling;
use crate::generator::{DrillContext, DrillGenerator, DrillKind, Question};

/// Ayahs taken from each ruku by the first/last-ayahs drills.
pub const EDGE_AYAHS: usize = 5;

/// Which end of a ruku a drill asks about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    First,
    Last,
}

impl Edge {
    fn word(self) -> &'static str {
        match self {
            Edge::First => "first",
            Edge::Last => "last",
        }
    }
}

/// First or last five ayahs of a shuffled set of rukus.
pub struct RukuEdgeDrill {
    rng: SmallRng,
    edge: Edge,
}

impl RukuEdgeDrill {
    pub fn new(rng: SmallRng, edge: Edge) -> Self {
        Self { rng, edge }
    }
}

impl DrillGenerator for RukuEdgeDrill {
    fn generate(&mut self, ctx: &DrillContext<'_>) -> Option<Question> {
        let chosen = sampling::pick_groups(&mut self.rng, ctx.groups.len(), ctx.mode);
        edge_ayahs_question(ctx.subset, ctx.groups, &chosen, self.edge)
    }
}

pub fn edge_ayahs_question(
    subset: &WorkingSubset,
    groups: &[RukuGroup],
    chosen: &[usize],
    edge: Edge,
) -> Option<Question> {
    let picked: Vec<&RukuGroup> = chosen.iter().filter_map(|&i| groups.get(i)).collect();

    let answers: Vec<Ayah> = picked
        .iter()
        .flat_map(|g| match edge {
            Edge::First => g.head(subset, EDGE_AYAHS),
            Edge::Last => g.tail(subset, EDGE_AYAHS),
        })
        .cloned()
        .collect();
    if answers.is_empty() {
        return None;
    }

    let names = picked
        .iter()
        .map(|g| g.pair.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let prompt = format!(
        "Recite the {} {EDGE_AYAHS} ayahs of each ruku: {names}",
        edge.word()
    );
    let kind = match edge {
        Edge::First => DrillKind::RukuFirst,
        Edge::Last => DrillKind::RukuLast,
    };
    Some(Question::new(kind, prompt, answers))
}

/// From a random starting ruku, the first or last ayah of each ruku after it.
pub struct NextRukuDrill {
    rng: SmallRng,
    edge: Edge,
}

impl NextRukuDrill {
    pub fn new(rng: SmallRng, edge: Edge) -> Self {
        Self { rng, edge }
    }
}

impl DrillGenerator for NextRukuDrill {
    fn generate(&mut self, ctx: &DrillContext<'_>) -> Option<Question> {
        if ctx.groups.len() < 2 {
            return None;
        }
        // The final ruku has nothing after it.
        let start = self.rng.gen_range(0..ctx.groups.len() - 1);
        let remaining = ctx.groups.len() - 1 - start;
        let count = sampling::next_ruku_count(&mut self.rng, remaining, ctx.mode);
        next_ruku_question(ctx.subset, ctx.groups, start, count, self.edge)
    }
}

pub fn next_ruku_question(
    subset: &WorkingSubset,
    groups: &[RukuGroup],
    start: usize,
    count: usize,
    edge: Edge,
) -> Option<Question> {
    if groups.len() < 2 {
        return None;
    }
    let from = groups.get(start)?;

    let answers: Vec<Ayah> = groups
        .iter()
        .skip(start + 1)
        .take(count)
        .filter_map(|g| match edge {
            Edge::First => g.first(subset),
            Edge::Last => g.last(subset),
        })
        .cloned()
        .collect();
    if answers.is_empty() {
        return None;
    }

    let prompt = format!(
        "Starting after {}, recite the {} ayah of each of the next {} rukus",
        from.pair,
        edge.word(),
        answers.len()
    );
    let kind = match edge {
        Edge::First => DrillKind::NextRukuFirst,
        Edge::Last => DrillKind::NextRukuLast,
    };
    Some(Question::new(kind, prompt, answers))
}
