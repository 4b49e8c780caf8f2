use std::sync::Arc;

use tracing::{debug, info};

use crate::corpus::Corpus;
use crate::engine::Mode;
use crate::engine::filter::{self, FilterError, RangeSelector, SavedRange};
use crate::engine::subset::WorkingSubset;
use crate::generator::{self, Batch, GenerateError};
use crate::session::reveal::RevealTracker;

/// Everything a practice session carries between user actions.
///
/// The working subset is rebuilt whenever the saved ranges change. A batch
/// and its reveal state are replaced together on every successful
/// generation.
pub struct SessionContext {
    corpus: Arc<Corpus>,
    ranges: Vec<SavedRange>,
    subset: WorkingSubset,
    mode: Mode,
    batch: Option<Batch>,
    reveal: RevealTracker,
}

impl SessionContext {
    pub fn new(corpus: Arc<Corpus>, ranges: Vec<SavedRange>, mode: Mode) -> Self {
        let subset = filter::apply(&corpus, &ranges);
        Self {
            corpus,
            ranges,
            subset,
            mode,
            batch: None,
            reveal: RevealTracker::default(),
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn ranges(&self) -> &[SavedRange] {
        &self.ranges
    }

    pub fn subset(&self) -> &WorkingSubset {
        &self.subset
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn batch(&self) -> Option<&Batch> {
        self.batch.as_ref()
    }

    pub fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    /// Validates against the corpus before saving.
    pub fn add_range(&mut self, selector: RangeSelector) -> Result<(), FilterError> {
        selector.validate(&self.corpus)?;
        if self.ranges.iter().any(|r| r.selector == selector) {
            return Ok(());
        }
        self.ranges.push(SavedRange::new(selector));
        self.refilter();
        Ok(())
    }

    pub fn toggle_range(&mut self, idx: usize) {
        if let Some(range) = self.ranges.get_mut(idx) {
            range.active = !range.active;
            self.refilter();
        }
    }

    pub fn remove_range(&mut self, idx: usize) {
        if idx < self.ranges.len() {
            self.ranges.remove(idx);
            self.refilter();
        }
    }

    fn refilter(&mut self) {
        self.subset = filter::apply(&self.corpus, &self.ranges);
        debug!(ayahs = self.subset.len(), ranges = self.ranges.len(), "selection updated");
    }

    /// Builds a fresh batch from the current selection. On failure the
    /// previous batch stays in place.
    pub fn generate(&mut self, seed: u64) -> Result<&Batch, GenerateError> {
        let batch = generator::generate_batch(&self.corpus, &self.subset, self.mode, seed)?;
        info!(questions = batch.questions.len(), "batch replaced");
        self.reveal = RevealTracker::new(batch.questions.iter().map(|q| q.answers.len()).collect());
        Ok(self.batch.insert(batch))
    }

    pub fn advance(&mut self, question: usize) -> Option<usize> {
        self.reveal.advance(question)
    }

    pub fn reveal_all(&mut self, question: usize) -> Option<usize> {
        self.reveal.reveal_all(question)
    }
}
