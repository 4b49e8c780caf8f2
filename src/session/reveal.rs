use std::collections::HashMap;

/// How many answers of each question have been shown. Counts only grow and
/// are capped at the question's answer count.
#[derive(Clone, Debug, Default)]
pub struct RevealTracker {
    answer_counts: Vec<usize>,
    revealed: HashMap<usize, usize>,
}

impl RevealTracker {
    pub fn new(answer_counts: Vec<usize>) -> Self {
        Self {
            answer_counts,
            revealed: HashMap::new(),
        }
    }

    pub fn question_count(&self) -> usize {
        self.answer_counts.len()
    }

    /// Revealed count for a question, 0 if never touched or unknown.
    pub fn revealed(&self, question: usize) -> usize {
        self.revealed.get(&question).copied().unwrap_or(0)
    }

    pub fn is_complete(&self, question: usize) -> bool {
        self.answer_counts
            .get(question)
            .is_some_and(|&total| self.revealed(question) >= total)
    }

    /// Shows one more answer. Returns the new count, or `None` for an
    /// unknown question.
    pub fn advance(&mut self, question: usize) -> Option<usize> {
        let total = *self.answer_counts.get(question)?;
        let count = self.revealed.entry(question).or_insert(0);
        *count = (*count + 1).min(total);
        Some(*count)
    }

    pub fn reveal_all(&mut self, question: usize) -> Option<usize> {
        let total = *self.answer_counts.get(question)?;
        self.revealed.insert(question, total);
        Some(total)
    }
}
