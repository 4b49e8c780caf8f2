use std::collections::HashMap;

use crate::corpus::Ayah;

/// The user's current selection: deduplicated, in reading order, read-only
/// once built.
#[derive(Clone, Debug, Default)]
pub struct WorkingSubset {
    ayahs: Vec<Ayah>,
    by_key: HashMap<String, usize>,
}

impl WorkingSubset {
    /// Re-sorts and drops repeated keys. Callers may pass records in any order.
    pub fn from_ayahs(mut ayahs: Vec<Ayah>) -> Self {
        ayahs.sort_by_key(Ayah::order_key);
        ayahs.dedup_by(|a, b| a.key == b.key);

        let by_key = ayahs
            .iter()
            .enumerate()
            .map(|(idx, a)| (a.key.clone(), idx))
            .collect();
        Self { ayahs, by_key }
    }

    pub fn ayahs(&self) -> &[Ayah] {
        &self.ayahs
    }

    pub fn len(&self) -> usize {
        self.ayahs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ayahs.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Ayah> {
        self.ayahs.get(idx)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    pub fn first(&self) -> Option<&Ayah> {
        self.ayahs.first()
    }

    pub fn last(&self) -> Option<&Ayah> {
        self.ayahs.last()
    }
}
