pub mod ayah;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub use ayah::{Ayah, GroupPair};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse corpus: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("corpus contains no ayahs")]
    Empty,
    #[error("duplicate ayah key {0}")]
    DuplicateKey(String),
    #[error("ayah {key} has quarter {quarter}, expected 1-4")]
    InvalidQuarter { key: String, quarter: u8 },
}

/// The full, immutable corpus in reading order with lookup tables.
#[derive(Clone, Debug)]
pub struct Corpus {
    ayahs: Vec<Ayah>,
    by_key: HashMap<String, usize>,
    by_group: HashMap<GroupPair, Vec<usize>>,
    max_ruku: BTreeMap<u32, u32>,
    surah_names: BTreeMap<u32, String>,
    quarters: BTreeSet<u8>,
}

impl Corpus {
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_json(&content)?;
        info!(path = %path.display(), ayahs = corpus.len(), "loaded corpus");
        Ok(corpus)
    }

    pub fn from_json(content: &str) -> Result<Self, CorpusError> {
        let ayahs: Vec<Ayah> = serde_json::from_str(content)?;
        Self::from_ayahs(ayahs)
    }

    /// Sorts by (surah, ayah) and builds the lookup tables. Input order is
    /// never trusted.
    pub fn from_ayahs(mut ayahs: Vec<Ayah>) -> Result<Self, CorpusError> {
        if ayahs.is_empty() {
            return Err(CorpusError::Empty);
        }
        ayahs.sort_by_key(Ayah::order_key);

        let mut by_key = HashMap::with_capacity(ayahs.len());
        let mut by_group: HashMap<GroupPair, Vec<usize>> = HashMap::new();
        let mut max_ruku: BTreeMap<u32, u32> = BTreeMap::new();
        let mut surah_names = BTreeMap::new();
        let mut quarters = BTreeSet::new();

        for (idx, ayah) in ayahs.iter().enumerate() {
            if !(1..=4).contains(&ayah.quarter) {
                return Err(CorpusError::InvalidQuarter {
                    key: ayah.key.clone(),
                    quarter: ayah.quarter,
                });
            }
            if by_key.insert(ayah.key.clone(), idx).is_some() {
                return Err(CorpusError::DuplicateKey(ayah.key.clone()));
            }
            by_group.entry(ayah.group()).or_default().push(idx);
            let max = max_ruku.entry(ayah.juz).or_insert(0);
            *max = (*max).max(ayah.ruku);
            surah_names
                .entry(ayah.surah)
                .or_insert_with(|| ayah.surah_name.clone());
            quarters.insert(ayah.quarter);
        }

        Ok(Self {
            ayahs,
            by_key,
            by_group,
            max_ruku,
            surah_names,
            quarters,
        })
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

    pub fn position(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, key: &str) -> Option<&Ayah> {
        self.position(key).map(|idx| &self.ayahs[idx])
    }

    /// Ayahs of one ruku in reading order.
    pub fn group_members(&self, group: GroupPair) -> Vec<&Ayah> {
        self.by_group
            .get(&group)
            .map(|idxs| idxs.iter().map(|&i| &self.ayahs[i]).collect())
            .unwrap_or_default()
    }

    pub fn max_ruku(&self, juz: u32) -> Option<u32> {
        self.max_ruku.get(&juz).copied()
    }

    pub fn juz_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.max_ruku.keys().copied()
    }

    pub fn surah_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.surah_names.keys().copied()
    }

    pub fn has_surah(&self, surah: u32) -> bool {
        self.surah_names.contains_key(&surah)
    }

    pub fn has_juz(&self, juz: u32) -> bool {
        self.max_ruku.contains_key(&juz)
    }

    pub fn surah_name(&self, surah: u32) -> Option<&str> {
        self.surah_names.get(&surah).map(String::as_str)
    }

    pub fn quarters(&self) -> impl Iterator<Item = u8> + '_ {
        self.quarters.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ayah;

    #[test]
    fn sorts_input_into_reading_order() {
        let corpus = Corpus::from_ayahs(vec![
            ayah(2, 1, 1, 1, 2),
            ayah(1, 2, 1, 1, 1),
            ayah(1, 1, 1, 1, 1),
        ])
        .unwrap();
        let keys: Vec<&str> = corpus.ayahs().iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["1:1", "1:2", "2:1"]);
        assert_eq!(corpus.position("2:1"), Some(2));
        assert_eq!(corpus.get("1:2").map(|a| a.number), Some(2));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = Corpus::from_ayahs(vec![ayah(1, 1, 1, 1, 1), ayah(1, 1, 1, 1, 1)]).unwrap_err();
        assert!(matches!(err, CorpusError::DuplicateKey(k) if k == "1:1"));
    }

    #[test]
    fn rejects_empty_and_bad_quarter() {
        assert!(matches!(Corpus::from_ayahs(Vec::new()), Err(CorpusError::Empty)));
        let err = Corpus::from_ayahs(vec![ayah(1, 1, 1, 5, 1)]).unwrap_err();
        assert!(matches!(err, CorpusError::InvalidQuarter { quarter: 5, .. }));
    }

    #[test]
    fn group_lookup_and_max_ruku() {
        let corpus = Corpus::from_ayahs(vec![
            ayah(1, 1, 1, 1, 1),
            ayah(1, 2, 1, 1, 1),
            ayah(2, 1, 1, 1, 2),
            ayah(2, 2, 2, 1, 1),
        ])
        .unwrap();
        let members = corpus.group_members(GroupPair { juz: 1, ruku: 1 });
        assert_eq!(members.len(), 2);
        assert_eq!(corpus.max_ruku(1), Some(2));
        assert_eq!(corpus.max_ruku(2), Some(1));
        assert_eq!(corpus.max_ruku(3), None);
        assert_eq!(corpus.juz_numbers().collect::<Vec<_>>(), vec![1, 2]);
        assert!(corpus.group_members(GroupPair { juz: 9, ruku: 9 }).is_empty());
    }

    #[test]
    fn loads_from_json() {
        let json = r#"[
            {"ayah_key":"1:1","surah":1,"ayah":1,"juzz":1,"quarter":1,"ruku":1,
             "text":"bismillah","surah_name":"Al-Fatiha"}
        ]"#;
        let corpus = Corpus::from_json(json).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.surah_name(1), Some("Al-Fatiha"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Corpus::load(Path::new("/nonexistent/master_quran.json")).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }
}
