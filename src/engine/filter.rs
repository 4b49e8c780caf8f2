use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::corpus::{Ayah, Corpus};
use crate::engine::subset::WorkingSubset;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid range {input:?}: {reason}")]
    Invalid { input: String, reason: String },
    #[error("start must be <= end (got {start}-{end})")]
    StartAfterEnd { start: u32, end: u32 },
    #[error("juz {juz} has only {max} rukus")]
    RukuOutOfRange { juz: u32, max: u32 },
    #[error("juz {0} is not in the corpus")]
    UnknownJuz(u32),
    #[error("surah {0} is not in the corpus")]
    UnknownSurah(u32),
}

/// One way of choosing ayahs. Several selectors combine by union.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RangeSelector {
    Surahs(Vec<u32>),
    Juz(Vec<u32>),
    Quarters(Vec<u8>),
    Ruku { juz: u32, start: u32, end: u32 },
    Ayahs { surah: u32, start: u32, end: u32 },
}

impl RangeSelector {
    pub fn matches(&self, ayah: &Ayah) -> bool {
        match self {
            RangeSelector::Surahs(surahs) => surahs.contains(&ayah.surah),
            RangeSelector::Juz(juz) => juz.contains(&ayah.juz),
            RangeSelector::Quarters(quarters) => quarters.contains(&ayah.quarter),
            RangeSelector::Ruku { juz, start, end } => {
                ayah.juz == *juz && (*start..=*end).contains(&ayah.ruku)
            }
            RangeSelector::Ayahs { surah, start, end } => {
                ayah.surah == *surah && (*start..=*end).contains(&ayah.number)
            }
        }
    }

    /// Checks the selector against what the corpus actually contains.
    pub fn validate(&self, corpus: &Corpus) -> Result<(), FilterError> {
        match self {
            RangeSelector::Surahs(surahs) => {
                if let Some(&missing) = surahs.iter().find(|&&s| !corpus.has_surah(s)) {
                    return Err(FilterError::UnknownSurah(missing));
                }
            }
            RangeSelector::Juz(juz) => {
                if let Some(&missing) = juz.iter().find(|&&j| !corpus.has_juz(j)) {
                    return Err(FilterError::UnknownJuz(missing));
                }
            }
            RangeSelector::Quarters(_) => {}
            RangeSelector::Ruku { juz, start, end } => {
                if start > end {
                    return Err(FilterError::StartAfterEnd {
                        start: *start,
                        end: *end,
                    });
                }
                let max = corpus.max_ruku(*juz).ok_or(FilterError::UnknownJuz(*juz))?;
                if *end > max {
                    return Err(FilterError::RukuOutOfRange { juz: *juz, max });
                }
            }
            RangeSelector::Ayahs { surah, start, end } => {
                if start > end {
                    return Err(FilterError::StartAfterEnd {
                        start: *start,
                        end: *end,
                    });
                }
                if !corpus.has_surah(*surah) {
                    return Err(FilterError::UnknownSurah(*surah));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for RangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: ToString>(items: &[T]) -> String {
            items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        }
        match self {
            RangeSelector::Surahs(s) => write!(f, "surah:{}", join(s)),
            RangeSelector::Juz(j) => write!(f, "juz:{}", join(j)),
            RangeSelector::Quarters(q) => write!(f, "quarter:{}", join(q)),
            RangeSelector::Ruku { juz, start, end } => write!(f, "ruku:{juz}:{start}-{end}"),
            RangeSelector::Ayahs { surah, start, end } => {
                write!(f, "ayah:{surah}:{start}-{end}")
            }
        }
    }
}

impl FromStr for RangeSelector {
    type Err = FilterError;

    /// Accepts `surah:1,2`, `juz:30`, `quarter:1,3`, `ruku:30:1-4` and
    /// `ayah:2:1-20`. A bare number is accepted where a range is expected.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| FilterError::Invalid {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let (kind, rest) = trimmed
            .split_once(':')
            .ok_or_else(|| invalid("expected <kind>:<values>"))?;

        let selector = match kind.trim().to_ascii_lowercase().as_str() {
            "surah" | "s" => {
                let surahs = parse_list(rest).ok_or_else(|| invalid("bad surah list"))?;
                RangeSelector::Surahs(surahs)
            }
            "juz" | "juzz" | "j" => {
                let juz = parse_list(rest).ok_or_else(|| invalid("bad juz list"))?;
                RangeSelector::Juz(juz)
            }
            "quarter" | "q" => {
                let quarters: Vec<u8> =
                    parse_list(rest).ok_or_else(|| invalid("bad quarter list"))?;
                if quarters.iter().any(|q| !(1..=4).contains(q)) {
                    return Err(invalid("quarters are 1-4"));
                }
                RangeSelector::Quarters(quarters)
            }
            "ruku" | "r" => {
                let (juz, range) = rest
                    .split_once(':')
                    .ok_or_else(|| invalid("expected ruku:<juz>:<start>-<end>"))?;
                let juz = juz.trim().parse().map_err(|_| invalid("bad juz"))?;
                let (start, end) = parse_range(range).ok_or_else(|| invalid("bad ruku range"))?;
                RangeSelector::Ruku { juz, start, end }
            }
            "ayah" | "a" => {
                let (surah, range) = rest
                    .split_once(':')
                    .ok_or_else(|| invalid("expected ayah:<surah>:<start>-<end>"))?;
                let surah = surah.trim().parse().map_err(|_| invalid("bad surah"))?;
                let (start, end) = parse_range(range).ok_or_else(|| invalid("bad ayah range"))?;
                RangeSelector::Ayahs { surah, start, end }
            }
            _ => return Err(invalid("kind must be surah, juz, quarter, ruku or ayah")),
        };

        match selector {
            RangeSelector::Ruku { start, end, .. } | RangeSelector::Ayahs { start, end, .. }
                if start > end =>
            {
                Err(FilterError::StartAfterEnd { start, end })
            }
            _ => Ok(selector),
        }
    }
}

impl TryFrom<String> for RangeSelector {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RangeSelector> for String {
    fn from(value: RangeSelector) -> Self {
        value.to_string()
    }
}

fn parse_list<T: FromStr>(input: &str) -> Option<Vec<T>> {
    let items: Vec<T> = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect::<Option<Vec<T>>>()?;
    if items.is_empty() { None } else { Some(items) }
}

fn parse_range(input: &str) -> Option<(u32, u32)> {
    match input.split_once('-') {
        Some((a, b)) => Some((a.trim().parse().ok()?, b.trim().parse().ok()?)),
        None => {
            let n = input.trim().parse().ok()?;
            Some((n, n))
        }
    }
}

/// A selector the user has saved, with its on/off switch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRange {
    pub selector: RangeSelector,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl SavedRange {
    pub fn new(selector: RangeSelector) -> Self {
        Self {
            selector,
            active: true,
        }
    }
}

/// Union of every active selector over the corpus.
pub fn apply(corpus: &Corpus, ranges: &[SavedRange]) -> WorkingSubset {
    let active: Vec<&RangeSelector> = ranges
        .iter()
        .filter(|r| r.active)
        .map(|r| &r.selector)
        .collect();
    if active.is_empty() {
        return WorkingSubset::default();
    }

    let matched = corpus
        .ayahs()
        .iter()
        .filter(|a| active.iter().any(|s| s.matches(a)))
        .cloned()
        .collect();
    WorkingSubset::from_ayahs(matched)
}
