use serde::{Deserialize, Serialize};

/// A single ayah as stored in the corpus file.
///
/// Field names on disk follow the `master_quran.json` layout, so `number` is
/// read from `ayah` and `key` from `ayah_key`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ayah {
    #[serde(rename = "ayah_key")]
    pub key: String,
    pub surah: u32,
    #[serde(rename = "ayah")]
    pub number: u32,
    #[serde(rename = "juzz", alias = "juz")]
    pub juz: u32,
    pub quarter: u8,
    pub ruku: u32,
    pub text: String,
    pub surah_name: String,
}

/// A ruku identified by its juz and its ruku number inside that juz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupPair {
    pub juz: u32,
    pub ruku: u32,
}

impl std::fmt::Display for GroupPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Juz {} Ruku {}", self.juz, self.ruku)
    }
}

impl Ayah {
    pub fn group(&self) -> GroupPair {
        GroupPair {
            juz: self.juz,
            ruku: self.ruku,
        }
    }

    /// Global reading order.
    pub fn order_key(&self) -> (u32, u32) {
        (self.surah, self.number)
    }

    /// True when `other` is the ayah recited directly after this one
    /// inside the same surah.
    pub fn is_followed_by(&self, other: &Ayah) -> bool {
        self.surah == other.surah && self.number + 1 == other.number
    }
}
