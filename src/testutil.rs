use crate::corpus::{Ayah, Corpus};
use crate::engine::subset::WorkingSubset;

pub fn ayah(surah: u32, number: u32, juz: u32, quarter: u8, ruku: u32) -> Ayah {
    Ayah {
        key: format!("{surah}:{number}"),
        surah,
        number,
        juz,
        quarter,
        ruku,
        text: format!("text of {surah}:{number}"),
        surah_name: format!("Surah {surah}"),
    }
}

/// One surah whose rukus have the given sizes, all inside juz 1.
/// Quarters advance every `per_quarter` ayahs.
pub fn single_surah(ruku_sizes: &[usize], per_quarter: usize) -> Vec<Ayah> {
    let mut out = Vec::new();
    let mut number = 1;
    for (i, &size) in ruku_sizes.iter().enumerate() {
        for _ in 0..size {
            let quarter = (((number as usize - 1) / per_quarter) % 4 + 1) as u8;
            out.push(ayah(1, number, 1, quarter, i as u32 + 1));
            number += 1;
        }
    }
    out
}

pub fn subset_of(ayahs: &[Ayah]) -> WorkingSubset {
    WorkingSubset::from_ayahs(ayahs.to_vec())
}

pub fn corpus_of(ayahs: &[Ayah]) -> Corpus {
    Corpus::from_ayahs(ayahs.to_vec()).unwrap()
}
