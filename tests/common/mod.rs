#![allow(dead_code)]

use hifzdr::corpus::{Ayah, Corpus};

/// Deterministic stand-in for the real corpus: `surahs` surahs of varying
/// length split evenly into 30 juz. Rukus restart at every surah and every
/// ten ayahs and are numbered within their juz. Each juz is cut into four
/// quarters by position.
pub fn synthetic_ayahs(surahs: u32) -> Vec<Ayah> {
    let sizes: Vec<u32> = (1..=surahs).map(|s| 6 + (s * 37) % 98).collect();
    let total: u32 = sizes.iter().sum();
    let per_juz = total.div_ceil(30);

    let mut out = Vec::with_capacity(total as usize);
    let mut index = 0u32;
    let mut ruku = 0u32;
    let mut prev_juz = 0u32;
    for (s, &size) in sizes.iter().enumerate() {
        let surah = s as u32 + 1;
        for number in 1..=size {
            let juz = index / per_juz + 1;
            let pos_in_juz = index % per_juz;
            if juz != prev_juz {
                ruku = 0;
                prev_juz = juz;
            }
            if (number - 1) % 10 == 0 || pos_in_juz == 0 {
                ruku += 1;
            }
            let quarter = (pos_in_juz * 4 / per_juz + 1) as u8;
            out.push(Ayah {
                key: format!("{surah}:{number}"),
                surah,
                number,
                juz,
                quarter,
                ruku,
                text: format!("ayah text {surah}:{number}"),
                surah_name: format!("Surah {surah}"),
            });
            index += 1;
        }
    }
    out
}

pub fn synthetic_corpus(surahs: u32) -> Corpus {
    Corpus::from_ayahs(synthetic_ayahs(surahs)).unwrap()
}

/// Corpus with the same size and shape as the real one.
pub fn full_corpus() -> Corpus {
    synthetic_corpus(114)
}
