use rand::rngs::SmallRng;

use crate::corpus::Ayah;
use crate::engine::subset::WorkingSubset;
use crate::generator::sampling;
use crate::generator::{DrillContext, DrillGenerator, DrillKind, Question};

/// What the reciter is asked for, given a shown key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyTarget {
    Itself,
    Following,
    Previous,
}

impl KeyTarget {
    fn kind(self) -> DrillKind {
        match self {
            KeyTarget::Itself => DrillKind::RandomKeys,
            KeyTarget::Following => DrillKind::RandomKeysFollowing,
            KeyTarget::Previous => DrillKind::RandomKeysPrevious,
        }
    }
}

pub struct RandomKeysDrill {
    rng: SmallRng,
    target: KeyTarget,
}

impl RandomKeysDrill {
    pub fn new(rng: SmallRng, target: KeyTarget) -> Self {
        Self { rng, target }
    }
}

impl DrillGenerator for RandomKeysDrill {
    fn generate(&mut self, ctx: &DrillContext<'_>) -> Option<Question> {
        let picks = sampling::pick_indices(&mut self.rng, ctx.subset.len(), ctx.mode);
        keys_question(ctx.subset, &picks, self.target)
    }
}

/// Pairs each picked ayah with the ayah it asks for. Picks without a
/// neighbour directly adjacent in the same surah are dropped.
pub fn keys_question(
    subset: &WorkingSubset,
    picks: &[usize],
    target: KeyTarget,
) -> Option<Question> {
    let pairs: Vec<(&Ayah, &Ayah)> = picks
        .iter()
        .filter_map(|&idx| {
            let pick = subset.get(idx)?;
            let answer = match target {
                KeyTarget::Itself => pick,
                KeyTarget::Following => {
                    let next = subset.get(idx + 1)?;
                    pick.is_followed_by(next).then_some(next)?
                }
                KeyTarget::Previous => {
                    let prev = subset.get(idx.checked_sub(1)?)?;
                    prev.is_followed_by(pick).then_some(prev)?
                }
            };
            Some((pick, answer))
        })
        .collect();

    if pairs.is_empty() {
        return None;
    }

    let keys = pairs
        .iter()
        .map(|(pick, _)| pick.key.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let prompt = match target {
        KeyTarget::Itself => format!("Recite these ayahs: {keys}"),
        KeyTarget::Following => format!("Recite the ayah that follows each of: {keys}"),
        KeyTarget::Previous => format!("Recite the ayah that precedes each of: {keys}"),
    };
    let answers = pairs.into_iter().map(|(_, a)| a.clone()).collect();

    Some(Question::new(target.kind(), prompt, answers))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::engine::Mode;
    use crate::engine::groups;
    use crate::testutil::{ayah, corpus_of, single_surah, subset_of};

    fn numbers(q: &Question) -> Vec<u32> {
        q.answers.iter().map(|a| a.number).collect()
    }

    #[test]
    fn itself_answers_match_picks() {
        let subset = subset_of(&single_surah(&[6], 10));
        let q = keys_question(&subset, &[4, 0, 2], KeyTarget::Itself).unwrap();
        assert_eq!(q.prompt, "Recite these ayahs: 1:5, 1:1, 1:3");
        assert_eq!(numbers(&q), vec![5, 1, 3]);
    }

    #[test]
    fn following_drops_the_last_ayah() {
        let subset = subset_of(&single_surah(&[6], 10));
        let q = keys_question(&subset, &[5, 1, 3], KeyTarget::Following).unwrap();
        assert_eq!(q.kind, DrillKind::RandomKeysFollowing);
        assert_eq!(q.prompt, "Recite the ayah that follows each of: 1:2, 1:4");
        assert_eq!(numbers(&q), vec![3, 5]);
    }

    #[test]
    fn previous_drops_the_first_ayah() {
        let subset = subset_of(&single_surah(&[6], 10));
        let q = keys_question(&subset, &[0, 2], KeyTarget::Previous).unwrap();
        assert_eq!(q.prompt, "Recite the ayah that precedes each of: 1:3");
        assert_eq!(numbers(&q), vec![2]);
    }

    #[test]
    fn neighbours_across_gaps_or_surahs_are_excluded() {
        let subset = subset_of(&[
            ayah(1, 6, 1, 1, 1),
            ayah(1, 7, 1, 1, 1),
            ayah(2, 1, 1, 1, 2),
            ayah(2, 5, 1, 1, 2),
        ]);
        // 1:7 -> 2:1 crosses a surah, 2:1 -> 2:5 skips ayahs.
        assert!(keys_question(&subset, &[1, 2, 3], KeyTarget::Following).is_none());
        let q = keys_question(&subset, &[0, 1, 2, 3], KeyTarget::Following).unwrap();
        assert_eq!(q.answers.len(), 1);
        assert_eq!(q.answers[0].key, "1:7");
    }

    #[test]
    fn generated_following_answers_are_adjacent() {
        let ayahs = single_surah(&[7, 8, 5], 5);
        let corpus = corpus_of(&ayahs);
        let subset = subset_of(&ayahs);
        let groups = groups::partition(&subset);
        for mode in [Mode::Study, Mode::Test] {
            let ctx = DrillContext {
                corpus: &corpus,
                subset: &subset,
                groups: &groups,
                mode,
            };
            for seed in 0..20 {
                let mut drill =
                    RandomKeysDrill::new(SmallRng::seed_from_u64(seed), KeyTarget::Following);
                let q = drill.generate(&ctx).unwrap();
                let shown: Vec<&str> = q
                    .prompt
                    .trim_start_matches("Recite the ayah that follows each of: ")
                    .split(", ")
                    .collect();
                assert_eq!(shown.len(), q.answers.len());
                for (key, answer) in shown.iter().zip(&q.answers) {
                    let pick = subset.get(subset.position(key).unwrap()).unwrap();
                    assert!(pick.is_followed_by(answer));
                }
                if mode == Mode::Study {
                    assert_eq!(q.answers.len(), 19);
                }
            }
        }
    }

    #[test]
    fn test_mode_with_tiny_selection_is_omitted() {
        let ayahs = single_surah(&[1], 10);
        let corpus = corpus_of(&ayahs);
        let subset = subset_of(&ayahs);
        let groups = groups::partition(&subset);
        let ctx = DrillContext {
            corpus: &corpus,
            subset: &subset,
            groups: &groups,
            mode: Mode::Test,
        };
        let mut drill = RandomKeysDrill::new(SmallRng::seed_from_u64(1), KeyTarget::Itself);
        assert!(drill.generate(&ctx).is_none());
    }
}
