use std::collections::HashMap;

use crate::corpus::{Ayah, GroupPair};
use crate::engine::subset::WorkingSubset;

/// One ruku present in the subset and the subset indices of its ayahs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RukuGroup {
    pub pair: GroupPair,
    pub members: Vec<usize>,
}

impl RukuGroup {
    pub fn first<'a>(&self, subset: &'a WorkingSubset) -> Option<&'a Ayah> {
        self.members.first().and_then(|&i| subset.get(i))
    }

    pub fn last<'a>(&self, subset: &'a WorkingSubset) -> Option<&'a Ayah> {
        self.members.last().and_then(|&i| subset.get(i))
    }

    pub fn head<'a>(&self, subset: &'a WorkingSubset, n: usize) -> Vec<&'a Ayah> {
        self.members
            .iter()
            .take(n)
            .filter_map(|&i| subset.get(i))
            .collect()
    }

    pub fn tail<'a>(&self, subset: &'a WorkingSubset, n: usize) -> Vec<&'a Ayah> {
        let skip = self.members.len().saturating_sub(n);
        self.members
            .iter()
            .skip(skip)
            .filter_map(|&i| subset.get(i))
            .collect()
    }
}

/// Unique rukus of the subset in first-occurrence order, not sorted.
pub fn partition(subset: &WorkingSubset) -> Vec<RukuGroup> {
    let mut slots: HashMap<GroupPair, usize> = HashMap::new();
    let mut groups: Vec<RukuGroup> = Vec::new();

    for (idx, ayah) in subset.ayahs().iter().enumerate() {
        let pair = ayah.group();
        let slot = *slots.entry(pair).or_insert_with(|| {
            groups.push(RukuGroup {
                pair,
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(idx);
    }

    groups
}

pub fn group_pairs(subset: &WorkingSubset) -> Vec<GroupPair> {
    partition(subset).into_iter().map(|g| g.pair).collect()
}
