//! Label → image grouping with deterministic first-seen order.
use std::collections::HashMap;
use std::hash::Hash;

/// Images sharing one label, in input order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelGroup<L> {
    pub label: L,
    pub indices: Vec<usize>,
}

/// Groups of input positions keyed by label.
///
/// Groups appear in the order their label first occurs; only labels seen at
/// least `min_count` times are kept. Occurrence counts are kept for every
/// label.
#[derive(Clone, Debug)]
pub struct LabelIndex<L> {
    counts: Vec<(L, usize)>,
    groups: Vec<LabelGroup<L>>,
}

impl<L: Clone + Eq + Hash> LabelIndex<L> {
    pub fn build(labels: &[L], min_count: usize) -> Self {
        let mut slot: HashMap<&L, usize> = HashMap::new();
        let mut members: Vec<(L, Vec<usize>)> = Vec::new();
        for (i, label) in labels.iter().enumerate() {
            let pos = *slot.entry(label).or_insert_with(|| {
                members.push((label.clone(), Vec::new()));
                members.len() - 1
            });
            members[pos].1.push(i);
        }

        let counts = members
            .iter()
            .map(|(label, indices)| (label.clone(), indices.len()))
            .collect();
        let groups = members
            .into_iter()
            .filter(|(_, indices)| indices.len() >= min_count)
            .map(|(label, indices)| LabelGroup { label, indices })
            .collect();
        Self { counts, groups }
    }

    pub fn groups(&self) -> &[LabelGroup<L>] {
        &self.groups
    }

    /// Number of retained labels.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total images across retained labels.
    pub fn retained_images(&self) -> usize {
        self.groups.iter().map(|g| g.indices.len()).sum()
    }

    /// The `n` most frequent labels, count descending, ties in first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(&L, usize)> {
        let mut ranked: Vec<(&L, usize)> = self.counts.iter().map(|(l, c)| (l, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}
