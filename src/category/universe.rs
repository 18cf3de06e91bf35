use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use crate::category::codec::AutoEncoder;
use crate::foundation::error::{GlyphGridError, GlyphGridResult};

/// The fixed, ordered set of labels used as the depth axis of category-stacked grids.
///
/// Established before aggregation starts and never changed afterwards; every grid
/// produced against one universe shares its plane order, which is what makes those
/// grids safe to roll up together.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryUniverse<L: Eq + Hash> {
    labels: Vec<L>,
    index: HashMap<L, usize>,
}

impl<L: Eq + Hash + Clone> CategoryUniverse<L> {
    /// Universe with exactly `labels`, in the given order.
    pub fn new(labels: impl IntoIterator<Item = L>) -> GlyphGridResult<Self> {
        let labels: Vec<L> = labels.into_iter().collect();
        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(GlyphGridError::category(format!(
                    "duplicate label at position {i} in category universe"
                )));
            }
        }
        Ok(Self { labels, index })
    }

    /// Distinct labels of `values`, in first-seen order.
    pub fn scan_in_arrival_order<'a>(values: impl IntoIterator<Item = &'a L>) -> Self
    where
        L: 'a,
    {
        let mut enc = AutoEncoder::new();
        for v in values {
            enc.encode(v);
        }
        let labels = enc.labels().to_vec();
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        Self { labels, index }
    }
}

impl<L: Eq + Hash> CategoryUniverse<L> {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Plane index of `label`, `None` when the label is not part of the universe.
    pub fn index_of(&self, label: &L) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn contains(&self, label: &L) -> bool {
        self.index.contains_key(label)
    }
}

impl<L: Eq + Hash + Clone + Ord> CategoryUniverse<L> {
    /// Sorted distinct labels of `values`.
    pub fn scan<'a>(values: impl IntoIterator<Item = &'a L>) -> Self
    where
        L: 'a,
    {
        let sorted: BTreeSet<&L> = values.into_iter().collect();
        let labels: Vec<L> = sorted.into_iter().cloned().collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        Self { labels, index }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/category/universe.rs"]
mod tests;
