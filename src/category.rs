//! Category Builder: the set of bins that actually received points.
//!
//! Downstream aggregation groups a caller-owned value array by bin; iterating
//! a bin no point landed in, or the out-of-mesh bucket, would either skew or
//! pollute those groups. [`BinCategories`] is exactly `{0..Nc-1}` minus
//! never-assigned indices, with the sentinel explicitly removed.

use hashbrown::HashSet;

use crate::cell::BinId;

/// Ordered set of assigned bin indices.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BinCategories {
    members: Vec<usize>,
}

impl BinCategories {
    /// Collects the distinct valid bin indices out of a classification,
    /// dropping every [`BinId::OutOfMesh`].
    pub fn from_bins(bins: &[BinId]) -> Self {
        let distinct: HashSet<usize> = bins.iter().filter_map(|b| b.index()).collect();
        let mut members: Vec<usize> = distinct.into_iter().collect();
        members.sort_unstable();
        Self { members }
    }

    pub fn contains(&self, bin: usize) -> bool {
        self.members.binary_search(&bin).is_ok()
    }

    /// Ascending iteration over member indices.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes_sentinel_and_dedupes() {
        let bins = [
            BinId::Bin(3),
            BinId::OutOfMesh,
            BinId::Bin(1),
            BinId::Bin(3),
            BinId::OutOfMesh,
        ];
        let categories = BinCategories::from_bins(&bins);
        assert_eq!(categories.as_slice(), &[1, 3]);
        assert!(categories.contains(1));
        assert!(!categories.contains(0));
        assert_eq!(categories.len(), 2);
    }

    #[test]
    fn all_sentinels_give_empty_set() {
        let categories = BinCategories::from_bins(&[BinId::OutOfMesh; 4]);
        assert!(categories.is_empty());
    }
}
