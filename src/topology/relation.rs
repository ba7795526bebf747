//! Compressed row storage for incidence relations between two dimensions.
//!
//! A [`Relation`] maps every entity of the source dimension to an ordered list
//! of incident entities of the target dimension. Rows are stored back to back
//! in one contiguous array with an offset table, the same layout as a CSR
//! adjacency graph, so `row` is a cheap slice borrow.

use itertools::Itertools;
use std::fmt;

use crate::mesh_error::MeshTopologyError;

/// Incidence rows for one ordered dimension pair.
///
/// Deserialization checks the offset table, so a decoded relation is always
/// safe to traverse.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawRelation")]
pub struct Relation {
    /// `offsets[i]..offsets[i + 1]` is the range of row `i` in `targets`.
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl Relation {
    /// An empty relation with no rows.
    pub fn new() -> Self {
        Self {
            offsets: vec![0],
            targets: Vec::new(),
        }
    }

    /// Build from one `Vec` per row, keeping row order and entry order.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: AsRef<[usize]>,
    {
        let mut rel = Self::new();
        for row in rows {
            rel.push_row(row.as_ref());
        }
        rel
    }

    /// Wrap raw offset and target arrays. `offsets` must start at zero, be
    /// non-decreasing and end at `targets.len()`.
    pub(crate) fn from_csr(offsets: Vec<usize>, targets: Vec<usize>) -> Self {
        debug_assert_eq!(offsets.first(), Some(&0));
        debug_assert_eq!(offsets.last(), Some(&targets.len()));
        Self { offsets, targets }
    }

    /// Append a row at the end.
    pub fn push_row(&mut self, row: &[usize]) {
        if self.offsets.is_empty() {
            self.offsets.push(0);
        }
        self.targets.extend_from_slice(row);
        self.offsets.push(self.targets.len());
    }

    /// Number of rows (source entities).
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// `true` when no rows have been stored, i.e. the relation is not populated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Total number of stored incidences.
    #[inline]
    pub fn num_connections(&self) -> usize {
        self.targets.len()
    }

    /// Incident entities of row `i`, in stored order.
    #[inline]
    pub fn row(&self, i: usize) -> Option<&[usize]> {
        let start = *self.offsets.get(i)?;
        let end = *self.offsets.get(i + 1)?;
        self.targets.get(start..end)
    }

    /// Length of row `i`, zero if `i` is out of range.
    #[inline]
    pub fn degree(&self, i: usize) -> usize {
        self.row(i).map_or(0, <[usize]>::len)
    }

    /// Iterate over all rows in index order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        self.offsets
            .windows(2)
            .map(move |w| &self.targets[w[0]..w[1]])
    }

    /// Largest index referenced by any row.
    pub fn max_target(&self) -> Option<usize> {
        self.targets.iter().copied().max()
    }
}

/// Wire form of [`Relation`], checked before use.
#[derive(serde::Deserialize)]
struct RawRelation {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl TryFrom<RawRelation> for Relation {
    type Error = MeshTopologyError;

    fn try_from(raw: RawRelation) -> Result<Self, Self::Error> {
        let malformed = |reason: String| MeshTopologyError::MalformedSnapshot { reason };
        if raw.offsets.first() != Some(&0) {
            return Err(malformed("relation offsets must start at 0".into()));
        }
        if let Some(i) = raw.offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(malformed(format!("relation offsets decrease at row {i}")));
        }
        if raw.offsets.last() != Some(&raw.targets.len()) {
            return Err(malformed(format!(
                "relation offsets end past {} targets",
                raw.targets.len()
            )));
        }
        Ok(Self {
            offsets: raw.offsets,
            targets: raw.targets,
        })
    }
}

impl Default for Relation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            writeln!(f, "{i}: {}", row.iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_relation_is_empty() {
        let r = Relation::new();
        assert!(r.is_empty());
        assert_eq!(r.num_rows(), 0);
        assert_eq!(r.row(0), None);
        assert!(Relation::default().is_empty());
    }

    #[test]
    fn rows_keep_insertion_order() {
        let r = Relation::from_rows([vec![3, 1, 2], vec![], vec![0]]);
        assert_eq!(r.num_rows(), 3);
        assert_eq!(r.row(0), Some(&[3, 1, 2][..]));
        assert_eq!(r.row(1), Some(&[][..]));
        assert_eq!(r.row(2), Some(&[0][..]));
        assert_eq!(r.degree(0), 3);
        assert_eq!(r.degree(7), 0);
        assert_eq!(r.num_connections(), 4);
        assert_eq!(r.max_target(), Some(3));
        let collected: Vec<Vec<usize>> = r.rows().map(<[usize]>::to_vec).collect();
        assert_eq!(collected, vec![vec![3, 1, 2], vec![], vec![0]]);
    }

    #[test]
    fn push_row_on_default_relation() {
        let mut r = Relation::default();
        r.push_row(&[4, 5]);
        assert_eq!(r.num_rows(), 1);
        assert_eq!(r.row(0), Some(&[4, 5][..]));
    }

    #[test]
    fn decode_checks_offsets() {
        let r = Relation::from_rows([vec![1, 2], vec![], vec![0]]);
        let back: Relation = serde_json::from_str(&serde_json::to_string(&r).unwrap()).unwrap();
        assert_eq!(back, r);

        for json in [
            r#"{"offsets":[],"targets":[]}"#,
            r#"{"offsets":[1,1],"targets":[0]}"#,
            r#"{"offsets":[0,2,1],"targets":[0,1]}"#,
            r#"{"offsets":[0,5],"targets":[1]}"#,
            r#"{"offsets":[0,1],"targets":[1,2]}"#,
        ] {
            let err = serde_json::from_str::<Relation>(json).unwrap_err();
            assert!(err.to_string().contains("Malformed topology snapshot"), "{json}: {err}");
        }
    }

    #[test]
    fn display_lists_rows() {
        let r = Relation::from_rows([vec![1, 2], vec![0]]);
        assert_eq!(r.to_string(), "0: 1 2\n1: 0\n");
    }
}
