//! Set-membership tests over vertex-index lists.
//!
//! Lists are short (a handful of vertices per entity), so the tests are plain
//! linear scans and make no assumption about element order.

/// `true` iff every element of `candidate` appears in `reference`.
#[inline]
pub fn is_subset(candidate: &[usize], reference: &[usize]) -> bool {
    candidate.iter().all(|v| reference.contains(v))
}

/// Order-independent equality of two vertex lists without repeats.
#[inline]
pub fn same_vertex_set(a: &[usize], b: &[usize]) -> bool {
    a.len() == b.len() && is_subset(a, b) && is_subset(b, a)
}

/// Canonical (sorted) form of a vertex list.
pub fn sorted_key(vertices: &[usize]) -> Vec<usize> {
    let mut key = vertices.to_vec();
    key.sort_unstable();
    key
}
