//! # Entity Identifiers
//!
//! Typed identifiers for geometric entities and physical groups.
//!
//! Every entity of the model is addressed by its dimension and an integer
//! tag. Tags are unique within a dimension and never reused.

use std::fmt;

/// Integer tag of an entity, unique within its dimension.
pub type Tag = u32;

// =============================================================================
// DIMENSION
// =============================================================================

/// Topological dimension of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dim {
    /// 0-dimensional vertex.
    Point,
    /// 1-dimensional edge.
    Curve,
    /// 2-dimensional face.
    Surface,
    /// 3-dimensional solid.
    Volume,
}

impl Dim {
    /// All dimensions in ascending order.
    pub const ALL: [Dim; 4] = [Dim::Point, Dim::Curve, Dim::Surface, Dim::Volume];

    /// Numeric dimension (0 to 3).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Dimension from its numeric value.
    pub fn from_index(index: usize) -> Option<Dim> {
        Dim::ALL.get(index).copied()
    }

    /// The dimension of this entity's boundary.
    pub fn lower(self) -> Option<Dim> {
        self.index().checked_sub(1).and_then(Dim::from_index)
    }

    /// The dimension of entities bounded by this one.
    pub fn higher(self) -> Option<Dim> {
        Dim::from_index(self.index() + 1)
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

// =============================================================================
// DIMTAG
// =============================================================================

/// A geometric entity: dimension plus tag.
///
/// Ordering is by dimension first, then tag, so sorted collections group
/// entities of the same dimension together.
///
/// # Example
///
/// ```rust
/// use cad_kernel::{Dim, DimTag};
/// use std::collections::BTreeSet;
///
/// let set: BTreeSet<_> = [DimTag::point(3), DimTag::point(1), DimTag::point(3)]
///     .into_iter()
///     .collect();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.first(), Some(&DimTag::new(Dim::Point, 1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DimTag {
    /// Entity dimension.
    pub dim: Dim,
    /// Entity tag.
    pub tag: Tag,
}

impl DimTag {
    /// Creates an entity identifier.
    pub const fn new(dim: Dim, tag: Tag) -> Self {
        Self { dim, tag }
    }

    /// A point entity.
    pub const fn point(tag: Tag) -> Self {
        Self::new(Dim::Point, tag)
    }

    /// A curve entity.
    pub const fn curve(tag: Tag) -> Self {
        Self::new(Dim::Curve, tag)
    }

    /// A surface entity.
    pub const fn surface(tag: Tag) -> Self {
        Self::new(Dim::Surface, tag)
    }

    /// A volume entity.
    pub const fn volume(tag: Tag) -> Self {
        Self::new(Dim::Volume, tag)
    }
}

impl fmt::Display for DimTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dim, self.tag)
    }
}

// =============================================================================
// PHYSICAL GROUP
// =============================================================================

/// Handle of a physical group.
///
/// Group tags are allocated per dimension, so the handle carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhysicalGroup {
    /// Dimension shared by all members.
    pub dim: Dim,
    /// Group tag.
    pub tag: Tag,
}

impl PhysicalGroup {
    /// Creates a group handle.
    pub const fn new(dim: Dim, tag: Tag) -> Self {
        Self { dim, tag }
    }
}

impl fmt::Display for PhysicalGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "physical ({}, {})", self.dim, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_dim_neighbours() {
        assert_eq!(Dim::Point.lower(), None);
        assert_eq!(Dim::Surface.lower(), Some(Dim::Curve));
        assert_eq!(Dim::Surface.higher(), Some(Dim::Volume));
        assert_eq!(Dim::Volume.higher(), None);
    }

    #[test]
    fn test_dim_from_index() {
        assert_eq!(Dim::from_index(2), Some(Dim::Surface));
        assert_eq!(Dim::from_index(4), None);
    }

    #[test]
    fn test_dimtag_hash_dedup() {
        let tags: HashSet<_> = [DimTag::point(1), DimTag::point(1), DimTag::curve(1)]
            .into_iter()
            .collect();
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_dimtag_ordering() {
        assert!(DimTag::volume(1) > DimTag::surface(99));
        assert!(DimTag::surface(2) > DimTag::surface(1));
    }

    #[test]
    fn test_dimtag_display() {
        assert_eq!(DimTag::surface(14).to_string(), "(2, 14)");
    }
}
