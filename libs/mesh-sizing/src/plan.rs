//! # Sizing Plan
//!
//! Ordered list of group sizes. Entries are applied in insertion order, so a
//! later entry overrides an earlier one on shared points.

use cad_kernel::PhysicalGroup;

/// Ordered `(group, size)` entries.
///
/// # Example
///
/// ```rust
/// use cad_kernel::{Dim, PhysicalGroup};
/// use mesh_sizing::SizingPlan;
///
/// let space = PhysicalGroup::new(Dim::Surface, 1);
/// let ground = PhysicalGroup::new(Dim::Surface, 2);
/// let plan = SizingPlan::new().then(space, 0.5).then(ground, 0.25);
///
/// let order: Vec<_> = plan.iter().map(|(group, _)| group).collect();
/// assert_eq!(order, vec![space, ground]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizingPlan {
    entries: Vec<(PhysicalGroup, f64)>,
}

impl SizingPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, group: PhysicalGroup, size: f64) {
        self.entries.push((group, size));
    }

    /// Appends an entry, builder style.
    pub fn then(mut self, group: PhysicalGroup, size: f64) -> Self {
        self.push(group, size);
        self
    }

    /// Entries in application order.
    pub fn iter(&self) -> impl Iterator<Item = (PhysicalGroup, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PhysicalGroup, f64)> for SizingPlan {
    fn from_iter<I: IntoIterator<Item = (PhysicalGroup, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(PhysicalGroup, f64)> for SizingPlan {
    fn extend<I: IntoIterator<Item = (PhysicalGroup, f64)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
