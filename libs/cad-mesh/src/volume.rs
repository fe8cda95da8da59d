//! # Volume Meshing
//!
//! Fills each volume with hexahedra from an adaptive octree.
//!
//! ## Algorithm
//!
//! 1. Root cell: the cube around the volume's bounds.
//! 2. Refine level by level while a cell's edge exceeds the size field at
//!    its centre, up to the depth limit. Cells clear of the volume's bounds
//!    are not refined.
//! 3. Keep leaves whose centre lies inside the volume. Inside tests cast a
//!    ray along +X and count boundary crossings, using a hash grid over the
//!    YZ plane to find candidate triangles.
//!
//! Refinement and classification run in parallel; results are collected in
//! cell order, so the output does not depend on scheduling.

use std::collections::HashMap;

use cad_kernel::geometry::Aabb;
use cad_kernel::{Dim, DimTag, Model, Tag};
use config::constants::EPSILON;
use glam::{DVec2, DVec3};
use rayon::prelude::*;

use crate::error::{MeshGenError, MeshResult};
use crate::mesh::{ElementKind, Mesh, NodeIndex};
use crate::options::MeshOptions;
use crate::size_field::SizeField;

/// Corner offsets of a hexahedron in MSH node order.
const HEX_CORNERS: [DVec3; 8] = [
    DVec3::new(0.0, 0.0, 0.0),
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(1.0, 1.0, 0.0),
    DVec3::new(0.0, 1.0, 0.0),
    DVec3::new(0.0, 0.0, 1.0),
    DVec3::new(1.0, 0.0, 1.0),
    DVec3::new(1.0, 1.0, 1.0),
    DVec3::new(0.0, 1.0, 1.0),
];

/// Upper bound on the side of the YZ hash grid.
const MAX_GRID_RESOLUTION: usize = 128;

// =============================================================================
// RAY INDEX
// =============================================================================

/// Boundary triangles of a volume, hashed by their YZ extent.
pub(crate) struct RayIndex {
    triangles: Vec<[DVec3; 3]>,
    grid: HashMap<(usize, usize), Vec<usize>>,
    origin: DVec2,
    cell: DVec2,
    resolution: usize,
    jitter: DVec3,
}

impl RayIndex {
    pub(crate) fn new(triangles: Vec<[DVec3; 3]>) -> Self {
        let bounds = Aabb::from_points(triangles.iter().flatten().copied());
        let origin = DVec2::new(bounds.min.y, bounds.min.z);
        let extent = DVec2::new(bounds.max.y, bounds.max.z) - origin;
        let resolution = ((triangles.len() as f64).sqrt() as usize).clamp(1, MAX_GRID_RESOLUTION);
        let cell = (extent / resolution as f64).max(DVec2::splat(EPSILON));
        let diagonal = bounds.diagonal().max(1.0);

        let mut index = Self {
            triangles: Vec::new(),
            grid: HashMap::new(),
            origin,
            cell,
            resolution,
            jitter: DVec3::new(0.0, 1.37e-7, 2.91e-7) * diagonal,
        };
        for (i, triangle) in triangles.iter().enumerate() {
            let lo = index.bin(triangle.iter().fold(DVec2::INFINITY, |m, p| m.min(DVec2::new(p.y, p.z))));
            let hi = index.bin(triangle.iter().fold(DVec2::NEG_INFINITY, |m, p| m.max(DVec2::new(p.y, p.z))));
            for y in lo.0..=hi.0 {
                for z in lo.1..=hi.1 {
                    index.grid.entry((y, z)).or_default().push(i);
                }
            }
        }
        index.triangles = triangles;
        index
    }

    fn bin(&self, p: DVec2) -> (usize, usize) {
        let t = ((p - self.origin) / self.cell).floor();
        let clamp = |v: f64| (v.max(0.0) as usize).min(self.resolution - 1);
        (clamp(t.x), clamp(t.y))
    }

    /// Whether `p` lies inside the closed boundary.
    pub(crate) fn contains(&self, p: DVec3) -> bool {
        let p = p + self.jitter;
        let yz = DVec2::new(p.y, p.z);
        let far = self.origin + self.cell * self.resolution as f64;
        if yz.x < self.origin.x || yz.y < self.origin.y || yz.x > far.x || yz.y > far.y {
            return false;
        }
        let Some(candidates) = self.grid.get(&self.bin(yz)) else {
            return false;
        };
        let crossings = candidates
            .iter()
            .filter(|&&i| crosses(&self.triangles[i], p))
            .count();
        crossings % 2 == 1
    }
}

/// Whether the ray from `p` along +X passes through the triangle.
fn crosses(triangle: &[DVec3; 3], p: DVec3) -> bool {
    let [a, b, c] = *triangle;
    let cross = |u: DVec3, v: DVec3| u.y * v.z - u.z * v.y;
    let d = cross(b - a, c - a);
    if d.abs() < EPSILON * EPSILON {
        return false;
    }
    let w1 = cross(p - a, c - a) / d;
    let w2 = cross(b - a, p - a) / d;
    let w0 = 1.0 - w1 - w2;
    if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
        return false;
    }
    a.x * w0 + b.x * w1 + c.x * w2 > p.x
}

// =============================================================================
// OCTREE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    min: DVec3,
    size: f64,
    depth: u32,
}

impl Cell {
    fn center(&self) -> DVec3 {
        self.min + DVec3::splat(self.size * 0.5)
    }

    fn bounds(&self) -> Aabb {
        Aabb {
            min: self.min,
            max: self.min + DVec3::splat(self.size),
        }
    }

    fn children(&self) -> impl Iterator<Item = Cell> + '_ {
        let half = self.size * 0.5;
        (0..8).map(move |i| Cell {
            min: self.min + DVec3::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64) * half,
            size: half,
            depth: self.depth + 1,
        })
    }
}

/// Leaf cells of the octree over `bounds`.
fn refine(bounds: &Aabb, field: &SizeField, options: &MeshOptions) -> MeshResult<Vec<Cell>> {
    let side = bounds.size().max_element();
    let root = Cell {
        min: bounds.center() - DVec3::splat(side * 0.5),
        size: side,
        depth: 0,
    };

    let mut leaves = Vec::new();
    let mut level = vec![root];
    while !level.is_empty() {
        let split: Vec<bool> = level
            .par_iter()
            .map(|cell| {
                cell.depth < options.max_octree_depth
                    && cell.bounds().overlaps(bounds, 0.0)
                    && cell.size > field.at(cell.center())
            })
            .collect();

        let mut next = Vec::new();
        for (cell, split) in level.iter().zip(split) {
            if split {
                next.extend(cell.children());
            } else {
                leaves.push(*cell);
            }
        }
        if leaves.len() + next.len() > options.max_elements {
            return Err(MeshGenError::too_many(leaves.len() + next.len(), options.max_elements));
        }
        level = next;
    }
    Ok(leaves)
}

/// Fills one volume with hexahedra. Returns the number added.
fn mesh_volume(
    model: &Model,
    volume: Tag,
    field: &SizeField,
    options: &MeshOptions,
    mesh: &mut Mesh,
    index: &mut NodeIndex,
) -> MeshResult<usize> {
    let polygons = &model.volume(volume)?.polygons;
    let bounds = Aabb::from_polygons(polygons);
    if bounds.is_empty() {
        log::warn!("volume {} has no geometry, skipped", volume);
        return Ok(0);
    }

    let rays = RayIndex::new(polygons.iter().flat_map(|p| p.triangles()).collect());
    let leaves = refine(&bounds, field, options)?;
    let inside: Vec<bool> = leaves.par_iter().map(|cell| rays.contains(cell.center())).collect();

    let mut count = 0;
    for (cell, _) in leaves.iter().zip(inside).filter(|(_, inside)| *inside) {
        if mesh.element_count() >= options.max_elements {
            return Err(MeshGenError::too_many(mesh.element_count() + 1, options.max_elements));
        }
        let nodes = HEX_CORNERS
            .iter()
            .map(|&offset| index.insert(mesh, cell.min + offset * cell.size))
            .collect();
        mesh.add_element(ElementKind::Hexahedron, DimTag::volume(volume), nodes);
        count += 1;
    }

    log::debug!("volume {}: {} cells, {} hexahedra", volume, leaves.len(), count);
    Ok(count)
}

/// Fills every live volume. Returns the number of hexahedra added.
pub(crate) fn mesh_volumes(
    model: &Model,
    field: &SizeField,
    options: &MeshOptions,
    mesh: &mut Mesh,
    index: &mut NodeIndex,
) -> MeshResult<usize> {
    let mut count = 0;
    for volume in model.entities(Some(Dim::Volume)) {
        count += mesh_volume(model, volume.tag, field, options, mesh, index)?;
    }
    Ok(count)
}
