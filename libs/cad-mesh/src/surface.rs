//! # Surface Meshing
//!
//! Triangulates every live surface once.
//!
//! A surface is taken from the first volume (ascending tag) holding polygons
//! of it, so faces shared by a solid and its cavity are not duplicated; a
//! surface bounding no volume uses its own patch. Polygons are
//! fan-triangulated and each triangle is split uniformly into `k * k`
//! triangles, with `k` the largest ratio of edge length to local size.

use std::collections::BTreeMap;

use cad_kernel::geometry::Polygon;
use cad_kernel::{Dim, DimTag, Model, Tag};
use config::constants::EPSILON;
use glam::DVec3;
use rayon::prelude::*;

use crate::error::{MeshGenError, MeshResult};
use crate::mesh::{ElementKind, Mesh, NodeIndex};
use crate::options::MeshOptions;
use crate::size_field::SizeField;

/// A triangle of a surface together with its subdivision count.
struct Job {
    surface: Tag,
    corners: [DVec3; 3],
    k: usize,
}

/// Polygons that discretize each live surface.
pub(crate) fn surface_polygons(model: &Model) -> MeshResult<BTreeMap<Tag, Vec<Polygon>>> {
    let mut claimed: BTreeMap<Tag, Vec<Polygon>> = BTreeMap::new();
    for volume in model.entities(Some(Dim::Volume)) {
        let mut local: BTreeMap<Tag, Vec<Polygon>> = BTreeMap::new();
        for polygon in &model.volume(volume.tag)?.polygons {
            local.entry(polygon.face()).or_default().push(polygon.clone());
        }
        for (face, polygons) in local {
            claimed.entry(face).or_insert(polygons);
        }
    }

    let mut result = BTreeMap::new();
    for surface in model.entities(Some(Dim::Surface)) {
        let polygons = match claimed.remove(&surface.tag) {
            Some(polygons) => polygons,
            None => model.surface(surface.tag)?.patch.clone(),
        };
        if polygons.is_empty() {
            log::warn!("surface {} has no geometry, skipped", surface.tag);
            continue;
        }
        result.insert(surface.tag, polygons);
    }
    Ok(result)
}

/// Number of subdivisions so that every sub-edge is within the local size.
fn subdivisions(corners: &[DVec3; 3], size_at: impl Fn(DVec3) -> f64, cap: u32) -> usize {
    let mut k = 1usize;
    for i in 0..3 {
        let (a, b) = (corners[i], corners[(i + 1) % 3]);
        let size = size_at((a + b) * 0.5);
        let ratio = (a.distance(b) / size).ceil();
        if ratio.is_finite() && ratio > k as f64 {
            k = ratio as usize;
        }
    }
    k.min(cap.max(1) as usize)
}

/// Splits a triangle into `k * k` triangles on a barycentric grid, keeping
/// its orientation.
pub(crate) fn subdivide(corners: &[DVec3; 3], k: usize) -> Vec<[DVec3; 3]> {
    let [a, b, c] = *corners;
    let n = k as f64;
    let at = |i: usize, j: usize| a + (b - a) * (i as f64 / n) + (c - a) * (j as f64 / n);

    let mut triangles = Vec::with_capacity(k * k);
    for j in 0..k {
        for i in 0..k - j {
            triangles.push([at(i, j), at(i + 1, j), at(i, j + 1)]);
            if i + j + 1 < k {
                triangles.push([at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)]);
            }
        }
    }
    triangles
}

/// Triangulates every live surface into `mesh`. Returns the number of
/// triangles added.
pub(crate) fn mesh_surfaces(
    model: &Model,
    field: &SizeField,
    options: &MeshOptions,
    mesh: &mut Mesh,
    index: &mut NodeIndex,
) -> MeshResult<usize> {
    let surfaces = surface_polygons(model)?;

    let mut jobs = Vec::new();
    for (&surface, polygons) in &surfaces {
        for polygon in polygons {
            for corners in polygon.triangles() {
                let area = (corners[1] - corners[0]).cross(corners[2] - corners[0]).length();
                if area < EPSILON {
                    continue;
                }
                let k = subdivisions(
                    &corners,
                    |p| field.on_surface(surface, p),
                    options.max_edge_subdivisions,
                );
                jobs.push(Job { surface, corners, k });
            }
        }
    }

    let count: usize = jobs.iter().map(|job| job.k * job.k).sum();
    if mesh.element_count() + count > options.max_elements {
        return Err(MeshGenError::too_many(mesh.element_count() + count, options.max_elements));
    }

    let pieces: Vec<Vec<[DVec3; 3]>> = jobs
        .par_iter()
        .map(|job| subdivide(&job.corners, job.k))
        .collect();

    for (job, triangles) in jobs.iter().zip(pieces) {
        for triangle in triangles {
            let nodes = triangle.iter().map(|&p| index.insert(mesh, p)).collect();
            mesh.add_element(ElementKind::Triangle, DimTag::surface(job.surface), nodes);
        }
    }

    log::debug!("{} surfaces meshed into {} triangles", surfaces.len(), count);
    Ok(count)
}
