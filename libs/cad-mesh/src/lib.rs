//! # CAD Mesh
//!
//! Mesh generation and export for [`cad_kernel::Model`].
//!
//! ## Pipeline
//!
//! ```text
//! Model (+ size directives) -> SizeField -> surface triangles -> octree hexahedra -> .msh
//! ```
//!
//! The element size follows the per-point directives set on the model:
//! surfaces interpolate the sizes of their own bounding points, the volume
//! grades smoothly away from them.
//!
//! ## Example
//!
//! ```rust
//! use cad_kernel::{Dim, Model};
//! use cad_mesh::{generate, ElementKind, MeshDim, MeshOptions};
//! use glam::DVec3;
//!
//! let mut model = Model::new();
//! model.add_box(DVec3::ZERO, DVec3::splat(1.0)).unwrap();
//! let points = model.entities(Some(Dim::Point));
//! model.set_size(&points, 0.5).unwrap();
//!
//! let mesh = generate(&model, &MeshOptions::default().with_dimension(MeshDim::Surface)).unwrap();
//! assert!(mesh.count_of(ElementKind::Triangle) > 0);
//! assert_eq!(mesh.count_of(ElementKind::Hexahedron), 0);
//! ```

pub mod error;
mod mesh;
mod msh;
mod options;
mod size_field;
mod surface;
mod volume;


use std::path::Path;

use cad_kernel::{Dim, Model};

pub use error::{MeshGenError, MeshResult};
pub use mesh::{Element, ElementKind, Mesh};
pub use msh::{write_msh, write_msh_file};
pub use options::{MeshDim, MeshOptions};
pub use size_field::SizeField;

use mesh::NodeIndex;

/// Meshes every live surface, and every volume when requested.
///
/// # Errors
///
/// - [`MeshGenError::EmptyModel`] if the model has no surfaces.
/// - [`MeshGenError::TooManyElements`] if the sizes would exceed
///   `options.max_elements`.
pub fn generate(model: &Model, options: &MeshOptions) -> MeshResult<Mesh> {
    if model.entities(Some(Dim::Surface)).is_empty() {
        return Err(MeshGenError::EmptyModel);
    }

    let field = SizeField::new(model, options)?;
    let mut mesh = Mesh::new();
    let mut index = NodeIndex::default();

    let triangles = surface::mesh_surfaces(model, &field, options, &mut mesh, &mut index)?;
    log::info!("surface mesh: {} triangles", triangles);

    if options.dimension == MeshDim::Volume {
        let hexahedra = volume::mesh_volumes(model, &field, options, &mut mesh, &mut index)?;
        log::info!("volume mesh: {} hexahedra", hexahedra);
    }

    log::info!(
        "mesh generated: {} nodes, {} elements",
        mesh.node_count(),
        mesh.element_count()
    );
    Ok(mesh)
}

/// Writes the model or its mesh, choosing the format by file extension.
///
/// - `.msh`: the mesh, in the MSH version of `options`.
/// - `.brep`: the model's topology dump; `mesh` is not needed.
///
/// # Errors
///
/// [`MeshGenError::UnsupportedFormat`] for other extensions and
/// [`MeshGenError::MissingMesh`] for `.msh` without a mesh.
pub fn write(path: impl AsRef<Path>, model: &Model, mesh: Option<&Mesh>, options: &MeshOptions) -> MeshResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "msh" => {
            let mesh = mesh.ok_or_else(|| MeshGenError::MissingMesh {
                path: path.display().to_string(),
            })?;
            write_msh_file(path, model, mesh, options.msh_version)
        }
        "brep" => Ok(model.write_brep(path)?),
        _ => Err(MeshGenError::UnsupportedFormat { extension }),
    }
}
