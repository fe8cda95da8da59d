//! # MSH Export
//!
//! Writes meshes in the MSH 2.2 ASCII format.
//!
//! ## Layout
//!
//! ```text
//! $MeshFormat        2.2 0 8
//! $PhysicalNames     dim tag "name"
//! $Nodes             id x y z            (1-based ids)
//! $Elements          id type 2 physical entity nodes...
//! ```
//!
//! When the model has physical groups, only elements of group members are
//! written, once per group containing them. Without groups every element is
//! written with physical tag 0.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cad_kernel::{DimTag, Model};

use crate::error::{MeshGenError, MeshResult};
use crate::mesh::{Element, Mesh};

/// MSH versions the writer produces.
const SUPPORTED_VERSIONS: [f64; 1] = [2.2];

/// Element lines as `(physical tag, element)`.
fn grouped_elements<'m>(model: &Model, mesh: &'m Mesh) -> MeshResult<Vec<(u32, &'m Element)>> {
    let groups = model.physical_groups(None);
    if groups.is_empty() {
        return Ok(mesh.elements().iter().map(|e| (0, e)).collect());
    }

    let mut lines = Vec::new();
    for group in groups {
        for tag in model.entities_for_physical_group(group)? {
            let entity = DimTag::new(group.dim, tag);
            lines.extend(mesh.elements_of(entity).map(|e| (group.tag, e)));
        }
    }
    Ok(lines)
}

/// Writes a mesh as MSH to any writer.
pub fn write_msh<W: Write>(out: &mut W, model: &Model, mesh: &Mesh, version: f64) -> MeshResult<()> {
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(MeshGenError::UnsupportedVersion { version });
    }

    writeln!(out, "$MeshFormat")?;
    writeln!(out, "{:.1} 0 8", version)?;
    writeln!(out, "$EndMeshFormat")?;

    let groups = model.physical_groups(None);
    if !groups.is_empty() {
        writeln!(out, "$PhysicalNames")?;
        writeln!(out, "{}", groups.len())?;
        for group in &groups {
            writeln!(out, "{} {} \"{}\"", group.dim, group.tag, model.physical_name(*group)?)?;
        }
        writeln!(out, "$EndPhysicalNames")?;
    }

    writeln!(out, "$Nodes")?;
    writeln!(out, "{}", mesh.node_count())?;
    for (i, p) in mesh.nodes().iter().enumerate() {
        writeln!(out, "{} {} {} {}", i + 1, p.x, p.y, p.z)?;
    }
    writeln!(out, "$EndNodes")?;

    let lines = grouped_elements(model, mesh)?;
    writeln!(out, "$Elements")?;
    writeln!(out, "{}", lines.len())?;
    for (id, (physical, element)) in lines.iter().enumerate() {
        write!(
            out,
            "{} {} 2 {} {}",
            id + 1,
            element.kind.msh_type(),
            physical,
            element.entity.tag
        )?;
        for node in &element.nodes {
            write!(out, " {}", node + 1)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "$EndElements")?;
    Ok(())
}

/// Writes a mesh as an MSH file.
pub fn write_msh_file(path: impl AsRef<Path>, model: &Model, mesh: &Mesh, version: f64) -> MeshResult<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_msh(&mut out, model, mesh, version)?;
    out.flush()?;
    log::info!(
        "wrote {} ({} nodes, {} elements)",
        path.display(),
        mesh.node_count(),
        mesh.element_count()
    );
    Ok(())
}
