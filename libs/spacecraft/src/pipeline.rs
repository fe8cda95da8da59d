//! # Pipeline
//!
//! Sizes, meshes and exports a built scenario.
//!
//! ```text
//! snapshots -> sizing plan -> .brep (optional) -> mesh -> .msh
//! ```

use std::fs;
use std::path::Path;

use cad_kernel::Model;
use cad_mesh::{generate, write, Mesh, MeshOptions};

use crate::common::{apply_sizes, Scenario};
use crate::error::BuildResult;

/// Runs the export pipeline for a scenario, writing files into `dir`.
pub fn run(model: &mut Model, scenario: &Scenario, dir: &Path, options: &MeshOptions) -> BuildResult<Mesh> {
    for snapshot in &scenario.snapshots {
        let path = dir.join(snapshot.file_name);
        fs::write(&path, &snapshot.brep)?;
        log::info!("wrote {}", path.display());
    }

    apply_sizes(model, &scenario.plan)?;

    if let Some(brep) = scenario.brep_file {
        write(dir.join(brep), model, None, options)?;
    }

    let mesh = generate(model, options)?;
    write(dir.join(scenario.msh_file), model, Some(&mesh), options)?;
    Ok(mesh)
}
