//! Builds the Lunar Gateway far field and writes its files into the working
//! directory.

use anyhow::{Context, Result};
use cad_kernel::Model;
use cad_mesh::MeshOptions;
use env_logger::Env;
use log::info;
use spacecraft::{gateway, run};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut model = Model::new();
    let scenario = gateway::build(&mut model).context("failed to build the Lunar Gateway model")?;

    let dir = std::env::current_dir().context("failed to resolve the working directory")?;
    let mesh = run(&mut model, &scenario, &dir, &MeshOptions::default())
        .with_context(|| format!("failed to mesh and export into {}", dir.display()))?;

    info!(
        "Lunar Gateway: {} nodes, {} elements written to {}",
        mesh.node_count(),
        mesh.element_count(),
        scenario.msh_file
    );
    Ok(())
}
