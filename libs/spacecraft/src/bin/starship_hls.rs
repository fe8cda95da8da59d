//! Builds the Starship HLS far field and writes its files into the working
//! directory.

use anyhow::{Context, Result};
use cad_kernel::Model;
use cad_mesh::MeshOptions;
use env_logger::Env;
use log::info;
use spacecraft::{starship_hls, run};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut model = Model::new();
    let scenario = starship_hls::build(&mut model).context("failed to build the Starship HLS model")?;

    let dir = std::env::current_dir().context("failed to resolve the working directory")?;
    let mesh = run(&mut model, &scenario, &dir, &MeshOptions::default())
        .with_context(|| format!("failed to mesh and export into {}", dir.display()))?;

    info!(
        "Starship HLS: {} nodes, {} elements written to {}",
        mesh.node_count(),
        mesh.element_count(),
        scenario.msh_file
    );
    Ok(())
}
