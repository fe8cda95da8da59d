//! # Lunar Gateway
//!
//! Modular station assembled along the +Y axis, with visiting vehicles
//! docked to the side ports of HALO and I-HAB, inside a spherical far
//! field.
//!
//! ```text
//!                 Blue Moon
//!                     |
//!   PPE - HALO ---- I-HAB ---- Orion
//!          |          |
//!   Dragon XL - ESPRIT  Airlock
//! ```
//!
//! Every module builder takes the model and the origin of its docking
//! port, sizes its own groups, and returns a [`Module`] whose
//! [`Footprint`] tells the assembler where the next module goes.

mod airlock;
mod blue_moon;
mod dragon_xl;
mod esprit;
mod halo;
mod ihab;
mod orion;
mod ppe;


use cad_kernel::{Dim, DimTag, Model};
use glam::DVec3;
use mesh_sizing::SizingPlan;

use crate::common::{surfaces_of, Scenario};
use crate::error::{BuildError, BuildResult};

/// Spacing between the surfaces of different groups.
pub const TOLERANCE: f64 = 0.01;
pub const BOUNDARY_RADIUS: f64 = 85.0;
pub const DOCKING_RADIUS: f64 = 1.3 / 2.0;
pub const DOCKING_LENGTH: f64 = 0.17;
pub const SIZE_SPACE: f64 = 0.1 * BOUNDARY_RADIUS;

/// A docking port on the side of a module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidePort {
    /// Distance from the station axis to the end of the port.
    pub reach: f64,
    /// Distance along the module from its front port.
    pub position: f64,
}

/// Placement record of a built module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Length along the assembly axis, docking ports included.
    pub length: f64,
    pub side_port: Option<SidePort>,
}

impl Footprint {
    pub fn axial(length: f64) -> Self {
        Self { length, side_port: None }
    }

    pub fn with_side_port(length: f64, reach: f64, position: f64) -> Self {
        Self {
            length,
            side_port: Some(SidePort { reach, position }),
        }
    }

    fn port(&self, module: &'static str) -> BuildResult<SidePort> {
        self.side_port.ok_or_else(|| BuildError::missing(module, "side port"))
    }
}

/// A built module.
#[derive(Debug, Clone)]
pub struct Module {
    /// Every volume the module owns, bodies and panels alike.
    pub volumes: Vec<DimTag>,
    pub footprint: Footprint,
}

/// Shift along the assembly axis that centres a chain of modules placed
/// end to end with [`TOLERANCE`] gaps on the origin.
pub fn centering_offset(footprints: &[Footprint]) -> f64 {
    let gaps = footprints.len().saturating_sub(1) as f64 * TOLERANCE;
    let length: f64 = footprints.iter().map(|f| f.length).sum();
    -(length + gaps) / 2.0
}

/// Builds the station and its far field.
///
/// Modules are sized as they are built; the returned plan only sizes the
/// far-field sphere.
pub fn build(model: &mut Model) -> BuildResult<Scenario> {
    let along = |y: f64| DVec3::new(0.0, y, 0.0);

    let ppe = ppe::build(model, DVec3::ZERO)?;
    let halo = halo::build(model, along(ppe.footprint.length + TOLERANCE))?;
    let ihab = ihab::build(
        model,
        along(ppe.footprint.length + halo.footprint.length + 2.0 * TOLERANCE),
    )?;
    let orion = orion::build(
        model,
        along(ppe.footprint.length + halo.footprint.length + ihab.footprint.length + 3.0 * TOLERANCE),
    )?;

    let halo_port = halo.footprint.port("HALO")?;
    let ihab_port = ihab.footprint.port("I-HAB")?;
    let halo_side = halo_port.position + ppe.footprint.length + TOLERANCE;

    let lander = blue_moon::build(model, DVec3::new(halo_port.reach + TOLERANCE, halo_side, 0.0))?;
    let esprit = esprit::build(model, DVec3::new(-(halo_port.reach + TOLERANCE), halo_side, 0.0))?;
    let dragon = dragon_xl::build(
        model,
        DVec3::new(
            -(halo_port.reach + esprit.footprint.length + 2.0 * TOLERANCE),
            halo_side,
            0.0,
        ),
    )?;
    let airlock = airlock::build(
        model,
        DVec3::new(
            -(ihab_port.reach + TOLERANCE),
            ppe.footprint.length + halo.footprint.length + ihab_port.position + 2.0 * TOLERANCE,
            0.0,
        ),
    )?;

    let offset = centering_offset(&[ppe.footprint, halo.footprint, ihab.footprint, orion.footprint]);
    let station: Vec<DimTag> = [ppe, halo, ihab, orion, lander, esprit, dragon, airlock]
        .into_iter()
        .flat_map(|m| m.volumes)
        .collect();
    model.translate(&station, along(offset))?;
    log::info!("station of {} volumes centred with offset {offset:.4}", station.len());

    let boundary = model.add_sphere(DVec3::ZERO, BOUNDARY_RADIUS)?;
    let walls = surfaces_of(model, boundary)?;
    model.cut(&[DimTag::volume(boundary)], &station)?;

    let space = model.add_physical_group(Dim::Surface, &walls, "Space")?;
    model.add_physical_group(Dim::Volume, &[boundary], "Volume")?;

    Ok(Scenario {
        boundary,
        plan: SizingPlan::new().then(space, SIZE_SPACE),
        snapshots: Vec::new(),
        brep_file: Some("gateway.brep"),
        msh_file: "gateway.msh",
    })
}
