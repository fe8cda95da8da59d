//! ESPRIT refuelling module: a hexagonal prism extruded from a plane
//! profile, followed by a cylindrical section.

use std::f64::consts::{FRAC_PI_3, PI};

use cad_kernel::{Dim, DimTag, Model};
use glam::DVec3;
use mesh_sizing::SizingPlan;

use super::{Footprint, Module, DOCKING_LENGTH, DOCKING_RADIUS};
use crate::common::{apply_sizes, first_of, rotated_copies, volume_surface_group};
use crate::error::BuildResult;

const LENGTH: f64 = 6.4;
const RADIUS: f64 = 4.6 / 2.0;
const HEX_LENGTH: f64 = 2.5;

pub(super) fn build(model: &mut Model, origin: DVec3) -> BuildResult<Module> {
    let o = origin;
    let x = |length: f64| DVec3::new(length, 0.0, 0.0);
    let inner_radius = 3.0_f64.sqrt() / 2.0 * RADIUS;
    let size = 0.1 * inner_radius;

    let module = DimTag::volume(model.add_cylinder(o, x(2.0 * DOCKING_LENGTH), DOCKING_RADIUS, None)?);

    // Hexagon in the plane of the docking port face
    let corner = model.add_point(o + DVec3::new(2.0 * DOCKING_LENGTH, 0.0, RADIUS))?;
    let corners = rotated_copies(model, DimTag::point(corner), 5, o, DVec3::X, FRAC_PI_3)?;
    let mut edges = Vec::with_capacity(corners.len());
    for (i, start) in corners.iter().enumerate() {
        let end = corners[(i + 1) % corners.len()];
        edges.push(model.add_line(start.tag, end.tag)?);
    }
    let outline = model.add_curve_loop(&edges)?;
    let face = model.add_plane_surface(&[outline])?;
    let prism = first_of(&model.extrude(&[DimTag::surface(face)], x(HEX_LENGTH))?, Dim::Volume, "extrude")?;

    let tank = model.add_cylinder(
        o + x(2.0 * DOCKING_LENGTH + HEX_LENGTH),
        x(LENGTH - HEX_LENGTH - 3.0 * DOCKING_LENGTH),
        inner_radius,
        None,
    )?;
    let port = model.add_cylinder(o + x(LENGTH - DOCKING_LENGTH), x(DOCKING_LENGTH), DOCKING_RADIUS, None)?;
    model.fuse(&[module], &[prism, DimTag::volume(tank), DimTag::volume(port)])?;
    model.rotate(&[module], o, DVec3::Z, PI)?;

    let body = volume_surface_group(model, module.tag, "ESPRIT")?;
    apply_sizes(model, &SizingPlan::new().then(body, size))?;

    Ok(Module {
        volumes: vec![module],
        footprint: Footprint::axial(LENGTH + DOCKING_LENGTH),
    })
}
