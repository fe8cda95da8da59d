//! # BREP Text Dump
//!
//! Plain-text listing of the model's topology: points with coordinates,
//! curves with end points, surfaces with bounding curves, volumes with
//! bounding surfaces, and physical groups.
//!
//! ```text
//! BREP 1
//! Points 2
//! 1 1 0 0
//! ...
//! Curves 3
//! 1 Circle 1 1
//! ...
//! Surfaces 3
//! 1 Cylinder 1 3 2
//! ...
//! Volumes 1
//! 1 1 2 3
//! PhysicalGroups 1
//! 2 1 "Hull" 1 2 3
//! ```

use crate::model::{Model, ModelResult};
use std::fmt::Write as _;
use std::path::Path;

/// Renders the model as text.
pub fn to_brep_string(model: &Model) -> ModelResult<String> {
    let mut out = String::new();
    write_all(model, &mut out)?;
    Ok(out)
}

fn write_all(model: &Model, out: &mut impl std::fmt::Write) -> std::fmt::Result {
    writeln!(out, "BREP 1")?;

    writeln!(out, "Points {}", model.points.len())?;
    for (tag, point) in &model.points {
        let p = point.position;
        writeln!(out, "{tag} {} {} {}", p.x, p.y, p.z)?;
    }

    writeln!(out, "Curves {}", model.curves.len())?;
    for (tag, curve) in &model.curves {
        writeln!(out, "{tag} {} {} {}", curve.kind.name(), curve.start, curve.end)?;
    }

    writeln!(out, "Surfaces {}", model.surfaces.len())?;
    for (tag, surface) in &model.surfaces {
        write!(out, "{tag} {}", surface.kind.name())?;
        for curve in surface.curves() {
            write!(out, " {curve}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Volumes {}", model.volumes.len())?;
    for (tag, volume) in &model.volumes {
        write!(out, "{tag}")?;
        for surface in &volume.surfaces {
            write!(out, " {surface}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "PhysicalGroups {}", model.groups.len())?;
    for (group, record) in &model.groups {
        write!(out, "{} {} \"{}\"", group.dim, group.tag, record.name)?;
        for member in &record.members {
            write!(out, " {member}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

impl Model {
    /// Writes the topology dump to a file.
    pub fn write_brep(&self, path: impl AsRef<Path>) -> ModelResult<()> {
        let path = path.as_ref();
        std::fs::write(path, to_brep_string(self)?)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Dim, DimTag};
    use glam::DVec3;

    #[test]
    fn test_brep_lists_cylinder_topology() {
        let mut model = Model::new();
        let cylinder = model.add_cylinder(DVec3::ZERO, DVec3::Z, 1.0, None).unwrap();
        let faces = model.adjacencies(DimTag::volume(cylinder)).unwrap().downward;
        model.add_physical_group(Dim::Surface, &faces, "Hull").unwrap();

        let text = to_brep_string(&model).unwrap();
        assert!(text.starts_with("BREP 1\n"));
        assert!(text.contains("Points 2\n"));
        assert!(text.contains("Curves 3\n"));
        assert!(text.contains("Surfaces 3\n"));
        assert!(text.contains("Volumes 1\n1 1 2 3\n"));
        assert!(text.contains("2 1 \"Hull\" 1 2 3\n"));
    }

    /// Accepts a fixed number of writes, then fails.
    struct Full(usize);

    impl std::fmt::Write for Full {
        fn write_str(&mut self, _: &str) -> std::fmt::Result {
            self.0 = self.0.checked_sub(1).ok_or(std::fmt::Error)?;
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut model = Model::new();
        model.add_box(DVec3::ZERO, DVec3::ONE).unwrap();
        assert!(write_all(&model, &mut Full(3)).is_err());
        assert!(write_all(&model, &mut Full(usize::MAX)).is_ok());

        let dir = tempfile::tempdir().unwrap();
        let err = model.write_brep(dir.path().join("missing").join("box.brep")).unwrap_err();
        assert!(matches!(err, crate::ModelError::Io(_)));
    }

    #[test]
    fn test_write_brep_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("box.brep");
        let mut model = Model::new();
        model.add_box(DVec3::ZERO, DVec3::ONE).unwrap();
        model.write_brep(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Points 8\n"));
        assert!(text.contains("Surfaces 6\n"));
    }
}
