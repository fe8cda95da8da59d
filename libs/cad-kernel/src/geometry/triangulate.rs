//! # Triangulation
//!
//! Splits a planar outline into convex pieces the BSP kernel can handle.
//!
//! Convex outlines pass through unchanged; anything else is ear-clipped in
//! the projection that drops the dominant normal axis. Orientation tests go
//! through `robust::orient2d` so nearly collinear profile samples do not
//! produce inverted ears.

use glam::DVec3;
use robust::{orient2d, Coord};

/// Projects a point onto the plane spanned by the two minor axes of `normal`,
/// keeping the winding seen from the front.
fn project(point: DVec3, normal: DVec3) -> Coord<f64> {
    let abs = normal.abs();
    if abs.z >= abs.x && abs.z >= abs.y {
        let sign = normal.z.signum();
        Coord {
            x: point.x * sign,
            y: point.y,
        }
    } else if abs.x >= abs.y {
        let sign = normal.x.signum();
        Coord {
            x: point.y * sign,
            y: point.z,
        }
    } else {
        let sign = normal.y.signum();
        Coord {
            x: point.z * sign,
            y: point.x,
        }
    }
}

/// Whether every turn of the outline bends the same way as `normal`.
pub fn is_convex(outline: &[DVec3], normal: DVec3) -> bool {
    let n = outline.len();
    if n < 4 {
        return true;
    }
    (0..n).all(|i| {
        let a = project(outline[i], normal);
        let b = project(outline[(i + 1) % n], normal);
        let c = project(outline[(i + 2) % n], normal);
        orient2d(a, b, c) >= 0.0
    })
}

/// Ear clipping of a simple counter-clockwise outline.
///
/// Returns index triples into `outline`. Falls back to a fan for whatever
/// remains if no ear can be found, which only happens for self-intersecting
/// input.
pub fn ear_clip(outline: &[DVec3], normal: DVec3) -> Vec<[usize; 3]> {
    let points: Vec<Coord<f64>> = outline.iter().map(|p| project(*p, normal)).collect();
    let mut remaining: Vec<usize> = (0..outline.len()).collect();
    let mut triangles = Vec::with_capacity(outline.len().saturating_sub(2));

    while remaining.len() > 3 {
        let n = remaining.len();
        let ear = (0..n).find(|&i| {
            let prev = remaining[(i + n - 1) % n];
            let curr = remaining[i];
            let next = remaining[(i + 1) % n];
            if orient2d(points[prev], points[curr], points[next]) <= 0.0 {
                return false;
            }
            remaining.iter().all(|&other| {
                other == prev
                    || other == curr
                    || other == next
                    || !inside_triangle(points[other], points[prev], points[curr], points[next])
            })
        });

        match ear {
            Some(i) => {
                let prev = remaining[(i + n - 1) % n];
                let next = remaining[(i + 1) % n];
                triangles.push([prev, remaining[i], next]);
                remaining.remove(i);
            }
            None => break,
        }
    }

    for i in 1..remaining.len().saturating_sub(1) {
        triangles.push([remaining[0], remaining[i], remaining[i + 1]]);
    }
    triangles
}

/// Splits an outline into convex rings: itself when convex, else triangles.
pub fn convex_pieces(outline: &[DVec3], normal: DVec3) -> Vec<Vec<DVec3>> {
    if is_convex(outline, normal) {
        return vec![outline.to_vec()];
    }
    ear_clip(outline, normal)
        .into_iter()
        .map(|[a, b, c]| vec![outline[a], outline[b], outline[c]])
        .collect()
}

fn inside_triangle(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> bool {
    orient2d(a, b, p) >= 0.0 && orient2d(b, c, p) >= 0.0 && orient2d(c, a, p) >= 0.0
}
