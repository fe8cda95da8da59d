//! # Configuration Constants
//!
//! Centralized constants for the spacecraft meshing pipeline. Geometry
//! tolerances, tessellation parameters and mesher limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Tessellation of curved primitives
//! - **Mesh Sizing**: Defaults of the size field
//! - **Limits**: Maximum values for safety bounds
//! - **Output**: Mesh file format

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Thickness of a BSP splitting plane.
///
/// Points closer than this to a plane are classified as coplanar. Larger
/// than [`EPSILON`] so that the intersection points produced by splitting
/// land on the plane they were split by.
pub const PLANE_EPSILON: f64 = 1e-5;

/// Grid spacing used when merging coincident mesh nodes.
///
/// Node positions are quantized to this grid before lookup, so two nodes
/// produced independently on a shared polygon edge collapse into one.
///
/// # Example
///
/// ```rust
/// use config::constants::NODE_MERGE_QUANTUM;
///
/// let key = |v: f64| (v / NODE_MERGE_QUANTUM).round() as i64;
/// assert_eq!(key(0.1 + 0.2), key(0.3));
/// ```
pub const NODE_MERGE_QUANTUM: f64 = 1e-7;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Number of segments used to tessellate a full circle.
///
/// Cylinders, cones and revolutions use this many facets around their axis.
/// Partial arcs use a proportional share, never fewer than
/// [`MIN_ARC_SEGMENTS`].
///
/// # Example
///
/// ```rust
/// use config::constants::CIRCLE_SEGMENTS;
///
/// let quarter = (CIRCLE_SEGMENTS as f64 / 4.0).ceil() as u32;
/// assert_eq!(quarter, 8);
/// ```
pub const CIRCLE_SEGMENTS: u32 = 32;

/// Minimum number of segments of any tessellated arc.
pub const MIN_ARC_SEGMENTS: u32 = 2;

/// Number of latitude bands of a tessellated sphere.
pub const SPHERE_RINGS: u32 = 16;

/// Number of samples along a Bézier curve.
pub const BEZIER_SAMPLES: u32 = 16;

/// Tolerance when deciding that a sweep angle is a full turn.
///
/// # Example
///
/// ```rust
/// use config::constants::FULL_TURN_EPSILON;
///
/// let angle = 2.0 * std::f64::consts::PI;
/// assert!((angle - std::f64::consts::TAU).abs() < FULL_TURN_EPSILON);
/// ```
pub const FULL_TURN_EPSILON: f64 = 1e-9;

// =============================================================================
// MESH SIZING CONSTANTS
// =============================================================================

/// Characteristic length, as a fraction of the model diagonal, used when no
/// point carries a size directive.
pub const DEFAULT_SIZE_FACTOR: f64 = 0.1;

/// Lower clamp of the size field.
pub const DEFAULT_SIZE_MIN: f64 = 0.0;

/// Upper clamp of the size field.
///
/// Matches the default of common meshers, which is effectively unbounded.
pub const DEFAULT_SIZE_MAX: f64 = 1e22;

/// Growth rate of the size field away from sized points.
///
/// A point at distance `d` from a point sized `s` receives at most
/// `s + DEFAULT_GRADING * d`.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_GRADING;
///
/// let size = 0.5 + DEFAULT_GRADING * 10.0;
/// assert!(size > 0.5);
/// ```
pub const DEFAULT_GRADING: f64 = 0.3;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum refinement depth of the volume octree.
///
/// Bounds the number of hexahedra to `8^MAX_OCTREE_DEPTH` per volume.
pub const MAX_OCTREE_DEPTH: u32 = 7;

/// Maximum number of subdivisions of a single triangle edge.
pub const MAX_EDGE_SUBDIVISIONS: u32 = 256;

/// Maximum number of elements in a generated mesh.
///
/// Safety limit to prevent memory exhaustion from very small size targets.
pub const MAX_ELEMENTS: usize = 20_000_000;

// =============================================================================
// OUTPUT CONSTANTS
// =============================================================================

/// MSH file format version written by the mesh exporter.
///
/// # Example
///
/// ```rust
/// use config::constants::MSH_FILE_VERSION;
///
/// assert_eq!(format!("{MSH_FILE_VERSION:.1}"), "2.2");
/// ```
pub const MSH_FILE_VERSION: f64 = 2.2;
