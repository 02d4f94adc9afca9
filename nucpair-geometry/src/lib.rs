//! Geometric types and calculations used by the nucpair package.
//!
//! The crate provides the [`Vec3`](Vec3) and [`Matrix3`](Matrix3) value types together with
//! functions that calculate distances, planar and dihedral angles, the least-squares
//! rigid alignment of two point sets and the intersection area of planar polygons.
//!
//! # Calculating angles
//! ```
//! use nucpair_geometry::{planar_angle3, Vec3};
//! let a = Vec3::new(1.0, 0.0, 0.0);
//! let b = Vec3::new(0.0, 0.0, 0.0);
//! let c = Vec3::new(0.0, 1.5, 0.0);
//! assert!((planar_angle3(&a, &b, &c).to_degrees() - 90.0).abs() < 1e-10);
//! ```
//!
//! # Superimposing point sets
//! ```
//! use nucpair_geometry::{rigid_fit, Vec3};
//! let template = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
//! // --- the same three points, translated by [0, 0, 5]
//! let observed: Vec<Vec3> = template.iter().map(|v| Vec3::new(v.x, v.y, v.z + 5.0)).collect();
//! let fit = rigid_fit(&template, &observed).unwrap();
//! assert!(fit.rmsd < 1e-10);
//! assert!((fit.translation.z - 5.0).abs() < 1e-10);
//! ```

mod vec3;
mod matrix3;
mod simple_geometric;
mod lsq_fit;
mod polygon;
mod errors;
mod assertions;

pub use vec3::Vec3;
pub use matrix3::Matrix3;
pub use simple_geometric::*;
pub use lsq_fit::{rigid_fit, RigidAlignment};
pub use polygon::{polygon_area, intersection_area, Point2};
pub use errors::GeometryError;
