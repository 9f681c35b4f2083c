//! # Point Mass Gravity
//!
//! Forward modelling of the gravitational potential and radial acceleration generated by a
//! set of point masses on observation points given in geocentric spherical coordinates
//! (longitude and latitude in degrees, radius in meters).
//!
//! The field of every point mass is evaluated on every observation point by direct
//! summation, spread across threads with rayon.
//!
//! ## Example
//!
//! ```rust
//! use ndarray::Array2;
//! use point_mass_gravity::{compute_gravity, Coordinates, ForwardParameters, PointMasses};
//!
//! // 10 x 20 grid of observation points 1 km above a sphere of 6371 km
//! let longitude = Array2::from_shape_fn((10, 20), |(_, j)| -10.0 + j as f64);
//! let latitude = Array2::from_shape_fn((10, 20), |(i, _)| -5.0 + i as f64);
//! let radius = Array2::from_elem((1, 1), 6_372_000.0);
//! let coordinates = Coordinates::new(longitude.view(), latitude.view(), radius.view());
//!
//! // Two buried point masses (kg)
//! let point_masses = PointMasses::new(
//!     vec![-2.0, 3.0],
//!     vec![0.0, 1.5],
//!     vec![6_360_000.0, 6_365_000.0],
//!     vec![1e12, 5e11],
//! )
//! .unwrap();
//!
//! let g_radial = compute_gravity::<f64>(
//!     &coordinates,
//!     &point_masses,
//!     "g_radial",
//!     &ForwardParameters::default(),
//! )
//! .unwrap();
//! assert_eq!(g_radial.shape(), &[10, 20]);
//!
//! assert!(compute_gravity::<f64>(
//!     &coordinates,
//!     &point_masses,
//!     "bogus",
//!     &ForwardParameters::default(),
//! )
//! .is_err());
//! ```

#[macro_use]
mod macros;

pub mod accumulate;
pub mod broadcast;
pub mod coordinates;
mod error;
pub mod forward;
pub mod kernels;
pub mod types;

pub use error::GravityError;
pub use forward::{
    compute_gravity, point_mass_gravity, Dtype, ForwardParameters, GRAVITATIONAL_CONST,
};
pub use kernels::Field;
pub use types::{Coordinates, PointMasses};
