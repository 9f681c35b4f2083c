//! Gravity kernels of a unit point mass at unit gravitational constant.
//!
//! The mass is applied per term by the accumulation loop, the gravitational constant and
//! unit conversion once per call by the forward model.

use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

use crate::coordinates::PointState;
use crate::error::GravityError;

/// Conversion factor from m/s^2 to mGal.
pub const SI_TO_MGAL: f64 = 1e5;

/// Gravitational fields that can be computed.
#[derive(Debug, Display, EnumString, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Gravitational potential, J/kg
    #[strum(serialize = "potential")]
    Potential,
    /// Radial acceleration, mGal
    #[strum(serialize = "g_radial")]
    GRadial,
}

impl Field {
    /// Look up a field by name.
    pub fn from_name(name: &str) -> Result<Self, GravityError> {
        Field::from_str(name).map_err(|_| GravityError::InvalidField(name.to_string()))
    }

    /// Factor converting the SI result into the reported units.
    pub fn unit_factor(self) -> f64 {
        match self {
            Field::Potential => 1.0,
            Field::GRadial => SI_TO_MGAL,
        }
    }

    pub fn units(self) -> &'static str {
        match self {
            Field::Potential => "J/kg",
            Field::GRadial => "mGal",
        }
    }
}

/// Cosine of the angular separation between two points and the square of their distance.
///
/// Both come from the haversine of the separation,
/// `hav(psi) = sin^2(dphi / 2) + cos(phi) cos(phi_p) sin^2(dlambda / 2)`, giving
/// `cos(psi) = 1 - 2 hav(psi)` and `distance^2 = (r - r_p)^2 + 4 r r_p hav(psi)`.
/// These equal the spherical and 3-D laws of cosines, but the distance is exactly zero
/// for identical points at any latitude.
#[inline]
pub fn separation(obs: &PointState, src: &PointState) -> (f64, f64) {
    let half_dphi = (0.5 * (src.latitude - obs.latitude)).sin();
    let half_dlambda = (0.5 * (src.longitude - obs.longitude)).sin();
    let haversine =
        half_dphi * half_dphi + src.cosphi * obs.cosphi * (half_dlambda * half_dlambda);
    let cospsi = 1.0 - 2.0 * haversine;
    let delta_r = obs.radius - src.radius;
    let distance_sq = delta_r * delta_r + 4.0 * (obs.radius * src.radius) * haversine;
    (cospsi, distance_sq)
}

/// 1 / distance
#[inline]
pub fn kernel_potential(obs: &PointState, src: &PointState) -> f64 {
    let (_, distance_sq) = separation(obs, src);
    1.0 / distance_sq.sqrt()
}

/// (r_p cos(psi) - r) / distance^3
#[inline]
pub fn kernel_g_radial(obs: &PointState, src: &PointState) -> f64 {
    let (cospsi, distance_sq) = separation(obs, src);
    let delta_z = src.radius * cospsi - obs.radius;
    delta_z / distance_sq.powf(1.5)
}
