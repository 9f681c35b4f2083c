use ndarray::{ArrayView, ArrayView1, ArrayViewD, Dimension};
use serde::{Deserialize, Serialize};

use crate::error::GravityError;

/// Observation coordinates on a geocentric spherical system.
///
/// Longitude and latitude are in degrees, radius in meters. The three views may have
/// different shapes as long as they broadcast to a common one, which is the shape of the
/// computed field.
#[derive(Debug, Clone)]
pub struct Coordinates<'a> {
    pub longitude: ArrayViewD<'a, f64>,
    pub latitude: ArrayViewD<'a, f64>,
    pub radius: ArrayViewD<'a, f64>,
}

impl<'a> Coordinates<'a> {
    pub fn new<D1, D2, D3>(
        longitude: ArrayView<'a, f64, D1>,
        latitude: ArrayView<'a, f64, D2>,
        radius: ArrayView<'a, f64, D3>,
    ) -> Self
    where
        D1: Dimension,
        D2: Dimension,
        D3: Dimension,
    {
        Self {
            longitude: longitude.into_dyn(),
            latitude: latitude.into_dyn(),
            radius: radius.into_dyn(),
        }
    }

    /// Flat list of observation points.
    pub fn from_slices(longitude: &'a [f64], latitude: &'a [f64], radius: &'a [f64]) -> Self {
        Self::new(
            ArrayView1::from(longitude),
            ArrayView1::from(latitude),
            ArrayView1::from(radius),
        )
    }
}

#[derive(Deserialize)]
struct PointMassArrays {
    longitude: Vec<f64>,
    latitude: Vec<f64>,
    radius: Vec<f64>,
    mass: Vec<f64>,
}

/// A collection of point masses: coordinates in degrees, degrees, meters and mass in kg.
///
/// All four arrays always hold the same number of elements. Length one arrays handed to
/// [`PointMasses::new`] are repeated to match the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PointMassArrays")]
pub struct PointMasses {
    longitude: Vec<f64>,
    latitude: Vec<f64>,
    radius: Vec<f64>,
    mass: Vec<f64>,
}

impl PointMasses {
    pub fn new(
        longitude: Vec<f64>,
        latitude: Vec<f64>,
        radius: Vec<f64>,
        mass: Vec<f64>,
    ) -> Result<Self, GravityError> {
        let lengths = [longitude.len(), latitude.len(), radius.len(), mass.len()];
        let count = lengths.iter().copied().max().unwrap_or(0);
        if count == 0 {
            return Err(GravityError::NoPointMasses);
        }
        if lengths.iter().any(|&len| len != count && len != 1) {
            return Err(GravityError::LengthMismatch {
                longitude: lengths[0],
                latitude: lengths[1],
                radius: lengths[2],
                mass: lengths[3],
            });
        }

        let expand = |values: Vec<f64>| {
            if values.len() == count {
                values
            } else {
                vec![values[0]; count]
            }
        };

        Ok(Self {
            longitude: expand(longitude),
            latitude: expand(latitude),
            radius: expand(radius),
            mass: expand(mass),
        })
    }

    pub fn single(longitude: f64, latitude: f64, radius: f64, mass: f64) -> Self {
        Self {
            longitude: vec![longitude],
            latitude: vec![latitude],
            radius: vec![radius],
            mass: vec![mass],
        }
    }

    pub fn len(&self) -> usize {
        self.mass.len()
    }

    /// True when there are no point masses. `new` rejects that case.
    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    pub fn longitude(&self) -> &[f64] {
        &self.longitude
    }

    pub fn latitude(&self) -> &[f64] {
        &self.latitude
    }

    pub fn radius(&self) -> &[f64] {
        &self.radius
    }

    pub fn mass(&self) -> &[f64] {
        &self.mass
    }
}

impl TryFrom<PointMassArrays> for PointMasses {
    type Error = GravityError;

    fn try_from(arrays: PointMassArrays) -> Result<Self, Self::Error> {
        PointMasses::new(arrays.longitude, arrays.latitude, arrays.radius, arrays.mass)
    }
}
