//! Forward modelling of point mass gravity fields.

use ndarray::{ArrayD, IxDyn};
use num_traits::{AsPrimitive, Float};
use strum_macros::{Display, EnumString};
use tracing::{debug, trace};

use crate::{
    accumulate::{accumulate, LoopOrder},
    broadcast::{broadcast_flatten, broadcast_shapes},
    coordinates::prepare,
    error::GravityError,
    kernels::{kernel_g_radial, kernel_potential, Field},
    types::{Coordinates, PointMasses},
};

/// Newtonian gravitational constant in m^3 kg^-1 s^-2 (CODATA 2018).
pub const GRAVITATIONAL_CONST: f64 = 6.6743e-11;

/// Precision of the computed field.
#[derive(Debug, Display, EnumString, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dtype {
    #[default]
    #[strum(serialize = "float64")]
    Float64,
    #[strum(serialize = "float32")]
    Float32,
}

/// Scalar factors applied once the contributions of every point mass have been summed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardParameters {
    /// Gravitational constant in m^3 kg^-1 s^-2
    pub gravitational_constant: f64,
    /// Report accelerations in m/s^2 instead of mGal
    pub si_units: bool,
}

impl Default for ForwardParameters {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONST,
            si_units: false,
        }
    }
}

impl ForwardParameters {
    pub fn with_gravitational_constant(mut self, gravitational_constant: f64) -> Self {
        self.gravitational_constant = gravitational_constant;
        self
    }

    pub fn in_si_units(mut self) -> Self {
        self.si_units = true;
        self
    }

    /// Factor turning the summed kernels of `field` into the reported values.
    pub fn scale(&self, field: Field) -> f64 {
        if self.si_units {
            self.gravitational_constant
        } else {
            self.gravitational_constant * field.unit_factor()
        }
    }
}

/// Compute the gravitational field named `field` of a set of point masses.
///
/// The field name is checked before any array is touched. See [`point_mass_gravity`].
pub fn compute_gravity<T>(
    coordinates: &Coordinates<'_>,
    point_masses: &PointMasses,
    field: &str,
    params: &ForwardParameters,
) -> Result<ArrayD<T>, GravityError>
where
    T: Float + Send + Sync + 'static,
    f64: AsPrimitive<T>,
{
    let field = Field::from_name(field)?;
    point_mass_gravity(coordinates, point_masses, field, params)
}

/// Compute a gravitational field of a set of point masses on the observation `coordinates`.
///
/// The result has the broadcast shape of the three coordinate arrays. The potential is
/// given in J/kg and the radial acceleration in mGal, or m/s^2 when
/// [`ForwardParameters::si_units`] is set. Observation points that coincide with a point
/// mass produce non-finite values.
pub fn point_mass_gravity<T>(
    coordinates: &Coordinates<'_>,
    point_masses: &PointMasses,
    field: Field,
    params: &ForwardParameters,
) -> Result<ArrayD<T>, GravityError>
where
    T: Float + Send + Sync + 'static,
    f64: AsPrimitive<T>,
{
    let shape = broadcast_shapes(&[
        coordinates.longitude.shape(),
        coordinates.latitude.shape(),
        coordinates.radius.shape(),
    ])?;
    let longitude = broadcast_flatten(&coordinates.longitude, &shape)?;
    let latitude = broadcast_flatten(&coordinates.latitude, &shape)?;
    let radius = broadcast_flatten(&coordinates.radius, &shape)?;

    trace!(shape = ?shape, "preparing observation and point mass coordinates");
    let observations = prepare(&longitude, &latitude, &radius);
    let sources = prepare(
        point_masses.longitude(),
        point_masses.latitude(),
        point_masses.radius(),
    );

    let order = LoopOrder::choose(observations.len(), sources.len());
    debug!(
        field = %field,
        observations = observations.len(),
        point_masses = sources.len(),
        order = %order,
        "accumulating point mass contributions"
    );

    let mut result = vec![T::zero(); observations.len()];
    match field {
        Field::Potential => accumulate(
            &observations,
            &sources,
            point_masses.mass(),
            kernel_potential,
            order,
            &mut result,
        ),
        Field::GRadial => accumulate(
            &observations,
            &sources,
            point_masses.mass(),
            kernel_g_radial,
            order,
            &mut result,
        ),
    }

    let scale = AsPrimitive::<T>::as_(params.scale(field));
    result.iter_mut().for_each(|value| *value = *value * scale);

    Ok(ArrayD::from_shape_vec(IxDyn(&shape), result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    #[test]
    fn test_scale() {
        let params = ForwardParameters::default().with_gravitational_constant(2.0);
        assert_eq!(params.scale(Field::Potential), 2.0);
        assert_eq!(params.scale(Field::GRadial), 2e5);
        assert_eq!(params.in_si_units().scale(Field::GRadial), 2.0);
    }

    #[test]
    fn test_dtype_names() {
        assert_eq!("float32".parse::<Dtype>().unwrap(), Dtype::Float32);
        assert_eq!(Dtype::default().to_string(), "float64");
        assert!("float16".parse::<Dtype>().is_err());
    }

    #[test]
    fn test_point_mass_below() {
        let coordinates = Coordinates::from_slices(&[0.0], &[0.0], &[1000.0]);
        let masses = PointMasses::single(0.0, 0.0, 900.0, 5e9);
        let params = ForwardParameters::default();

        let potential: ArrayD<f64> =
            point_mass_gravity(&coordinates, &masses, Field::Potential, &params).unwrap();
        assert_relative_eq!(
            potential[IxDyn(&[0])],
            GRAVITATIONAL_CONST * 5e9 / 100.0,
            max_relative = 1e-14
        );

        let g_radial: ArrayD<f64> =
            point_mass_gravity(&coordinates, &masses, Field::GRadial, &params).unwrap();
        assert_relative_eq!(
            g_radial[IxDyn(&[0])],
            -GRAVITATIONAL_CONST * 5e9 / 100.0f64.powi(2) * 1e5,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let longitude = Array2::<f64>::zeros((3, 4));
        let latitude = Array2::<f64>::zeros((3, 5));
        let radius = Array2::<f64>::from_elem((1, 1), 6.4e6);
        let coordinates = Coordinates::new(longitude.view(), latitude.view(), radius.view());
        let masses = PointMasses::single(0.0, 0.0, 6e6, 1e10);

        let result: Result<ArrayD<f64>, _> =
            point_mass_gravity(&coordinates, &masses, Field::Potential, &Default::default());
        assert!(matches!(result, Err(GravityError::ShapeMismatch { .. })));
    }
}
