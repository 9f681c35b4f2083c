//! Coordinate preparation.
//!
//! Converts longitude/latitude in degrees into the trigonometric quantities the kernels
//! need so that they are computed once per point and not inside the O(N·M) loop.

use nalgebra::Vector3;

/// Trigonometric state of a single point on a geocentric spherical system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointState {
    /// Longitude in radians
    pub longitude: f64,
    /// Latitude in radians
    pub latitude: f64,
    /// cos(latitude)
    pub cosphi: f64,
    /// sin(latitude)
    pub sinphi: f64,
    /// Radius in meters
    pub radius: f64,
    /// radius^2
    pub radius_sq: f64,
}

impl PointState {
    /// Prepare a point given in degrees, degrees, meters.
    #[inline]
    pub fn from_degrees(longitude: f64, latitude: f64, radius: f64) -> Self {
        let (latitude, sinphi, cosphi) = radians_sin_cos!(latitude);
        Self {
            longitude: longitude.to_radians(),
            latitude,
            cosphi,
            sinphi,
            radius,
            radius_sq: radius * radius,
        }
    }

    /// Geocentric Cartesian position of the point in meters.
    pub fn cartesian(&self) -> Vector3<f64> {
        let (sinlambda, coslambda) = self.longitude.sin_cos();
        Vector3::new(
            self.radius * self.cosphi * coslambda,
            self.radius * self.cosphi * sinlambda,
            self.radius * self.sinphi,
        )
    }
}

/// Prepare a set of points. The three slices must have the same length.
pub fn prepare(longitude: &[f64], latitude: &[f64], radius: &[f64]) -> Vec<PointState> {
    debug_assert_eq!(longitude.len(), latitude.len());
    debug_assert_eq!(longitude.len(), radius.len());

    longitude
        .iter()
        .zip(latitude)
        .zip(radius)
        .map(|((&lon, &lat), &r)| PointState::from_degrees(lon, lat, r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_degrees() {
        let state = PointState::from_degrees(180.0, 30.0, 2.0);

        assert_relative_eq!(state.longitude, std::f64::consts::PI, max_relative = 1e-15);
        assert_relative_eq!(state.latitude, std::f64::consts::FRAC_PI_6, max_relative = 1e-15);
        assert_relative_eq!(state.cosphi, 3f64.sqrt() / 2.0, max_relative = 1e-15);
        assert_relative_eq!(state.sinphi, 0.5, max_relative = 1e-15);
        assert_eq!(state.radius, 2.0);
        assert_eq!(state.radius_sq, 4.0);
    }

    #[test]
    fn test_prepare_keeps_order() {
        let states = prepare(&[0.0, 90.0], &[0.0, -90.0], &[1.0, 3.0]);

        assert_eq!(states.len(), 2);
        assert_eq!(states[0], PointState::from_degrees(0.0, 0.0, 1.0));
        assert_eq!(states[1].radius_sq, 9.0);
        assert_relative_eq!(states[1].sinphi, -1.0);
    }

    #[test]
    fn test_prepare_propagates_nan() {
        let states = prepare(&[f64::NAN], &[0.0], &[f64::INFINITY]);

        assert!(states[0].longitude.is_nan());
        assert!(states[0].radius_sq.is_infinite());
    }

    #[test]
    fn test_cartesian() {
        let north_pole = PointState::from_degrees(0.0, 90.0, 10.0).cartesian();
        assert_relative_eq!(north_pole, Vector3::new(0.0, 0.0, 10.0), epsilon = 1e-12);

        let equator = PointState::from_degrees(90.0, 0.0, 10.0).cartesian();
        assert_relative_eq!(equator, Vector3::new(0.0, 10.0, 0.0), epsilon = 1e-12);
    }
}
