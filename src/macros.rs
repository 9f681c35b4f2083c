/// Angle in degrees to `(radians, sin, cos)`.
#[macro_export]
macro_rules! radians_sin_cos {
    ($deg: expr) => {{
        let radians: f64 = $deg.to_radians();
        let (sin, cos) = radians.sin_cos();
        (radians, sin, cos)
    }};
}

/// Latitude within [-90, 90] degrees. NaN is out of range.
#[macro_export]
macro_rules! valid_latitude {
    ($lat: expr) => {
        (-90.0..=90.0).contains(&$lat)
    };
}

/// Radius the point mass kernels cannot use: zero, negative or NaN.
#[macro_export]
macro_rules! nonpositive_radius {
    ($r: expr) => {
        $r.is_nan() || $r <= 0.0
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_radians_sin_cos() {
        let (radians, sin, cos) = radians_sin_cos!(0.0f64);
        assert_eq!((radians, sin, cos), (0.0, 0.0, 1.0));

        let (radians, sin, cos) = radians_sin_cos!(-30.0f64);
        assert!((radians + std::f64::consts::FRAC_PI_6).abs() < 1e-15);
        assert!((sin + 0.5).abs() < 1e-15);
        assert!((cos - 3f64.sqrt() / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_valid_latitude() {
        assert!(valid_latitude!(90.0));
        assert!(valid_latitude!(-45.0));
        assert!(!valid_latitude!(90.5));
        assert!(!valid_latitude!(f64::NAN));
    }

    #[test]
    fn test_nonpositive_radius() {
        assert!(nonpositive_radius!(0.0f64));
        assert!(nonpositive_radius!(-1.0f64));
        assert!(nonpositive_radius!(f64::NAN));
        assert!(!nonpositive_radius!(6.371e6f64));
    }
}
