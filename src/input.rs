use anyhow::{bail, Context, Result};
use ndarray::{ArrayD, IxDyn};
use point_mass_gravity::{
    nonpositive_radius, valid_latitude, Dtype, ForwardParameters, PointMasses,
};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::cli::Args;

/// Runtime parameters gathered from the command line.
pub struct RunParameters {
    pub input_json: PathBuf,
    pub output_dir: PathBuf,
    pub field: String,
    pub dtype: Dtype,
    pub forward: ForwardParameters,
    pub threads: Option<usize>,
}

pub fn gather_program_arguments(args: Args) -> RunParameters {
    let mut forward =
        ForwardParameters::default().with_gravitational_constant(args.gravitational_constant);
    if args.si {
        forward = forward.in_si_units();
    }

    RunParameters {
        input_json: args.input,
        output_dir: args.out,
        field: args.field,
        dtype: args.dtype,
        forward,
        threads: args.threads,
    }
}

/// Observation points as read from the input file. Without `shape` the points form a flat
/// list, otherwise every array holding more than one value is reshaped to `shape`.
#[derive(Deserialize)]
pub struct ObservationGrid {
    pub longitude: Vec<f64>,
    pub latitude: Vec<f64>,
    pub radius: Vec<f64>,
    #[serde(default)]
    pub shape: Option<Vec<usize>>,
}

impl ObservationGrid {
    pub fn arrays(&self) -> Result<(ArrayD<f64>, ArrayD<f64>, ArrayD<f64>)> {
        Ok((
            self.to_array("longitude", &self.longitude)?,
            self.to_array("latitude", &self.latitude)?,
            self.to_array("radius", &self.radius)?,
        ))
    }

    fn to_array(&self, name: &str, values: &[f64]) -> Result<ArrayD<f64>> {
        match &self.shape {
            Some(shape) if values.len() != 1 => {
                let size: usize = shape.iter().product();
                if values.len() != size {
                    bail!(
                        "observation {} holds {} values, grid shape {:?} needs {}",
                        name,
                        values.len(),
                        shape,
                        size
                    );
                }
                Ok(ArrayD::from_shape_vec(IxDyn(shape), values.to_vec())?)
            }
            _ => Ok(ArrayD::from_shape_vec(IxDyn(&[values.len()]), values.to_vec())?),
        }
    }
}

#[derive(Deserialize)]
pub struct InitData {
    pub observations: ObservationGrid,
    pub point_masses: PointMasses,
}

/// Main entry point into the init sequence
///
/// ### Argument
/// * 'file' - The path of the input file containing observation points and point masses
///
/// ### Return
///      The observation grid and point masses, or the reason they could not be read.
///
pub fn parse_input(file: &Path) -> Result<InitData> {
    let init_data = read_object_from_file(file)
        .with_context(|| format!("failed to read input file {}", file.display()))?;

    warn_out_of_range(
        "observation",
        &init_data.observations.latitude,
        &init_data.observations.radius,
    );
    warn_out_of_range(
        "point mass",
        init_data.point_masses.latitude(),
        init_data.point_masses.radius(),
    );

    Ok(init_data)
}

/// Coordinates are not validated by the forward model, flag suspicious ones here.
fn warn_out_of_range(kind: &str, latitude: &[f64], radius: &[f64]) {
    let (bad_latitudes, bad_radii) = count_out_of_range(latitude, radius);
    if bad_latitudes > 0 {
        warn!(count = bad_latitudes, "{} latitudes outside [-90, 90] degrees", kind);
    }
    if bad_radii > 0 {
        warn!(count = bad_radii, "{} radii are not positive", kind);
    }
}

fn count_out_of_range(latitude: &[f64], radius: &[f64]) -> (usize, usize) {
    let bad_latitudes = latitude.iter().filter(|&&lat| !valid_latitude!(lat)).count();
    let bad_radii = radius.iter().filter(|&&r| nonpositive_radius!(r)).count();
    (bad_latitudes, bad_radii)
}

fn read_object_from_file<P: AsRef<Path>>(path: P) -> Result<InitData> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let init_data = serde_json::from_reader(reader)?;

    Ok(init_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grid() {
        let init_data: InitData = serde_json::from_str(
            r#"{
                "observations": {
                    "longitude": [0.0, 1.0, 2.0, 0.0, 1.0, 2.0],
                    "latitude": [0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
                    "radius": [6371000.0],
                    "shape": [2, 3]
                },
                "point_masses": {
                    "longitude": [1.0],
                    "latitude": [0.5],
                    "radius": [6300000.0],
                    "mass": [1e12]
                }
            }"#,
        )
        .unwrap();

        let (longitude, latitude, radius) = init_data.observations.arrays().unwrap();
        assert_eq!(longitude.shape(), &[2, 3]);
        assert_eq!(latitude.shape(), &[2, 3]);
        assert_eq!(radius.shape(), &[1]);
        assert_eq!(init_data.point_masses.len(), 1);
    }

    #[test]
    fn test_parse_grid_wrong_size() {
        let grid = ObservationGrid {
            longitude: vec![0.0; 5],
            latitude: vec![0.0],
            radius: vec![1.0],
            shape: Some(vec![2, 3]),
        };
        assert!(grid.arrays().is_err());
    }

    #[test]
    fn test_count_out_of_range() {
        let latitude = [0.0, 90.0, -90.0, 91.0, f64::NAN];
        let radius = [6.371e6, 0.0, -5.0, f64::NAN, 1.0];

        assert_eq!(count_out_of_range(&latitude, &radius), (2, 3));
    }

    #[test]
    fn test_flat_list() {
        let grid = ObservationGrid {
            longitude: vec![0.0; 4],
            latitude: vec![0.0; 4],
            radius: vec![1.0; 4],
            shape: None,
        };
        let (longitude, _, _) = grid.arrays().unwrap();
        assert_eq!(longitude.shape(), &[4]);
    }
}
