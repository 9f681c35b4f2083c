use anyhow::Result;
use ndarray::ArrayD;
use point_mass_gravity::{
    broadcast::{broadcast_flatten, broadcast_shapes},
    Coordinates,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FieldRecord {
    pub longitude: f64, // degrees
    pub latitude: f64,  // degrees
    pub radius: f64,    // meters
    pub value: f64,     // J/kg or mGal depending on the field
}

pub trait FieldOutput {
    fn write_out_record(&mut self, record: FieldRecord) -> Result<()>;

    fn finish(&mut self) -> Result<()>;
}

pub mod csv_output {
    use super::{FieldOutput, FieldRecord};
    use anyhow::{Context, Result};
    use std::fs;
    use std::path::{Path, PathBuf};

    pub struct CsvController {
        path: PathBuf,
        field_writer: csv::Writer<fs::File>,
    }

    impl CsvController {
        /// Create a csv file for `field` inside a new timestamped directory of `dir_filepath`.
        pub fn new(dir_filepath: &Path, field: &str) -> Result<Self> {
            let sub_dirpath = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
            let full_dirpath = dir_filepath.join(sub_dirpath);
            fs::create_dir_all(&full_dirpath).with_context(|| {
                format!("cannot create output directory {}", full_dirpath.display())
            })?;

            let path = full_dirpath.join(format!("pmgrav_{}.csv", field));
            let mut field_writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            field_writer.write_record(["longitude", "latitude", "radius", field])?;

            Ok(CsvController { path, field_writer })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl FieldOutput for CsvController {
        fn write_out_record(&mut self, record: FieldRecord) -> Result<()> {
            self.field_writer
                .serialize(record)
                .context("failed to write a field value to the csv file")
        }

        fn finish(&mut self) -> Result<()> {
            self.field_writer.flush()?;
            Ok(())
        }
    }
}

/// Write one record per observation point. `values` must have the broadcast shape of the
/// observation coordinates.
pub fn write_out_field(
    coordinates: &Coordinates<'_>,
    values: &ArrayD<f64>,
    output_controller: &mut dyn FieldOutput,
) -> Result<()> {
    let shape = broadcast_shapes(&[
        coordinates.longitude.shape(),
        coordinates.latitude.shape(),
        coordinates.radius.shape(),
    ])?;
    let longitude = broadcast_flatten(&coordinates.longitude, &shape)?;
    let latitude = broadcast_flatten(&coordinates.latitude, &shape)?;
    let radius = broadcast_flatten(&coordinates.radius, &shape)?;

    for (((&longitude, &latitude), &radius), &value) in longitude
        .iter()
        .zip(&latitude)
        .zip(&radius)
        .zip(values.iter())
    {
        output_controller.write_out_record(FieldRecord {
            longitude,
            latitude,
            radius,
            value,
        })?;
    }

    output_controller.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryOutput {
        records: Vec<FieldRecord>,
        finished: bool,
    }

    impl FieldOutput for MemoryOutput {
        fn write_out_record(&mut self, record: FieldRecord) -> Result<()> {
            self.records.push(record);
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn test_write_out_broadcast_coordinates() {
        let coordinates = Coordinates::from_slices(&[10.0, 20.0], &[5.0, 6.0], &[100.0]);
        let values = ArrayD::from_shape_vec(ndarray::IxDyn(&[2]), vec![1.5, 2.5]).unwrap();
        let mut output = MemoryOutput::default();

        write_out_field(&coordinates, &values, &mut output).unwrap();

        assert!(output.finished);
        assert_eq!(output.records.len(), 2);
        assert_eq!(output.records[1].longitude, 20.0);
        assert_eq!(output.records[1].radius, 100.0);
        assert_eq!(output.records[1].value, 2.5);
    }
}
