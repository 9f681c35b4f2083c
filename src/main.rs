//!
//! pmgrav - forward model the gravity field of point masses on a geocentric grid
//!

use anyhow::{Context, Result};
use ndarray::ArrayD;
use point_mass_gravity::{compute_gravity, Coordinates, Dtype, Field};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod input;
mod output;

mod cli {
    use clap::Parser;
    use point_mass_gravity::{Dtype, GRAVITATIONAL_CONST};
    use std::path::PathBuf;

    /// Defines the argument structure for the pmgrav program
    #[derive(Parser, Debug)]
    #[command(
        name = "pmgrav",
        version,
        about = "Compute the gravitational potential or radial acceleration of point masses \
                 on observation points in geocentric spherical coordinates."
    )]
    pub struct Args {
        /// json file containing the observation points and the point masses.
        #[arg(value_name = "INPUT")]
        pub input: PathBuf,

        /// Directory receiving the timestamped output directory
        #[arg(short, long, value_name = "DIR_NAME", default_value = ".")]
        pub out: PathBuf,

        /// Field to compute: potential or g_radial
        #[arg(short, long, default_value = "g_radial")]
        pub field: String,

        /// Precision of the computation buffer: float64 or float32
        #[arg(long, default_value_t = Dtype::Float64)]
        pub dtype: Dtype,

        /// Gravitational constant in m^3 kg^-1 s^-2
        #[arg(short = 'G', long, default_value_t = GRAVITATIONAL_CONST)]
        pub gravitational_constant: f64,

        /// Report g_radial in m/s^2 instead of mGal
        #[arg(long)]
        pub si: bool,

        /// Number of worker threads, defaults to one per core
        #[arg(short = 'j', long)]
        pub threads: Option<usize>,

        /// Log debug information
        #[arg(short, long)]
        pub verbose: bool,
    }

    /// Returns the result of user arguments passed over the cli
    pub fn check_cli() -> Args {
        Args::parse()
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<()> {
    let args = cli::check_cli();
    init_tracing(args.verbose);
    let run_params = input::gather_program_arguments(args);

    if let Some(threads) = run_params.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to build the worker thread pool")?;
    }

    let init_data = input::parse_input(&run_params.input_json)?;
    let (longitude, latitude, radius) = init_data.observations.arrays()?;
    let coordinates = Coordinates::new(longitude.view(), latitude.view(), radius.view());

    let values: ArrayD<f64> = match run_params.dtype {
        Dtype::Float64 => compute_gravity::<f64>(
            &coordinates,
            &init_data.point_masses,
            &run_params.field,
            &run_params.forward,
        )?,
        Dtype::Float32 => compute_gravity::<f32>(
            &coordinates,
            &init_data.point_masses,
            &run_params.field,
            &run_params.forward,
        )?
        .mapv(f64::from),
    };

    let field = Field::from_name(&run_params.field)?;
    let units = if run_params.forward.si_units && field == Field::GRadial {
        "m/s^2"
    } else {
        field.units()
    };
    info!(
        field = %field,
        units,
        shape = ?values.shape(),
        point_masses = init_data.point_masses.len(),
        "computed gravity field"
    );

    let mut output_controller =
        output::csv_output::CsvController::new(&run_params.output_dir, &run_params.field)?;
    output::write_out_field(&coordinates, &values, &mut output_controller)?;
    info!(path = %output_controller.path().display(), "wrote field values");

    Ok(())
}
