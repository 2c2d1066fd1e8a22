//! Walk a rotation through every representation and report the round trips.

use clap::Parser;
use nalgebra::Vector3;
use so3kit::init_logger;
use so3kit::so3::{AxisAngleRep, QuaternionRep, RotationMatrixRep, RotationVectorRep};
use so3kit::{SO3AxisAngle, SO3Matrix, SO3Quaternion, SO3Vector, SO3};
use tracing::info;

#[derive(Parser)]
#[command(name = "rotation_demo")]
#[command(about = "Convert a rotation across SO(3) representations")]
struct Args {
    /// Rotation axis, not necessarily normalized
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [0.0, 0.0, 1.0])]
    axis: Vec<f64>,

    /// Rotation angle in radians
    #[arg(long, default_value_t = std::f64::consts::FRAC_PI_2)]
    angle: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let args = Args::parse();
    let axis = Vector3::new(args.axis[0], args.axis[1], args.axis[2]);

    let aa = SO3AxisAngle::from_axis_angle(axis, args.angle)?;
    info!("input:      {aa}");

    let matrix: SO3Matrix = aa.convert();
    let quat: SO3Quaternion = aa.convert();
    let vector: SO3Vector = aa.convert();
    info!("matrix:     {matrix}");
    info!("quaternion: {quat}");
    info!("vector:     {vector}");

    info!(
        "conversion hops: aa->vec {}, aa->quat {}, quat->vec {}",
        SO3::<AxisAngleRep>::conversion_path::<RotationVectorRep>().cost(),
        SO3::<AxisAngleRep>::conversion_path::<QuaternionRep>().cost(),
        SO3::<QuaternionRep>::conversion_path::<RotationVectorRep>().cost(),
    );

    let round_trip: SO3AxisAngle = vector.convert();
    info!("round trip: {round_trip}");

    let cancelled = &matrix * quat.inverse();
    info!(
        "compose with inverse is identity: {}",
        cancelled.is_approx(&SO3::<RotationMatrixRep>::identity(), 1e-12)
    );

    Ok(())
}
