use argh::FromArgs;
use std::path::PathBuf;

use hog::imgproc::{
    gradient::GradientNorm,
    hog::{BinWeighting, HogOptions},
    parallel::ExecutionStrategy,
};

#[derive(FromArgs)]
/// Compute the histogram of oriented gradients descriptor of an image.
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// width and height of a cell in pixels
    #[argh(option, default = "8")]
    cell_size: usize,

    /// offset between blocks in cells, reserved for block normalization
    #[argh(option, default = "4")]
    block_stride: usize,

    /// number of orientation bins
    #[argh(option, default = "9")]
    num_bins: usize,

    /// use the L2 gradient magnitude instead of L1
    #[argh(switch)]
    l2: bool,

    /// vote into the nearest bin only
    #[argh(switch)]
    nearest: bool,

    /// run on the calling thread only
    #[argh(switch)]
    serial: bool,

    /// print the features as a json array
    #[argh(switch)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let options = HogOptions::new(args.cell_size, args.block_stride, args.num_bins)
        .with_norm(if args.l2 {
            GradientNorm::L2
        } else {
            GradientNorm::L1
        })
        .with_weighting(if args.nearest {
            BinWeighting::Nearest
        } else {
            BinWeighting::RectifiedCosine
        })
        .with_strategy(if args.serial {
            ExecutionStrategy::Serial
        } else {
            ExecutionStrategy::ParallelRows
        });

    log::info!("extracting features of {:?} with {:?}", args.image_path, options);

    let features = hog::extract_hog_features_from_path(&args.image_path, &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&features)?);
    } else {
        for f in &features {
            println!(
                "cell ({}, {}) bin {}: {}",
                f.cell_row, f.cell_col, f.orientation_bin, f.magnitude
            );
        }
    }

    log::info!("extracted {} features", features.len());

    Ok(())
}
