//! Histogram of oriented gradients (HOG) descriptors.
//!
//! The pipeline reduces an image to luminance, computes forward difference gradients, accumulates
//! the gradient magnitudes of each cell into orientation histograms and flattens them into a fixed
//! length sequence of [`HogFeature`].

use hog_image::{Image, ImageError};

use crate::color;
use crate::gradient::compute_gradients;
use crate::parallel::ParallelError;

mod block;
pub use block::block_normalize;

mod cells;
pub use cells::{accumulate, bin_center, cell_grid, CellHistograms};

mod options;
pub use options::{BinWeighting, HogOptions};

/// An error type for the HOG pipeline.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum HogError {
    /// The input image cannot be processed.
    #[error("Invalid input image: {0}")]
    InvalidInput(String),

    /// A parameter is out of its valid range.
    #[error("Invalid parameter `{name}`: {value}")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// Rejected value.
        value: usize,
    },

    /// Error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error while scheduling parallel work.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

/// The accumulated gradient magnitude of one orientation bin of one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HogFeature {
    /// Row of the cell in the cell grid.
    pub cell_row: usize,
    /// Column of the cell in the cell grid.
    pub cell_col: usize,
    /// Orientation bin index.
    pub orientation_bin: usize,
    /// Accumulated magnitude, never negative.
    pub magnitude: f32,
}

/// Flatten cell histograms into features ordered by cell row, cell column and bin.
///
/// Zero entries are kept, so the output always holds `cell_rows * cell_cols * num_bins` features.
pub fn assemble(histograms: &CellHistograms) -> Vec<HogFeature> {
    let num_bins = histograms.num_bins();
    let cell_cols = histograms.cell_cols();

    histograms
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, &magnitude)| {
            let cell = i / num_bins;
            HogFeature {
                cell_row: cell / cell_cols,
                cell_col: cell % cell_cols,
                orientation_bin: i % num_bins,
                magnitude,
            }
        })
        .collect()
}

/// Compute the HOG features of an 8-bit L, RGB or RGBA image with default options.
///
/// `block_stride` is reserved for block normalization and must be positive, but it does not
/// affect the result.
///
/// # Arguments
///
/// * `image` - The input image.
/// * `cell_size` - Width and height of a cell in pixels.
/// * `block_stride` - Offset between blocks in cells.
/// * `num_bins` - Number of orientation bins.
///
/// # Example
///
/// ```
/// use hog_image::Image;
/// use hog_imgproc::hog::extract_hog_features;
///
/// let image = Image::<u8, 3>::from_size_val([8, 8].into(), 128).unwrap();
/// let features = extract_hog_features(&image, 8, 4, 9).unwrap();
///
/// assert_eq!(features.len(), 9);
/// assert!(features.iter().all(|f| f.magnitude == 0.0));
/// ```
pub fn extract_hog_features<const C: usize>(
    image: &Image<u8, C>,
    cell_size: usize,
    block_stride: usize,
    num_bins: usize,
) -> Result<Vec<HogFeature>, HogError> {
    extract_hog_features_with(image, &HogOptions::new(cell_size, block_stride, num_bins))
}

/// Compute the HOG features of an 8-bit L, RGB or RGBA image.
///
/// # Errors
///
/// * [`HogError::InvalidInput`] if the image is empty or its channel count is not 1, 3 or 4.
/// * [`HogError::InvalidParameter`] if an option is zero.
///
/// Both are detected before any stage runs.
pub fn extract_hog_features_with<const C: usize>(
    image: &Image<u8, C>,
    options: &HogOptions,
) -> Result<Vec<HogFeature>, HogError> {
    if image.size().is_empty() {
        return Err(HogError::InvalidInput(format!(
            "image must not be empty, got {}",
            image.size()
        )));
    }
    options.validate()?;

    let start = std::time::Instant::now();

    let (cell_rows, cell_cols) = cell_grid(image.size(), options.cell_size);
    if image.width() % options.cell_size != 0 || image.height() % options.cell_size != 0 {
        log::warn!(
            "{} is not a multiple of the cell size {}, trailing pixels are ignored",
            image.size(),
            options.cell_size
        );
    }

    let luma = color::to_grayscale(image)?;
    let field = compute_gradients(&luma, options.norm, options.strategy)?;
    let histograms = accumulate(
        &field,
        options.cell_size,
        options.num_bins,
        options.weighting,
        options.strategy,
    )?;
    let features = assemble(&histograms);

    log::debug!(
        "extracted {} features from {cell_rows}x{cell_cols} cells in {:?}",
        features.len(),
        start.elapsed()
    );

    Ok(features)
}
