use crate::gradient::GradientNorm;
use crate::parallel::ExecutionStrategy;

use super::HogError;

/// How a pixel's gradient magnitude is shared among the orientation bins of its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinWeighting {
    /// Every bin receives `magnitude * max(0, cos(angle - bin_center))`.
    #[default]
    RectifiedCosine,
    /// The bin whose center is closest to the gradient angle receives the full magnitude.
    Nearest,
}

/// Parameters of the HOG descriptor.
///
/// # Example
///
/// ```
/// use hog_imgproc::hog::{BinWeighting, HogOptions};
///
/// let options = HogOptions::default()
///     .with_cell_size(4)
///     .with_num_bins(12)
///     .with_weighting(BinWeighting::Nearest);
///
/// assert_eq!(options.cell_size, 4);
/// assert_eq!(options.block_stride, 4);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HogOptions {
    /// Width and height of a cell in pixels.
    pub cell_size: usize,
    /// Offset between blocks in cells.
    ///
    /// Reserved for block normalization, see [`super::block_normalize`]. It is validated but
    /// does not change the output of [`super::extract_hog_features_with`].
    pub block_stride: usize,
    /// Number of orientation bins spanning `[0, 2π)`.
    pub num_bins: usize,
    /// Gradient magnitude norm.
    pub norm: GradientNorm,
    /// Distribution of magnitudes among bins.
    pub weighting: BinWeighting,
    /// Scheduling of the row-wise stages.
    pub strategy: ExecutionStrategy,
}

impl Default for HogOptions {
    fn default() -> Self {
        Self {
            cell_size: 8,
            block_stride: 4,
            num_bins: 9,
            norm: GradientNorm::default(),
            weighting: BinWeighting::default(),
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl HogOptions {
    /// Create options with the given cell size, block stride and number of bins.
    pub fn new(cell_size: usize, block_stride: usize, num_bins: usize) -> Self {
        Self {
            cell_size,
            block_stride,
            num_bins,
            ..Default::default()
        }
    }

    /// Set the cell size.
    pub fn with_cell_size(mut self, cell_size: usize) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the block stride.
    pub fn with_block_stride(mut self, block_stride: usize) -> Self {
        self.block_stride = block_stride;
        self
    }

    /// Set the number of orientation bins.
    pub fn with_num_bins(mut self, num_bins: usize) -> Self {
        self.num_bins = num_bins;
        self
    }

    /// Set the gradient magnitude norm.
    pub fn with_norm(mut self, norm: GradientNorm) -> Self {
        self.norm = norm;
        self
    }

    /// Set the bin weighting.
    pub fn with_weighting(mut self, weighting: BinWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check that every parameter is positive.
    pub fn validate(&self) -> Result<(), HogError> {
        let params = [
            ("cell_size", self.cell_size),
            ("block_stride", self.block_stride),
            ("num_bins", self.num_bins),
        ];
        for (name, value) in params {
            if value == 0 {
                return Err(HogError::InvalidParameter { name, value });
            }
        }

        if let ExecutionStrategy::Fixed(0) = self.strategy {
            return Err(HogError::InvalidParameter {
                name: "num_threads",
                value: 0,
            });
        }

        Ok(())
    }
}
