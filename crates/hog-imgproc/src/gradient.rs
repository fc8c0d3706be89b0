use std::f32::consts::TAU;

use hog_image::{Image, ImageSize};

use crate::hog::HogError;
use crate::parallel::{self, ExecutionStrategy};

/// Norm used to turn the horizontal and vertical differences into a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientNorm {
    /// `|gx| + |gy|`, cheaper and the default.
    #[default]
    L1,
    /// `sqrt(gx² + gy²)`.
    L2,
}

impl GradientNorm {
    /// Magnitude of the gradient `(gx, gy)` under this norm.
    #[inline]
    pub fn magnitude(self, gx: f32, gy: f32) -> f32 {
        match self {
            GradientNorm::L1 => gx.abs() + gy.abs(),
            GradientNorm::L2 => gx.hypot(gy),
        }
    }
}

/// Wrap the output of `atan2` into `[0, 2π)`.
#[inline]
pub(crate) fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // tiny negative angles round up to exactly 2π
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Per pixel gradient magnitude and orientation of a luminance image.
///
/// The field has the size of its source image. Forward differences have no successor pixel on the
/// last row and the last column, so those pixels are excluded: accessors report them as undefined
/// and their stored magnitude is zero.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientField {
    // channel 0: magnitude, channel 1: orientation in radians
    data: Image<f32, 2>,
}

impl GradientField {
    /// Size of the field, equal to the size of the luminance image.
    pub fn size(&self) -> ImageSize {
        self.data.size()
    }

    /// Size of the region where the gradient is defined.
    pub fn valid_size(&self) -> ImageSize {
        let size = self.size();
        ImageSize {
            width: size.width.saturating_sub(1),
            height: size.height.saturating_sub(1),
        }
    }

    /// Whether the gradient at `(x, y)` is defined.
    pub fn is_defined(&self, x: usize, y: usize) -> bool {
        let valid = self.valid_size();
        x < valid.width && y < valid.height
    }

    /// Gradient magnitude at `(x, y)`, or `None` outside the defined region.
    pub fn magnitude(&self, x: usize, y: usize) -> Option<f32> {
        self.is_defined(x, y)
            .then(|| self.data.get([y, x, 0]).copied())
            .flatten()
    }

    /// Gradient orientation at `(x, y)` in radians within `[0, 2π)`, or `None` outside the
    /// defined region.
    pub fn orientation(&self, x: usize, y: usize) -> Option<f32> {
        self.is_defined(x, y)
            .then(|| self.data.get([y, x, 1]).copied())
            .flatten()
    }

    /// Interleaved `(magnitude, orientation)` values of row `y`.
    pub(crate) fn row(&self, y: usize) -> &[f32] {
        let stride = 2 * self.data.cols();
        &self.data.as_slice()[y * stride..(y + 1) * stride]
    }

    /// The magnitude channel as a standalone image, boundary pixels included as zeros.
    pub fn magnitude_image(&self) -> Result<Image<f32, 1>, HogError> {
        Ok(self.data.channel(0)?)
    }
}

/// Compute the forward difference gradient field of a luminance image.
///
/// For every pixel `(x, y)` with `x < width - 1` and `y < height - 1`:
///
/// ```text
/// gx = L(x + 1, y) - L(x, y)
/// gy = L(x, y + 1) - L(x, y)
/// magnitude = norm(gx, gy)
/// orientation = atan2(gy, gx) in [0, 2π)
/// ```
///
/// # Arguments
///
/// * `src` - The luminance image.
/// * `norm` - The magnitude norm.
/// * `strategy` - How the rows are scheduled.
///
/// # Example
///
/// ```
/// use hog_image::Image;
/// use hog_imgproc::gradient::{compute_gradients, GradientNorm};
/// use hog_imgproc::parallel::ExecutionStrategy;
///
/// let luma = Image::<f32, 1>::new([2, 2].into(), vec![0.0, 3.0, 4.0, 0.0]).unwrap();
/// let field = compute_gradients(&luma, GradientNorm::L2, ExecutionStrategy::Serial).unwrap();
///
/// assert_eq!(field.magnitude(0, 0), Some(5.0));
/// assert_eq!(field.magnitude(1, 0), None);
/// ```
pub fn compute_gradients(
    src: &Image<f32, 1>,
    norm: GradientNorm,
    strategy: ExecutionStrategy,
) -> Result<GradientField, HogError> {
    let size = src.size();
    if size.is_empty() {
        return Err(HogError::InvalidInput(format!(
            "luminance image must not be empty, got {size}"
        )));
    }

    let (cols, rows) = (size.width, size.height);
    let luma = src.as_slice();
    let mut data = Image::<f32, 2>::from_size_val(size, 0.0)?;

    parallel::for_each_row_with(strategy, data.as_slice_mut(), 2 * cols, |r, dst_row| {
        if r + 1 >= rows {
            return;
        }
        let row = &luma[r * cols..(r + 1) * cols];
        let next_row = &luma[(r + 1) * cols..(r + 2) * cols];
        for c in 0..cols - 1 {
            let gx = row[c + 1] - row[c];
            let gy = next_row[c] - row[c];
            dst_row[2 * c] = norm.magnitude(gx, gy);
            dst_row[2 * c + 1] = wrap_angle(gy.atan2(gx));
        }
    })?;

    log::debug!("computed {norm:?} gradient field for {size}");

    Ok(GradientField { data })
}
