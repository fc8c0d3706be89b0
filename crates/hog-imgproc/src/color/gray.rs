use crate::hog::HogError;
use crate::parallel;
use hog_image::{Image, ImageError};

/// Define the RGB weights for the grayscale conversion.
const RW: f32 = 0.299;
const GW: f32 = 0.587;
const BW: f32 = 0.114;

#[inline]
fn luminance(pixel: &[u8]) -> f32 {
    RW * pixel[0] as f32 + GW * pixel[1] as f32 + BW * pixel[2] as f32
}

fn weighted_gray<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<f32, 1>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    // parallelize the grayscale conversion by rows
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = luminance(src_pixel);
    });

    Ok(())
}

/// Convert an RGB8 image to a floating point luminance image using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// The output values lie in [0, 255].
///
/// # Arguments
///
/// * `src` - The input RGB8 image.
/// * `dst` - The output luminance image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use hog_image::{Image, ImageSize};
/// use hog_imgproc::color::gray_from_rgb_u8;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![255, 255, 255, 0, 0, 0],
/// )
/// .unwrap();
///
/// let mut gray = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// gray_from_rgb_u8(&image, &mut gray).unwrap();
/// assert!((gray.as_slice()[0] - 255.0).abs() < 1e-3);
/// assert_eq!(gray.as_slice()[1], 0.0);
/// ```
pub fn gray_from_rgb_u8(src: &Image<u8, 3>, dst: &mut Image<f32, 1>) -> Result<(), ImageError> {
    weighted_gray(src, dst)
}

/// Convert an RGBA8 image to a floating point luminance image.
///
/// Uses the same weighting as [`gray_from_rgb_u8`]; the alpha channel is ignored.
pub fn gray_from_rgba_u8(src: &Image<u8, 4>, dst: &mut Image<f32, 1>) -> Result<(), ImageError> {
    weighted_gray(src, dst)
}

/// Allocate and compute the luminance image of an 8-bit L, RGB or RGBA image.
///
/// # Errors
///
/// Returns [`HogError::InvalidInput`] for an empty image or a channel count other than 1, 3 or 4.
pub fn to_grayscale<const C: usize>(src: &Image<u8, C>) -> Result<Image<f32, 1>, HogError> {
    if src.size().is_empty() {
        return Err(HogError::InvalidInput(format!(
            "image must not be empty, got {}",
            src.size()
        )));
    }

    let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

    match C {
        1 => parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
            dst_pixel[0] = src_pixel[0] as f32;
        }),
        3 | 4 => weighted_gray(src, &mut dst)?,
        _ => {
            return Err(HogError::InvalidInput(format!(
                "expected 1, 3 or 4 channels, got {C}"
            )))
        }
    }

    Ok(dst)
}
