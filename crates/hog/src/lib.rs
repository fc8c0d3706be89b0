#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use hog_image as image;

#[doc(inline)]
pub use hog_imgproc as imgproc;

#[doc(inline)]
pub use hog_io as io;

use std::path::Path;

use hog_imgproc::hog::{extract_hog_features_with, HogError, HogFeature, HogOptions};
use hog_io::{functional::GenericImage, IoError};

/// Errors of the file to descriptor pipeline.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The image could not be read or decoded.
    #[error("Image source error. {0}")]
    ImageSource(#[from] IoError),

    /// The feature extraction rejected the image or the options.
    #[error(transparent)]
    Hog(#[from] HogError),
}

/// Compute the HOG features of an already decoded image.
pub fn extract_hog_features_generic(
    image: &GenericImage,
    options: &HogOptions,
) -> Result<Vec<HogFeature>, HogError> {
    match image {
        GenericImage::L8(img) => extract_hog_features_with(img, options),
        GenericImage::Rgb8(img) => extract_hog_features_with(img, options),
        GenericImage::Rgba8(img) => extract_hog_features_with(img, options),
    }
}

/// Read an image file and compute its HOG features.
///
/// Decoding failures are returned as [`Error::ImageSource`] and the pipeline does not run.
pub fn extract_hog_features_from_path(
    file_path: impl AsRef<Path>,
    options: &HogOptions,
) -> Result<Vec<HogFeature>, Error> {
    let image = hog_io::functional::read_image_any(file_path)?;
    log::debug!(
        "read {} image with {} channels",
        image.size(),
        image.num_channels()
    );
    Ok(extract_hog_features_generic(&image, options)?)
}
