use std::path::Path;

use hog_image::{Image, ImageSize};

use crate::error::IoError;

/// A decoded 8-bit image with the channel layouts the feature pipeline accepts.
#[derive(Clone, Debug)]
pub enum GenericImage {
    /// 8-bit grayscale image
    L8(Image<u8, 1>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
    /// 8-bit RGB image with alpha channel
    Rgba8(Image<u8, 4>),
}

impl GenericImage {
    /// Size of the decoded image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            GenericImage::L8(img) => img.size(),
            GenericImage::Rgb8(img) => img.size(),
            GenericImage::Rgba8(img) => img.size(),
        }
    }

    /// Number of channels of the decoded image.
    pub fn num_channels(&self) -> usize {
        match self {
            GenericImage::L8(_) => 1,
            GenericImage::Rgb8(_) => 3,
            GenericImage::Rgba8(_) => 4,
        }
    }
}

/// Reads an image from the given file path.
///
/// The method reads any image format supported by the image crate. Grayscale images are returned
/// as [`GenericImage::L8`], color images as [`GenericImage::Rgb8`] or [`GenericImage::Rgba8`]
/// depending on whether they carry alpha. Deeper bit depths are converted to 8 bits.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Errors
///
/// * [`IoError::FileDoesNotExist`] if nothing exists at `file_path`.
/// * [`IoError::ImageDecodeError`] if the format is unknown or the data is corrupted.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<GenericImage, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(&file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    // decode the data directly from memory
    let img = image::ImageReader::new(std::io::Cursor::new(&mmap[..]))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!(
        "decoded {} as {:?} ({size})",
        file_path.display(),
        img.color()
    );

    let image = match img.color() {
        image::ColorType::L8
        | image::ColorType::La8
        | image::ColorType::L16
        | image::ColorType::La16 => {
            GenericImage::L8(Image::new(size, img.into_luma8().into_raw())?)
        }
        image::ColorType::Rgb8 | image::ColorType::Rgb16 | image::ColorType::Rgb32F => {
            GenericImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?)
        }
        _ => GenericImage::Rgba8(Image::new(size, img.into_rgba8().into_raw())?),
    };

    Ok(image)
}
