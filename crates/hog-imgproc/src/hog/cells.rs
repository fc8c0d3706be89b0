use std::f32::consts::TAU;

use hog_image::ImageSize;

use crate::gradient::GradientField;
use crate::parallel::{self, ExecutionStrategy};

use super::{BinWeighting, HogError};

/// Center of orientation bin `bin` in radians.
///
/// The `num_bins` bins split `[0, 2π)` evenly, bin `o` being centered at `o * 2π / num_bins`.
pub fn bin_center(bin: usize, num_bins: usize) -> f32 {
    bin as f32 * TAU / num_bins as f32
}

/// Number of `(rows, cols)` of whole cells that fit in an image; remainders are dropped.
pub fn cell_grid(size: ImageSize, cell_size: usize) -> (usize, usize) {
    if cell_size == 0 {
        return (0, 0);
    }
    (size.height / cell_size, size.width / cell_size)
}

/// Orientation histograms of every cell of an image.
///
/// Dense storage of `cell_rows * cell_cols * num_bins` values, indexed by cell row, cell column
/// and bin, in that order.
#[derive(Clone, Debug, PartialEq)]
pub struct CellHistograms {
    cell_rows: usize,
    cell_cols: usize,
    num_bins: usize,
    data: Vec<f32>,
}

impl CellHistograms {
    /// Number of cell rows.
    pub fn cell_rows(&self) -> usize {
        self.cell_rows
    }

    /// Number of cell columns.
    pub fn cell_cols(&self) -> usize {
        self.cell_cols
    }

    /// Number of orientation bins per cell.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Total number of histogram entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid holds no cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All entries in `(cell row, cell column, bin)` order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Histogram of the cell at `(cell_row, cell_col)`.
    pub fn histogram(&self, cell_row: usize, cell_col: usize) -> Option<&[f32]> {
        if cell_row >= self.cell_rows || cell_col >= self.cell_cols {
            return None;
        }
        let start = (cell_row * self.cell_cols + cell_col) * self.num_bins;
        Some(&self.data[start..start + self.num_bins])
    }

    /// Value of bin `bin` of the cell at `(cell_row, cell_col)`.
    pub fn get(&self, cell_row: usize, cell_col: usize, bin: usize) -> Option<f32> {
        self.histogram(cell_row, cell_col)?.get(bin).copied()
    }
}

/// Accumulate the gradient field into per cell orientation histograms.
///
/// The field is tiled into `floor(height / cell_size) x floor(width / cell_size)` cells. Pixels
/// past the last whole cell are ignored, and the undefined last row and column of the field
/// contribute nothing. Every cell row is reduced independently into its own slice of the output.
///
/// # Arguments
///
/// * `field` - The gradient field.
/// * `cell_size` - Width and height of a cell in pixels.
/// * `num_bins` - Number of orientation bins.
/// * `weighting` - Distribution of a pixel magnitude among bins.
/// * `strategy` - How cell rows are scheduled.
///
/// # Errors
///
/// Returns [`HogError::InvalidParameter`] if `cell_size` or `num_bins` is zero.
pub fn accumulate(
    field: &GradientField,
    cell_size: usize,
    num_bins: usize,
    weighting: BinWeighting,
    strategy: ExecutionStrategy,
) -> Result<CellHistograms, HogError> {
    if cell_size == 0 {
        return Err(HogError::InvalidParameter {
            name: "cell_size",
            value: cell_size,
        });
    }
    if num_bins == 0 {
        return Err(HogError::InvalidParameter {
            name: "num_bins",
            value: num_bins,
        });
    }

    let (cell_rows, cell_cols) = cell_grid(field.size(), cell_size);
    let mut data = vec![0.0f32; cell_rows * cell_cols * num_bins];

    if data.is_empty() {
        return Ok(CellHistograms {
            cell_rows,
            cell_cols,
            num_bins,
            data,
        });
    }

    // (cos, sin) of every bin center
    let centers = (0..num_bins)
        .map(|o| {
            let (sin, cos) = bin_center(o, num_bins).sin_cos();
            (cos, sin)
        })
        .collect::<Vec<_>>();
    let bin_width = TAU / num_bins as f32;

    parallel::for_each_row_with(strategy, &mut data, cell_cols * num_bins, |cell_row, hist_row| {
        for y in cell_row * cell_size..(cell_row + 1) * cell_size {
            if !field.is_defined(0, y) {
                break;
            }
            let row = field.row(y);
            for x in 0..cell_cols * cell_size {
                let (magnitude, angle) = (row[2 * x], row[2 * x + 1]);
                if magnitude == 0.0 {
                    continue;
                }
                let cell_col = x / cell_size;
                let hist = &mut hist_row[cell_col * num_bins..(cell_col + 1) * num_bins];

                match weighting {
                    BinWeighting::RectifiedCosine => {
                        let (sin, cos) = angle.sin_cos();
                        for (h, (center_cos, center_sin)) in hist.iter_mut().zip(centers.iter()) {
                            // cos(angle - center)
                            let weight = cos * center_cos + sin * center_sin;
                            if weight > 0.0 {
                                *h += magnitude * weight;
                            }
                        }
                    }
                    BinWeighting::Nearest => {
                        let bin = (angle / bin_width).round() as usize % num_bins;
                        hist[bin] += magnitude;
                    }
                }
            }
        }
    })?;

    log::debug!(
        "accumulated {cell_rows}x{cell_cols} cells with {num_bins} bins ({weighting:?})"
    );

    Ok(CellHistograms {
        cell_rows,
        cell_cols,
        num_bins,
        data,
    })
}
