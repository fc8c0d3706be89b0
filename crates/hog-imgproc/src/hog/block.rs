use super::{CellHistograms, HogError};

/// Number of blocks of `block_side` cells, staggered by `block_stride`, covering `num_cells`.
fn num_blocks(num_cells: usize, block_side: usize, block_stride: usize) -> usize {
    (num_cells - block_side) / block_stride + 1
}

/// Group cell histograms into overlapping blocks and scale every block to unit L2 norm.
///
/// Blocks are `block_side x block_side` cells, and the top-left cells of consecutive blocks are
/// `block_stride` cells apart. The output holds one block after the other in row-major block
/// order; inside a block, cells are row-major and each cell contributes its `num_bins` values.
/// A block whose norm is zero stays zero.
///
/// # Arguments
///
/// * `histograms` - The cell histograms.
/// * `block_side` - Width and height of a block in cells.
/// * `block_stride` - Offset between blocks in cells.
///
/// # Errors
///
/// Returns [`HogError::InvalidParameter`] if `block_side` or `block_stride` is zero, or if a
/// block does not fit in the cell grid.
pub fn block_normalize(
    histograms: &CellHistograms,
    block_side: usize,
    block_stride: usize,
) -> Result<Vec<f32>, HogError> {
    if block_side == 0 || block_side > histograms.cell_rows().min(histograms.cell_cols()) {
        return Err(HogError::InvalidParameter {
            name: "block_side",
            value: block_side,
        });
    }
    if block_stride == 0 {
        return Err(HogError::InvalidParameter {
            name: "block_stride",
            value: block_stride,
        });
    }

    let num_bins = histograms.num_bins();
    let blocks_high = num_blocks(histograms.cell_rows(), block_side, block_stride);
    let blocks_wide = num_blocks(histograms.cell_cols(), block_side, block_stride);
    let block_len = block_side * block_side * num_bins;

    let mut descriptor = Vec::with_capacity(blocks_high * blocks_wide * block_len);

    for by in 0..blocks_high {
        for bx in 0..blocks_wide {
            let start = descriptor.len();
            for iy in 0..block_side {
                for ix in 0..block_side {
                    let cell = histograms
                        .histogram(by * block_stride + iy, bx * block_stride + ix)
                        .ok_or(HogError::InvalidParameter {
                            name: "block_side",
                            value: block_side,
                        })?;
                    descriptor.extend_from_slice(cell);
                }
            }

            let block = &mut descriptor[start..];
            let norm = block.iter().map(|v| v * v).sum::<f32>().sqrt();
            if norm > 0.0 {
                block.iter_mut().for_each(|v| *v /= norm);
            }
        }
    }

    log::debug!(
        "normalized {blocks_high}x{blocks_wide} blocks of {block_side}x{block_side} cells"
    );

    Ok(descriptor)
}
