use hog_image::{Image, ImageSize};
use hog_imgproc::gradient::{compute_gradients, GradientNorm};
use hog_imgproc::hog::{
    accumulate, assemble, extract_hog_features, extract_hog_features_with, BinWeighting,
    HogError, HogOptions,
};
use hog_imgproc::parallel::ExecutionStrategy;
use rand::{Rng, SeedableRng};

fn random_rgb(width: usize, height: usize, seed: u64) -> Image<u8, 3> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let data = (0..width * height * 3).map(|_| rng.random::<u8>()).collect();
    Image::new(ImageSize { width, height }, data).expect("valid rgb image")
}

fn vertical_edge() -> Image<u8, 1> {
    let data = (0..64)
        .map(|i| if i % 8 < 4 { 0 } else { 255 })
        .collect::<Vec<u8>>();
    Image::new([8, 8].into(), data).expect("valid edge image")
}

#[test]
fn test_descriptor_length() -> Result<(), HogError> {
    for (width, height, cell_size, num_bins) in
        [(17, 9, 4, 9), (8, 8, 8, 9), (33, 20, 5, 6), (3, 3, 4, 9), (10, 1, 1, 3)]
    {
        let image = random_rgb(width, height, 7);
        let features = extract_hog_features(&image, cell_size, 2, num_bins)?;
        let expected = (height / cell_size) * (width / cell_size) * num_bins;
        assert_eq!(
            features.len(),
            expected,
            "{width}x{height} cell {cell_size} bins {num_bins}"
        );
    }
    Ok(())
}

#[test]
fn test_magnitudes_non_negative() -> Result<(), HogError> {
    let image = random_rgb(40, 24, 42);
    for weighting in [BinWeighting::RectifiedCosine, BinWeighting::Nearest] {
        for norm in [GradientNorm::L1, GradientNorm::L2] {
            let options = HogOptions::new(6, 1, 9)
                .with_weighting(weighting)
                .with_norm(norm);
            let features = extract_hog_features_with(&image, &options)?;
            assert!(features.iter().all(|f| f.magnitude >= 0.0));
            assert!(features.iter().any(|f| f.magnitude > 0.0));
        }
    }
    Ok(())
}

#[test]
fn test_deterministic_across_runs_and_strategies() -> Result<(), HogError> {
    let image = random_rgb(64, 48, 3);
    let base = HogOptions::new(8, 4, 9);

    let reference = extract_hog_features_with(&image, &base.with_strategy(ExecutionStrategy::Serial))?;
    for strategy in [
        ExecutionStrategy::Serial,
        ExecutionStrategy::ParallelRows,
        ExecutionStrategy::Fixed(3),
    ] {
        let features = extract_hog_features_with(&image, &base.with_strategy(strategy))?;
        let bits = |v: &[hog_imgproc::hog::HogFeature]| {
            v.iter().map(|f| f.magnitude.to_bits()).collect::<Vec<_>>()
        };
        assert_eq!(features, reference, "{strategy:?}");
        assert_eq!(bits(&features), bits(&reference));
    }
    Ok(())
}

#[test]
fn test_uniform_image_is_all_zero() -> Result<(), HogError> {
    let image = Image::<u8, 4>::from_size_val([21, 13].into(), 99)?;
    let features = extract_hog_features(&image, 4, 1, 8)?;
    assert_eq!(features.len(), 3 * 5 * 8);
    assert!(features.iter().all(|f| f.magnitude == 0.0));
    Ok(())
}

#[test]
fn test_solid_8x8() -> Result<(), HogError> {
    let image = Image::<u8, 3>::from_size_val([8, 8].into(), 200)?;
    let features = extract_hog_features(&image, 8, 4, 9)?;
    assert_eq!(features.len(), 9);
    for (bin, feature) in features.iter().enumerate() {
        assert_eq!(
            (feature.cell_row, feature.cell_col, feature.orientation_bin),
            (0, 0, bin)
        );
        assert_eq!(feature.magnitude, 0.0);
    }
    Ok(())
}

#[test]
fn test_vertical_edge_8x8() -> Result<(), HogError> {
    let features = extract_hog_features(&vertical_edge(), 8, 4, 9)?;
    assert_eq!(features.len(), 9);

    // the edge between columns 3 and 4 yields gx = 255 on the 7 defined rows
    approx::assert_relative_eq!(features[0].magnitude, 7.0 * 255.0, epsilon = 1e-2);
    for feature in &features[1..] {
        assert!(feature.magnitude < features[0].magnitude);
    }
    // bins centered more than 90 degrees away from the gradient receive nothing
    for feature in &features[3..=6] {
        assert_eq!(feature.magnitude, 0.0);
    }
    // neighbours on both sides are symmetric
    approx::assert_relative_eq!(features[1].magnitude, features[8].magnitude, epsilon = 1e-2);
    approx::assert_relative_eq!(features[2].magnitude, features[7].magnitude, epsilon = 1e-2);
    Ok(())
}

#[test]
fn test_vertical_edge_nearest() -> Result<(), HogError> {
    let options = HogOptions::new(8, 4, 9).with_weighting(BinWeighting::Nearest);
    let features = extract_hog_features_with(&vertical_edge(), &options)?;
    assert_eq!(features[0].magnitude, 7.0 * 255.0);
    assert!(features[1..].iter().all(|f| f.magnitude == 0.0));
    Ok(())
}

#[test]
fn test_scaling_is_linear() -> Result<(), HogError> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let size = ImageSize {
        width: 16,
        height: 12,
    };
    let luma = Image::<f32, 1>::new(
        size,
        (0..size.area()).map(|_| rng.random_range(0.0f32..255.0)).collect(),
    )?;

    for k in [0.0f32, 0.5, 3.0] {
        let scaled = Image::<f32, 1>::new(size, luma.as_slice().iter().map(|v| v * k).collect())?;
        for norm in [GradientNorm::L1, GradientNorm::L2] {
            let field = compute_gradients(&luma, norm, ExecutionStrategy::Serial)?;
            let field_k = compute_gradients(&scaled, norm, ExecutionStrategy::Serial)?;
            let hist = accumulate(
                &field,
                4,
                9,
                BinWeighting::RectifiedCosine,
                ExecutionStrategy::Serial,
            )?;
            let hist_k = accumulate(
                &field_k,
                4,
                9,
                BinWeighting::RectifiedCosine,
                ExecutionStrategy::Serial,
            )?;

            for (a, b) in hist.as_slice().iter().zip(hist_k.as_slice()) {
                approx::assert_relative_eq!(a * k, *b, epsilon = 1e-2, max_relative = 1e-3);
            }
        }
    }
    Ok(())
}

#[test]
fn test_boundary_exclusion_2x2() -> Result<(), HogError> {
    // only pixel (0, 0) has a defined gradient, and it never looks at pixel (1, 1)
    let image = Image::<u8, 1>::new([2, 2].into(), vec![10, 10, 10, 250])?;
    let features = extract_hog_features(&image, 1, 1, 9)?;
    assert_eq!(features.len(), 2 * 2 * 9);
    assert!(features.iter().all(|f| f.magnitude == 0.0));

    // whatever the content, the last row and column stay empty
    let image = Image::<u8, 1>::new([2, 2].into(), vec![0, 200, 100, 30])?;
    let features = extract_hog_features(&image, 1, 1, 9)?;
    for feature in &features {
        if (feature.cell_row, feature.cell_col) != (0, 0) {
            assert_eq!(feature.magnitude, 0.0);
        }
    }
    assert!(features[..9].iter().any(|f| f.magnitude > 0.0));
    Ok(())
}

#[test]
fn test_trailing_pixels_are_ignored() -> Result<(), HogError> {
    // an edge inside the two remainder columns must not leak into any cell
    let mut data = vec![50u8; 10 * 8];
    for row in data.chunks_exact_mut(10) {
        row[9] = 255;
    }
    let image = Image::<u8, 1>::new([10, 8].into(), data)?;
    let features = extract_hog_features(&image, 4, 1, 9)?;
    assert_eq!(features.len(), 2 * 2 * 9);
    assert!(features.iter().all(|f| f.magnitude == 0.0));
    Ok(())
}

#[test]
fn test_rgb_and_luma_agree_on_gray_pixels() -> Result<(), HogError> {
    let values = (0..36).map(|v| (v * 7) as u8).collect::<Vec<_>>();
    let luma = Image::<u8, 1>::new([6, 6].into(), values.clone())?;
    let rgb = Image::<u8, 3>::new(
        [6, 6].into(),
        values.iter().flat_map(|&v| [v, v, v]).collect(),
    )?;

    let a = extract_hog_features(&luma, 3, 1, 4)?;
    let b = extract_hog_features(&rgb, 3, 1, 4)?;
    for (fa, fb) in a.iter().zip(b.iter()) {
        approx::assert_relative_eq!(fa.magnitude, fb.magnitude, epsilon = 1e-2);
    }
    Ok(())
}

#[test]
fn test_assemble_matches_histograms() -> Result<(), HogError> {
    let image = random_rgb(12, 12, 5);
    let luma = hog_imgproc::color::to_grayscale(&image)?;
    let field = compute_gradients(&luma, GradientNorm::L1, ExecutionStrategy::ParallelRows)?;
    let hist = accumulate(
        &field,
        4,
        5,
        BinWeighting::RectifiedCosine,
        ExecutionStrategy::ParallelRows,
    )?;

    for feature in assemble(&hist) {
        assert_eq!(
            Some(feature.magnitude),
            hist.get(feature.cell_row, feature.cell_col, feature.orientation_bin)
        );
    }
    Ok(())
}
