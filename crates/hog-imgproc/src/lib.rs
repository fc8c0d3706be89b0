#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image gradient module.
pub mod gradient;

/// histogram of oriented gradients module.
pub mod hog;

/// module containing parallelization utilities.
pub mod parallel;
