//! Entropy accounting.
//!
//! Bounds on the entropy a conversion can waste, and measurement routines
//! that compare a converter's actual consumption against them. These are
//! diagnostics; the converter itself never consults them.

pub mod bounds;
mod measure;

pub use bounds::{
    binary_entropy, expected_entropy_loss, max_entropy_loss, max_shuffle_loss, min_efficiency,
    shuffle_efficiency, shuffle_output_entropy,
};
pub use measure::{
    measure_conversion, measure_fixed_target, measure_random_targets, measure_shuffle, Measurement,
};
