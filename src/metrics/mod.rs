//! Prometheus metrics for entropy accounting.
//!
//! # Metrics Exposed
//!
//! - `entropy_converter_conversions_total` - Conversions performed
//! - `entropy_converter_input_bits` - Entropy consumed, net of buffered
//! - `entropy_converter_output_bits` - Entropy delivered
//! - `entropy_converter_loss_bits` - Entropy discarded
//! - `entropy_converter_loss_bound_bits` - Bound on expected discarded entropy
//! - `entropy_converter_buffered_bits` - Entropy held by the converter
//!
//! # Example
//!
//! ```
//! use entropy_converter::analysis::measure_fixed_target;
//! use entropy_converter::metrics::{MetricsRegistry, MetricsSnapshot};
//! use entropy_converter::RngSource;
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! let measurement = measure_fixed_target::<u64, _>(RngSource::seeded(1), 6, 100).unwrap();
//!
//! registry.update(&MetricsSnapshot::from(&measurement));
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};
