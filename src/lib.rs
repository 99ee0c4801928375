//! Entropy Conversion Library
//!
//! Converts a stream of uniformly distributed integers in one range into
//! uniformly distributed integers in any other range, discarding close to
//! the theoretical minimum of input entropy. Intended for callers that need
//! unbiased integers or permutations from a costly or rate-limited source
//! such as a hardware entropy device.
//!
//! # Architecture
//!
//! ```text
//! generator → converter (validate → narrow ⟲ refill) → output
//!                 ↓
//!          analysis (entropy accounting) → metrics
//! ```
//!
//! # Design Principles
//!
//! - **No bias**: rejected samples are recycled, never folded by modulo
//! - **No waste**: leftover entropy stays buffered for the next call
//! - **All-or-nothing**: a failed call leaves the converter unchanged
//! - **No duplication**: converters are not `Clone`; entropy only moves
//! - **No cryptographic claims**: output is exactly as good as the input
//!
//! # Example
//!
//! ```
//! use entropy_converter::{EntropyConverter, RngSource};
//!
//! let mut converter = EntropyConverter::<u64>::new();
//! let mut device = RngSource::from_os_entropy();
//!
//! // Roll a die
//! let mut d6 = converter.make_uniform(1, 6);
//! let roll = d6.sample(&mut device).unwrap();
//! assert!((1..=6).contains(&roll));
//!
//! // Shuffle a deck
//! let mut deck: Vec<u32> = (0..52).collect();
//! converter.shuffle(&mut deck, &mut device).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod converter;
pub mod metrics;
pub mod num;
pub mod source;

// Re-export commonly used types at crate root
pub use analysis::Measurement;
pub use converter::{ConvertError, EntropyConverter, Uniform};
pub use num::{Integer, Word};
pub use source::{Counting, FnSource, Generator, RngSource};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
