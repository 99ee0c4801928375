//! Uniform integer generators consumed by the converter.
//!
//! A [`Generator`] declares the closed range its samples are drawn from and
//! may fail on any draw. The converter never inspects a generator beyond
//! these three operations.

mod counting;
mod function;
mod rng;

pub use counting::Counting;
pub use function::FnSource;
pub use rng::RngSource;

use crate::num::Integer;

/// A source of uniform random integers in `[min(), max()]`.
pub trait Generator {
    /// Sample type.
    type Item: Integer;
    /// Failure type, passed through the converter unchanged.
    type Error;

    /// Smallest value `generate` can return.
    fn min(&self) -> Self::Item;

    /// Largest value `generate` can return.
    fn max(&self) -> Self::Item;

    /// Draws one sample.
    fn generate(&mut self) -> Result<Self::Item, Self::Error>;
}

impl<G: Generator + ?Sized> Generator for &mut G {
    type Item = G::Item;
    type Error = G::Error;

    fn min(&self) -> Self::Item {
        (**self).min()
    }

    fn max(&self) -> Self::Item {
        (**self).max()
    }

    fn generate(&mut self) -> Result<Self::Item, Self::Error> {
        (**self).generate()
    }
}
