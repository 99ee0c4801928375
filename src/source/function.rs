//! Generators built from closures.

use super::Generator;
use crate::num::Integer;

/// A generator made of declared bounds and a closure.
///
/// The closure is trusted to stay within `[min, max]`; the converter
/// rejects samples that do not.
pub struct FnSource<I, F> {
    min: I,
    max: I,
    f: F,
}

impl<I, E, F> FnSource<I, F>
where
    I: Integer,
    F: FnMut() -> Result<I, E>,
{
    /// Creates a generator yielding values of `f` in `[min, max]`.
    pub fn new(min: I, max: I, f: F) -> Self {
        Self { min, max, f }
    }
}

impl<I, E, F> Generator for FnSource<I, F>
where
    I: Integer,
    F: FnMut() -> Result<I, E>,
{
    type Item = I;
    type Error = E;

    fn min(&self) -> I {
        self.min
    }

    fn max(&self) -> I {
        self.max
    }

    fn generate(&mut self) -> Result<I, E> {
        (self.f)()
    }
}

impl<I: std::fmt::Debug, F> std::fmt::Debug for FnSource<I, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSource")
            .field("min", &self.min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}
