//! The narrowing engine.
//!
//! Maps the buffered uniform value onto a uniform value in `[0, target)`
//! without bias and with almost no loss of entropy:
//!
//! 1. Refill: multiply raw samples into the interval until `range` reaches
//!    `limit / source_range`. Buffering as much as possible up-front makes
//!    the rejection below rare.
//! 2. Let `cut` be the largest multiple of `target` not above `range`.
//! 3. If `value < cut`, emit `value % target` and keep `value / target`,
//!    uniform in `[0, cut / target)`, for the next call.
//! 4. Otherwise `value - cut` is uniform in `[0, range - cut)`. Keep it and
//!    go back to 1. Nothing is read from the source by this step.

use super::error::ConvertError;
use super::state::Interval;
use crate::num::Word;

/// Produces one uniform value in `[0, target)`.
///
/// `source` yields raw samples in `[0, source_range)`. Errors from `source`
/// are returned as-is; the caller is responsible for discarding `state` on
/// failure.
pub(crate) fn narrow<T, E, S>(
    state: &mut Interval<T>,
    target: T,
    source_range: T,
    limit: T,
    mut source: S,
) -> Result<T, ConvertError<E>>
where
    T: Word,
    S: FnMut() -> Result<T, ConvertError<E>>,
{
    if target.is_zero() {
        return Err(ConvertError::InvalidOutputRange);
    }
    if source_range <= T::one() {
        return Err(ConvertError::InvalidInputRange);
    }

    let ceiling = limit / source_range;
    if target > ceiling {
        return Err(ConvertError::RangeTooLarge);
    }

    let mut samples = 0u32;
    let mut recycled = 0u32;
    loop {
        let refilled_from = samples;
        // value < range < ceiling, so neither product can exceed limit.
        while state.range < ceiling {
            let s = source()?;
            if s >= source_range {
                return Err(ConvertError::SourceOutOfRange);
            }
            state.value = state.value * source_range + s;
            state.range = state.range * source_range;
            samples += 1;
        }
        if samples > refilled_from {
            tracing::trace!(
                read = samples - refilled_from,
                range = ?state.range,
                "Refilled interval"
            );
        }

        let cut = state.range - state.range % target;

        if state.value < cut {
            let result = state.value % target;
            state.value = state.value / target;
            state.range = cut / target;

            tracing::trace!(
                target_size = ?target,
                samples,
                recycled,
                range = ?state.range,
                "Narrowed buffered entropy"
            );
            return Ok(result);
        }

        state.value = state.value - cut;
        state.range = state.range - cut;
        recycled += 1;
        tracing::trace!(
            target_size = ?target,
            recycled,
            range = ?state.range,
            "Recycled rejected value"
        );
    }
}
