use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use visionscript::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, "too big!").unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Safely converts an `i64` to `u32`, as used for image dimensions.
///
/// ## Errors
/// - `LiteralTooSmall` if the value is negative.
/// - `LiteralTooLarge` if the value exceeds `u32::MAX`.
///
/// ## Example
/// ```
/// use visionscript::{error::RuntimeError, util::num::i64_to_u32_checked};
///
/// assert_eq!(i64_to_u32_checked(640, 1).unwrap(), 640);
///
/// let err = i64_to_u32_checked(-1, 5).unwrap_err();
/// assert!(matches!(err, RuntimeError::LiteralTooSmall { line: 5 }));
/// ```
pub fn i64_to_u32_checked(value: i64, line: usize) -> EvalResult<u32> {
    if value < 0 {
        return Err(RuntimeError::LiteralTooSmall { line });
    }
    u32::try_from(value).map_err(|_| RuntimeError::LiteralTooLarge { line })
}

/// Safely converts an `i64` to `usize`, as used for indices and counts.
///
/// ## Errors
/// - `LiteralTooSmall` if the value is negative.
/// - `LiteralTooLarge` if the value does not fit in `usize`.
///
/// ## Example
/// ```
/// use visionscript::{error::RuntimeError, util::num::i64_to_usize_checked};
///
/// assert_eq!(i64_to_usize_checked(3, 1).unwrap(), 3);
///
/// let err = i64_to_usize_checked(-2, 9).unwrap_err();
/// assert!(matches!(err, RuntimeError::LiteralTooSmall { line: 9 }));
/// ```
pub fn i64_to_usize_checked(value: i64, line: usize) -> EvalResult<usize> {
    if value < 0 {
        return Err(RuntimeError::LiteralTooSmall { line });
    }
    usize::try_from(value).map_err(|_| RuntimeError::LiteralTooLarge { line })
}

/// Safely converts a `usize` count to the `i64` used by script integers.
///
/// ## Errors
/// `LiteralTooLarge` if the count does not fit in `i64`.
pub fn usize_to_i64_checked(value: usize, line: usize) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| RuntimeError::LiteralTooLarge { line })
}
