/// Numeric conversion helpers.
///
/// This module provides safe functions for converting script integers into
/// the sizes, indices and coordinates handlers need, without silent
/// truncation or wrap-around.
///
/// All functions return a `Result`, which is `Ok` if the conversion is lossless
/// and valid, or an error if the value is out of range.
pub mod num;
