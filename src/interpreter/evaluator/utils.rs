use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{i64_to_u32_checked, i64_to_usize_checked},
    vision::VisionError,
    vocabulary::Builtin,
};

/// Returns the argument at `index` as a string slice.
///
/// # Errors
/// `ExpectedString` if the argument is missing or not a string.
pub fn string_arg(args: &[Value], index: usize, line: usize) -> EvalResult<&str> {
    args.get(index)
        .ok_or(RuntimeError::ExpectedString { line })?
        .as_str(line)
}

/// Returns the argument at `index` as a non-negative integer.
///
/// # Errors
/// `ExpectedNumber` if it is not an integer, `LiteralTooSmall` if it is
/// negative.
///
/// # Example
/// ```
/// use visionscript::interpreter::{evaluator::utils::usize_arg, value::core::Value};
///
/// assert_eq!(usize_arg(&[Value::Integer(3)], 0, 1).unwrap(), 3);
/// assert!(usize_arg(&[Value::Integer(-3)], 0, 1).is_err());
/// assert!(usize_arg(&[Value::Real(3.0)], 0, 1).is_err());
/// ```
pub fn usize_arg(args: &[Value], index: usize, line: usize) -> EvalResult<usize> {
    let value = args.get(index).ok_or(RuntimeError::ExpectedNumber { line })?;
    i64_to_usize_checked(value.as_integer(line)?, line)
}

/// Returns the argument at `index` as a pixel size.
///
/// # Errors
/// Same as [`usize_arg`], plus `LiteralTooLarge` above `u32::MAX`.
pub fn dimension_arg(args: &[Value], index: usize, line: usize) -> EvalResult<u32> {
    let value = args.get(index).ok_or(RuntimeError::ExpectedNumber { line })?;
    i64_to_u32_checked(value.as_integer(line)?, line)
}

/// Returns the argument at `index` as a real number. Integers are widened.
///
/// # Errors
/// `ExpectedNumber` if the argument is missing or not numeric.
pub fn real_arg(args: &[Value], index: usize, line: usize) -> EvalResult<f64> {
    args.get(index)
        .ok_or(RuntimeError::ExpectedNumber { line })?
        .as_real(line)
}

/// Collects string arguments, flattening one level of lists.
///
/// `Detect["cat", "dog"]` and `Detect[["cat", "dog"]]` both yield
/// `["cat", "dog"]`.
///
/// # Errors
/// `ExpectedString` if any argument or list element is not a string.
///
/// # Example
/// ```
/// use visionscript::interpreter::{evaluator::utils::string_list, value::core::Value};
///
/// let args = [Value::from("cat"), Value::from(vec![Value::from("dog")])];
/// assert_eq!(string_list(&args, 1).unwrap(), ["cat", "dog"]);
/// ```
pub fn string_list(args: &[Value], line: usize) -> EvalResult<Vec<String>> {
    let mut strings = Vec::new();

    for arg in args {
        match arg {
            Value::List(items) => {
                for item in items {
                    strings.push(item.as_str(line)?.to_string());
                }
            },
            value => strings.push(value.as_str(line)?.to_string()),
        }
    }

    Ok(strings)
}

/// Builds the mapper that turns a backend failure into a runtime error
/// naming the builtin.
pub fn handler_error(builtin: Builtin, line: usize) -> impl FnOnce(VisionError) -> RuntimeError {
    move |source| RuntimeError::Handler { name: builtin.display_name(),
                                          line,
                                          source }
}
