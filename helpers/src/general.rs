use std::error::Error;
use std::fmt;

/// InputValueError is used if some simulation parameter does not fulfill the posed requirements,
/// e.g., a non-positive step size.
#[derive(Debug, Clone)]
pub struct InputValueError;

impl fmt::Display for InputValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid input value")
    }
}

impl Error for InputValueError {}

/// finite_min_max returns the minimum and maximum of the finite values in x, or `None` if x
/// contains no finite value.
pub fn finite_min_max(x: &[f64]) -> Option<(f64, f64)> {
    x.iter()
        .copied()
        .filter(|val| val.is_finite())
        .fold(None, |acc, val| match acc {
            None => Some((val, val)),
            Some((val_min, val_max)) => Some((val_min.min(val), val_max.max(val))),
        })
}
