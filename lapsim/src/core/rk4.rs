//! Classical fourth-order Runge-Kutta step for a single scalar state variable.
//!
//! ```text
//! k1 = f(x0)
//! k2 = f(x0 + h*k1/2)
//! k3 = f(x0 + h*k2/2)
//! k4 = f(x0 + h*k3)
//!
//! delta = h*(k1 + 2*k2 + 2*k3 + k4)/6
//! ```
//!
//! The remaining state variables are captured by the rate closure and therefore stay fixed at
//! their pre-step values for all four stages.

/// rk4_delta returns the increment of the state variable over one step of size `h`. It does not
/// return the new value.
pub fn rk4_delta<F>(rate: F, x0: f64, h: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let k1 = rate(x0);
    let k2 = rate(x0 + h * k1 / 2.0);
    let k3 = rate(x0 + h * k2 / 2.0);
    let k4 = rate(x0 + h * k3);

    h * (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0
}
