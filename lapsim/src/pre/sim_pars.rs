use crate::core::model::{CoefficientSet, VehicleState};
use helpers::general::InputValueError;
use serde::{Deserialize, Serialize};

/// Coupling selects how the simulator wires the state into the rate functions.
///
/// * `Reference` - The velocity decay term reads the stored average velocity instead of the
///   RK4 stage value, and the temperature integrator is seeded with the tire degradation.
/// * `StateConsistent` - The velocity decay term reads the stage value and the temperature
///   integrator is seeded with the tire temperature.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Coupling {
    Reference,
    StateConsistent,
}

impl Default for Coupling {
    fn default() -> Self {
        Coupling::Reference
    }
}

/// SimPars is used to store all parameters of one simulation run.
///
/// * `coeffs` - Coefficients of the rate equations
/// * `initial_state` - Vehicle state before the first iteration
/// * `step_size` - Fixed integration step size
/// * `no_iterations` - Number of iterations (one sample each)
/// * `lap_distance` - Distance used to derive the lap time from the average velocity
/// * `coupling` - See `Coupling`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SimPars {
    pub coeffs: CoefficientSet,
    pub initial_state: VehicleState,
    pub step_size: f64,
    pub no_iterations: u32,
    pub lap_distance: f64,
    #[serde(default)]
    pub coupling: Coupling,
}

impl Default for SimPars {
    fn default() -> Self {
        SimPars {
            coeffs: CoefficientSet::default(),
            initial_state: VehicleState::default(),
            step_size: 0.1,
            no_iterations: 100,
            lap_distance: 100.0,
            coupling: Coupling::Reference,
        }
    }
}

impl SimPars {
    /// validate checks the run parameters. The vehicle state is not checked: domain failures
    /// during the run propagate as NaN or infinity.
    pub fn validate(&self) -> Result<(), InputValueError> {
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(InputValueError);
        }
        if !self.lap_distance.is_finite() {
            return Err(InputValueError);
        }
        Ok(())
    }
}
