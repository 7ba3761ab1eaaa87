use serde::{Deserialize, Serialize};

/// Coefficients of the coupled rate equations. They are fixed for the lifetime of a simulator.
///
/// * `tire_deg_vd` - Velocity decay caused by tire degradation
/// * `fuel_burn_g` - Fuel burn sensitivity to grip (held, not used by any rate)
/// * `avg_vel_v` - Growth of the average velocity with itself
/// * `fuel_burn_v` - Velocity gain from the remaining fuel
/// * `tire_deg_p` - (held, not used by any rate)
/// * `deg_temp_t` - (held, not used by any rate)
/// * `tire_deg_dv` - Degradation growth vs. degradation and velocity
/// * `tire_deg_dp` - Degradation growth vs. degradation and tire temperature
/// * `tire_temp_p` - (held, not used by any rate)
/// * `avg_vel_p` - (held, not used by any rate)
/// * `tire_temp_d` - Tire temperature relaxation
/// * `tire_grip_pg` - (held, not used by any rate)
/// * `lap_time_l` - (held, not used by any rate)
/// * `lap_time_lg` - (held, not used by any rate)
/// * `tire_deg_vp` - Degradation growth vs. velocity and tire temperature
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct CoefficientSet {
    pub tire_deg_vd: f64,
    pub fuel_burn_g: f64,
    pub avg_vel_v: f64,
    pub fuel_burn_v: f64,
    pub tire_deg_p: f64,
    pub deg_temp_t: f64,
    pub tire_deg_dv: f64,
    pub tire_deg_dp: f64,
    pub tire_temp_p: f64,
    pub avg_vel_p: f64,
    pub tire_temp_d: f64,
    pub tire_grip_pg: f64,
    pub lap_time_l: f64,
    pub lap_time_lg: f64,
    pub tire_deg_vp: f64,
}

impl Default for CoefficientSet {
    fn default() -> Self {
        CoefficientSet {
            tire_deg_vd: 0.01,
            fuel_burn_g: 0.01,
            avg_vel_v: 0.1,
            fuel_burn_v: 0.01,
            tire_deg_p: 0.01,
            deg_temp_t: 0.01,
            tire_deg_dv: 0.0001,
            tire_deg_dp: 0.0001,
            tire_temp_p: 0.01,
            avg_vel_p: 0.01,
            tire_temp_d: 0.05,
            tire_grip_pg: 0.01,
            lap_time_l: 0.01,
            lap_time_lg: 0.01,
            tire_deg_vp: 0.0001,
        }
    }
}

/// VehicleState contains the quantities advanced by the simulation.
///
/// `average_velocity` starts above zero since there is no description of getting up to speed.
/// `amount_of_fuel` and `tire_grip` are tracked but never consumed by a rate.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct VehicleState {
    pub tire_degradation: f64,
    pub tire_temperature: f64,
    pub tire_grip: f64,
    pub average_velocity: f64,
    pub amount_of_fuel: f64,
}

impl Default for VehicleState {
    fn default() -> Self {
        VehicleState {
            tire_degradation: 0.0,
            tire_temperature: 75.0,
            tire_grip: 1.0,
            average_velocity: 10.0,
            amount_of_fuel: 100.0,
        }
    }
}

impl VehicleState {
    /// is_finite returns false as soon as any quantity, evolved or only carried, is NaN or
    /// infinite.
    pub fn is_finite(&self) -> bool {
        self.tire_degradation.is_finite()
            && self.tire_temperature.is_finite()
            && self.tire_grip.is_finite()
            && self.average_velocity.is_finite()
            && self.amount_of_fuel.is_finite()
    }
}

/// DifferentialModel holds the coefficients and the current vehicle state. All rate functions
/// take their inputs as arguments so that they can be evaluated at intermediate RK4 points
/// without touching the stored state.
#[derive(Debug, Clone)]
pub struct DifferentialModel {
    coeffs: CoefficientSet,
    pub state: VehicleState,
}

impl DifferentialModel {
    pub fn new(coeffs: CoefficientSet, state: VehicleState) -> DifferentialModel {
        DifferentialModel { coeffs, state }
    }

    /// velocity_rate returns dV/dt.
    ///
    /// `decay_reference_velocity` enters only the degradation decay term. The simulator passes
    /// the stored average velocity here, not the perturbed stage value `v`.
    /// A zero `fuel` is not guarded and yields an infinite rate.
    pub fn velocity_rate(&self, v: f64, t: f64, fuel: f64, decay_reference_velocity: f64) -> f64 {
        self.coeffs.avg_vel_v * v - self.coeffs.tire_deg_vd * t * decay_reference_velocity
            + self.coeffs.fuel_burn_v / fuel
    }

    /// degradation_rate returns dT/dt for degradation `t`, velocity `v` and tire temperature `p`.
    pub fn degradation_rate(&self, t: f64, v: f64, p: f64) -> f64 {
        self.coeffs.tire_deg_dv * t * v + self.coeffs.tire_deg_dp * t * p + v * p * self.coeffs.tire_deg_vp
    }

    /// temperature_rate returns dP/dt. Negative arguments yield NaN.
    pub fn temperature_rate(&self, t: f64) -> f64 {
        self.coeffs.tire_temp_d * t.sqrt()
    }
}

/// lap_time returns the time needed to cover `distance` at `velocity`. A zero velocity yields an
/// infinite lap time.
pub fn lap_time(distance: f64, velocity: f64) -> f64 {
    distance / velocity
}
