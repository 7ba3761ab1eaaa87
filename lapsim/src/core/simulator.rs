use crate::core::model::{lap_time, DifferentialModel, VehicleState};
use crate::core::rk4::rk4_delta;
use crate::post::sim_result::SimResult;
use crate::pre::sim_pars::{Coupling, SimPars};
use serde::{Deserialize, Serialize};

/// Sample is recorded once per iteration.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestep: u32,
    pub lap_time: f64,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SimStatus {
    Running,
    Done,
}

/// Deltas of one iteration, all computed from the state before the iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDeltas {
    pub velocity: f64,
    pub degradation: f64,
    pub temperature: f64,
}

#[derive(Debug)]
pub struct Simulator {
    pub model: DifferentialModel,
    pub step_size: f64,
    pub no_iterations: u32,
    pub cur_iteration: u32,
    lap_distance: f64,
    coupling: Coupling,
    samples: Vec<Sample>,
    states: Vec<VehicleState>,
}

impl Simulator {
    pub fn new(sim_pars: &SimPars) -> Simulator {
        Simulator {
            model: DifferentialModel::new(sim_pars.coeffs, sim_pars.initial_state),
            step_size: sim_pars.step_size,
            no_iterations: sim_pars.no_iterations,
            cur_iteration: 0,
            lap_distance: sim_pars.lap_distance,
            coupling: sim_pars.coupling,
            samples: Vec::with_capacity(sim_pars.no_iterations as usize),
            states: Vec::with_capacity(sim_pars.no_iterations as usize),
        }
    }

    pub fn status(&self) -> SimStatus {
        if self.cur_iteration < self.no_iterations {
            SimStatus::Running
        } else {
            SimStatus::Done
        }
    }

    pub fn get_finished(&self) -> bool {
        self.status() == SimStatus::Done
    }

    pub fn state(&self) -> &VehicleState {
        &self.model.state
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// calc_deltas integrates each state variable over one step while holding the other state
    /// variables at their current values.
    pub fn calc_deltas(&self) -> StepDeltas {
        let model = &self.model;
        let st = model.state;
        let h = self.step_size;

        let velocity = match self.coupling {
            Coupling::Reference => rk4_delta(
                |v| model.velocity_rate(v, st.tire_degradation, st.amount_of_fuel, st.average_velocity),
                st.average_velocity,
                h,
            ),
            Coupling::StateConsistent => rk4_delta(
                |v| model.velocity_rate(v, st.tire_degradation, st.amount_of_fuel, v),
                st.average_velocity,
                h,
            ),
        };

        let degradation = rk4_delta(
            |t| model.degradation_rate(t, st.average_velocity, st.tire_temperature),
            st.tire_degradation,
            h,
        );

        let temperature_seed = match self.coupling {
            Coupling::Reference => st.tire_degradation,
            Coupling::StateConsistent => st.tire_temperature,
        };
        let temperature = rk4_delta(|t| model.temperature_rate(t), temperature_seed, h);

        StepDeltas {
            velocity,
            degradation,
            temperature,
        }
    }

    /// simulate_iteration advances the state by one step and records the resulting lap time.
    /// Returns `None` once all iterations were simulated.
    pub fn simulate_iteration(&mut self) -> Option<Sample> {
        if self.get_finished() {
            return None;
        }

        let deltas = self.calc_deltas();

        let st = &mut self.model.state;
        st.tire_degradation += deltas.degradation;
        st.tire_temperature += deltas.temperature;
        st.average_velocity += deltas.velocity;

        let sample = Sample {
            timestep: self.cur_iteration,
            lap_time: lap_time(self.lap_distance, st.average_velocity),
        };
        self.samples.push(sample);
        self.states.push(*st);
        self.cur_iteration += 1;

        Some(sample)
    }

    /// run simulates all remaining iterations.
    pub fn run(&mut self) {
        while self.simulate_iteration().is_some() {}
    }

    pub fn get_sim_result(&self) -> SimResult {
        SimResult {
            lap_distance: self.lap_distance,
            samples: self.samples.to_owned(),
            states: self.states.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::CoefficientSet;
    use approx::assert_relative_eq;

    #[test]
    fn zero_iterations_yield_no_samples() {
        let mut sim = Simulator::new(&SimPars {
            no_iterations: 0,
            ..SimPars::default()
        });
        assert_eq!(sim.status(), SimStatus::Done);
        assert!(sim.simulate_iteration().is_none());
        assert!(sim.samples().is_empty());
    }

    #[test]
    fn status_switches_to_done_after_last_iteration() {
        let mut sim = Simulator::new(&SimPars {
            no_iterations: 3,
            ..SimPars::default()
        });
        for i in 0..3 {
            assert_eq!(sim.status(), SimStatus::Running);
            assert_eq!(sim.simulate_iteration().map(|s| s.timestep), Some(i));
        }
        assert_eq!(sim.status(), SimStatus::Done);
        assert!(sim.simulate_iteration().is_none());
        assert_eq!(sim.samples().len(), 3);
    }

    #[test]
    fn first_deltas_match_hand_computation() {
        let sim = Simulator::new(&SimPars::default());
        let deltas = sim.calc_deltas();
        let h = 0.1;

        // velocity: f(V) = 0.1 * V + 1e-4, degradation term vanishes at T = 0
        let f = |v: f64| 0.1 * v + 0.0001;
        let k1 = f(10.0);
        let k2 = f(10.0 + h * k1 / 2.0);
        let k3 = f(10.0 + h * k2 / 2.0);
        let k4 = f(10.0 + h * k3);
        assert_relative_eq!(
            deltas.velocity,
            h * (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0,
            max_relative = 1e-12
        );

        // degradation: g(T) = 1e-4 * T * 10 + 1e-4 * T * 75 + 10 * 75 * 1e-4
        let g = |t: f64| 0.0001 * t * 10.0 + 0.0001 * t * 75.0 + 0.075;
        let k1 = g(0.0);
        let k2 = g(h * k1 / 2.0);
        let k3 = g(h * k2 / 2.0);
        let k4 = g(h * k3);
        assert_relative_eq!(
            deltas.degradation,
            h * (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0,
            max_relative = 1e-12
        );

        // temperature integrator is seeded with zero degradation
        assert_eq!(deltas.temperature, 0.0);
    }

    #[test]
    fn deltas_do_not_mutate_state() {
        let sim = Simulator::new(&SimPars::default());
        let before = *sim.state();
        let a = sim.calc_deltas();
        let b = sim.calc_deltas();
        assert_eq!(a, b);
        assert_eq!(*sim.state(), before);
    }

    #[test]
    fn fuel_is_never_consumed() {
        let mut sim = Simulator::new(&SimPars::default());
        sim.run();
        assert_eq!(sim.state().amount_of_fuel, 100.0);
        assert_eq!(sim.state().tire_grip, 1.0);
    }

    #[test]
    fn state_consistent_coupling_heats_tires_from_temperature() {
        let sim = Simulator::new(&SimPars {
            coupling: Coupling::StateConsistent,
            ..SimPars::default()
        });
        let deltas = sim.calc_deltas();
        assert!(deltas.temperature > 0.0);

        // identical to reference while degradation is zero
        let reference = Simulator::new(&SimPars::default()).calc_deltas();
        assert_relative_eq!(deltas.velocity, reference.velocity, max_relative = 1e-12);
    }

    #[test]
    fn negative_temperature_seed_poisons_remaining_run() {
        let mut pars = SimPars {
            no_iterations: 5,
            coupling: Coupling::StateConsistent,
            ..SimPars::default()
        };
        pars.initial_state.tire_temperature = -1.0;
        let mut sim = Simulator::new(&pars);
        sim.run();
        // temperature -> degradation -> velocity, one iteration per hop
        assert_eq!(sim.samples().len(), 5);
        assert!(sim.samples()[..2].iter().all(|s| s.lap_time.is_finite()));
        assert!(sim.samples()[2..].iter().all(|s| s.lap_time.is_nan()));
        assert!(!sim.state().is_finite());
    }

    #[test]
    fn constant_velocity_rate_matches_analytic_lap_time() {
        // only the fuel term is left: dV/dt = fuel_burn_v / fuel
        let coeffs = CoefficientSet {
            avg_vel_v: 0.0,
            tire_deg_vd: 0.0,
            ..CoefficientSet::default()
        };
        let mut sim = Simulator::new(&SimPars {
            coeffs,
            no_iterations: 10,
            ..SimPars::default()
        });
        sim.run();
        let v_exact = 10.0 + 0.01 / 100.0 * 10.0 * 0.1;
        assert_relative_eq!(sim.state().average_velocity, v_exact, max_relative = 1e-5);
        assert_relative_eq!(
            sim.samples().last().unwrap().lap_time,
            100.0 / v_exact,
            max_relative = 1e-5
        );
    }
}
