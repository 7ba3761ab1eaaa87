use crate::core::simulator::Simulator;
use crate::post::sim_result::SimResult;
use crate::pre::sim_pars::SimPars;
use anyhow::Context;

/// handle_sim creates and runs a simulation on the basis of the inserted parameters, and returns
/// the results for post-processing.
pub fn handle_sim(sim_pars: &SimPars, print_debug: bool) -> anyhow::Result<SimResult> {
    sim_pars
        .validate()
        .context("Simulation parameters are not valid!")?;

    let mut sim = Simulator::new(sim_pars);
    let mut warned_non_finite = false;

    while let Some(sample) = sim.simulate_iteration() {
        let st = sim.state();
        if print_debug {
            println!(
                "DEBUG: Iteration {:3}: tire deg {:.6}, tire temp {:.4}, avg vel {:.4}, laptime {:.4}",
                sample.timestep,
                st.tire_degradation,
                st.tire_temperature,
                st.average_velocity,
                sample.lap_time
            );
        }
        if !warned_non_finite && !(st.is_finite() && sample.lap_time.is_finite()) {
            eprintln!(
                "WARNING: Vehicle state is no longer finite at iteration {}, remaining results are poisoned!",
                sample.timestep
            );
            warned_non_finite = true;
        }
    }

    Ok(sim.get_sim_result())
}
