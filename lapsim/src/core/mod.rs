pub mod handle_sim;
pub mod model;
pub mod rk4;
pub mod simulator;
