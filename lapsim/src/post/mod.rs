pub mod chart;
pub mod sim_result;
