pub mod sim_opts;
pub mod sim_pars;
