//! A deterministic lap time simulator. Tire degradation, tire temperature and average velocity
//! are advanced by fixed-step RK4 integration and a lap time is derived after every iteration.

pub mod core;
pub mod post;
pub mod pre;
