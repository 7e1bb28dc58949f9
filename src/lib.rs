pub mod actions;
pub mod config;
pub mod desktop;
pub mod errors;
pub mod planner;
pub mod resolver;
pub mod session;
pub mod vision;

pub use errors::{VdResult, VoiceDeskError};
