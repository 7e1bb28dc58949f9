pub mod bridge;
pub mod parser;

pub use bridge::PlannerBridge;
