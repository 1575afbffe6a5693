//! Command flows behind `stress attack` and `stress report`.
mod attack;
pub mod files;
mod report;


pub use attack::run_attack;
pub use report::run_report;
