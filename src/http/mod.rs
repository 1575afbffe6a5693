//! Request execution and the rate and concurrency schedulers.
mod attacker;
mod concurrency;
mod execution;
mod rate;


pub use attacker::{
    Attacker, AttackerConfig, DEFAULT_LOCAL_ADDR, DEFAULT_REDIRECTS, DEFAULT_TIMEOUT,
};
pub use rate::rate_hits;
