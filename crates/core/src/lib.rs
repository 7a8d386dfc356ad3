#![forbid(unsafe_code)]

pub mod error;
pub mod gamification;
pub mod model;
pub mod planner;
pub mod time;

pub use error::Error;
pub use time::Clock;
