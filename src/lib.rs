pub mod application;
pub mod cli;
pub mod domain;

pub use application::{Orchestrator, Settings};
pub use domain::*;
