//! Utility modules for the admin console

pub mod focus_manager;
pub mod formatting;
pub mod logger;
pub mod validation;

pub use focus_manager::*;
pub use formatting::*;
pub use logger::*;
pub use validation::*;
