pub mod command_catalog;
pub mod command_descriptor;
pub mod error;
pub mod global;
