//! The higher abstractions of the program
pub mod coverage;
pub mod operation;
pub mod settings;
pub mod target;
