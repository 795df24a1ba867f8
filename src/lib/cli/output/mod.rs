//! Everything that leaves the process: the generated command lines, their execution
//! and the status lines written for the CI log
pub mod arguments;
pub mod commands;
pub mod executors;
pub mod reporter;
