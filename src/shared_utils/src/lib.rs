//! Small helpers shared by the ORB dashboard crates.

pub mod env;
