pub mod config;
pub mod evaluator;
pub mod questions;
pub mod starter;
pub mod types;
