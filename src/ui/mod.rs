pub mod cli;
pub mod types;
pub mod web;
