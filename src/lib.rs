pub mod cli;
pub mod domain;
pub mod infra;
pub mod platform;
pub mod ui;
pub mod usecase;
