pub mod aggregator;
pub mod classifier;
pub mod dashboard;
pub mod export_service;
pub mod table_controller;
