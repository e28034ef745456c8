pub mod classification;
pub mod dashboard;
pub mod dataset;
pub mod kpi;
pub mod row;
