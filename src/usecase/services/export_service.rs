use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use crate::domain::entities::row::Row;
use crate::infra::export::csv::rows_to_csv;
use crate::usecase::ports::delivery::FileDelivery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Skipped,
    Delivered { path: PathBuf, rows: usize },
}

pub struct ExportService<'a> {
    delivery: &'a dyn FileDelivery,
}

impl<'a> ExportService<'a> {
    pub fn new(delivery: &'a dyn FileDelivery) -> Self {
        Self { delivery }
    }

    pub fn export(&self, filename: &str, rows: &[&Row], columns: &[String]) -> Result<ExportOutcome> {
        if rows.is_empty() {
            info!("skipping export of {filename}: no rows match");
            return Ok(ExportOutcome::Skipped);
        }

        let text = rows_to_csv(rows, columns)?;
        let path = self
            .delivery
            .deliver(filename, &text)
            .with_context(|| format!("failed to deliver export {filename}"))?;

        info!("exported {} rows to {}", rows.len(), path.display());
        Ok(ExportOutcome::Delivered {
            path,
            rows: rows.len(),
        })
    }
}
