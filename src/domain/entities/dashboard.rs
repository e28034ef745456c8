use serde::{Deserialize, Serialize};

use crate::domain::entities::classification::RuleSet;
use crate::domain::entities::dataset::SortSpec;
use crate::domain::entities::kpi::KpiDefinition;
use crate::usecase::ports::source::QueryParams;

pub const DEFAULT_PAGE_SIZE: usize = 15;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub endpoint: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    pub export_filename: String,
    #[serde(default)]
    pub searchable_fields: Vec<String>,
    #[serde(default)]
    pub filterable_fields: Vec<String>,
    #[serde(default)]
    pub export_columns: Option<Vec<String>>,
    #[serde(default)]
    pub params: QueryParams,
    pub classification: RuleSet,
    #[serde(default)]
    pub kpis: Vec<KpiDefinition>,
    #[serde(default)]
    pub default_sort: Option<SortSpec>,
    #[serde(default)]
    pub sql: Option<String>,
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("dashboard name must not be empty".to_string());
        }
        if self.page_size == 0 {
            return Err(format!("dashboard {}: page_size must be greater than zero", self.name));
        }
        if self.export_filename.trim().is_empty() {
            return Err(format!("dashboard {}: export_filename must not be empty", self.name));
        }
        if matches!(&self.export_columns, Some(columns) if columns.is_empty()) {
            return Err(format!("dashboard {}: export_columns must not be empty", self.name));
        }
        Ok(())
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}
