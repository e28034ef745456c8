use anyhow::Result;
use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::domain::entities::classification::RuleSet;
use crate::domain::entities::dashboard::DashboardConfig;
use crate::domain::entities::dataset::TableView;
use crate::domain::entities::kpi::{Kpi, KpiDefinition};
use crate::domain::entities::row::{Dataset, Row};
use crate::usecase::ports::delivery::FileDelivery;
use crate::usecase::ports::source::{DataSource, FetchError, ParamValue, QueryParams};
use crate::usecase::services::aggregator::{bind_kpis, compute_kpis};
use crate::usecase::services::classifier::classify;
use crate::usecase::services::export_service::{ExportOutcome, ExportService};
use crate::usecase::services::table_controller::{TableController, TableError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    Idle,
    Loaded {
        rows: usize,
        fetched_at: DateTime<Local>,
    },
    Failed(FetchError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Applied,
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot<'a> {
    pub title: &'a str,
    pub status: &'a FetchStatus,
    pub view: TableView<'a>,
    // one per view row
    pub labels: Vec<&'a str>,
    pub kpis: Vec<Kpi>,
}

pub struct Dashboard {
    config: DashboardConfig,
    params: QueryParams,
    rules: RuleSet,
    kpis: Vec<KpiDefinition>,
    dataset: Dataset,
    table: TableController,
    status: FetchStatus,
    latest_request: u64,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Result<Self, TableError> {
        let mut table = TableController::new(
            config.page_size,
            config.searchable_fields.clone(),
            config.filterable_fields.clone(),
        )?;
        table.set_sort(config.default_sort.clone());

        let params = config.params.clone();
        let rules = config.classification.bind(&params);
        let kpis = bind_kpis(&config.kpis, &params);
        Ok(Self {
            config,
            params,
            rules,
            kpis,
            dataset: Dataset::empty(),
            table,
            status: FetchStatus::Idle,
            latest_request: 0,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn table(&self) -> &TableController {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableController {
        &mut self.table
    }

    // callers refetch afterwards
    pub fn set_param(&mut self, name: &str, value: ParamValue) {
        self.params.insert(name.to_string(), value);
        self.rules = self.config.classification.bind(&self.params);
        self.kpis = bind_kpis(&self.config.kpis, &self.params);
    }

    pub fn set_page(&mut self, page: usize) {
        self.table.set_page(page, &self.dataset);
    }

    pub fn begin_request(&mut self) -> RequestId {
        self.latest_request += 1;
        RequestId(self.latest_request)
    }

    // Only the response to the most recently issued request may replace the
    // dataset. Failures leave an empty dataset and a `Failed` status.
    pub fn apply_response(
        &mut self,
        request: RequestId,
        result: Result<Dataset, FetchError>,
    ) -> ResponseOutcome {
        if request.0 != self.latest_request {
            warn!(
                "{}: dropping stale response #{} (latest is #{})",
                self.config.name, request.0, self.latest_request
            );
            return ResponseOutcome::Stale;
        }

        match result {
            Ok(dataset) => {
                info!(
                    "{}: loaded {} rows ({} columns)",
                    self.config.name,
                    dataset.len(),
                    dataset.columns().len()
                );
                self.status = FetchStatus::Loaded {
                    rows: dataset.len(),
                    fetched_at: Local::now(),
                };
                self.dataset = dataset;
            }
            Err(err) => {
                warn!("{}: fetch failed: {err}", self.config.name);
                self.status = FetchStatus::Failed(err);
                self.dataset = Dataset::empty();
            }
        }
        ResponseOutcome::Applied
    }

    pub fn refresh(&mut self, source: &dyn DataSource) -> ResponseOutcome {
        let request = self.begin_request();
        debug!(
            "{}: request #{} with {:?}",
            self.config.name, request.0, self.params
        );
        let result = source.fetch(&self.params);
        self.apply_response(request, result)
    }

    pub fn classify<'r>(&'r self, row: &Row) -> &'r str {
        classify(row, &self.rules)
    }

    pub fn view(&self) -> TableView<'_> {
        self.table.view(&self.dataset)
    }

    pub fn kpis(&self) -> Vec<Kpi> {
        let filtered: Vec<&Row> = self
            .table
            .filtered_indices(&self.dataset)
            .into_iter()
            .filter_map(|idx| self.dataset.row(idx))
            .collect();
        compute_kpis(&self.kpis, &filtered, &self.rules)
    }

    pub fn snapshot(&self) -> DashboardSnapshot<'_> {
        let view = self.view();
        let labels = view.rows.iter().map(|row| self.classify(row)).collect();
        DashboardSnapshot {
            title: self.config.display_title(),
            status: &self.status,
            view,
            labels,
            kpis: self.kpis(),
        }
    }

    pub fn export_columns(&self) -> Vec<String> {
        match &self.config.export_columns {
            Some(columns) => columns.clone(),
            None => self.dataset.columns().to_vec(),
        }
    }

    pub fn export(&self, delivery: &dyn FileDelivery) -> Result<ExportOutcome> {
        let rows = self.table.ordered_rows(&self.dataset);
        ExportService::new(delivery).export(
            &self.config.export_filename,
            &rows,
            &self.export_columns(),
        )
    }
}
