use crate::domain::entities::classification::{ClassificationRule, Comparison, RuleSet, Threshold};
use crate::domain::entities::dashboard::DashboardConfig;
use crate::domain::entities::kpi::KpiDefinition;
use crate::usecase::ports::source::{ParamValue, QueryParams};

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn params(pairs: &[(&str, ParamValue)]) -> QueryParams {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn above(field: &str, value: f64, label: &str) -> ClassificationRule {
    ClassificationRule::new(field, Comparison::Gt, Threshold::Value(value), label)
}

fn below(field: &str, value: f64, label: &str) -> ClassificationRule {
    ClassificationRule::new(field, Comparison::Lt, Threshold::Value(value), label)
}

fn sum(name: &str, field: &str) -> KpiDefinition {
    KpiDefinition::Sum {
        name: name.to_string(),
        field: field.to_string(),
    }
}

fn count(name: &str) -> KpiDefinition {
    KpiDefinition::Count {
        name: name.to_string(),
    }
}

fn distinct(name: &str, field: &str) -> KpiDefinition {
    KpiDefinition::DistinctCount {
        name: name.to_string(),
        field: field.to_string(),
    }
}

fn status_count(name: &str, status: &str) -> KpiDefinition {
    KpiDefinition::StatusCount {
        name: name.to_string(),
        status: status.to_string(),
    }
}

fn count_where(name: &str, field: &str, op: Comparison, value: f64) -> KpiDefinition {
    KpiDefinition::CountWhere {
        name: name.to_string(),
        field: field.to_string(),
        op,
        threshold: Threshold::Value(value),
    }
}

pub fn reorder_risk_rules() -> RuleSet {
    RuleSet::new(
        vec![
            above("suggested_reorder", 500.0, "CRITICAL"),
            below("weeks_cover", 8.0, "LOW COVER"),
        ],
        "STABLE",
    )
}

pub fn replenishment_risk_rules() -> RuleSet {
    RuleSet::new(
        vec![
            above("warehouse_shortfall", 0.0, "CRITICAL"),
            ClassificationRule::new(
                "weeks_of_cover",
                Comparison::Lt,
                Threshold::Param("replenish_weeks".to_string()),
                "LOW COVER",
            ),
        ],
        "HEALTHY",
    )
}

pub fn load_balance_rules() -> RuleSet {
    RuleSet::new(
        vec![
            above("send_qty", 500.0, "HIGH LOAD"),
            below("send_qty", 50.0, "LOW LOAD"),
        ],
        "BALANCED",
    )
}

pub fn region_velocity_rules() -> RuleSet {
    RuleSet::new(
        vec![
            above("weekly_velocity", 5.0, "HOT"),
            below("weekly_velocity", 1.0, "SLOW"),
        ],
        "STABLE",
    )
}

pub fn inventory_health_rules() -> RuleSet {
    RuleSet::new(
        vec![
            ClassificationRule::new(
                "amazon_inventory",
                Comparison::Gt,
                Threshold::Scaled {
                    field: "sales_velocity".to_string(),
                    factor: 4.0,
                },
                "OVERSTOCK",
            ),
            ClassificationRule::new(
                "amazon_inventory",
                Comparison::Lt,
                Threshold::Scaled {
                    field: "sales_velocity".to_string(),
                    factor: 1.0,
                },
                "RISK",
            ),
        ],
        "BALANCED",
    )
}

pub fn china_reorder() -> DashboardConfig {
    DashboardConfig {
        name: "china-reorder".to_string(),
        title: "China Reorder Intelligence".to_string(),
        endpoint: "/china-reorder/".to_string(),
        page_size: 15,
        export_filename: "china_reorder_export.csv".to_string(),
        searchable_fields: fields(&["model"]),
        filterable_fields: Vec::new(),
        export_columns: None,
        params: params(&[
            ("brand", ParamValue::Text("Nexlev".to_string())),
            ("months", ParamValue::Int(3)),
        ]),
        classification: reorder_risk_rules(),
        kpis: vec![
            sum("Total Units to Reorder", "suggested_reorder"),
            KpiDefinition::Mean {
                name: "Avg Weeks Cover".to_string(),
                field: "weeks_cover".to_string(),
            },
            count("Total Models"),
        ],
        default_sort: None,
        sql: None,
    }
}

pub fn china_reorder_working() -> DashboardConfig {
    DashboardConfig {
        name: "china-reorder-working".to_string(),
        title: "China Reorder Working".to_string(),
        endpoint: "/api/china-reorder-working".to_string(),
        page_size: 20,
        export_filename: "china_reorder_working.csv".to_string(),
        searchable_fields: fields(&["model"]),
        filterable_fields: Vec::new(),
        export_columns: None,
        params: params(&[
            ("brand", ParamValue::Text(String::new())),
            ("channel", ParamValue::Text(String::new())),
        ]),
        classification: RuleSet::new(Vec::new(), "-"),
        kpis: vec![
            sum("Total Units Sold", "units_sold"),
            sum("Total Inventory", "total_inventory"),
            count("Rows"),
        ],
        default_sort: None,
        sql: None,
    }
}

pub fn replenishment() -> DashboardConfig {
    DashboardConfig {
        name: "replenishment".to_string(),
        title: "Replenishment".to_string(),
        endpoint: "/replenishment".to_string(),
        page_size: 15,
        export_filename: "replenishment_export.csv".to_string(),
        searchable_fields: fields(&["model"]),
        filterable_fields: Vec::new(),
        export_columns: None,
        params: params(&[
            ("sales_window", ParamValue::Int(1)),
            ("replenish_weeks", ParamValue::Int(8)),
            ("account", ParamValue::Text("NEXLEV".to_string())),
        ]),
        classification: replenishment_risk_rules(),
        kpis: vec![
            status_count("Critical", "CRITICAL"),
            status_count("Low Cover", "LOW COVER"),
            status_count("Healthy", "HEALTHY"),
            sum("Required Units", "required_units"),
        ],
        default_sort: None,
        sql: None,
    }
}

pub fn replenishment_overview() -> DashboardConfig {
    DashboardConfig {
        name: "overview".to_string(),
        title: "Replenishment Overview".to_string(),
        endpoint: "/replenishment".to_string(),
        page_size: 15,
        export_filename: "replenishment_overview.csv".to_string(),
        searchable_fields: fields(&["model"]),
        filterable_fields: fields(&["model", "asin", "sku", "category"]),
        export_columns: None,
        params: params(&[
            ("sales_window", ParamValue::Int(4)),
            ("replenish_weeks", ParamValue::Int(8)),
        ]),
        classification: replenishment_risk_rules(),
        kpis: vec![
            sum("Units to Replenish", "reorder_qty"),
            KpiDefinition::Mean {
                name: "Avg Weeks of Cover".to_string(),
                field: "weeks_of_cover".to_string(),
            },
            count_where("Risky Models", "weeks_of_cover", Comparison::Lt, 2.0),
            count_where("Overstock Models", "weeks_of_cover", Comparison::Gt, 10.0),
        ],
        default_sort: None,
        sql: None,
    }
}

pub fn fc_allocation() -> DashboardConfig {
    DashboardConfig {
        name: "fc-allocation".to_string(),
        title: "FC Allocation".to_string(),
        endpoint: "/fc-final-allocation".to_string(),
        page_size: 12,
        export_filename: "fc_allocation_full_export.csv".to_string(),
        searchable_fields: fields(&["sku", "model"]),
        filterable_fields: fields(&["fulfillment_center"]),
        export_columns: Some(fields(&[
            "model",
            "sku",
            "fulfillment_center",
            "weekly_velocity",
            "fc_inventory",
            "transfer_in",
            "target_cover_units",
            "post_transfer_stock",
            "coverage_gap_units",
            "send_qty",
            "expected_units",
            "velocity_fill_ratio",
            "fill_pct",
            "velocity_flag",
        ])),
        params: params(&[
            ("replenish_weeks", ParamValue::Int(8)),
            ("channel", ParamValue::Text("All".to_string())),
            ("account", ParamValue::Text("Nexlev".to_string())),
        ]),
        classification: load_balance_rules(),
        kpis: vec![
            sum("Total Units", "send_qty"),
            distinct("Unique SKUs", "sku"),
            distinct("Unique FCs", "fulfillment_center"),
            KpiDefinition::TopByTotal {
                name: "Top FC".to_string(),
                group_by: "fulfillment_center".to_string(),
                value: "send_qty".to_string(),
            },
        ],
        default_sort: None,
        sql: None,
    }
}

pub fn region_sales() -> DashboardConfig {
    DashboardConfig {
        name: "region-sales".to_string(),
        title: "Region Sales".to_string(),
        endpoint: "/region-sales".to_string(),
        page_size: 15,
        export_filename: "region_sales_export.csv".to_string(),
        searchable_fields: fields(&["sku", "region"]),
        filterable_fields: fields(&["region"]),
        export_columns: None,
        params: params(&[("account", ParamValue::Text("NEXLEV".to_string()))]),
        classification: region_velocity_rules(),
        kpis: vec![
            sum("Total Units (30d)", "total_units_30d"),
            sum("Revenue (30d)", "revenue_30d"),
            distinct("Unique SKUs", "sku"),
            distinct("Regions", "region"),
            KpiDefinition::TopByTotal {
                name: "Top Region".to_string(),
                group_by: "region".to_string(),
                value: "total_units_30d".to_string(),
            },
        ],
        default_sort: None,
        sql: None,
    }
}

pub fn sales_analytics() -> DashboardConfig {
    DashboardConfig {
        name: "sales-analytics".to_string(),
        title: "Sales Analytics".to_string(),
        endpoint: "/replenishment".to_string(),
        page_size: 10,
        export_filename: "sales_analytics_export.csv".to_string(),
        searchable_fields: fields(&["model"]),
        filterable_fields: Vec::new(),
        export_columns: Some(fields(&["model", "sales_velocity", "amazon_inventory"])),
        params: params(&[
            ("sales_window", ParamValue::Int(4)),
            ("replenish_weeks", ParamValue::Int(8)),
        ]),
        classification: inventory_health_rules(),
        kpis: vec![
            sum("Total Sales Velocity", "sales_velocity"),
            sum("Total Inventory", "amazon_inventory"),
            KpiDefinition::Ratio {
                name: "Coverage".to_string(),
                numerator: "amazon_inventory".to_string(),
                denominator: "sales_velocity".to_string(),
            },
            KpiDefinition::TopByValue {
                name: "Top SKU".to_string(),
                label: "model".to_string(),
                value: "sales_velocity".to_string(),
            },
        ],
        default_sort: None,
        sql: None,
    }
}

pub fn builtin() -> Vec<DashboardConfig> {
    vec![
        replenishment_overview(),
        replenishment(),
        sales_analytics(),
        fc_allocation(),
        region_sales(),
        china_reorder(),
        china_reorder_working(),
    ]
}
