use std::collections::{BTreeSet, HashMap};

use crate::domain::entities::classification::RuleSet;
use crate::domain::entities::kpi::{Kpi, KpiDefinition, KpiValue, NO_TOP_ITEM};
use crate::domain::entities::row::Row;
use crate::usecase::ports::source::QueryParams;
use crate::usecase::services::classifier::{bind_threshold, classify, condition_holds};

pub fn compute_kpis(definitions: &[KpiDefinition], rows: &[&Row], rules: &RuleSet) -> Vec<Kpi> {
    definitions
        .iter()
        .map(|definition| Kpi {
            name: definition.name().to_string(),
            value: compute_kpi(definition, rows, rules),
        })
        .collect()
}

pub fn compute_kpi(definition: &KpiDefinition, rows: &[&Row], rules: &RuleSet) -> KpiValue {
    match definition {
        KpiDefinition::Count { .. } => KpiValue::Number(rows.len() as f64),
        KpiDefinition::Sum { field, .. } => KpiValue::Number(sum(rows, field)),
        KpiDefinition::Mean { field, .. } => {
            KpiValue::Number(sum(rows, field) / rows.len().max(1) as f64)
        }
        KpiDefinition::Ratio {
            numerator,
            denominator,
            ..
        } => {
            let denominator = sum(rows, denominator);
            if denominator > 0.0 {
                KpiValue::Number(sum(rows, numerator) / denominator)
            } else {
                KpiValue::Number(0.0)
            }
        }
        KpiDefinition::DistinctCount { field, .. } => {
            KpiValue::Number(distinct_count(rows, field) as f64)
        }
        KpiDefinition::TopByTotal {
            group_by, value, ..
        } => KpiValue::Text(top_by_total(rows, group_by, value)),
        KpiDefinition::TopByValue { label, value, .. } => {
            KpiValue::Text(top_by_value(rows, label, value))
        }
        KpiDefinition::StatusCount { status, .. } => KpiValue::Number(
            rows.iter()
                .filter(|row| classify(row, rules) == status.as_str())
                .count() as f64,
        ),
        KpiDefinition::CountWhere {
            field,
            op,
            threshold,
            ..
        } => KpiValue::Number(
            rows.iter()
                .filter(|row| condition_holds(row, field, *op, threshold))
                .count() as f64,
        ),
    }
}

pub fn bind_kpis(definitions: &[KpiDefinition], params: &QueryParams) -> Vec<KpiDefinition> {
    definitions
        .iter()
        .map(|definition| match definition {
            KpiDefinition::CountWhere {
                name,
                field,
                op,
                threshold,
            } => KpiDefinition::CountWhere {
                name: name.clone(),
                field: field.clone(),
                op: *op,
                threshold: bind_threshold(threshold, params, field),
            },
            other => other.clone(),
        })
        .collect()
}

pub fn sum(rows: &[&Row], field: &str) -> f64 {
    rows.iter().map(|row| row.number(field)).sum()
}

// Missing and null values count once, as the empty value.
pub fn distinct_count(rows: &[&Row], field: &str) -> usize {
    rows.iter()
        .map(|row| row.get(field).to_text())
        .collect::<BTreeSet<_>>()
        .len()
}

// ties keep the first group seen
pub fn top_by_total(rows: &[&Row], group_by: &str, value: &str) -> String {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();
    for row in rows {
        let key = row.get(group_by);
        if key.is_null() {
            continue;
        }
        let key = key.to_text();
        if !totals.contains_key(&key) {
            order.push(key.clone());
        }
        *totals.entry(key).or_insert(0.0) += row.number(value);
    }

    let mut best: Option<(&String, f64)> = None;
    for key in &order {
        let total = totals.get(key).copied().unwrap_or(0.0);
        if best.map_or(true, |(_, best_total)| total > best_total) {
            best = Some((key, total));
        }
    }

    best.map(|(key, _)| key.clone())
        .unwrap_or_else(|| NO_TOP_ITEM.to_string())
}

pub fn top_by_value(rows: &[&Row], label: &str, value: &str) -> String {
    let mut best: Option<(&Row, f64)> = None;
    for row in rows {
        let current = row.number(value);
        if best.map_or(true, |(_, best_value)| current > best_value) {
            best = Some((*row, current));
        }
    }

    best.map(|(row, _)| row.get(label))
        .filter(|cell| !cell.is_null())
        .map(|cell| cell.to_text())
        .unwrap_or_else(|| NO_TOP_ITEM.to_string())
}
