use log::warn;

use crate::domain::entities::classification::{Comparison, RuleSet, Threshold};
use crate::domain::entities::row::Row;
use crate::usecase::ports::source::QueryParams;

// First matching rule wins; fields that are missing or unreadable count as zero.
pub fn classify<'a>(row: &Row, rules: &'a RuleSet) -> &'a str {
    rules
        .rules
        .iter()
        .find(|rule| condition_holds(row, &rule.field, rule.op, &rule.threshold))
        .map(|rule| rule.label.as_str())
        .unwrap_or(rules.fallback.as_str())
}

pub fn condition_holds(row: &Row, field: &str, op: Comparison, threshold: &Threshold) -> bool {
    let right = match threshold {
        Threshold::Value(value) => *value,
        Threshold::Scaled { field, factor } => row.number(field) * factor,
        // unbound parameters compare against zero
        Threshold::Param(_) => 0.0,
    };
    op.holds(row.number(field), right)
}

pub fn bind_threshold(threshold: &Threshold, params: &QueryParams, field: &str) -> Threshold {
    let Threshold::Param(name) = threshold else {
        return threshold.clone();
    };
    match params.get(name).and_then(|value| value.as_f64()) {
        Some(value) => Threshold::Value(value),
        None => {
            warn!("condition on {field} references parameter {name} which is not set; using 0");
            Threshold::Value(0.0)
        }
    }
}

impl RuleSet {
    pub fn bind(&self, params: &QueryParams) -> RuleSet {
        let mut bound = self.clone();
        for rule in &mut bound.rules {
            rule.threshold = bind_threshold(&rule.threshold, params, &rule.field);
        }
        bound
    }
}
