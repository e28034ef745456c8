use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entities::classification::{Comparison, Threshold};

pub const NO_TOP_ITEM: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KpiDefinition {
    Count {
        name: String,
    },
    Sum {
        name: String,
        field: String,
    },
    Mean {
        name: String,
        field: String,
    },
    Ratio {
        name: String,
        numerator: String,
        denominator: String,
    },
    DistinctCount {
        name: String,
        field: String,
    },
    TopByTotal {
        name: String,
        group_by: String,
        value: String,
    },
    TopByValue {
        name: String,
        label: String,
        value: String,
    },
    StatusCount {
        name: String,
        status: String,
    },
    CountWhere {
        name: String,
        field: String,
        op: Comparison,
        threshold: Threshold,
    },
}

impl KpiDefinition {
    pub fn name(&self) -> &str {
        match self {
            KpiDefinition::Count { name }
            | KpiDefinition::Sum { name, .. }
            | KpiDefinition::Mean { name, .. }
            | KpiDefinition::Ratio { name, .. }
            | KpiDefinition::DistinctCount { name, .. }
            | KpiDefinition::TopByTotal { name, .. }
            | KpiDefinition::TopByValue { name, .. }
            | KpiDefinition::StatusCount { name, .. }
            | KpiDefinition::CountWhere { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum KpiValue {
    Number(f64),
    Text(String),
}

impl KpiValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            KpiValue::Number(number) => Some(*number),
            KpiValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            KpiValue::Number(_) => None,
            KpiValue::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for KpiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KpiValue::Number(number) => f.write_str(&format_f64(*number)),
            KpiValue::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Kpi {
    pub name: String,
    pub value: KpiValue,
}

pub fn format_f64(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if (value.fract()).abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        let mut text = format!("{value:.2}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}
