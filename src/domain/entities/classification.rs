use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl Comparison {
    pub fn holds(self, left: f64, right: f64) -> bool {
        match self {
            Comparison::Gt => left > right,
            Comparison::Ge => left >= right,
            Comparison::Lt => left < right,
            Comparison::Le => left <= right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    Value(f64),
    Param(String),
    Scaled {
        field: String,
        #[serde(default = "unit_factor")]
        factor: f64,
    },
}

fn unit_factor() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub field: String,
    pub op: Comparison,
    pub threshold: Threshold,
    pub label: String,
}

impl ClassificationRule {
    pub fn new(field: &str, op: Comparison, threshold: Threshold, label: &str) -> Self {
        Self {
            field: field.to_string(),
            op,
            threshold,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub rules: Vec<ClassificationRule>,
    pub fallback: String,
}

impl RuleSet {
    pub fn new(rules: Vec<ClassificationRule>, fallback: &str) -> Self {
        Self {
            rules,
            fallback: fallback.to_string(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for label in self
            .rules
            .iter()
            .map(|rule| rule.label.as_str())
            .chain(std::iter::once(self.fallback.as_str()))
        {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }
}
