//! Metrics - measurable column entities of the X-Matrix.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MetricId, ValidationError};

/// A measurable target tracked against objectives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    id: MetricId,
    name: String,
    target: f64,
    unit: String,
}

impl Metric {
    /// Creates a new metric; name and unit are required.
    pub fn new(
        name: impl Into<String>,
        target: f64,
        unit: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let unit = unit.into();
        if unit.trim().is_empty() {
            return Err(ValidationError::empty_field("unit"));
        }
        Ok(Self {
            id: MetricId::new(),
            name,
            target,
            unit,
        })
    }

    pub fn id(&self) -> MetricId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_complete_fields() {
        let metric = Metric::new("Revenue", 20.0, "%").unwrap();
        assert_eq!(metric.name(), "Revenue");
        assert_eq!(metric.target(), 20.0);
        assert_eq!(metric.unit(), "%");
    }

    #[test]
    fn new_rejects_empty_name() {
        assert_eq!(
            Metric::new("", 10.0, "days"),
            Err(ValidationError::empty_field("name"))
        );
    }

    #[test]
    fn new_rejects_empty_unit() {
        assert_eq!(
            Metric::new("Lead time", 10.0, " "),
            Err(ValidationError::empty_field("unit"))
        );
    }
}
