//! Estadísticas agregadas sobre un conjunto de challans
//!
//! Función pura sobre el resultado de una consulta; sin estado.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Challan, ChallanStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationTypeCount {
    #[serde(rename = "type")]
    pub violation_type: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallanStats {
    pub total_violations: usize,
    pub pending_payments: usize,
    pub paid_fines: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub pending_amount: Decimal,
    pub by_type: Vec<ViolationTypeCount>,
}

impl ChallanStats {
    pub fn from_records(records: &[Challan]) -> Self {
        let pending: Vec<&Challan> = records
            .iter()
            .filter(|c| c.status == ChallanStatus::Pending)
            .collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records {
            *counts.entry(record.violation_type.as_str()).or_insert(0) += 1;
        }

        let mut by_type: Vec<ViolationTypeCount> = counts
            .into_iter()
            .map(|(violation_type, count)| ViolationTypeCount {
                violation_type: violation_type.to_string(),
                count,
            })
            .collect();
        by_type.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.violation_type.cmp(&b.violation_type)));

        Self {
            total_violations: records.len(),
            pending_payments: pending.len(),
            paid_fines: records.len() - pending.len(),
            total_amount: records.iter().map(|c| c.amount).sum(),
            pending_amount: pending.iter().map(|c| c.amount).sum(),
            by_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::challan_lifecycle_service::demo_challans;

    #[test]
    fn test_stats_over_demo_data() {
        let stats = ChallanStats::from_records(&demo_challans());

        assert_eq!(stats.total_violations, 5);
        assert_eq!(stats.pending_payments, 3);
        assert_eq!(stats.paid_fines, 2);
        assert_eq!(stats.total_amount, Decimal::from(3500));
        assert_eq!(stats.pending_amount, Decimal::from(2000));
        assert_eq!(
            stats.by_type[0],
            ViolationTypeCount { violation_type: "Speeding".to_string(), count: 2 }
        );
        assert_eq!(stats.by_type.len(), 4);
        assert_eq!(stats.by_type[1].violation_type, "Helmet Violation");
    }

    #[test]
    fn test_stats_over_empty_set() {
        let stats = ChallanStats::from_records(&[]);

        assert_eq!(stats.total_violations, 0);
        assert_eq!(stats.total_amount, Decimal::ZERO);
        assert!(stats.by_type.is_empty());
    }
}
