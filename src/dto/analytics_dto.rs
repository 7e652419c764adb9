//! DTOs de analytics y reportes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::services::analytics_service::{
    DistributionEntry, MonthlySeries, SummaryTotals, WeekdayActivity,
};

/// Rango de fechas de los endpoints de analytics/reportes
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Response del resumen de analytics
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummaryResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub totals: SummaryTotals,
    pub monthly_trends: MonthlySeries,
    pub incident_type_distribution: BTreeMap<String, DistributionEntry>,
    pub vehicle_status_distribution: BTreeMap<String, DistributionEntry>,
    pub weekday_activity: WeekdayActivity,
}
