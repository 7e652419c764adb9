//! Controller de analytics y reportes
//!
//! Consulta los lotes completos y delega el cómputo a las funciones puras
//! del servicio de analytics. El rango por defecto son los últimos 6 meses.

use chrono::{Months, NaiveDate, Utc};

use crate::dto::analytics_dto::{AnalyticsSummaryResponse, DateRangeQuery};
use crate::repositories::incident_repository::IncidentRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::analytics_service::{
    build_incident_type_distribution, build_monthly_series, build_vehicle_status_distribution,
    build_weekday_activity, filter_incidents_by_range, filter_vehicles_by_range, summary_totals,
};
use crate::services::report_service;
use crate::utils::errors::{field_validation_error, validation_error, AppError};
use crate::utils::validation::validate_date;

pub struct AnalyticsController {
    vehicles: VehicleRepository,
    incidents: IncidentRepository,
}

impl AnalyticsController {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            incidents: IncidentRepository::new(pool),
        }
    }

    pub async fn summary(
        &self,
        query: DateRangeQuery,
    ) -> Result<AnalyticsSummaryResponse, AppError> {
        let (start, end) = resolve_range(&query)?;

        let all_vehicles = self.vehicles.list_all().await?;
        let all_incidents = self.incidents.list_all().await?;

        let vehicles = filter_vehicles_by_range(&all_vehicles, start, end);
        let incidents = filter_incidents_by_range(&all_incidents, start, end);

        Ok(AnalyticsSummaryResponse {
            start_date: start,
            end_date: end,
            totals: summary_totals(&vehicles, &incidents),
            monthly_trends: build_monthly_series(start, end, &incidents, &vehicles),
            incident_type_distribution: build_incident_type_distribution(&incidents),
            vehicle_status_distribution: build_vehicle_status_distribution(&vehicles),
            weekday_activity: build_weekday_activity(&incidents),
        })
    }

    pub async fn vehicles_report(&self, query: DateRangeQuery) -> Result<String, AppError> {
        let (from, to) = parse_optional_range(&query)?;
        let vehicles = self.vehicles.list_all().await?;
        Ok(report_service::vehicles_report(&vehicles, from, to))
    }

    pub async fn incidents_report(&self, query: DateRangeQuery) -> Result<String, AppError> {
        let (from, to) = parse_optional_range(&query)?;
        let incidents = self.incidents.list_all().await?;
        Ok(report_service::incidents_report(&incidents, from, to))
    }

    pub async fn analytics_report(&self, query: DateRangeQuery) -> Result<String, AppError> {
        let (start, end) = resolve_range(&query)?;

        let all_vehicles = self.vehicles.list_all().await?;
        let all_incidents = self.incidents.list_all().await?;

        let vehicles = filter_vehicles_by_range(&all_vehicles, start, end);
        let incidents = filter_incidents_by_range(&all_incidents, start, end);

        let totals = summary_totals(&vehicles, &incidents);
        let type_dist = build_incident_type_distribution(&incidents);
        let status_dist = build_vehicle_status_distribution(&vehicles);
        let monthly = build_monthly_series(start, end, &incidents, &vehicles);

        let mut report =
            report_service::analytics_report(start, end, &totals, &type_dist, &status_dist, &monthly);
        report.push('\n');
        report.push_str(&report_service::compliance_section(
            &vehicles,
            Some(start),
            Some(end),
        ));

        Ok(report)
    }
}

/// Rango con defaults: últimos 6 meses hasta hoy
fn resolve_range(query: &DateRangeQuery) -> Result<(NaiveDate, NaiveDate), AppError> {
    let today = Utc::now().date_naive();

    let end = match &query.end_date {
        Some(raw) => validate_date(raw).map_err(|e| field_validation_error("endDate", e))?,
        None => today,
    };
    let start = match &query.start_date {
        Some(raw) => validate_date(raw).map_err(|e| field_validation_error("startDate", e))?,
        None => end.checked_sub_months(Months::new(6)).unwrap_or(end),
    };

    if start > end {
        return Err(validation_error("startDate", "start date must not be after end date"));
    }

    Ok((start, end))
}

/// Rango sin defaults, para los reportes de registros
fn parse_optional_range(
    query: &DateRangeQuery,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), AppError> {
    let from = query
        .start_date
        .as_deref()
        .map(|raw| validate_date(raw).map_err(|e| field_validation_error("startDate", e)))
        .transpose()?;
    let to = query
        .end_date
        .as_deref()
        .map(|raw| validate_date(raw).map_err(|e| field_validation_error("endDate", e)))
        .transpose()?;

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(validation_error("startDate", "start date must not be after end date"));
        }
    }

    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_range_rejects_inverted_dates() {
        let query = DateRangeQuery {
            start_date: Some("2024-03-01".to_string()),
            end_date: Some("2024-01-01".to_string()),
        };
        assert!(resolve_range(&query).is_err());
    }

    #[test]
    fn test_resolve_range_parses_explicit_dates() {
        let query = DateRangeQuery {
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-03-31".to_string()),
        };
        let (start, end) = resolve_range(&query).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_optional_range_allows_missing_bounds() {
        let query = DateRangeQuery {
            start_date: None,
            end_date: None,
        };
        assert_eq!(parse_optional_range(&query).unwrap(), (None, None));
    }
}
