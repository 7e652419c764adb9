//! Servicio de analytics
//!
//! Funciones puras sobre lotes ya consultados de vehículos e incidentes:
//! filtro por rango de fechas, series mensuales, distribuciones,
//! actividad por día de la semana y score de cumplimiento. Sin acceso a
//! la base de datos y sin estado: cada llamada recomputa desde cero.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::incident::{Incident, IncidentStatus};
use crate::models::vehicle::{Vehicle, VehicleStatus};

/// Serie mensual: un bucket por mes calendario del rango, meses vacíos
/// incluidos con ceros
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySeries {
    pub labels: Vec<String>,
    pub incidents: Vec<i64>,
    pub resolved: Vec<i64>,
    pub vehicles: Vec<i64>,
}

/// Entrada de una distribución por tipo o estado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistributionEntry {
    pub count: i64,
    pub percent: i64,
}

/// Actividad por día de la semana, lunes primero
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekdayActivity {
    pub labels: Vec<String>,
    pub counts: Vec<i64>,
}

/// Totales del resumen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_vehicles: i64,
    pub active_incidents: i64,
    pub resolution_rate: i64,
    pub compliance_score: i64,
}

/// ¿Cae el timestamp dentro del rango? Inicio inclusivo a las 00:00:00,
/// fin inclusivo hasta las 23:59:59 del último día
pub fn in_range(ts: DateTime<Utc>, start: NaiveDate, end: NaiveDate) -> bool {
    let start_dt = start.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let end_dt = end.and_hms_opt(23, 59, 59).unwrap().and_utc();
    ts >= start_dt && ts <= end_dt
}

/// Quedarse con los vehículos creados dentro del rango
pub fn filter_vehicles_by_range(
    vehicles: &[Vehicle],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Vehicle> {
    vehicles
        .iter()
        .filter(|v| in_range(v.created_at, start, end))
        .cloned()
        .collect()
}

/// Quedarse con los incidentes creados dentro del rango
pub fn filter_incidents_by_range(
    incidents: &[Incident],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Incident> {
    incidents
        .iter()
        .filter(|i| in_range(i.created_at, start, end))
        .cloned()
        .collect()
}

/// Serie mensual desde el mes de start hasta el mes de end, inclusive
pub fn build_monthly_series(
    start: NaiveDate,
    end: NaiveDate,
    incidents: &[Incident],
    vehicles: &[Vehicle],
) -> MonthlySeries {
    let mut series = MonthlySeries {
        labels: Vec::new(),
        incidents: Vec::new(),
        resolved: Vec::new(),
        vehicles: Vec::new(),
    };

    let mut current = NaiveDate::from_ymd_opt(start.year(), start.month(), 1).unwrap();
    while current <= end {
        let month = current.month();
        let year = current.year();

        series.labels.push(current.format("%b").to_string());
        series.incidents.push(
            incidents
                .iter()
                .filter(|i| i.created_at.month() == month && i.created_at.year() == year)
                .count() as i64,
        );
        series.resolved.push(
            incidents
                .iter()
                .filter(|i| {
                    i.status == IncidentStatus::Resolved
                        && i.created_at.month() == month
                        && i.created_at.year() == year
                })
                .count() as i64,
        );
        series.vehicles.push(
            vehicles
                .iter()
                .filter(|v| v.created_at.month() == month && v.created_at.year() == year)
                .count() as i64,
        );

        current = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
        };
    }

    series
}

/// Distribución de incidentes por tipo
pub fn build_incident_type_distribution(
    incidents: &[Incident],
) -> BTreeMap<String, DistributionEntry> {
    build_distribution(incidents.iter().map(|i| i.incident_type.to_string()))
}

/// Distribución de vehículos por estado
pub fn build_vehicle_status_distribution(
    vehicles: &[Vehicle],
) -> BTreeMap<String, DistributionEntry> {
    build_distribution(vehicles.iter().map(|v| v.status.to_string()))
}

/// Agrupar por clave con porcentaje redondeado; el total se fija en 1
/// como mínimo para que un lote vacío produzca 0% en vez de dividir
/// por cero
fn build_distribution(keys: impl Iterator<Item = String>) -> BTreeMap<String, DistributionEntry> {
    let mut groups: BTreeMap<String, i64> = BTreeMap::new();
    let mut total: i64 = 0;
    for key in keys {
        *groups.entry(key).or_insert(0) += 1;
        total += 1;
    }

    let total = total.max(1);
    groups
        .into_iter()
        .map(|(key, count)| {
            let percent = ((count as f64 / total as f64) * 100.0).round() as i64;
            (key, DistributionEntry { count, percent })
        })
        .collect()
}

/// Incidentes por día de la semana de su creación, lunes primero
pub fn build_weekday_activity(incidents: &[Incident]) -> WeekdayActivity {
    let labels = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut counts = vec![0i64; 7];

    for incident in incidents {
        let idx = incident.created_at.weekday().num_days_from_monday() as usize;
        counts[idx] += 1;
    }

    WeekdayActivity { labels, counts }
}

/// Score de cumplimiento: promedio ponderado del estado de la flota,
/// como porcentaje redondeado. Flota vacía puntúa 0.
pub fn compliance_score(vehicles: &[Vehicle]) -> i64 {
    if vehicles.is_empty() {
        return 0;
    }

    let score: f64 = vehicles
        .iter()
        .map(|v| match v.status {
            VehicleStatus::Active => 1.0,
            VehicleStatus::Inactive => 0.6,
            VehicleStatus::Flagged => 0.4,
            VehicleStatus::Suspended => 0.3,
        })
        .sum();

    ((score / vehicles.len() as f64) * 100.0).round() as i64
}

/// Totales del resumen sobre un lote ya filtrado por rango
pub fn summary_totals(vehicles: &[Vehicle], incidents: &[Incident]) -> SummaryTotals {
    let resolved = incidents
        .iter()
        .filter(|i| i.status == IncidentStatus::Resolved)
        .count() as i64;
    let resolution_rate = if incidents.is_empty() {
        0
    } else {
        ((resolved as f64 / incidents.len() as f64) * 100.0).round() as i64
    };

    SummaryTotals {
        total_vehicles: vehicles.len() as i64,
        active_incidents: incidents
            .iter()
            .filter(|i| i.status == IncidentStatus::Reported)
            .count() as i64,
        resolution_rate,
        compliance_score: compliance_score(vehicles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::incident::{IncidentSeverity, IncidentType};
    use crate::models::vehicle::VehicleType;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn vehicle_created_at(status: VehicleStatus, created_at: DateTime<Utc>) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            vehicle_number: format!("KA01AB{:04}", created_at.timestamp() % 10000),
            vehicle_type: VehicleType::Truck,
            capacity_tons: None,
            gps_number: None,
            gps_id: None,
            owner_name: "Rajesh Kumar".to_string(),
            owner_phone: "+91 9876543210".to_string(),
            owner_address: "123 Main Street, Bangalore".to_string(),
            license_number: None,
            registration_date: created_at.date_naive(),
            status,
            last_activity: None,
            notes: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn incident_created_at(
        incident_type: IncidentType,
        status: IncidentStatus,
        created_at: DateTime<Utc>,
    ) -> Incident {
        Incident {
            id: Uuid::new_v4(),
            vehicle_id: None,
            vehicle_number: Some("KA01AB1234".to_string()),
            incident_type,
            description: "Vehicle found exceeding permitted limit".to_string(),
            location: "Highway NH-48, Checkpoint 3".to_string(),
            incident_date: created_at,
            severity: IncidentSeverity::Medium,
            status,
            reported_by: "Officer Sharma".to_string(),
            assigned_to: None,
            resolution_notes: None,
            evidence_files: None,
            estimated_damage: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_in_range_is_inclusive_at_both_ends() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        let first_instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let last_second = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        let next_day = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        assert!(in_range(first_instant, start, end));
        assert!(in_range(last_second, start, end));
        assert!(!in_range(next_day, start, end));
    }

    #[test]
    fn test_monthly_series_spans_every_month_even_when_empty() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();

        let series = build_monthly_series(start, end, &[], &[]);

        assert_eq!(series.labels, vec!["Jan", "Feb", "Mar"]);
        assert_eq!(series.incidents, vec![0, 0, 0]);
        assert_eq!(series.resolved, vec![0, 0, 0]);
        assert_eq!(series.vehicles, vec![0, 0, 0]);
    }

    #[test]
    fn test_monthly_series_crosses_year_boundary() {
        let start = NaiveDate::from_ymd_opt(2023, 11, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();

        let incidents = vec![
            incident_created_at(IncidentType::Overloading, IncidentStatus::Reported, at(2023, 12, 5)),
            incident_created_at(IncidentType::Accident, IncidentStatus::Resolved, at(2024, 1, 20)),
        ];
        let vehicles = vec![vehicle_created_at(VehicleStatus::Active, at(2024, 2, 1))];

        let series = build_monthly_series(start, end, &incidents, &vehicles);

        assert_eq!(series.labels, vec!["Nov", "Dec", "Jan", "Feb"]);
        assert_eq!(series.incidents, vec![0, 1, 1, 0]);
        assert_eq!(series.resolved, vec![0, 0, 1, 0]);
        assert_eq!(series.vehicles, vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_distribution_counts_and_percents() {
        let incidents = vec![
            incident_created_at(IncidentType::Overloading, IncidentStatus::Reported, at(2024, 1, 1)),
            incident_created_at(IncidentType::Overloading, IncidentStatus::Reported, at(2024, 1, 2)),
            incident_created_at(IncidentType::IllegalMining, IncidentStatus::Reported, at(2024, 1, 3)),
        ];

        let dist = build_incident_type_distribution(&incidents);

        assert_eq!(dist["overloading"], DistributionEntry { count: 2, percent: 67 });
        assert_eq!(dist["illegal_mining"], DistributionEntry { count: 1, percent: 33 });
    }

    #[test]
    fn test_distribution_percents_sum_within_rounding_error() {
        let incidents = vec![
            incident_created_at(IncidentType::Violation, IncidentStatus::Reported, at(2024, 1, 1)),
            incident_created_at(IncidentType::Accident, IncidentStatus::Reported, at(2024, 1, 2)),
            incident_created_at(IncidentType::Overloading, IncidentStatus::Reported, at(2024, 1, 3)),
            incident_created_at(IncidentType::IllegalMining, IncidentStatus::Reported, at(2024, 1, 4)),
            incident_created_at(IncidentType::Other, IncidentStatus::Reported, at(2024, 1, 5)),
            incident_created_at(IncidentType::Other, IncidentStatus::Reported, at(2024, 1, 6)),
            incident_created_at(IncidentType::Other, IncidentStatus::Reported, at(2024, 1, 7)),
        ];

        let dist = build_incident_type_distribution(&incidents);
        let groups = dist.len() as i64;
        let sum: i64 = dist.values().map(|e| e.percent).sum();

        assert!((sum - 100).abs() <= groups);
    }

    #[test]
    fn test_distribution_of_empty_batch_is_empty() {
        assert!(build_vehicle_status_distribution(&[]).is_empty());
    }

    #[test]
    fn test_weekday_activity_is_monday_first() {
        // 2024-01-01 fue lunes; 2024-01-07, domingo
        let incidents = vec![
            incident_created_at(IncidentType::Other, IncidentStatus::Reported, at(2024, 1, 1)),
            incident_created_at(IncidentType::Other, IncidentStatus::Reported, at(2024, 1, 1)),
            incident_created_at(IncidentType::Other, IncidentStatus::Reported, at(2024, 1, 7)),
        ];

        let activity = build_weekday_activity(&incidents);

        assert_eq!(activity.labels[0], "Mon");
        assert_eq!(activity.counts, vec![2, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_compliance_score_all_active_is_100() {
        let vehicles: Vec<Vehicle> = (0..5)
            .map(|i| vehicle_created_at(VehicleStatus::Active, at(2024, 1, 1 + i)))
            .collect();
        assert_eq!(compliance_score(&vehicles), 100);
    }

    #[test]
    fn test_compliance_score_empty_is_0() {
        assert_eq!(compliance_score(&[]), 0);
    }

    #[test]
    fn test_compliance_score_weighted_mix() {
        let vehicles = vec![
            vehicle_created_at(VehicleStatus::Active, at(2024, 1, 1)),
            vehicle_created_at(VehicleStatus::Suspended, at(2024, 1, 2)),
        ];
        // (1.0 + 0.3) / 2 = 0.65
        assert_eq!(compliance_score(&vehicles), 65);
    }

    #[test]
    fn test_summary_totals() {
        let vehicles = vec![
            vehicle_created_at(VehicleStatus::Active, at(2024, 1, 1)),
            vehicle_created_at(VehicleStatus::Flagged, at(2024, 1, 2)),
        ];
        let incidents = vec![
            incident_created_at(IncidentType::Overloading, IncidentStatus::Reported, at(2024, 1, 3)),
            incident_created_at(IncidentType::Accident, IncidentStatus::Resolved, at(2024, 1, 4)),
            incident_created_at(IncidentType::Violation, IncidentStatus::Resolved, at(2024, 1, 5)),
        ];

        let totals = summary_totals(&vehicles, &incidents);

        assert_eq!(totals.total_vehicles, 2);
        assert_eq!(totals.active_incidents, 1);
        assert_eq!(totals.resolution_rate, 67);
        // (1.0 + 0.4) / 2 = 0.7
        assert_eq!(totals.compliance_score, 70);
    }

    #[test]
    fn test_summary_totals_empty_batches() {
        let totals = summary_totals(&[], &[]);
        assert_eq!(totals.total_vehicles, 0);
        assert_eq!(totals.active_incidents, 0);
        assert_eq!(totals.resolution_rate, 0);
        assert_eq!(totals.compliance_score, 0);
    }

    #[test]
    fn test_filter_by_range_keeps_only_matching_records() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        let vehicles = vec![
            vehicle_created_at(VehicleStatus::Active, at(2024, 1, 15)),
            vehicle_created_at(VehicleStatus::Active, at(2024, 2, 15)),
        ];

        let filtered = filter_vehicles_by_range(&vehicles, start, end);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].created_at, at(2024, 1, 15));
    }
}
