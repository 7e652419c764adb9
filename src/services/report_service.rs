//! Servicio de reportes
//!
//! Serialización determinista a texto plano de los lotes de registros y
//! del resumen de analytics, para descarga. Sin formato binario y sin
//! versionado de schema.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::models::incident::Incident;
use crate::models::vehicle::Vehicle;
use crate::services::analytics_service::{
    in_range, DistributionEntry, MonthlySeries, SummaryTotals,
};

fn range_label(from: Option<NaiveDate>, to: Option<NaiveDate>) -> String {
    let from = from.map_or("All".to_string(), |d| d.to_string());
    let to = to.map_or("Now".to_string(), |d| d.to_string());
    format!("({} to {})", from, to)
}

fn in_optional_range(
    ts: chrono::DateTime<chrono::Utc>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> bool {
    let from = from.unwrap_or(NaiveDate::MIN);
    let to = to.unwrap_or(NaiveDate::MAX);
    in_range(ts, from, to)
}

/// Reporte de registros de vehículos
pub fn vehicles_report(
    vehicles: &[Vehicle],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> String {
    let mut out = String::new();
    writeln!(out, "Vehicle Records {}", range_label(from, to)).unwrap();
    writeln!(out).unwrap();

    for v in vehicles.iter().filter(|v| in_optional_range(v.created_at, from, to)) {
        let capacity = v
            .capacity_tons
            .map_or("-".to_string(), |c| c.to_string());
        writeln!(
            out,
            "- {} | {} | cap:{}t | GPS:{} / {}",
            v.vehicle_number,
            v.vehicle_type,
            capacity,
            v.gps_number.as_deref().unwrap_or("-"),
            v.gps_id.as_deref().unwrap_or("-"),
        )
        .unwrap();
        writeln!(
            out,
            "  Owner: {} ({}) | Status: {} | Reg: {}",
            v.owner_name, v.owner_phone, v.status, v.registration_date,
        )
        .unwrap();
    }

    out
}

/// Reporte de incidentes
pub fn incidents_report(
    incidents: &[Incident],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> String {
    let mut out = String::new();
    writeln!(out, "Incident Report {}", range_label(from, to)).unwrap();
    writeln!(out).unwrap();

    for i in incidents.iter().filter(|i| in_optional_range(i.created_at, from, to)) {
        let vehicle_ref = i
            .vehicle_number
            .clone()
            .or_else(|| i.vehicle_id.map(|id| id.to_string()))
            .unwrap_or_default();
        writeln!(out, "- {} | {} | {} | {}", i.id, i.incident_type, i.status, vehicle_ref).unwrap();
        writeln!(
            out,
            "  {} | {} | {}",
            i.location,
            i.severity,
            i.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        )
        .unwrap();
        writeln!(out, "  {}", i.description).unwrap();
    }

    out
}

/// Sección de métricas de cumplimiento
pub fn compliance_section(
    vehicles: &[Vehicle],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> String {
    let mut statuses: BTreeMap<String, i64> = BTreeMap::new();
    let mut total: i64 = 0;
    for v in vehicles.iter().filter(|v| in_optional_range(v.created_at, from, to)) {
        *statuses.entry(v.status.to_string()).or_insert(0) += 1;
        total += 1;
    }

    let total = total.max(1);
    let mut out = String::new();
    writeln!(out, "Compliance Metrics").unwrap();
    for (status, count) in statuses {
        let percent = ((count as f64 / total as f64) * 100.0).round() as i64;
        writeln!(out, "- {}: {} ({}%)", status, count, percent).unwrap();
    }

    out
}

/// Reporte del resumen de analytics, con el mismo contenido que expone
/// el endpoint de summary
pub fn analytics_report(
    start: NaiveDate,
    end: NaiveDate,
    totals: &SummaryTotals,
    incident_type_dist: &BTreeMap<String, DistributionEntry>,
    vehicle_status_dist: &BTreeMap<String, DistributionEntry>,
    monthly: &MonthlySeries,
) -> String {
    let mut out = String::new();
    writeln!(out, "Analytics Report ({} to {})", start, end).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Total Vehicles: {}", totals.total_vehicles).unwrap();
    writeln!(out, "Active Incidents: {}", totals.active_incidents).unwrap();
    writeln!(out, "Resolution Rate: {}%", totals.resolution_rate).unwrap();
    writeln!(out, "Compliance Score: {}%", totals.compliance_score).unwrap();
    writeln!(out).unwrap();

    writeln!(out, "Incident Types Distribution:").unwrap();
    for (key, entry) in incident_type_dist {
        writeln!(out, "- {}: {} ({}%)", key, entry.count, entry.percent).unwrap();
    }
    writeln!(out).unwrap();

    writeln!(out, "Vehicle Status Overview:").unwrap();
    for (key, entry) in vehicle_status_dist {
        writeln!(out, "- {}: {} ({}%)", key, entry.count, entry.percent).unwrap();
    }
    writeln!(out).unwrap();

    writeln!(out, "Monthly Trends:").unwrap();
    for (idx, label) in monthly.labels.iter().enumerate() {
        writeln!(
            out,
            "{}: Incidents={}, Resolved={}, Vehicles={}",
            label, monthly.incidents[idx], monthly.resolved[idx], monthly.vehicles[idx],
        )
        .unwrap();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::incident::{IncidentSeverity, IncidentStatus, IncidentType};
    use crate::models::vehicle::{VehicleStatus, VehicleType};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn sample_vehicle() -> Vehicle {
        Vehicle {
            id: Uuid::nil(),
            vehicle_number: "KA01AB1234".to_string(),
            vehicle_type: VehicleType::Truck,
            capacity_tons: Some(Decimal::new(15, 0)),
            gps_number: Some("GPS-0001".to_string()),
            gps_id: Some("A1B2C3".to_string()),
            owner_name: "Rajesh Kumar".to_string(),
            owner_phone: "+91 9876543210".to_string(),
            owner_address: "123 Main Street, Bangalore".to_string(),
            license_number: Some("DL123456789".to_string()),
            registration_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: VehicleStatus::Active,
            last_activity: None,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
        }
    }

    fn sample_incident() -> Incident {
        Incident {
            id: Uuid::nil(),
            vehicle_id: None,
            vehicle_number: Some("KA01AB1234".to_string()),
            incident_type: IncidentType::Overloading,
            description: "Vehicle found carrying 20 tons of sand".to_string(),
            location: "Highway NH-48, Checkpoint 3".to_string(),
            incident_date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            severity: IncidentSeverity::High,
            status: IncidentStatus::Investigating,
            reported_by: "Officer Sharma".to_string(),
            assigned_to: None,
            resolution_notes: None,
            evidence_files: None,
            estimated_damage: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_vehicles_report_contains_record_lines() {
        let report = vehicles_report(&[sample_vehicle()], None, None);

        assert!(report.starts_with("Vehicle Records (All to Now)"));
        assert!(report.contains("- KA01AB1234 | truck | cap:15t | GPS:GPS-0001 / A1B2C3"));
        assert!(report.contains("Owner: Rajesh Kumar (+91 9876543210) | Status: active | Reg: 2024-01-15"));
    }

    #[test]
    fn test_vehicles_report_dashes_for_missing_optionals() {
        let mut vehicle = sample_vehicle();
        vehicle.capacity_tons = None;
        vehicle.gps_number = None;
        vehicle.gps_id = None;

        let report = vehicles_report(&[vehicle], None, None);
        assert!(report.contains("cap:-t | GPS:- / -"));
    }

    #[test]
    fn test_incidents_report_respects_date_range() {
        let from = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let report = incidents_report(&[sample_incident()], Some(from), None);

        assert!(report.starts_with("Incident Report (2024-02-01 to Now)"));
        assert!(!report.contains("KA01AB1234"));
    }

    #[test]
    fn test_compliance_section_percentages() {
        let mut flagged = sample_vehicle();
        flagged.status = VehicleStatus::Flagged;

        let report = compliance_section(&[sample_vehicle(), flagged], None, None);
        assert!(report.contains("- active: 1 (50%)"));
        assert!(report.contains("- flagged: 1 (50%)"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let vehicles = vec![sample_vehicle()];
        let incidents = vec![sample_incident()];

        assert_eq!(
            vehicles_report(&vehicles, None, None),
            vehicles_report(&vehicles, None, None)
        );
        assert_eq!(
            incidents_report(&incidents, None, None),
            incidents_report(&incidents, None, None)
        );
    }

    #[test]
    fn test_analytics_report_sections() {
        let totals = SummaryTotals {
            total_vehicles: 2,
            active_incidents: 1,
            resolution_rate: 50,
            compliance_score: 70,
        };
        let mut type_dist = BTreeMap::new();
        type_dist.insert("overloading".to_string(), DistributionEntry { count: 1, percent: 100 });
        let status_dist = BTreeMap::new();
        let monthly = MonthlySeries {
            labels: vec!["Jan".to_string()],
            incidents: vec![1],
            resolved: vec![0],
            vehicles: vec![2],
        };

        let report = analytics_report(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            &totals,
            &type_dist,
            &status_dist,
            &monthly,
        );

        assert!(report.contains("Analytics Report (2024-01-01 to 2024-01-31)"));
        assert!(report.contains("Compliance Score: 70%"));
        assert!(report.contains("- overloading: 1 (100%)"));
        assert!(report.contains("Jan: Incidents=1, Resolved=0, Vehicles=2"));
    }
}
