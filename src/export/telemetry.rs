// VoltCity Testdata - Telemetry export
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Per-day, per-energy-type JSON telemetry files.
//!
//! For each day and energy type, one document holds the buildings that
//! carry at least one matching meter, grouped region by region, each
//! with 24 synthetic hourly readings per meter. The consumption
//! magnitude is nullable and carried under a unit-specific key.

use crate::config::RunConfig;
use crate::dataset::RelationalDataset;
use crate::defects::DefectPolicy;
use crate::entities::EnergyKind;
use crate::error::Result;
use chrono::{Datelike, Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// One building's telemetry for a day.
#[derive(Debug, Clone, Serialize)]
pub struct BuildingTelemetry {
    pub region_id: String,
    pub building_id: String,
    pub energy_type: String,
    pub unit: String,
    pub generated_on: String,
    pub readings: Vec<HourlyReading>,
}

/// One hourly meter reading.
///
/// Serialized with the magnitude under `key` (`consumption_kwh` or
/// `consumption_m3`), explicitly `null` when the value was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyReading {
    pub meter_id: String,
    pub measured_at: String,
    pub key: &'static str,
    pub value: Option<f64>,
}

impl Serialize for HourlyReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("meter_id", &self.meter_id)?;
        map.serialize_entry("measured_at", &self.measured_at)?;
        map.serialize_entry(self.key, &self.value)?;
        map.end()
    }
}

/// Derives hourly consumption telemetry from the generated buildings
/// and meters.
pub struct TelemetryExporter<'a> {
    dataset: &'a RelationalDataset,
    policy: DefectPolicy,
    rng: StdRng,
}

impl<'a> TelemetryExporter<'a> {
    /// Create an exporter with its own random stream seeded from the
    /// run configuration.
    pub fn new(dataset: &'a RelationalDataset, config: &RunConfig) -> Self {
        Self {
            dataset,
            policy: DefectPolicy::new(config.defects),
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// File name for one (energy type, day) artifact.
    pub fn file_name(kind: EnergyKind, day: NaiveDate) -> String {
        format!(
            "{}_consumption_{:02}_{:02}_{}.json",
            kind.label(),
            day.day(),
            day.month(),
            day.year(),
        )
    }

    /// Build the document for one energy type and day. Buildings with
    /// no matching meter yield no entry.
    pub fn daily_document(&mut self, kind: EnergyKind, day: NaiveDate) -> Vec<BuildingTelemetry> {
        let mut documents = Vec::new();

        for region in &self.dataset.regions {
            for building in self.dataset.region_buildings(&region.id) {
                let meters = self.dataset.building_meters(&building.id, kind.id());
                if meters.is_empty() {
                    continue;
                }

                let mut readings = Vec::new();
                for meter in meters {
                    readings.extend(hourly_readings(
                        &self.policy,
                        &mut self.rng,
                        &meter.id,
                        kind,
                        day,
                    ));
                }

                documents.push(BuildingTelemetry {
                    region_id: region.id.clone(),
                    building_id: building.id.clone(),
                    energy_type: kind.slug().to_string(),
                    unit: kind.unit().to_string(),
                    generated_on: day.format("%Y-%m-%d").to_string(),
                    readings,
                });
            }
        }

        documents
    }

    /// Write one (energy type, day) document under `out_dir`.
    pub fn write_file(
        &mut self,
        kind: EnergyKind,
        day: NaiveDate,
        out_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let documents = self.daily_document(kind, day);
        let path = out_dir.as_ref().join(Self::file_name(kind, day));

        let file = File::create(&path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &documents)?;
        Ok(path)
    }

    /// Write documents for every day of `[from, to]` and all three
    /// energy types.
    pub fn write_files(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
        out_dir: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        let mut day = from;

        while day <= to {
            for kind in EnergyKind::ALL {
                paths.push(self.write_file(kind, day, out_dir.as_ref())?);
            }
            day += Duration::days(1);
        }

        tracing::info!("telemetry: {} files", paths.len());
        Ok(paths)
    }
}

/// 24 hourly readings for one meter, plus an occasional duplicate.
fn hourly_readings(
    policy: &DefectPolicy,
    rng: &mut StdRng,
    meter_id: &str,
    kind: EnergyKind,
    day: NaiveDate,
) -> Vec<HourlyReading> {
    let (lo, hi) = kind.hourly_base_range();
    let mut readings = Vec::with_capacity(24);

    for hour in 0..24u32 {
        let mut base = rng.gen_range(lo..hi);
        match kind {
            // Daytime load.
            EnergyKind::Electricity => {
                if (8..=18).contains(&hour) {
                    base *= rng.gen_range(1.2..1.8);
                }
            }
            // Morning and evening peaks.
            EnergyKind::Water => {
                if matches!(hour, 7..=9 | 18..=20) {
                    base *= rng.gen_range(1.5..2.5);
                }
            }
            // Heating season.
            EnergyKind::Gas => {
                if matches!(day.month(), 11 | 12 | 1..=3) {
                    base *= rng.gen_range(1.5..2.5);
                }
            }
        }

        // Timestamp stays intact; only the magnitude is corruptible.
        let measured_at = day
            .and_hms_opt(hour, 0, 0)
            .unwrap()
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string();

        let value = policy
            .missing(rng, base)
            .map(|v| round2(policy.skew_numeric(rng, v)));

        readings.push(HourlyReading {
            meter_id: meter_id.to_string(),
            measured_at,
            key: kind.consumption_key(),
            value,
        });
    }

    if policy.extra_reading_duplicate(rng) {
        let copy = readings[rng.gen_range(0..readings.len())].clone();
        readings.push(copy);
    }

    readings
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefectRates;
    use crate::entities::{Building, BuildingKind, Meter, MeterStatus, Region};

    fn fixture_dataset() -> RelationalDataset {
        let mut dataset = RelationalDataset::new();
        dataset.regions.push(Region {
            id: "REG01".to_string(),
            name: "Old Harbour Northport".to_string(),
            country: "Meridia".to_string(),
            city: "Northport".to_string(),
            postal_code: "41000".to_string(),
        });
        dataset.buildings.push(Building {
            id: "BLD001".to_string(),
            region_id: "REG01".to_string(),
            name: "Tower Ashford".to_string(),
            address: None,
            surface_m2: 1200.0,
            kind: BuildingKind::Commercial,
            floors: 3,
            built_year: 2001,
        });
        dataset.buildings.push(Building {
            id: "BLD002".to_string(),
            region_id: "REG01".to_string(),
            name: "Block Novak".to_string(),
            address: None,
            surface_m2: 800.0,
            kind: BuildingKind::Residential,
            floors: 2,
            built_year: 1995,
        });
        // Only BLD001 is metered for electricity.
        dataset.meters.push(Meter {
            id: "ELEC_0001".to_string(),
            building_id: "BLD001".to_string(),
            energy_type_id: 1,
            installed_on: NaiveDate::from_ymd_opt(2019, 3, 1).unwrap(),
            status: MeterStatus::Active,
        });
        dataset
    }

    fn clean_config() -> RunConfig {
        RunConfig::new().with_defects(DefectRates::none())
    }

    #[test]
    fn test_unmetered_building_omitted() {
        let dataset = fixture_dataset();
        let mut exporter = TelemetryExporter::new(&dataset, &clean_config());

        let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let documents = exporter.daily_document(EnergyKind::Electricity, day);

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].building_id, "BLD001");

        // No water meters at all.
        assert!(exporter.daily_document(EnergyKind::Water, day).is_empty());
    }

    #[test]
    fn test_hourly_shape_and_daytime_profile() {
        let dataset = fixture_dataset();
        let mut exporter = TelemetryExporter::new(&dataset, &clean_config());

        let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let documents = exporter.daily_document(EnergyKind::Electricity, day);
        let readings = &documents[0].readings;

        assert_eq!(readings.len(), 24);
        assert_eq!(readings[0].measured_at, "2025-01-05T00:00:00");
        assert_eq!(readings[23].measured_at, "2025-01-05T23:00:00");

        for (hour, reading) in readings.iter().enumerate() {
            let value = reading.value.unwrap();
            if (8..=18).contains(&hour) {
                assert!(value >= 80.0 * 1.2 && value <= 200.0 * 1.8);
            } else {
                assert!(value >= 80.0 && value <= 200.0);
            }
        }
    }

    #[test]
    fn test_unit_specific_key() {
        let dataset = fixture_dataset();
        let mut exporter = TelemetryExporter::new(&dataset, &clean_config());

        let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let documents = exporter.daily_document(EnergyKind::Electricity, day);
        let json = serde_json::to_string(&documents).unwrap();

        assert!(json.contains("\"consumption_kwh\""));
        assert!(!json.contains("\"consumption_m3\""));
        assert!(json.contains("\"energy_type\":\"electricity\""));
    }

    #[test]
    fn test_missing_value_serialized_as_null() {
        let reading = HourlyReading {
            meter_id: "ELEC_0001".to_string(),
            measured_at: "2025-01-05T03:00:00".to_string(),
            key: "consumption_kwh",
            value: None,
        };
        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"consumption_kwh\":null"));
    }

    #[test]
    fn test_file_name_zero_padded() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(
            TelemetryExporter::file_name(EnergyKind::Electricity, day),
            "Electricity_consumption_05_01_2025.json"
        );
        assert_eq!(
            TelemetryExporter::file_name(EnergyKind::Gas, day),
            "Gas_consumption_05_01_2025.json"
        );
    }

    #[test]
    fn test_write_files_per_day_and_kind() {
        let dataset = fixture_dataset();
        let mut exporter = TelemetryExporter::new(&dataset, &clean_config());
        let dir = tempfile::tempdir().unwrap();

        let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let paths = exporter.write_files(from, to, dir.path()).unwrap();

        // 3 days x 3 energy types.
        assert_eq!(paths.len(), 9);
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_deterministic_documents() {
        let dataset = fixture_dataset();
        let config = RunConfig::new();
        let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();

        let mut a = TelemetryExporter::new(&dataset, &config);
        let mut b = TelemetryExporter::new(&dataset, &config);

        let doc_a = serde_json::to_string(&a.daily_document(EnergyKind::Gas, day)).unwrap();
        let doc_b = serde_json::to_string(&b.daily_document(EnergyKind::Gas, day)).unwrap();
        assert_eq!(doc_a, doc_b);
    }
}
