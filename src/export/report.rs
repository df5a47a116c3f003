// VoltCity Testdata - Environmental report export
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Monthly CSV environmental reports.
//!
//! One row per building and month: a CO2 emission estimate derived from
//! the building surface and usage kind with a seasonal factor, and a
//! recycling-rate estimate. Rows are individually corruptible and the
//! full set gets a duplicate fraction appended.

use crate::config::RunConfig;
use crate::dataset::RelationalDataset;
use crate::defects::DefectPolicy;
use crate::error::Result;
use chrono::{Datelike, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// One environmental report row.
///
/// `co2_emission_kg` is `None` when the missing-value defect fired; the
/// CSV writer renders that as an empty field, distinct from zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub region_id: String,
    pub building_id: String,
    pub report_date: String,
    pub co2_emission_kg: Option<f64>,
    pub recycling_rate: f64,
}

/// Derives monthly environmental reports from the generated buildings.
pub struct ReportExporter<'a> {
    dataset: &'a RelationalDataset,
    policy: DefectPolicy,
    rng: StdRng,
}

impl<'a> ReportExporter<'a> {
    /// Create an exporter with its own random stream seeded from the
    /// run configuration.
    pub fn new(dataset: &'a RelationalDataset, config: &RunConfig) -> Self {
        Self {
            dataset,
            policy: DefectPolicy::new(config.defects),
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// File name for one (month, year) artifact.
    pub fn file_name(year: i32, month: u32) -> String {
        format!("env_reports_{:02}_{}.csv", month, year)
    }

    /// Build the rows for one month.
    pub fn monthly_report(&mut self, year: i32, month: u32) -> Vec<ReportRow> {
        let report_date = last_day_of_month(year, month);
        let heating_season = matches!(month, 11 | 12 | 1..=3);

        let mut rows = Vec::with_capacity(self.dataset.buildings.len());

        for building in &self.dataset.buildings {
            let seasonal = if heating_season {
                self.rng.gen_range(1.3..1.8)
            } else {
                self.rng.gen_range(0.8..1.2)
            };
            let jitter = self.rng.gen_range(0.8..1.2);
            let emission = round2(
                building.surface_m2.abs() * building.kind.co2_rate_per_m2() * seasonal * jitter,
            );
            let recycling = round2(self.rng.gen_range(0.45..0.85));

            let mut row = ReportRow {
                region_id: building.region_id.clone(),
                building_id: building.id.clone(),
                report_date: String::new(),
                co2_emission_kg: self.policy.missing(&mut self.rng, emission),
                recycling_rate: recycling,
            };

            // Incoherent rows get either a negative emission or an
            // impossible recycling rate.
            if self.rng.gen::<f64>() < self.policy.rates().incoherent {
                if self.rng.gen::<f64>() < 0.5 {
                    row.co2_emission_kg = Some(-emission.abs());
                } else {
                    row.recycling_rate = round2(self.rng.gen_range(1.5..2.0));
                }
            }

            row.report_date = self.policy.render_date(&mut self.rng, report_date);
            row.building_id = self.policy.pad_identifier(&mut self.rng, &building.id);

            rows.push(row);
        }

        let duplicates = self.policy.duplicate_count(rows.len());
        for _ in 0..duplicates {
            let copy = rows[self.rng.gen_range(0..rows.len())].clone();
            rows.push(copy);
        }

        rows
    }

    /// Write one monthly report under `out_dir`.
    pub fn write_file(
        &mut self,
        year: i32,
        month: u32,
        out_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let rows = self.monthly_report(year, month);
        let path = out_dir.as_ref().join(Self::file_name(year, month));

        let file = File::create(&path)?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(path)
    }

    /// Write one report per month of `[from, to]`.
    pub fn write_files(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
        out_dir: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        let mut cursor = NaiveDate::from_ymd_opt(from.year(), from.month(), 1).unwrap();

        while cursor <= to {
            paths.push(self.write_file(cursor.year(), cursor.month(), out_dir.as_ref())?);
            cursor = next_month(cursor);
        }

        tracing::info!("reports: {} files", paths.len());
        Ok(paths)
    }
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    next_month(first).pred_opt().unwrap()
}

fn next_month(first_of_month: NaiveDate) -> NaiveDate {
    let (year, month) = if first_of_month.month() == 12 {
        (first_of_month.year() + 1, 1)
    } else {
        (first_of_month.year(), first_of_month.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefectRates;
    use crate::entities::{Building, BuildingKind, Region};

    fn dataset_with_building(surface: f64, kind: BuildingKind) -> RelationalDataset {
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
            surface_m2: surface,
            kind,
            floors: 4,
            built_year: 2010,
        });
        dataset
    }

    #[test]
    fn test_clean_commercial_january_row() {
        let dataset = dataset_with_building(1000.0, BuildingKind::Commercial);
        let config = RunConfig::new()
            .with_seed(42)
            .with_defects(DefectRates::none());
        let mut exporter = ReportExporter::new(&dataset, &config);

        let rows = exporter.monthly_report(2025, 1);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.region_id, "REG01");
        assert_eq!(row.building_id, "BLD001");
        assert_eq!(row.report_date, "2025-01-31");

        // emission = 1000 x 0.25 x seasonal(1.3..1.8) x jitter(0.8..1.2)
        let emission = row.co2_emission_kg.unwrap();
        assert!(emission >= 1000.0 * 0.25 * 1.3 * 0.8);
        assert!(emission <= 1000.0 * 0.25 * 1.8 * 1.2);
        assert!(row.recycling_rate >= 0.45 && row.recycling_rate <= 0.85);
    }

    #[test]
    fn test_negative_surface_emission_positive() {
        let dataset = dataset_with_building(-800.0, BuildingKind::Residential);
        let config = RunConfig::new().with_defects(DefectRates::none());
        let mut exporter = ReportExporter::new(&dataset, &config);

        let rows = exporter.monthly_report(2024, 6);
        let emission = rows[0].co2_emission_kg.unwrap();

        // |surface| x 0.15 x seasonal(0.8..1.2) x jitter(0.8..1.2)
        assert!(emission > 0.0);
        assert!(emission >= 800.0 * 0.15 * 0.8 * 0.8);
        assert!(emission <= 800.0 * 0.15 * 1.2 * 1.2);
    }

    #[test]
    fn test_duplicate_fraction_appended() {
        let mut dataset = dataset_with_building(1000.0, BuildingKind::Mixed);
        for seq in 2..=100 {
            let mut extra = dataset.buildings[0].clone();
            extra.id = format!("BLD{:03}", seq);
            dataset.buildings.push(extra);
        }

        let mut rates = DefectRates::none();
        rates.duplicate = 0.05;
        let config = RunConfig::new().with_defects(rates);
        let mut exporter = ReportExporter::new(&dataset, &config);

        let rows = exporter.monthly_report(2024, 6);
        assert_eq!(rows.len(), 105);
    }

    #[test]
    fn test_file_name_zero_padded() {
        assert_eq!(ReportExporter::file_name(2024, 3), "env_reports_03_2024.csv");
        assert_eq!(ReportExporter::file_name(2025, 12), "env_reports_12_2025.csv");
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(
            last_day_of_month(2024, 2),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            last_day_of_month(2024, 12),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_csv_layout_and_missing_field() {
        let dataset = dataset_with_building(1000.0, BuildingKind::Commercial);
        let mut rates = DefectRates::none();
        rates.missing = 1.0;
        let config = RunConfig::new().with_defects(rates);
        let mut exporter = ReportExporter::new(&dataset, &config);

        let dir = tempfile::tempdir().unwrap();
        let path = exporter.write_file(2024, 7, dir.path()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "region_id,building_id,report_date,co2_emission_kg,recycling_rate"
        );
        // Emission column is empty, not zero.
        let data = lines.next().unwrap();
        assert!(data.starts_with("REG01,BLD001,2024-07-31,,"));
    }

    #[test]
    fn test_monthly_file_per_month() {
        let dataset = dataset_with_building(1000.0, BuildingKind::Commercial);
        let config = RunConfig::new().with_defects(DefectRates::none());
        let mut exporter = ReportExporter::new(&dataset, &config);

        let dir = tempfile::tempdir().unwrap();
        let from = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let paths = exporter.write_files(from, to, dir.path()).unwrap();

        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with("env_reports_11_2024.csv"));
        assert!(paths[2].ends_with("env_reports_01_2025.csv"));
    }
}
