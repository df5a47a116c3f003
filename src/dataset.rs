// VoltCity Testdata - Relational dataset
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! In-memory relational dataset accumulated by the pipeline.
//!
//! Collections are append-only during generation; no record is mutated
//! after being appended (duplicate rows are additional appends). The
//! exporters consume the dataset read-only.

use crate::entities::{
    Building, Client, Contract, EnergyType, Invoice, Meter, Payment, Region, TemperatureReading,
    Tariff,
};
use serde::{Deserialize, Serialize};

/// The full generated dataset, collections in dependency order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationalDataset {
    pub regions: Vec<Region>,
    pub energy_types: Vec<EnergyType>,
    pub buildings: Vec<Building>,
    pub meters: Vec<Meter>,
    pub clients: Vec<Client>,
    pub contracts: Vec<Contract>,
    pub tariffs: Vec<Tariff>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<Payment>,
    pub temperatures: Vec<TemperatureReading>,
}

impl RelationalDataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a meter by id.
    pub fn meter(&self, id: &str) -> Option<&Meter> {
        self.meters.iter().find(|m| m.id == id)
    }

    /// Meters installed in a building for one energy type.
    pub fn building_meters(&self, building_id: &str, energy_type_id: u8) -> Vec<&Meter> {
        self.meters
            .iter()
            .filter(|m| m.building_id == building_id && m.energy_type_id == energy_type_id)
            .collect()
    }

    /// Buildings located in a region.
    pub fn region_buildings(&self, region_id: &str) -> Vec<&Building> {
        self.buildings
            .iter()
            .filter(|b| b.region_id == region_id)
            .collect()
    }

    /// Total record count across all collections.
    pub fn total_records(&self) -> usize {
        self.regions.len()
            + self.energy_types.len()
            + self.buildings.len()
            + self.meters.len()
            + self.clients.len()
            + self.contracts.len()
            + self.tariffs.len()
            + self.invoices.len()
            + self.payments.len()
            + self.temperatures.len()
    }

    /// Per-collection counts, in dependency order, for run summaries.
    pub fn counts(&self) -> [(&'static str, usize); 10] {
        [
            ("regions", self.regions.len()),
            ("energy_types", self.energy_types.len()),
            ("buildings", self.buildings.len()),
            ("meters", self.meters.len()),
            ("clients", self.clients.len()),
            ("contracts", self.contracts.len()),
            ("tariffs", self.tariffs.len()),
            ("invoices", self.invoices.len()),
            ("payments", self.payments.len()),
            ("temperatures", self.temperatures.len()),
        ]
    }
}
