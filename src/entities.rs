// VoltCity Testdata - Entity records
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Typed records for every entity in the relational dataset.
//!
//! Nullable columns are explicit `Option` fields. Identifiers and
//! foreign keys are opaque formatted strings and are never eligible for
//! defect injection; corruptible fields are noted on each record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three energy carriers of the platform.
///
/// Carries every energy-type-specific constant: meter prefixes, billing
/// ranges and prices, tariff bases, and hourly telemetry profiles. The
/// ranges are fixed and independent of defect injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyKind {
    /// Electricity, metered in kWh.
    Electricity,
    /// Water, metered in m3.
    Water,
    /// Gas, metered in m3.
    Gas,
}

impl EnergyKind {
    /// All kinds, in catalog order.
    pub const ALL: [EnergyKind; 3] = [EnergyKind::Electricity, EnergyKind::Water, EnergyKind::Gas];

    /// Small-integer catalog identifier.
    pub fn id(&self) -> u8 {
        match self {
            EnergyKind::Electricity => 1,
            EnergyKind::Water => 2,
            EnergyKind::Gas => 3,
        }
    }

    /// Look up a kind from its catalog identifier.
    pub fn from_id(id: u8) -> Option<EnergyKind> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            EnergyKind::Electricity => "Electricity",
            EnergyKind::Water => "Water",
            EnergyKind::Gas => "Gas",
        }
    }

    /// Lowercase slug used in telemetry documents and file names.
    pub fn slug(&self) -> &'static str {
        match self {
            EnergyKind::Electricity => "electricity",
            EnergyKind::Water => "water",
            EnergyKind::Gas => "gas",
        }
    }

    /// Unit of measurement.
    pub fn unit(&self) -> &'static str {
        match self {
            EnergyKind::Electricity => "kWh",
            EnergyKind::Water => "m3",
            EnergyKind::Gas => "m3",
        }
    }

    /// Meter identifier prefix.
    pub fn meter_prefix(&self) -> &'static str {
        match self {
            EnergyKind::Electricity => "ELEC",
            EnergyKind::Water => "WTR",
            EnergyKind::Gas => "GAS",
        }
    }

    /// Monthly billed consumption range, in `unit()`.
    pub fn consumption_range(&self) -> (f64, f64) {
        match self {
            EnergyKind::Electricity => (200.0, 2000.0),
            EnergyKind::Water => (10.0, 100.0),
            EnergyKind::Gas => (50.0, 500.0),
        }
    }

    /// Billed unit sale price.
    pub fn unit_sale_price(&self) -> f64 {
        match self {
            EnergyKind::Electricity => 0.15,
            EnergyKind::Water => 4.20,
            EnergyKind::Gas => 0.09,
        }
    }

    /// Base (purchase, sale) prices that tariff periods drift around.
    pub fn tariff_base(&self) -> (f64, f64) {
        match self {
            EnergyKind::Electricity => (0.08, 0.15),
            EnergyKind::Water => (2.50, 4.20),
            EnergyKind::Gas => (0.05, 0.09),
        }
    }

    /// Hourly telemetry base magnitude range.
    pub fn hourly_base_range(&self) -> (f64, f64) {
        match self {
            EnergyKind::Electricity => (80.0, 200.0),
            EnergyKind::Water => (0.5, 3.0),
            EnergyKind::Gas => (2.0, 8.0),
        }
    }

    /// JSON key carrying the hourly consumption magnitude.
    pub fn consumption_key(&self) -> &'static str {
        match self {
            EnergyKind::Electricity => "consumption_kwh",
            EnergyKind::Water => "consumption_m3",
            EnergyKind::Gas => "consumption_m3",
        }
    }
}

/// A district served by the platform. Root entity, seeded from the
/// fixed catalog. `name` is whitespace-corruptible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub country: String,
    pub city: String,
    pub postal_code: String,
}

/// Energy type catalog record as exported to the relational sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyType {
    pub id: u8,
    pub label: String,
    pub unit: String,
}

impl From<EnergyKind> for EnergyType {
    fn from(kind: EnergyKind) -> Self {
        Self {
            id: kind.id(),
            label: kind.label().to_string(),
            unit: kind.unit().to_string(),
        }
    }
}

/// Building usage classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    Residential,
    Commercial,
    Industrial,
    Mixed,
}

impl BuildingKind {
    /// All kinds, in draw order.
    pub const ALL: [BuildingKind; 4] = [
        BuildingKind::Residential,
        BuildingKind::Commercial,
        BuildingKind::Industrial,
        BuildingKind::Mixed,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            BuildingKind::Residential => "Residential",
            BuildingKind::Commercial => "Commercial",
            BuildingKind::Industrial => "Industrial",
            BuildingKind::Mixed => "Mixed",
        }
    }

    /// Monthly CO2 emission base rate per m2, used by the environmental
    /// reports.
    pub fn co2_rate_per_m2(&self) -> f64 {
        match self {
            BuildingKind::Residential => 0.15,
            BuildingKind::Commercial => 0.25,
            BuildingKind::Industrial => 0.45,
            BuildingKind::Mixed => 0.20,
        }
    }
}

/// A metered building.
///
/// `address` may be missing; `surface_m2` keeps its sign so that
/// incoherent negative surfaces survive into the exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub region_id: String,
    pub name: String,
    pub address: Option<String>,
    pub surface_m2: f64,
    pub kind: BuildingKind,
    pub floors: u8,
    pub built_year: i32,
}

/// Meter operational status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeterStatus {
    Active,
    Inactive,
    Maintenance,
}

impl MeterStatus {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            MeterStatus::Active => "Active",
            MeterStatus::Inactive => "Inactive",
            MeterStatus::Maintenance => "Maintenance",
        }
    }
}

/// A physical meter. Exactly one per (building, energy type) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meter {
    pub id: String,
    pub building_id: String,
    pub energy_type_id: u8,
    pub installed_on: NaiveDate,
    pub status: MeterStatus,
}

/// Individual person or organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientKind {
    Individual,
    Organization,
}

impl ClientKind {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ClientKind::Individual => "Individual",
            ClientKind::Organization => "Organization",
        }
    }
}

/// Client account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientStatus {
    Active,
    Inactive,
}

impl ClientStatus {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ClientStatus::Active => "Active",
            ClientStatus::Inactive => "Inactive",
        }
    }
}

/// A billable client. `first_name` is `None` for organizations; `email`
/// and `phone` are missing-corruptible, `email` additionally incoherence-
/// corruptible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub kind: ClientKind,
    pub address: String,
    pub region_id: String,
    pub registered_on: NaiveDate,
    pub status: ClientStatus,
}

/// Contract lifecycle status.
///
/// `Suspended` is representable for loaded datasets but never produced
/// by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    Active,
    Terminated,
    Suspended,
    Cancelled,
}

impl ContractStatus {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ContractStatus::Active => "Active",
            ContractStatus::Terminated => "Terminated",
            ContractStatus::Suspended => "Suspended",
            ContractStatus::Cancelled => "Cancelled",
        }
    }
}

/// A supply contract binding a client to a meter. A meter may carry
/// several contracts over time.
///
/// Invariant, enforced at construction: `status == Active` exactly when
/// `end` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub client_id: String,
    pub meter_id: String,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub status: ContractStatus,
}

impl Contract {
    /// End date used for billing: the contract end, or the configured
    /// horizon for open-ended contracts.
    pub fn effective_end(&self, horizon: NaiveDate) -> NaiveDate {
        self.end.unwrap_or(horizon)
    }
}

/// One tariff validity period for an energy type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    pub energy_type_id: u8,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
}

/// Invoice settlement state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Overdue => "Overdue",
        }
    }
}

/// A monthly invoice for one contract period. `amount_pre_tax` is
/// sign-corruptible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub contract_id: String,
    pub issued_on: NaiveDate,
    pub due_on: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub amount_pre_tax: f64,
    pub tax_rate: f64,
    pub amount_with_tax: f64,
    pub energy_cost: f64,
    pub consumption: f64,
    pub payment_status: PaymentStatus,
}

/// Payment channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Transfer,
    BankCard,
    DirectDebit,
    Cheque,
    Cash,
}

impl PaymentMethod {
    /// All methods, in draw order.
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Transfer,
        PaymentMethod::BankCard,
        PaymentMethod::DirectDebit,
        PaymentMethod::Cheque,
        PaymentMethod::Cash,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::BankCard => "Bank card",
            PaymentMethod::DirectDebit => "Direct debit",
            PaymentMethod::Cheque => "Cheque",
            PaymentMethod::Cash => "Cash",
        }
    }
}

/// Settlement of one paid invoice. The amount copies the invoice's
/// tax-inclusive amount; the payment date may precede or follow the due
/// date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub invoice_id: String,
    pub paid_on: NaiveDate,
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: String,
}

/// Daily temperature summary for a region.
///
/// `measured_on` is stored already rendered because the bad-date-format
/// defect can leave it in a non-canonical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub region_id: String,
    pub measured_on: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub avg_temp: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_kind_ids_roundtrip() {
        for kind in EnergyKind::ALL {
            assert_eq!(EnergyKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(EnergyKind::from_id(9), None);
    }

    #[test]
    fn test_energy_kind_constants() {
        assert_eq!(EnergyKind::Electricity.unit(), "kWh");
        assert_eq!(EnergyKind::Water.unit_sale_price(), 4.20);
        assert_eq!(EnergyKind::Gas.meter_prefix(), "GAS");
        assert_eq!(EnergyKind::Electricity.consumption_key(), "consumption_kwh");
        assert_eq!(EnergyKind::Water.consumption_key(), "consumption_m3");
    }

    #[test]
    fn test_co2_rates() {
        assert_eq!(BuildingKind::Residential.co2_rate_per_m2(), 0.15);
        assert_eq!(BuildingKind::Industrial.co2_rate_per_m2(), 0.45);
    }

    #[test]
    fn test_contract_effective_end() {
        let horizon = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let mut contract = Contract {
            id: "CTR000001".to_string(),
            client_id: "CLI00001".to_string(),
            meter_id: "ELEC_0001".to_string(),
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end: None,
            status: ContractStatus::Active,
        };
        assert_eq!(contract.effective_end(horizon), horizon);

        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        contract.end = Some(end);
        assert_eq!(contract.effective_end(horizon), end);
    }
}
