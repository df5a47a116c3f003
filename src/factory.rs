// VoltCity Testdata - Entity factories
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Per-entity generator functions.
//!
//! Every factory takes its required foreign keys as parameters and never
//! invents one; the pipeline is responsible for only passing ids of
//! records it has already appended. Corruption-eligible fields are
//! routed through the [`DefectPolicy`] explicitly; ids and foreign keys
//! are not.

use crate::catalog::{
    RegionSeed, BUILDING_PREFIXES, COMPANY_SUFFIXES, EMAIL_DOMAINS, FIRST_NAMES, LAST_NAMES,
    STREETS,
};
use crate::defects::DefectPolicy;
use crate::entities::{
    Building, BuildingKind, Client, ClientKind, ClientStatus, Contract, ContractStatus,
    EnergyKind, Invoice, Meter, MeterStatus, Payment, PaymentMethod, PaymentStatus, Region,
    TemperatureReading, Tariff,
};
use chrono::{Datelike, Duration, NaiveDate};
use rand::distributions::WeightedIndex;
use rand::prelude::*;

/// Meter install window.
const METER_INSTALL_EARLIEST: (i32, u32, u32) = (2015, 1, 1);
const METER_INSTALL_LATEST: (i32, u32, u32) = (2023, 12, 31);

/// Client registration window.
const REGISTRATION_EARLIEST: (i32, u32, u32) = (2020, 1, 1);
const REGISTRATION_LATEST: (i32, u32, u32) = (2024, 12, 31);

/// Contract start window.
const CONTRACT_START_EARLIEST: (i32, u32, u32) = (2022, 1, 1);
const CONTRACT_START_LATEST: (i32, u32, u32) = (2024, 6, 30);

/// Build a region record from its catalog seed.
pub fn region(seed: &RegionSeed, policy: &DefectPolicy, rng: &mut (impl Rng + ?Sized)) -> Region {
    Region {
        id: seed.id.to_string(),
        name: policy.whitespace(rng, seed.name),
        country: seed.country.to_string(),
        city: seed.city.to_string(),
        postal_code: seed.postal_code.to_string(),
    }
}

/// Generate a building in a region. `seq` is 1-based.
pub fn building(
    seq: usize,
    region_id: &str,
    policy: &DefectPolicy,
    rng: &mut (impl Rng + ?Sized),
) -> Building {
    let name = format!(
        "{} {}",
        BUILDING_PREFIXES.choose(rng).unwrap(),
        LAST_NAMES.choose(rng).unwrap()
    );

    let surface = round2(rng.gen_range(500.0..15000.0));
    // Two uncoordinated incoherence draws on the surface: the shared
    // numeric skew, then a direct sign flip.
    let surface = policy.skew_numeric(rng, surface);
    let surface = policy.sign_flip(rng, surface);

    let address = street_address(rng);

    Building {
        id: format!("BLD{:03}", seq),
        region_id: region_id.to_string(),
        name: policy.whitespace(rng, &name),
        address: policy.missing(rng, address),
        surface_m2: surface,
        kind: *BuildingKind::ALL.choose(rng).unwrap(),
        floors: rng.gen_range(1..=5),
        built_year: rng.gen_range(1980..=2023),
    }
}

/// Re-append a building under a fresh id, all other fields identical.
pub fn building_duplicate(original: &Building, seq: usize) -> Building {
    Building {
        id: format!("BLD{:03}", seq),
        ..original.clone()
    }
}

/// Generate the meter for one (building, energy type) pairing. `seq`
/// is the global 1-based meter sequence.
pub fn meter(
    seq: usize,
    building_id: &str,
    kind: EnergyKind,
    rng: &mut (impl Rng + ?Sized),
) -> Meter {
    // Mostly active.
    const STATUS_POOL: [MeterStatus; 5] = [
        MeterStatus::Active,
        MeterStatus::Active,
        MeterStatus::Active,
        MeterStatus::Inactive,
        MeterStatus::Maintenance,
    ];

    Meter {
        id: format!("{}_{:04}", kind.meter_prefix(), seq),
        building_id: building_id.to_string(),
        energy_type_id: kind.id(),
        installed_on: random_date_between(
            rng,
            date(METER_INSTALL_EARLIEST),
            date(METER_INSTALL_LATEST),
        ),
        status: *STATUS_POOL.choose(rng).unwrap(),
    }
}

/// Generate a client in a region. `seq` is 1-based.
pub fn client(
    seq: usize,
    region_id: &str,
    policy: &DefectPolicy,
    rng: &mut (impl Rng + ?Sized),
) -> Client {
    let kind = *[ClientKind::Individual, ClientKind::Organization]
        .choose(rng)
        .unwrap();

    let (name, first_name) = match kind {
        ClientKind::Individual => {
            let last = *LAST_NAMES.choose(rng).unwrap();
            let first = *FIRST_NAMES.choose(rng).unwrap();
            (last.to_string(), Some(first.to_string()))
        }
        ClientKind::Organization => {
            let name = format!(
                "{} {}",
                LAST_NAMES.choose(rng).unwrap(),
                COMPANY_SUFFIXES.choose(rng).unwrap()
            );
            (name, None)
        }
    };

    let local = match &first_name {
        Some(first) => format!("{}.{}", first.to_lowercase(), name.to_lowercase()),
        None => name.to_lowercase().replace(' ', "."),
    };
    let email = format!("{}@{}", local, EMAIL_DOMAINS.choose(rng).unwrap());
    let email = policy.corrupt_email(rng, &email);

    let status_weights = WeightedIndex::new([0.9, 0.1]).unwrap();
    let status = [ClientStatus::Active, ClientStatus::Inactive][status_weights.sample(rng)];

    let phone = phone_number(rng);
    let address = street_address(rng);

    Client {
        id: format!("CLI{:05}", seq),
        name: policy.whitespace(rng, &name),
        first_name: first_name.and_then(|f| policy.missing(rng, f)),
        email: policy.missing(rng, email),
        phone: policy.missing(rng, phone),
        kind,
        address,
        region_id: region_id.to_string(),
        registered_on: random_date_between(
            rng,
            date(REGISTRATION_EARLIEST),
            date(REGISTRATION_LATEST),
        ),
        status,
    }
}

/// Generate a contract between a client and a meter. `seq` is 1-based.
///
/// Status and end date are linked by construction: open-ended contracts
/// are `Active`, and a terminal status is only drawn when an end date
/// was assigned.
pub fn contract(
    seq: usize,
    client_id: &str,
    meter_id: &str,
    rng: &mut (impl Rng + ?Sized),
) -> Contract {
    let start = random_date_between(
        rng,
        date(CONTRACT_START_EARLIEST),
        date(CONTRACT_START_LATEST),
    );

    // 70% of contracts are ongoing.
    let (end, status) = if rng.gen::<f64>() < 0.7 {
        (None, ContractStatus::Active)
    } else {
        let end = start + Duration::days(rng.gen_range(180..=730));
        let status = *[ContractStatus::Terminated, ContractStatus::Cancelled]
            .choose(rng)
            .unwrap();
        (Some(end), status)
    };

    Contract {
        id: format!("CTR{:06}", seq),
        client_id: client_id.to_string(),
        meter_id: meter_id.to_string(),
        start,
        end,
        status,
    }
}

/// Generate one tariff validity period for an energy type. A single
/// variation draw drifts both the purchase and the sale price.
pub fn tariff(
    kind: EnergyKind,
    valid_from: NaiveDate,
    valid_to: NaiveDate,
    rng: &mut (impl Rng + ?Sized),
) -> Tariff {
    let (purchase, sale) = kind.tariff_base();
    let variation = rng.gen_range(0.95..1.15);

    Tariff {
        energy_type_id: kind.id(),
        purchase_price: round4(purchase * variation),
        sale_price: round4(sale * variation),
        valid_from,
        valid_to,
    }
}

/// Generate the monthly invoices of one contract.
///
/// A 30-day cursor walks from the contract start until the effective
/// end (contract end, or `horizon` for open-ended contracts) or until
/// `max_invoices` is reached. The final period is clamped to the
/// effective end. `first_seq` is the 1-based id of the first invoice
/// produced.
pub fn invoices_for_contract(
    contract: &Contract,
    kind: EnergyKind,
    first_seq: usize,
    max_invoices: usize,
    horizon: NaiveDate,
    policy: &DefectPolicy,
    rng: &mut (impl Rng + ?Sized),
) -> Vec<Invoice> {
    let effective_end = contract.effective_end(horizon);
    let status_weights = WeightedIndex::new([0.75, 0.15, 0.10]).unwrap();

    let mut invoices = Vec::new();
    let mut cursor = contract.start;

    while cursor < effective_end && invoices.len() < max_invoices {
        let period_start = cursor;
        let period_end = (cursor + Duration::days(30)).min(effective_end);

        let (lo, hi) = kind.consumption_range();
        let consumption = round2(rng.gen_range(lo..hi));
        let unit_price = kind.unit_sale_price();
        let energy_cost = round2(consumption * unit_price * 0.6);
        let amount_pre_tax = round2(consumption * unit_price);
        let amount_with_tax = round2(amount_pre_tax * 1.2);

        let payment_status = [
            PaymentStatus::Paid,
            PaymentStatus::Pending,
            PaymentStatus::Overdue,
        ][status_weights.sample(rng)];

        invoices.push(Invoice {
            id: format!("INV{:08}", first_seq + invoices.len()),
            contract_id: contract.id.clone(),
            issued_on: period_end,
            due_on: period_end + Duration::days(30),
            period_start,
            period_end,
            amount_pre_tax: policy.sign_flip(rng, amount_pre_tax),
            tax_rate: 20.0,
            amount_with_tax,
            energy_cost,
            consumption,
            payment_status,
        });

        cursor += Duration::days(30);
    }

    invoices
}

/// Generate the payment settling a paid invoice. `seq` is 1-based.
pub fn payment(seq: usize, invoice: &Invoice, rng: &mut (impl Rng + ?Sized)) -> Payment {
    const REFERENCE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    let offset = rng.gen_range(-15..=10);
    let reference: String = (0..12)
        .map(|_| REFERENCE_CHARSET[rng.gen_range(0..REFERENCE_CHARSET.len())] as char)
        .collect();

    Payment {
        id: format!("PAY{:08}", seq),
        invoice_id: invoice.id.clone(),
        paid_on: invoice.due_on + Duration::days(offset),
        amount: invoice.amount_with_tax,
        method: *PaymentMethod::ALL.choose(rng).unwrap(),
        reference,
    }
}

/// Generate the daily temperature summary for a region. One offset draw
/// shifts min, max and average together.
pub fn temperature(
    region_id: &str,
    day: NaiveDate,
    policy: &DefectPolicy,
    rng: &mut (impl Rng + ?Sized),
) -> TemperatureReading {
    let (min, max, avg) = seasonal_base(day.month());
    let offset = rng.gen_range(-3.0..3.0);

    TemperatureReading {
        region_id: region_id.to_string(),
        measured_on: policy.render_date(rng, day),
        min_temp: round2(min + offset),
        max_temp: round2(max + offset),
        avg_temp: round2(avg + offset),
    }
}

/// Seasonal (min, max, avg) temperature base by month.
fn seasonal_base(month: u32) -> (f64, f64, f64) {
    match month {
        12 | 1 | 2 => (-5.0, 10.0, 3.0), // winter
        3..=5 => (5.0, 20.0, 12.0),      // spring
        6..=8 => (15.0, 35.0, 25.0),     // summer
        _ => (5.0, 18.0, 11.0),          // autumn
    }
}

fn street_address(rng: &mut (impl Rng + ?Sized)) -> String {
    format!("{} {}", rng.gen_range(1..200), STREETS.choose(rng).unwrap())
}

fn phone_number(rng: &mut (impl Rng + ?Sized)) -> String {
    format!(
        "0{} {:02} {:02} {:02} {:02}",
        rng.gen_range(5..=7),
        rng.gen_range(0..100),
        rng.gen_range(0..100),
        rng.gen_range(0..100),
        rng.gen_range(0..100),
    )
}

fn random_date_between(
    rng: &mut (impl Rng + ?Sized),
    start: NaiveDate,
    end: NaiveDate,
) -> NaiveDate {
    let span = (end - start).num_days();
    start + Duration::days(rng.gen_range(0..=span))
}

fn date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
