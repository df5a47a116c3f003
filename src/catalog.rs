// VoltCity Testdata - Fixed catalogs
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Fixed seed catalogs and name pools.
//!
//! Regions and energy types come from closed catalogs so that every run
//! shares the same root identifiers. The name pools replace an external
//! fake-data service; drawing from fixed pools keeps output reproducible
//! from the seed alone.

/// One region catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct RegionSeed {
    /// Stable region identifier.
    pub id: &'static str,
    /// District name.
    pub name: &'static str,
    /// Country.
    pub country: &'static str,
    /// City the district belongs to.
    pub city: &'static str,
    /// Postal code.
    pub postal_code: &'static str,
}

/// Region catalog: districts of the two VoltCity pilot cities.
pub const REGIONS: [RegionSeed; 8] = [
    RegionSeed {
        id: "REG01",
        name: "Old Harbour Northport",
        country: "Meridia",
        city: "Northport",
        postal_code: "41000",
    },
    RegionSeed {
        id: "REG02",
        name: "Milldown Northport",
        country: "Meridia",
        city: "Northport",
        postal_code: "41000",
    },
    RegionSeed {
        id: "REG03",
        name: "Ferry Quarter Northport",
        country: "Meridia",
        city: "Northport",
        postal_code: "41000",
    },
    RegionSeed {
        id: "REG04",
        name: "Saltmarsh Northport",
        country: "Meridia",
        city: "Northport",
        postal_code: "41000",
    },
    RegionSeed {
        id: "REG05",
        name: "City Centre Easthaven",
        country: "Meridia",
        city: "Easthaven",
        postal_code: "43000",
    },
    RegionSeed {
        id: "REG06",
        name: "Garrison Hill Easthaven",
        country: "Meridia",
        city: "Easthaven",
        postal_code: "43000",
    },
    RegionSeed {
        id: "REG07",
        name: "Lantern District Easthaven",
        country: "Meridia",
        city: "Easthaven",
        postal_code: "43000",
    },
    RegionSeed {
        id: "REG08",
        name: "Brookside Easthaven",
        country: "Meridia",
        city: "Easthaven",
        postal_code: "43000",
    },
];

/// Building name prefixes.
pub const BUILDING_PREFIXES: [&str; 6] =
    ["Tower", "Residence", "Block", "Centre", "Complex", "Pavilion"];

/// Family names shared by clients and building names.
pub const LAST_NAMES: [&str; 20] = [
    "Ashford", "Bellamy", "Carmody", "Delacroix", "Eriksen", "Farrow", "Granger", "Holloway",
    "Ibarra", "Jespersen", "Kovacs", "Lindqvist", "Marchetti", "Novak", "Oyelaran", "Pemberton",
    "Quintana", "Rasmussen", "Soriano", "Thackeray",
];

/// Given names for individual clients.
pub const FIRST_NAMES: [&str; 16] = [
    "Adele", "Bruno", "Clara", "Darius", "Elena", "Felix", "Greta", "Hugo", "Ines", "Jonas",
    "Katia", "Leo", "Mira", "Nadia", "Oscar", "Petra",
];

/// Suffixes for organization names.
pub const COMPANY_SUFFIXES: [&str; 6] =
    ["Group", "Holdings", "Energy", "Logistics", "Properties", "Services"];

/// Street names for addresses.
pub const STREETS: [&str; 12] = [
    "Harbour Lane",
    "Mill Road",
    "Ferry Street",
    "Saltmarsh Way",
    "Garrison Avenue",
    "Lantern Walk",
    "Brook Street",
    "Quay Crescent",
    "Foundry Row",
    "Beacon Rise",
    "Orchard Close",
    "Tidewater Drive",
];

/// Email domains for generated clients.
pub const EMAIL_DOMAINS: [&str; 3] = ["example.com", "example.org", "mail.example.net"];
