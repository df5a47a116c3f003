// VoltCity Testdata - Relational export
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! SQL insert-statement synthesis.
//!
//! Emits one text document with a grouped insert block per entity type,
//! in the same dependency order the pipeline generates them, bracketed
//! by constraint-check directives so the document loads even with
//! ordering slack. This is text synthesis only; nothing is executed.

use crate::dataset::RelationalDataset;
use crate::error::Result;
use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serializes a dataset into grouped SQL insert statements.
pub struct RelationalExporter<'a> {
    dataset: &'a RelationalDataset,
}

impl<'a> RelationalExporter<'a> {
    /// Create an exporter over a completed dataset.
    pub fn new(dataset: &'a RelationalDataset) -> Self {
        Self { dataset }
    }

    /// Write the full insert document to a sink.
    pub fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "-- VoltCity synthetic dataset")?;
        writeln!(out, "-- Grouped inserts, dependency order")?;
        writeln!(out)?;
        writeln!(out, "SET FOREIGN_KEY_CHECKS = 0;")?;

        self.write_regions(out)?;
        self.write_energy_types(out)?;
        self.write_buildings(out)?;
        self.write_meters(out)?;
        self.write_clients(out)?;
        self.write_contracts(out)?;
        self.write_tariffs(out)?;
        self.write_invoices(out)?;
        self.write_payments(out)?;
        self.write_temperatures(out)?;

        writeln!(out)?;
        writeln!(out, "SET FOREIGN_KEY_CHECKS = 1;")?;
        Ok(())
    }

    /// Write the insert document to a file.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Render the insert document to a string.
    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        // The document is pure ASCII-escaped UTF-8.
        Ok(String::from_utf8(buf).unwrap())
    }

    fn write_regions<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n-- regions")?;
        for r in &self.dataset.regions {
            writeln!(
                out,
                "INSERT INTO regions (id, name, country, city, postal_code) VALUES \
                 ({}, {}, {}, {}, {});",
                quoted(&r.id),
                quoted(&r.name),
                quoted(&r.country),
                quoted(&r.city),
                quoted(&r.postal_code),
            )?;
        }
        Ok(())
    }

    fn write_energy_types<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n-- energy_types")?;
        for t in &self.dataset.energy_types {
            writeln!(
                out,
                "INSERT INTO energy_types (id, label, unit) VALUES ({}, {}, {});",
                t.id,
                quoted(&t.label),
                quoted(&t.unit),
            )?;
        }
        Ok(())
    }

    fn write_buildings<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n-- buildings")?;
        for b in &self.dataset.buildings {
            writeln!(
                out,
                "INSERT INTO buildings (id, region_id, name, address, surface_m2, \
                 building_kind, floors, built_year) VALUES \
                 ({}, {}, {}, {}, {}, {}, {}, {});",
                quoted(&b.id),
                quoted(&b.region_id),
                quoted(&b.name),
                opt_quoted(b.address.as_deref()),
                b.surface_m2,
                quoted(b.kind.label()),
                b.floors,
                b.built_year,
            )?;
        }
        Ok(())
    }

    fn write_meters<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n-- meters")?;
        for m in &self.dataset.meters {
            writeln!(
                out,
                "INSERT INTO meters (id, building_id, energy_type_id, installed_on, status) \
                 VALUES ({}, {}, {}, {}, {});",
                quoted(&m.id),
                quoted(&m.building_id),
                m.energy_type_id,
                quoted_date(m.installed_on),
                quoted(m.status.label()),
            )?;
        }
        Ok(())
    }

    fn write_clients<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n-- clients")?;
        for c in &self.dataset.clients {
            writeln!(
                out,
                "INSERT INTO clients (id, name, first_name, email, phone, client_kind, \
                 address, region_id, registered_on, status) VALUES \
                 ({}, {}, {}, {}, {}, {}, {}, {}, {}, {});",
                quoted(&c.id),
                quoted(&c.name),
                opt_quoted(c.first_name.as_deref()),
                opt_quoted(c.email.as_deref()),
                opt_quoted(c.phone.as_deref()),
                quoted(c.kind.label()),
                quoted(&c.address),
                quoted(&c.region_id),
                quoted_date(c.registered_on),
                quoted(c.status.label()),
            )?;
        }
        Ok(())
    }

    fn write_contracts<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n-- contracts")?;
        for c in &self.dataset.contracts {
            writeln!(
                out,
                "INSERT INTO contracts (id, client_id, meter_id, start_date, end_date, status) \
                 VALUES ({}, {}, {}, {}, {}, {});",
                quoted(&c.id),
                quoted(&c.client_id),
                quoted(&c.meter_id),
                quoted_date(c.start),
                opt_quoted_date(c.end),
                quoted(c.status.label()),
            )?;
        }
        Ok(())
    }

    fn write_tariffs<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n-- tariffs")?;
        for t in &self.dataset.tariffs {
            writeln!(
                out,
                "INSERT INTO tariffs (energy_type_id, purchase_price, sale_price, valid_from, \
                 valid_to) VALUES ({}, {}, {}, {}, {});",
                t.energy_type_id,
                t.purchase_price,
                t.sale_price,
                quoted_date(t.valid_from),
                quoted_date(t.valid_to),
            )?;
        }
        Ok(())
    }

    fn write_invoices<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n-- invoices")?;
        for i in &self.dataset.invoices {
            writeln!(
                out,
                "INSERT INTO invoices (id, contract_id, issued_on, due_on, period_start, \
                 period_end, amount_pre_tax, tax_rate, amount_with_tax, energy_cost, \
                 consumption, payment_status) VALUES \
                 ({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {});",
                quoted(&i.id),
                quoted(&i.contract_id),
                quoted_date(i.issued_on),
                quoted_date(i.due_on),
                quoted_date(i.period_start),
                quoted_date(i.period_end),
                i.amount_pre_tax,
                i.tax_rate,
                i.amount_with_tax,
                i.energy_cost,
                i.consumption,
                quoted(i.payment_status.label()),
            )?;
        }
        Ok(())
    }

    fn write_payments<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n-- payments")?;
        for p in &self.dataset.payments {
            writeln!(
                out,
                "INSERT INTO payments (id, invoice_id, paid_on, amount, payment_method, \
                 reference) VALUES ({}, {}, {}, {}, {}, {});",
                quoted(&p.id),
                quoted(&p.invoice_id),
                quoted_date(p.paid_on),
                p.amount,
                quoted(p.method.label()),
                quoted(&p.reference),
            )?;
        }
        Ok(())
    }

    fn write_temperatures<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n-- temperature_readings")?;
        for t in &self.dataset.temperatures {
            writeln!(
                out,
                "INSERT INTO temperature_readings (region_id, measured_on, min_temp, max_temp, \
                 avg_temp) VALUES ({}, {}, {}, {}, {});",
                quoted(&t.region_id),
                quoted(&t.measured_on),
                t.min_temp,
                t.max_temp,
                t.avg_temp,
            )?;
        }
        Ok(())
    }
}

/// Quote a string literal, doubling embedded quotes.
fn quoted(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Render an optional string: `NULL` when absent, distinct from `''`.
fn opt_quoted(value: Option<&str>) -> String {
    match value {
        Some(s) => quoted(s),
        None => "NULL".to_string(),
    }
}

fn quoted_date(date: NaiveDate) -> String {
    format!("'{}'", date.format("%Y-%m-%d"))
}

fn opt_quoted_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => quoted_date(d),
        None => "NULL".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Client, ClientKind, ClientStatus, Region};

    fn region(name: &str) -> Region {
        Region {
            id: "REG01".to_string(),
            name: name.to_string(),
            country: "Meridia".to_string(),
            city: "Northport".to_string(),
            postal_code: "41000".to_string(),
        }
    }

    #[test]
    fn test_quote_doubling() {
        assert_eq!(quoted("O'Hara"), "'O''Hara'");
        assert_eq!(quoted("plain"), "'plain'");
    }

    #[test]
    fn test_null_distinct_from_empty() {
        assert_eq!(opt_quoted(None), "NULL");
        assert_eq!(opt_quoted(Some("")), "''");
    }

    #[test]
    fn test_block_order_and_directives() {
        let mut dataset = RelationalDataset::new();
        dataset.regions.push(region("Old Harbour"));

        let sql = RelationalExporter::new(&dataset).render().unwrap();

        let disable = sql.find("SET FOREIGN_KEY_CHECKS = 0;").unwrap();
        let enable = sql.find("SET FOREIGN_KEY_CHECKS = 1;").unwrap();
        assert!(disable < enable);

        // Blocks appear in dependency order even when empty.
        let positions: Vec<_> = [
            "-- regions",
            "-- energy_types",
            "-- buildings",
            "-- meters",
            "-- clients",
            "-- contracts",
            "-- tariffs",
            "-- invoices",
            "-- payments",
            "-- temperature_readings",
        ]
        .iter()
        .map(|marker| sql.find(marker).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_embedded_quote_and_null_rendering() {
        let mut dataset = RelationalDataset::new();
        dataset.regions.push(region("L'Anse aux Meadows"));
        dataset.clients.push(Client {
            id: "CLI00001".to_string(),
            name: "Ashford".to_string(),
            first_name: None,
            email: None,
            phone: Some("05 12 34 56 78".to_string()),
            kind: ClientKind::Organization,
            address: "12 Harbour Lane".to_string(),
            region_id: "REG01".to_string(),
            registered_on: NaiveDate::from_ymd_opt(2022, 4, 5).unwrap(),
            status: ClientStatus::Active,
        });

        let sql = RelationalExporter::new(&dataset).render().unwrap();
        assert!(sql.contains("'L''Anse aux Meadows'"));
        assert!(sql.contains("('CLI00001', 'Ashford', NULL, NULL, '05 12 34 56 78'"));
        assert!(sql.contains("'2022-04-05'"));
    }
}
