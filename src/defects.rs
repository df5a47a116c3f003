// VoltCity Testdata - Defect injection
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Policy-driven data-quality defect injection.
//!
//! A [`DefectPolicy`] corrupts scalar values probabilistically, one
//! independent uniform draw per call. Factories invoke it explicitly on
//! each corruption-eligible field; identifiers and foreign keys never
//! pass through it, so referential integrity survives injection.
//!
//! Injection is stateless and infallible; its only side effect is
//! consuming entropy from the caller's random source.

use crate::config::DefectRates;
use chrono::NaiveDate;
use rand::prelude::*;

/// Scalar corruption policy parameterized by per-kind rates.
#[derive(Debug, Clone, Copy)]
pub struct DefectPolicy {
    rates: DefectRates,
}

impl DefectPolicy {
    /// Create a policy from a rate table.
    pub fn new(rates: DefectRates) -> Self {
        Self { rates }
    }

    /// The rate table the policy applies.
    pub fn rates(&self) -> &DefectRates {
        &self.rates
    }

    fn roll(&self, rng: &mut (impl Rng + ?Sized), rate: f64) -> bool {
        rng.gen::<f64>() < rate
    }

    /// Drop a value at the missing rate.
    pub fn missing<T>(&self, rng: &mut (impl Rng + ?Sized), value: T) -> Option<T> {
        if self.roll(rng, self.rates.missing) {
            None
        } else {
            Some(value)
        }
    }

    /// Wrap a string in 1-3 stray leading and trailing spaces at the
    /// whitespace rate.
    pub fn whitespace(&self, rng: &mut (impl Rng + ?Sized), value: &str) -> String {
        if self.roll(rng, self.rates.whitespace) {
            let before = " ".repeat(rng.gen_range(1..=3));
            let after = " ".repeat(rng.gen_range(1..=3));
            format!("{}{}{}", before, value, after)
        } else {
            value.to_string()
        }
    }

    /// Wrap an identifier in a fixed two-space pad at the whitespace
    /// rate. Report rows use this variant.
    pub fn pad_identifier(&self, rng: &mut (impl Rng + ?Sized), id: &str) -> String {
        if self.roll(rng, self.rates.whitespace) {
            format!("  {}  ", id)
        } else {
            id.to_string()
        }
    }

    /// Render a date, canonically ISO, or in one of four non-canonical
    /// shapes at the bad-date-format rate.
    pub fn render_date(&self, rng: &mut (impl Rng + ?Sized), date: NaiveDate) -> String {
        if self.roll(rng, self.rates.bad_date_format) {
            match rng.gen_range(0..4) {
                0 => date.format("%d/%m/%Y").to_string(),
                1 => date.format("%m-%d-%Y").to_string(),
                2 => date.format("%Y/%m/%d").to_string(),
                // Raw epoch-seconds string.
                _ => date
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    .and_utc()
                    .timestamp()
                    .to_string(),
            }
        } else {
            date.format("%Y-%m-%d").to_string()
        }
    }

    /// Skew a numeric at the incoherent rate: a coin flip between sign
    /// inversion and a hundredfold blow-up.
    pub fn skew_numeric(&self, rng: &mut (impl Rng + ?Sized), value: f64) -> f64 {
        if self.roll(rng, self.rates.incoherent) {
            if rng.gen::<f64>() < 0.5 {
                -value.abs()
            } else {
                value * 100.0
            }
        } else {
            value
        }
    }

    /// Flip a numeric's sign at the incoherent rate.
    pub fn sign_flip(&self, rng: &mut (impl Rng + ?Sized), value: f64) -> f64 {
        if self.roll(rng, self.rates.incoherent) {
            -value
        } else {
            value
        }
    }

    /// Double the `@` of an email at the incoherent rate.
    pub fn corrupt_email(&self, rng: &mut (impl Rng + ?Sized), email: &str) -> String {
        if self.roll(rng, self.rates.incoherent) && email.contains('@') {
            email.replace('@', "@@")
        } else {
            email.to_string()
        }
    }

    /// Number of duplicate rows to append to a collection of `len` rows.
    pub fn duplicate_count(&self, len: usize) -> usize {
        (len as f64 * self.rates.duplicate) as usize
    }

    /// Whether to append one duplicated hourly reading to a meter-day.
    /// Runs at five times the collection duplicate rate.
    pub fn extra_reading_duplicate(&self, rng: &mut (impl Rng + ?Sized)) -> bool {
        self.roll(rng, self.rates.duplicate * 5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn always() -> DefectPolicy {
        DefectPolicy::new(DefectRates {
            missing: 1.0,
            duplicate: 1.0,
            whitespace: 1.0,
            bad_date_format: 1.0,
            incoherent: 1.0,
        })
    }

    fn never() -> DefectPolicy {
        DefectPolicy::new(DefectRates::none())
    }

    #[test]
    fn test_zero_rates_pass_through() {
        let mut rng = test_rng();
        let policy = never();

        assert_eq!(policy.missing(&mut rng, 42), Some(42));
        assert_eq!(policy.whitespace(&mut rng, "value"), "value");
        assert_eq!(policy.skew_numeric(&mut rng, 12.5), 12.5);
        assert_eq!(policy.sign_flip(&mut rng, 12.5), 12.5);
        assert_eq!(policy.corrupt_email(&mut rng, "a@b.c"), "a@b.c");
        assert_eq!(policy.duplicate_count(1000), 0);
        assert!(!policy.extra_reading_duplicate(&mut rng));
    }

    #[test]
    fn test_missing_fires() {
        let mut rng = test_rng();
        assert_eq!(always().missing(&mut rng, "x"), None);
    }

    #[test]
    fn test_whitespace_bounds() {
        let mut rng = test_rng();
        let policy = always();

        for _ in 0..50 {
            let padded = policy.whitespace(&mut rng, "core");
            assert_eq!(padded.trim(), "core");
            let lead = padded.len() - padded.trim_start().len();
            let trail = padded.len() - padded.trim_end().len();
            assert!((1..=3).contains(&lead));
            assert!((1..=3).contains(&trail));
        }
    }

    #[test]
    fn test_pad_identifier_fixed_width() {
        let mut rng = test_rng();
        assert_eq!(always().pad_identifier(&mut rng, "BLD001"), "  BLD001  ");
        assert_eq!(never().pad_identifier(&mut rng, "BLD001"), "BLD001");
    }

    #[test]
    fn test_date_canonical_and_corrupted() {
        let mut rng = test_rng();
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        assert_eq!(never().render_date(&mut rng, date), "2024-03-07");

        let policy = always();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            let rendered = policy.render_date(&mut rng, date);
            assert_ne!(rendered, "2024-03-07");
            seen.insert(rendered);
        }
        // All four corrupted shapes show up over 100 draws.
        assert_eq!(seen.len(), 4);
        assert!(seen.contains("07/03/2024"));
        assert!(seen.contains("03-07-2024"));
        assert!(seen.contains("2024/03/07"));
        assert!(seen.contains("1709769600"));
    }

    #[test]
    fn test_skew_negates_or_scales() {
        let mut rng = test_rng();
        let policy = always();

        for _ in 0..50 {
            let skewed = policy.skew_numeric(&mut rng, 10.0);
            assert!(skewed == -10.0 || skewed == 1000.0);
        }
    }

    #[test]
    fn test_email_double_at() {
        let mut rng = test_rng();
        let policy = always();
        assert_eq!(policy.corrupt_email(&mut rng, "a@b.c"), "a@@b.c");
        // No @ to double: value unchanged even when the draw fires.
        assert_eq!(policy.corrupt_email(&mut rng, "not-an-email"), "not-an-email");
    }

    #[test]
    fn test_duplicate_count_fraction() {
        let policy = DefectPolicy::new(DefectRates::default());
        assert_eq!(policy.duplicate_count(200), 2);
        assert_eq!(policy.duplicate_count(50), 0);
    }

    #[test]
    fn test_rates_are_statistical() {
        // 2% missing over 10k draws stays within one percentage point.
        let mut rng = test_rng();
        let policy = DefectPolicy::new(DefectRates::default());

        let dropped = (0..10_000)
            .filter(|_| policy.missing(&mut rng, ()).is_none())
            .count();
        let fraction = dropped as f64 / 10_000.0;
        assert!((fraction - 0.02).abs() < 0.01, "missing rate {}", fraction);
    }
}
