//! Period production reports.
//!
//! [`aggregate`] folds production records into full-precision sums grouped
//! overall, per production reference and per item (format + color).
//! [`ProductionReport::from_stats`] turns those sums into the response shape,
//! deriving ratios and rounding once at the end.

use std::collections::HashSet;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use crate::period::DateRange;
use crate::production::{loss_percent, round2, ProductionItem};

/// Label for records with an empty production reference.
pub const UNREFERENCED_LABEL: &str = "Sem Referência";

/// Placeholder for a missing item format or color.
pub const MISSING_ITEM_FIELD: &str = "N/A";

/// Read access to the fields a report needs from a production record.
pub trait ProductionRecord {
    fn date(&self) -> NaiveDate;
    fn production_reference(&self) -> &str;
    fn produced_total(&self) -> f64;
    fn loss_total(&self) -> f64;
    fn items(&self) -> &[ProductionItem];
}

// ---------------------------------------------------------------------------
// Aggregation (full precision)
// ---------------------------------------------------------------------------

/// Production and loss sums over a set of records plus the days they cover.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    pub produced: f64,
    pub loss: f64,
    pub days: HashSet<NaiveDate>,
}

impl Tally {
    fn add(&mut self, date: NaiveDate, produced: f64, loss: f64) {
        self.produced += produced;
        self.loss += loss;
        self.days.insert(date);
    }

    pub fn distinct_days(&self) -> usize {
        self.days.len()
    }

    /// Production per distinct day, `0.0` when no days were seen.
    pub fn average_daily(&self) -> f64 {
        if self.days.is_empty() {
            0.0
        } else {
            self.produced / self.days.len() as f64
        }
    }

    pub fn loss_percent(&self) -> f64 {
        loss_percent(self.loss, self.produced)
    }
}

/// Accumulated production for one format + color pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemTally {
    pub format: String,
    pub color: String,
    pub produced: f64,
}

/// Full-precision result of [`aggregate`].
#[derive(Debug, Clone, Default)]
pub struct ProductionStats {
    pub overall: Tally,
    /// Keyed by production reference, in first-encounter order.
    pub by_reference: IndexMap<String, Tally>,
    /// Keyed by `"format - color"`, in first-encounter order.
    pub by_item: IndexMap<String, ItemTally>,
}

fn or_missing(value: &str) -> &str {
    if value.is_empty() {
        MISSING_ITEM_FIELD
    } else {
        value
    }
}

/// Fold records into overall, per-reference and per-item sums.
pub fn aggregate<R: ProductionRecord>(records: &[R]) -> ProductionStats {
    let mut stats = ProductionStats::default();

    for record in records {
        let date = record.date();
        let produced = record.produced_total();
        let loss = record.loss_total();

        stats.overall.add(date, produced, loss);

        let reference = match record.production_reference() {
            "" => UNREFERENCED_LABEL,
            r => r,
        };
        stats
            .by_reference
            .entry(reference.to_string())
            .or_default()
            .add(date, produced, loss);

        for item in record.items() {
            let format = or_missing(&item.format);
            let color = or_missing(&item.color);
            stats
                .by_item
                .entry(format!("{format} - {color}"))
                .or_insert_with(|| ItemTally {
                    format: format.to_string(),
                    color: color.to_string(),
                    produced: 0.0,
                })
                .produced += item.produced_weight_kg;
        }
    }

    stats
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Per-reference section of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceSummary {
    #[serde(rename = "producao")]
    pub produced: f64,
    #[serde(rename = "perdas")]
    pub loss: f64,
    #[serde(rename = "dias_produzidos")]
    pub production_days: usize,
    #[serde(rename = "media_diaria")]
    pub average_daily: f64,
    #[serde(rename = "percentual_perdas")]
    pub loss_percent: f64,
}

/// Per-item row of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSummary {
    pub item: String,
    #[serde(rename = "formato")]
    pub format: String,
    #[serde(rename = "cor")]
    pub color: String,
    #[serde(rename = "producao")]
    pub produced: f64,
}

/// Report returned by `GET /api/relatorios`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionReport {
    #[serde(rename = "producao_total")]
    pub produced_total: f64,
    #[serde(rename = "perdas_total")]
    pub loss_total: f64,
    #[serde(rename = "percentual_perdas")]
    pub loss_percent: f64,
    #[serde(rename = "dias_produzidos")]
    pub production_days: usize,
    #[serde(rename = "media_diaria")]
    pub average_daily: f64,
    #[serde(rename = "data_inicio")]
    pub start: Option<NaiveDate>,
    #[serde(rename = "data_fim")]
    pub end: Option<NaiveDate>,
    #[serde(rename = "por_referencia")]
    pub by_reference: IndexMap<String, ReferenceSummary>,
    #[serde(rename = "por_item")]
    pub by_item: Vec<ItemSummary>,
}

impl ProductionReport {
    /// Derive ratios, round and order the sections of a report.
    pub fn from_stats(stats: ProductionStats, window: Option<DateRange>) -> Self {
        let by_reference = stats
            .by_reference
            .into_iter()
            .map(|(reference, tally)| {
                let summary = ReferenceSummary {
                    produced: round2(tally.produced),
                    loss: round2(tally.loss),
                    production_days: tally.distinct_days(),
                    average_daily: round2(tally.average_daily()),
                    loss_percent: round2(tally.loss_percent()),
                };
                (reference, summary)
            })
            .collect();

        let mut items: Vec<(String, ItemTally)> = stats.by_item.into_iter().collect();
        // Stable: equal totals keep first-encounter order.
        items.sort_by(|a, b| b.1.produced.total_cmp(&a.1.produced));
        let by_item = items
            .into_iter()
            .map(|(key, tally)| ItemSummary {
                item: key,
                format: tally.format,
                color: tally.color,
                produced: round2(tally.produced),
            })
            .collect();

        Self {
            produced_total: round2(stats.overall.produced),
            loss_total: round2(stats.overall.loss),
            loss_percent: round2(stats.overall.loss_percent()),
            production_days: stats.overall.distinct_days(),
            average_daily: round2(stats.overall.average_daily()),
            start: window.map(|w| w.start),
            end: window.map(|w| w.end),
            by_reference,
            by_item,
        }
    }
}

/// Aggregate and present in one step.
pub fn build_report<R: ProductionRecord>(
    records: &[R],
    window: Option<DateRange>,
) -> ProductionReport {
    ProductionReport::from_stats(aggregate(records), window)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        date: NaiveDate,
        reference: String,
        loss: f64,
        items: Vec<ProductionItem>,
    }

    impl ProductionRecord for Entry {
        fn date(&self) -> NaiveDate {
            self.date
        }
        fn production_reference(&self) -> &str {
            &self.reference
        }
        fn produced_total(&self) -> f64 {
            self.items.iter().map(|i| i.produced_weight_kg).sum()
        }
        fn loss_total(&self) -> f64 {
            self.loss
        }
        fn items(&self) -> &[ProductionItem] {
            &self.items
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn item(format: &str, color: &str, produced: f64) -> ProductionItem {
        ProductionItem {
            format: format.to_string(),
            color: color.to_string(),
            package_weight_kg: 0.0,
            produced_weight_kg: produced,
        }
    }

    fn entry(d: u32, reference: &str, loss: f64, items: Vec<ProductionItem>) -> Entry {
        Entry {
            date: day(d),
            reference: reference.to_string(),
            loss,
            items,
        }
    }

    #[test]
    fn empty_input_yields_zeroed_report() {
        let report = build_report::<Entry>(&[], None);
        assert_eq!(report.produced_total, 0.0);
        assert_eq!(report.loss_percent, 0.0);
        assert_eq!(report.production_days, 0);
        assert_eq!(report.average_daily, 0.0);
        assert!(report.by_reference.is_empty());
        assert!(report.by_item.is_empty());
        assert_eq!(report.start, None);
    }

    #[test]
    fn groups_by_reference_with_distinct_day_average() {
        let records = vec![
            entry(5, "REF-A", 1.0, vec![item("30x40", "azul", 10.0)]),
            entry(5, "REF-A", 1.0, vec![item("30x40", "azul", 20.0)]),
            entry(6, "REF-B", 3.0, vec![item("40x50", "preto", 30.0)]),
        ];
        let report = build_report(&records, None);

        let a = &report.by_reference["REF-A"];
        assert_eq!(a.produced, 30.0);
        assert_eq!(a.loss, 2.0);
        assert_eq!(a.production_days, 1);
        assert_eq!(a.average_daily, 30.0);
        assert_eq!(a.loss_percent, 6.67);

        let b = &report.by_reference["REF-B"];
        assert_eq!(b.produced, 30.0);
        assert_eq!(b.loss_percent, 10.0);

        assert_eq!(report.produced_total, 60.0);
        assert_eq!(report.production_days, 2);
        assert_eq!(report.average_daily, 30.0);
    }

    #[test]
    fn reference_totals_partition_overall_total() {
        let records = vec![
            entry(1, "A", 0.5, vec![item("f", "c", 12.25)]),
            entry(2, "", 0.0, vec![item("f", "c", 7.5)]),
            entry(3, "B", 1.0, vec![item("g", "c", 3.125), item("f", "c", 1.0)]),
            entry(3, "A", 0.0, vec![]),
        ];
        let report = build_report(&records, None);
        let sum: f64 = report.by_reference.values().map(|r| r.produced).sum();
        assert!((sum - report.produced_total).abs() < 0.011);
    }

    #[test]
    fn empty_reference_uses_default_label() {
        let records = vec![entry(1, "", 0.0, vec![item("f", "c", 1.0)])];
        let report = build_report(&records, None);
        assert!(report.by_reference.contains_key(UNREFERENCED_LABEL));
    }

    #[test]
    fn references_group_on_their_exact_value() {
        let records = vec![
            entry(1, "A", 0.0, vec![item("f", "c", 1.0)]),
            entry(2, " A ", 0.0, vec![item("f", "c", 2.0)]),
            entry(3, "  ", 0.0, vec![item("f", "c", 3.0)]),
        ];
        let report = build_report(&records, None);
        assert_eq!(report.by_reference.len(), 3);
        assert_eq!(report.by_reference["A"].produced, 1.0);
        assert_eq!(report.by_reference[" A "].produced, 2.0);
        assert!(!report.by_reference.contains_key(UNREFERENCED_LABEL));
    }

    #[test]
    fn half_hundredths_round_to_even() {
        let records = vec![entry(1, "A", 1.125, vec![item("f", "c", 10.0)])];
        let report = build_report(&records, None);
        assert_eq!(report.loss_total, 1.12);
        assert_eq!(report.by_reference["A"].loss, 1.12);
    }

    #[test]
    fn items_sorted_descending_with_stable_ties() {
        let records = vec![
            entry(1, "A", 0.0, vec![item("small", "red", 5.0), item("big", "blue", 50.0)]),
            entry(2, "A", 0.0, vec![item("mid", "green", 5.0), item("small", "red", 20.0)]),
            entry(3, "A", 0.0, vec![item("", "", 5.0)]),
        ];
        let report = build_report(&records, None);
        let keys: Vec<&str> = report.by_item.iter().map(|i| i.item.as_str()).collect();
        assert_eq!(keys, ["big - blue", "small - red", "mid - green", "N/A - N/A"]);
        assert!(report
            .by_item
            .windows(2)
            .all(|w| w[0].produced >= w[1].produced));
        assert_eq!(report.by_item[1].produced, 25.0);
    }

    #[test]
    fn loss_percent_never_nan() {
        let records = vec![entry(1, "A", 4.0, vec![])];
        let report = build_report(&records, None);
        assert_eq!(report.loss_percent, 0.0);
        assert_eq!(report.by_reference["A"].loss_percent, 0.0);
        assert!(report.loss_percent.is_finite());
    }

    #[test]
    fn rounding_happens_once_at_the_end() {
        // Three records of 0.333.. kg each: per-record rounding would give 0.99.
        let records: Vec<Entry> = (1..=3)
            .map(|d| entry(d, "A", 0.0, vec![item("f", "c", 1.0 / 3.0)]))
            .collect();
        let report = build_report(&records, None);
        assert_eq!(report.produced_total, 1.0);
    }

    #[test]
    fn window_is_echoed_in_report() {
        let window = DateRange { start: day(1), end: day(31) };
        let report = build_report::<Entry>(&[], Some(window));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["data_inicio"], "2026-10-01");
        assert_eq!(json["data_fim"], "2026-10-31");
        assert!(json["por_item"].is_array());
        assert!(json["por_referencia"].is_object());
    }
}
