//! Production log ("lançamento") entity model and DTOs.

use bagline_core::coerce::{flexible_f64, null_as_default};
use bagline_core::error::CoreError;
use bagline_core::production::{round2, validate_shift_entry, ProductionItem, ShiftTotals};
use bagline_core::report::ProductionRecord;
use bagline_core::types::{RecordId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Full row from the `lancamentos` table.
///
/// Decoding is lenient: nullable text columns read as `""`, nullable weights
/// as `0.0`, a missing item list as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLog {
    pub id: RecordId,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "turno", default, deserialize_with = "null_as_default")]
    pub shift: String,
    #[serde(rename = "hora", default, deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(rename = "orelha_kg", default, deserialize_with = "flexible_f64")]
    pub scrap_a_kg: f64,
    #[serde(rename = "aparas_kg", default, deserialize_with = "flexible_f64")]
    pub scrap_b_kg: f64,
    #[serde(
        rename = "referencia_producao",
        default,
        deserialize_with = "null_as_default"
    )]
    pub production_reference: String,
    #[serde(rename = "referencia_lote", default, deserialize_with = "null_as_default")]
    pub lot_reference: String,
    #[serde(rename = "itens", default, deserialize_with = "null_as_default")]
    pub items: Vec<ProductionItem>,
    #[serde(rename = "producao_total", default, deserialize_with = "flexible_f64")]
    pub produced_total: f64,
    #[serde(rename = "perdas_total", default, deserialize_with = "flexible_f64")]
    pub loss_total: f64,
    /// Left out of writes when `None` so the stored value is kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl ProductionLog {
    /// Loss percentage of this entry, rounded for display.
    pub fn loss_percent(&self) -> f64 {
        round2(bagline_core::production::loss_percent(
            self.loss_total,
            self.produced_total,
        ))
    }
}

impl ProductionRecord for ProductionLog {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn production_reference(&self) -> &str {
        &self.production_reference
    }

    fn produced_total(&self) -> f64 {
        self.produced_total
    }

    fn loss_total(&self) -> f64 {
        self.loss_total
    }

    fn items(&self) -> &[ProductionItem] {
        &self.items
    }
}

/// A stored entry plus its loss percentage, as returned by the list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ProductionLogWithLoss {
    #[serde(flatten)]
    pub log: ProductionLog,
    #[serde(rename = "percentual_perdas")]
    pub loss_percent: f64,
}

impl From<ProductionLog> for ProductionLogWithLoss {
    fn from(log: ProductionLog) -> Self {
        let loss_percent = log.loss_percent();
        Self { log, loss_percent }
    }
}

/// Body of a create or full-replace request.
///
/// Totals are never read from the client; any `producao_total` or
/// `perdas_total` in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductionLogInput {
    #[serde(rename = "data", alias = "date")]
    pub date: NaiveDate,
    #[serde(
        rename = "turno",
        alias = "shift",
        default,
        deserialize_with = "null_as_default"
    )]
    pub shift: String,
    #[serde(
        rename = "hora",
        alias = "time",
        default,
        deserialize_with = "null_as_default"
    )]
    pub time: String,
    #[serde(
        rename = "orelha_kg",
        alias = "scrapA",
        default,
        deserialize_with = "flexible_f64"
    )]
    pub scrap_a_kg: f64,
    #[serde(
        rename = "aparas_kg",
        alias = "scrapB",
        default,
        deserialize_with = "flexible_f64"
    )]
    pub scrap_b_kg: f64,
    #[serde(
        rename = "referencia_producao",
        alias = "productionReference",
        default,
        deserialize_with = "null_as_default"
    )]
    pub production_reference: String,
    #[serde(
        rename = "referencia_lote",
        alias = "lotReference",
        default,
        deserialize_with = "null_as_default"
    )]
    pub lot_reference: String,
    #[serde(
        rename = "itens",
        alias = "items",
        default,
        deserialize_with = "null_as_default"
    )]
    pub items: Vec<ProductionItem>,
}

impl ProductionLogInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_shift_entry(&self.shift, self.scrap_a_kg, self.scrap_b_kg, &self.items)
    }

    pub fn totals(&self) -> ShiftTotals {
        ShiftTotals::compute(&self.items, self.scrap_a_kg, self.scrap_b_kg)
    }

    /// Build the row to store under `id`, with freshly derived totals.
    pub fn into_log(self, id: RecordId, created_at: Option<Timestamp>) -> ProductionLog {
        let totals = self.totals();
        ProductionLog {
            id,
            date: self.date,
            shift: self.shift.trim().to_string(),
            time: self.time,
            scrap_a_kg: self.scrap_a_kg,
            scrap_b_kg: self.scrap_b_kg,
            production_reference: self.production_reference.trim().to_string(),
            lot_reference: self.lot_reference.trim().to_string(),
            items: self.items,
            produced_total: totals.produced_kg,
            loss_total: totals.loss_kg,
            created_at,
        }
    }
}
