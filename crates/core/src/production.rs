//! Production log domain rules: itemized output, derived totals and the
//! loss ratio.

use serde::{Deserialize, Serialize};

use crate::coerce::{flexible_f64, null_as_default};
use crate::error::CoreError;

/// One product type (format + color) produced during a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionItem {
    #[serde(rename = "formato", alias = "format", default, deserialize_with = "null_as_default")]
    pub format: String,
    #[serde(rename = "cor", alias = "color", default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(
        rename = "pacote_kg",
        alias = "packageWeightKg",
        default,
        deserialize_with = "flexible_f64"
    )]
    pub package_weight_kg: f64,
    #[serde(
        rename = "producao_kg",
        alias = "producedWeightKg",
        default,
        deserialize_with = "flexible_f64"
    )]
    pub produced_weight_kg: f64,
}

/// Totals derived from a shift's raw fields. Never taken from client input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftTotals {
    pub produced_kg: f64,
    pub loss_kg: f64,
}

impl ShiftTotals {
    /// Produced = sum of item weights; loss = both scrap weights.
    pub fn compute(items: &[ProductionItem], scrap_a_kg: f64, scrap_b_kg: f64) -> Self {
        Self {
            produced_kg: items.iter().map(|i| i.produced_weight_kg).sum(),
            loss_kg: scrap_a_kg + scrap_b_kg,
        }
    }

    pub fn loss_percent(&self) -> f64 {
        loss_percent(self.loss_kg, self.produced_kg)
    }
}

/// Loss as a percentage of production, `0.0` when nothing was produced.
pub fn loss_percent(loss_kg: f64, produced_kg: f64) -> f64 {
    if produced_kg > 0.0 {
        loss_kg / produced_kg * 100.0
    } else {
        0.0
    }
}

/// Round to two decimal places for presentation, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Check the fields of a shift entry that the store cannot check for us.
pub fn validate_shift_entry(
    shift: &str,
    scrap_a_kg: f64,
    scrap_b_kg: f64,
    items: &[ProductionItem],
) -> Result<(), CoreError> {
    if shift.trim().is_empty() {
        return Err(CoreError::Validation("Shift must not be empty".to_string()));
    }
    if scrap_a_kg < 0.0 || scrap_b_kg < 0.0 {
        return Err(CoreError::Validation(
            "Scrap weights must not be negative".to_string(),
        ));
    }
    if let Some(pos) = items
        .iter()
        .position(|i| i.package_weight_kg < 0.0 || i.produced_weight_kg < 0.0)
    {
        return Err(CoreError::Validation(format!(
            "Item {} has a negative weight",
            pos + 1
        )));
    }
    Ok(())
}
