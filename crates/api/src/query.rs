//! Query parameter types for API handlers.
//!
//! Parameter names follow the wire convention (`data_inicio`, ...) with
//! camelCase aliases. Empty values (`?data_inicio=`) read as absent.

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::Deserialize;

fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid date {raw:?}, expected YYYY-MM-DD"))),
    }
}

/// Query parameters for `GET /api/relatorios`.
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    /// `semanal` / `mensal` / `anual` / `customizado` (or the English names).
    pub periodo: Option<String>,
    #[serde(alias = "dataInicio", default, deserialize_with = "optional_date")]
    pub data_inicio: Option<NaiveDate>,
    #[serde(alias = "dataFim", default, deserialize_with = "optional_date")]
    pub data_fim: Option<NaiveDate>,
    #[serde(alias = "referenciaProducao")]
    pub referencia_producao: Option<String>,
}

/// Query parameters for `GET /api/lancamentos`.
#[derive(Debug, Default, Deserialize)]
pub struct LogListParams {
    #[serde(alias = "dataInicio", default, deserialize_with = "optional_date")]
    pub data_inicio: Option<NaiveDate>,
    #[serde(alias = "dataFim", default, deserialize_with = "optional_date")]
    pub data_fim: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<T: for<'de> Deserialize<'de>>(query: &str) -> T {
        serde_json::from_value(serde_json::Value::Object(
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                .collect(),
        ))
        .unwrap()
    }

    #[test]
    fn report_params_accept_both_spellings() {
        let wire: ReportParams = parse("periodo=semanal&data_inicio=2026-10-01&referencia_producao=OP");
        assert_eq!(wire.periodo.as_deref(), Some("semanal"));
        assert_eq!(wire.data_inicio, NaiveDate::from_ymd_opt(2026, 10, 1));
        assert_eq!(wire.referencia_producao.as_deref(), Some("OP"));

        let camel: ReportParams = parse("dataInicio=2026-10-01&dataFim=2026-10-31&referenciaProducao=X");
        assert_eq!(camel.data_fim, NaiveDate::from_ymd_opt(2026, 10, 31));
        assert_eq!(camel.referencia_producao.as_deref(), Some("X"));
    }

    #[test]
    fn empty_dates_read_as_absent() {
        let params: LogListParams = parse("data_inicio=&data_fim=");
        assert!(params.data_inicio.is_none());
        assert!(params.data_fim.is_none());
    }
}
