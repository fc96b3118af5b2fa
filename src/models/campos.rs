//! Lectura tolerante de campos
//!
//! Los formularios mandan lo que tienen a mano: un año como número, una
//! fecha con hora y zona. Estos deserializadores convierten esos valores al
//! tipo del campo y solo rechazan lo que no tiene conversión.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{Deserialize, Deserializer, Error};
use serde_json::Value;

/// Texto: acepta cadenas, números y booleanos
pub mod texto {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(otro) => Err(D::Error::custom(format!("no se puede leer {} como texto", otro))),
        }
    }
}

/// Fecha: `YYYY-MM-DD`, fecha y hora ISO 8601 o milisegundos desde epoch
pub mod fecha {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => leer_fecha(&s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("fecha inválida: {}", s))),
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|dt| Some(dt.date_naive()))
                .ok_or_else(|| D::Error::custom(format!("fecha inválida: {}", n))),
            Some(otro) => Err(D::Error::custom(format!("no se puede leer {} como fecha", otro))),
        }
    }
}

/// Fecha de calendario de un texto. Con zona horaria se toma el día en UTC.
pub fn leer_fecha(texto: &str) -> Option<NaiveDate> {
    let texto = texto.trim();
    NaiveDate::parse_from_str(texto, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(texto)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(texto, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Formulario {
        #[serde(default, deserialize_with = "texto::deserialize")]
        gestion: Option<String>,
        #[serde(default, deserialize_with = "fecha::deserialize")]
        fecha: Option<NaiveDate>,
    }

    fn dia(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_text_accepts_scalars() {
        let f: Formulario = serde_json::from_value(json!({"gestion": 2024})).unwrap();
        assert_eq!(f.gestion.as_deref(), Some("2024"));

        let f: Formulario = serde_json::from_value(json!({"gestion": true})).unwrap();
        assert_eq!(f.gestion.as_deref(), Some("true"));

        assert!(serde_json::from_value::<Formulario>(json!({"gestion": {"año": 2024}})).is_err());
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(leer_fecha("2024-03-01"), Some(dia(2024, 3, 1)));
        assert_eq!(leer_fecha("2024-03-01T10:00:00.000Z"), Some(dia(2024, 3, 1)));
        assert_eq!(leer_fecha("2024-03-01T23:30:00-04:00"), Some(dia(2024, 3, 2)));
        assert_eq!(leer_fecha("2024-03-01T10:00:00"), Some(dia(2024, 3, 1)));
        assert_eq!(leer_fecha("ayer"), None);
        assert_eq!(leer_fecha("2024-02-30"), None);
    }

    #[test]
    fn test_date_from_epoch_millis_and_missing() {
        let f: Formulario = serde_json::from_value(json!({"fecha": 1_709_287_200_000_i64})).unwrap();
        assert_eq!(f.fecha, Some(dia(2024, 3, 1)));

        let f: Formulario = serde_json::from_value(json!({"fecha": null})).unwrap();
        assert_eq!(f.fecha, None);
        let f: Formulario = serde_json::from_value(json!({})).unwrap();
        assert!(f.fecha.is_none() && f.gestion.is_none());

        assert!(serde_json::from_value::<Formulario>(json!({"fecha": "no-es-fecha"})).is_err());
    }
}
