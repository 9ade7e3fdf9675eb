//! Choice fields of an order.
//!
//! The wire and database spelling is the uppercase Spanish label
//! (`"EN RUTA"`, `"CHAMPIÑONES"`). Underscore and unaccented spellings are
//! accepted on input.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct ParseChoiceError {
    kind: &'static str,
    value: String,
}

/// Kind of dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dish {
    #[serde(rename = "QUESADILLA")]
    Quesadilla,
    #[serde(rename = "HUARACHE")]
    Huarache,
    #[serde(rename = "SOPE")]
    Sope,
}

impl Dish {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quesadilla => "QUESADILLA",
            Self::Huarache => "HUARACHE",
            Self::Sope => "SOPE",
        }
    }
}

impl FromStr for Dish {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUESADILLA" => Ok(Self::Quesadilla),
            "HUARACHE" => Ok(Self::Huarache),
            "SOPE" => Ok(Self::Sope),
            other => Err(ParseChoiceError {
                kind: "dish",
                value: other.to_string(),
            }),
        }
    }
}

/// Filling ("guisado") that goes on the dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stew {
    #[serde(rename = "TINGA")]
    Tinga,
    #[serde(rename = "CARNE")]
    Carne,
    #[serde(rename = "POLLO")]
    Pollo,
    #[serde(rename = "CHAMPIÑONES", alias = "CHAMPINONES")]
    Champinones,
    #[serde(rename = "COMBINADO")]
    Combinado,
}

impl Stew {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tinga => "TINGA",
            Self::Carne => "CARNE",
            Self::Pollo => "POLLO",
            Self::Champinones => "CHAMPIÑONES",
            Self::Combinado => "COMBINADO",
        }
    }
}

impl FromStr for Stew {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TINGA" => Ok(Self::Tinga),
            "CARNE" => Ok(Self::Carne),
            "POLLO" => Ok(Self::Pollo),
            "CHAMPIÑONES" | "CHAMPINONES" => Ok(Self::Champinones),
            "COMBINADO" => Ok(Self::Combinado),
            other => Err(ParseChoiceError {
                kind: "stew",
                value: other.to_string(),
            }),
        }
    }
}

/// Delivery status. Any value may replace any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "PROCESANDO")]
    Procesando,
    #[serde(rename = "EN RUTA", alias = "EN_RUTA")]
    EnRuta,
    #[serde(rename = "ENTREGADO")]
    Entregado,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Procesando => "PROCESANDO",
            Self::EnRuta => "EN RUTA",
            Self::Entregado => "ENTREGADO",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROCESANDO" => Ok(Self::Procesando),
            "EN RUTA" | "EN_RUTA" => Ok(Self::EnRuta),
            "ENTREGADO" => Ok(Self::Entregado),
            other => Err(ParseChoiceError {
                kind: "status",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::EnRuta).unwrap(),
            "\"EN RUTA\""
        );
        let a: OrderStatus = serde_json::from_str("\"EN RUTA\"").unwrap();
        let b: OrderStatus = serde_json::from_str("\"EN_RUTA\"").unwrap();
        assert_eq!(a, OrderStatus::EnRuta);
        assert_eq!(b, OrderStatus::EnRuta);
        assert!(serde_json::from_str::<OrderStatus>("\"PENDIENTE\"").is_err());
    }

    #[test]
    fn stew_accepts_unaccented_alias() {
        let s: Stew = serde_json::from_str("\"CHAMPINONES\"").unwrap();
        assert_eq!(s, Stew::Champinones);
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"CHAMPIÑONES\"");
    }

    #[test]
    fn from_str_matches_as_str() {
        for d in [Dish::Quesadilla, Dish::Huarache, Dish::Sope] {
            assert_eq!(d.as_str().parse::<Dish>().unwrap(), d);
        }
        for s in [
            Stew::Tinga,
            Stew::Carne,
            Stew::Pollo,
            Stew::Champinones,
            Stew::Combinado,
        ] {
            assert_eq!(s.as_str().parse::<Stew>().unwrap(), s);
        }
        for st in [
            OrderStatus::Procesando,
            OrderStatus::EnRuta,
            OrderStatus::Entregado,
        ] {
            assert_eq!(st.as_str().parse::<OrderStatus>().unwrap(), st);
        }
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!("TACO".parse::<Dish>().is_err());
        assert!("quesadilla".parse::<Dish>().is_err());
        assert!("PESCADO".parse::<Stew>().is_err());
        let err = "CANCELADO".parse::<OrderStatus>().unwrap_err();
        assert!(err.to_string().contains("CANCELADO"));
    }

    #[test]
    fn default_status_is_procesando() {
        assert_eq!(OrderStatus::default(), OrderStatus::Procesando);
    }
}
