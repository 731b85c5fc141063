// src/models.rs
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One sale record as delivered by the upstream endpoint. Field names are the
/// upstream's Portuguese column labels; anything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSale {
    #[serde(rename = "Data da Compra")]
    pub purchase_date: String,
    #[serde(rename = "Preço")]
    pub price: f64,
    #[serde(rename = "Local da compra")]
    pub state: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "Categoria do Produto")]
    pub category: String,
    #[serde(rename = "Vendedor")]
    pub seller: String,
}

/// A parsed, immutable sale record. One per transaction; collection order is
/// arrival order from the upstream, not sorted by date.
#[derive(Debug, Clone, Serialize)]
pub struct Sale {
    pub purchase_date: NaiveDate,
    pub price: f64,
    pub state: String,
    pub lat: f64,
    pub lon: f64,
    pub category: String,
    pub seller: String,
}

/// Brazilian macro-regions. The whole-country option in the UI is the absence
/// of a region filter, not a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Region {
    CentroOeste,
    Nordeste,
    Norte,
    Sudeste,
    Sul,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::CentroOeste,
        Region::Nordeste,
        Region::Norte,
        Region::Sudeste,
        Region::Sul,
    ];

    /// Lowercase form used in query strings.
    pub fn slug(&self) -> &'static str {
        match self {
            Region::CentroOeste => "centro-oeste",
            Region::Nordeste => "nordeste",
            Region::Norte => "norte",
            Region::Sudeste => "sudeste",
            Region::Sul => "sul",
        }
    }

    /// Macro-region of a Brazilian state as spelled in "Local da compra".
    pub fn of_state(state: &str) -> Option<Region> {
        let region = match state {
            "Acre" | "Amapá" | "Amazonas" | "Pará" | "Rondônia" | "Roraima" | "Tocantins" => {
                Region::Norte
            }
            "Alagoas" | "Bahia" | "Ceará" | "Maranhão" | "Paraíba" | "Pernambuco" | "Piauí"
            | "Rio Grande do Norte" | "Sergipe" => Region::Nordeste,
            "Distrito Federal" | "Goiás" | "Mato Grosso" | "Mato Grosso do Sul" => {
                Region::CentroOeste
            }
            "Espírito Santo" | "Minas Gerais" | "Rio de Janeiro" | "São Paulo" => Region::Sudeste,
            "Paraná" | "Rio Grande do Sul" | "Santa Catarina" => Region::Sul,
            _ => return None,
        };
        Some(region)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Region::CentroOeste => "Centro-Oeste",
            Region::Nordeste => "Nordeste",
            Region::Norte => "Norte",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "centro-oeste" => Ok(Region::CentroOeste),
            "nordeste" => Ok(Region::Nordeste),
            "norte" => Ok(Region::Norte),
            "sudeste" => Ok(Region::Sudeste),
            "sul" => Ok(Region::Sul),
            other => Err(format!("unknown region: {}", other)),
        }
    }
}

/// Filter criteria derived from one request. No persistence; a fresh value is
/// built per render pass.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub region: Option<Region>,
    pub year: Option<i32>,
    /// Empty means "no seller filter".
    pub sellers: Vec<String>,
}

impl FilterCriteria {
    pub fn matches(&self, sale: &Sale) -> bool {
        let region_ok = match self.region {
            Some(region) => Region::of_state(&sale.state) == Some(region),
            None => true,
        };
        let year_ok = match self.year {
            Some(year) => sale.purchase_date.year() == year,
            None => true,
        };
        let seller_ok = self.sellers.is_empty() || self.sellers.iter().any(|s| s == &sale.seller);
        region_ok && year_ok && seller_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_str() {
        assert_eq!("sul".parse::<Region>(), Ok(Region::Sul));
        assert_eq!("Centro-Oeste".parse::<Region>(), Ok(Region::CentroOeste));
        assert!("brasil".parse::<Region>().is_err());
    }

    #[test]
    fn test_state_to_region() {
        assert_eq!(Region::of_state("São Paulo"), Some(Region::Sudeste));
        assert_eq!(Region::of_state("Bahia"), Some(Region::Nordeste));
        assert_eq!(
            Region::of_state("Distrito Federal"),
            Some(Region::CentroOeste)
        );
        assert_eq!(Region::of_state("Amazonas"), Some(Region::Norte));
        assert_eq!(Region::of_state("Paraná"), Some(Region::Sul));
        assert_eq!(Region::of_state("Atlantis"), None);
    }
}
