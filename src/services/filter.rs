// src/services/filter.rs
use crate::models::{FilterCriteria, Sale};

/// Apply region/year/seller predicates to the collection. Pure: order is
/// preserved and records are never modified.
pub fn apply(sales: Vec<Sale>, criteria: &FilterCriteria) -> Vec<Sale> {
    if criteria.region.is_none() && criteria.year.is_none() && criteria.sellers.is_empty() {
        return sales;
    }
    sales
        .into_iter()
        .filter(|sale| criteria.matches(sale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;
    use chrono::NaiveDate;

    fn sale(date: (i32, u32, u32), state: &str, seller: &str, price: f64) -> Sale {
        Sale {
            purchase_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            price,
            state: state.to_string(),
            lat: 0.0,
            lon: 0.0,
            category: "livros".to_string(),
            seller: seller.to_string(),
        }
    }

    fn sample() -> Vec<Sale> {
        vec![
            sale((2020, 1, 15), "São Paulo", "Ana Costa", 100.0),
            sale((2021, 3, 2), "Bahia", "Beto Lima", 200.0),
            sale((2021, 7, 9), "Paraná", "Ana Costa", 300.0),
            sale((2022, 7, 9), "São Paulo", "Caio Reis", 400.0),
        ]
    }

    #[test]
    fn test_no_criteria_is_identity() {
        let sales = sample();
        let filtered = apply(sales.clone(), &FilterCriteria::default());
        assert_eq!(filtered.len(), sales.len());
        assert_eq!(filtered[0].seller, "Ana Costa");
        assert_eq!(filtered[3].price, 400.0);
    }

    #[test]
    fn test_seller_filter_is_subset() {
        let criteria = FilterCriteria {
            sellers: vec!["Ana Costa".to_string()],
            ..Default::default()
        };
        let filtered = apply(sample(), &criteria);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|s| s.seller == "Ana Costa"));
        // Order preserved
        assert_eq!(filtered[0].price, 100.0);
        assert_eq!(filtered[1].price, 300.0);
    }

    #[test]
    fn test_region_filter_applies() {
        let criteria = FilterCriteria {
            region: Some(Region::Sudeste),
            ..Default::default()
        };
        let filtered = apply(sample(), &criteria);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|s| s.state == "São Paulo"));
    }

    #[test]
    fn test_year_filter_applies() {
        let criteria = FilterCriteria {
            year: Some(2021),
            ..Default::default()
        };
        let filtered = apply(sample(), &criteria);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].state, "Bahia");
        assert_eq!(filtered[1].state, "Paraná");
    }

    #[test]
    fn test_combined_criteria() {
        let criteria = FilterCriteria {
            region: Some(Region::Sudeste),
            year: Some(2022),
            sellers: vec!["Caio Reis".to_string(), "Ana Costa".to_string()],
        };
        let filtered = apply(sample(), &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].price, 400.0);
    }

    #[test]
    fn test_criteria_can_yield_empty() {
        let criteria = FilterCriteria {
            year: Some(2019),
            ..Default::default()
        };
        assert!(apply(sample(), &criteria).is_empty());
    }
}
