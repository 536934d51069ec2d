//! # Payload Validation
//!
//! Field constraints on inbound transfer objects. A payload is valid when
//! `validate` returns no violations. Lengths count characters, not bytes.

use std::fmt;

use serde::Serialize;

use crate::model::{BeerDto, CustomerDto};

/// One violated field constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Types that can check their own field constraints
pub trait Validate {
    fn validate(&self) -> Vec<Violation>;

    /// `Err` with every violation, or `Ok` when there are none
    fn check(&self) -> Result<(), Vec<Violation>> {
        let violations = self.validate();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn not_blank(violations: &mut Vec<Violation>, field: &'static str, value: Option<&str>) {
    if value.map_or(true, |v| v.trim().is_empty()) {
        violations.push(Violation::new(field, "must not be blank"));
    }
}

/// Length check that ignores absent values
fn size(
    violations: &mut Vec<Violation>,
    field: &'static str,
    value: Option<&str>,
    min: usize,
    max: usize,
) {
    if let Some(value) = value {
        let len = value.chars().count();
        if len < min || len > max {
            violations.push(Violation::new(
                field,
                format!("size must be between {} and {}", min, max),
            ));
        }
    }
}

impl Validate for BeerDto {
    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        not_blank(&mut violations, "beerName", self.beer_name.as_deref());
        size(&mut violations, "beerName", self.beer_name.as_deref(), 3, 255);
        size(&mut violations, "beerStyle", self.beer_style.as_deref(), 1, 255);
        size(&mut violations, "upc", self.upc.as_deref(), 1, 25);

        if matches!(self.quantity_on_hand, Some(q) if q < 0) {
            violations.push(Violation::new(
                "quantityOnHand",
                "must be greater than or equal to 0",
            ));
        }

        violations
    }
}

impl Validate for CustomerDto {
    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        not_blank(&mut violations, "name", self.name.as_deref());
        size(&mut violations, "name", self.name.as_deref(), 3, 20);
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(violations: &[Violation]) -> Vec<&'static str> {
        violations.iter().map(|v| v.field).collect()
    }

    #[test]
    fn test_valid_beer() {
        let dto = BeerDto {
            beer_style: Some("IPA".to_string()),
            upc: Some("12121213".to_string()),
            quantity_on_hand: Some(0),
            ..BeerDto::named("Space Dust")
        };
        assert!(dto.validate().is_empty());
    }

    #[test]
    fn test_missing_beer_name() {
        let violations = BeerDto::default().validate();
        assert_eq!(fields(&violations), vec!["beerName"]);
        assert_eq!(violations[0].message, "must not be blank");
    }

    #[test]
    fn test_blank_and_short_beer_name() {
        let violations = BeerDto::named("  ").validate();
        assert_eq!(fields(&violations), vec!["beerName", "beerName"]);
    }

    #[test]
    fn test_beer_bounds() {
        let dto = BeerDto {
            beer_style: Some(String::new()),
            upc: Some("1".repeat(26)),
            quantity_on_hand: Some(-1),
            ..BeerDto::named("x".repeat(256))
        };
        assert_eq!(
            fields(&dto.validate()),
            vec!["beerName", "beerStyle", "upc", "quantityOnHand"]
        );
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(BeerDto::named("Öl ß").validate().is_empty());
    }

    #[test]
    fn test_customer_name_bounds() {
        assert!(CustomerDto::named("Ada").validate().is_empty());
        assert_eq!(fields(&CustomerDto::named("Al").validate()), vec!["name"]);
        assert_eq!(
            fields(&CustomerDto::named("x".repeat(21)).validate()),
            vec!["name"]
        );
        assert_eq!(fields(&CustomerDto::default().validate()), vec!["name"]);
    }

    #[test]
    fn test_check() {
        assert!(CustomerDto::named("Ada").check().is_ok());
        let err = CustomerDto::named("").check().unwrap_err();
        assert_eq!(fields(&err), vec!["name", "name"]);
    }

    #[test]
    fn test_violation_display() {
        let v = Violation::new("name", "must not be blank");
        assert_eq!(v.to_string(), "name: must not be blank");
    }
}
