//! Validation utilities for the Fruit Inventory Management system

use rust_decimal::Decimal;

// ============================================================================
// Stock Validations
// ============================================================================

/// Validate that a stock quantity is strictly positive
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

/// Validate that a price is non-negative
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

/// Validate a shelf life in days
pub fn validate_shelf_life(days: i32) -> Result<(), &'static str> {
    if days <= 0 {
        return Err("Shelf life must be at least one day");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate a master data name (non-empty, bounded length)
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty");
    }
    if trimmed.len() > 100 {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

/// Validate a unit of measure (e.g. "kg", "box")
pub fn validate_unit(unit: &str) -> Result<(), &'static str> {
    if unit.trim().is_empty() {
        return Err("Unit must not be empty");
    }
    if unit.len() > 10 {
        return Err("Unit must be at most 10 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn quantity_must_be_positive() {
        assert!(validate_quantity(dec("0.01")).is_ok());
        assert!(validate_quantity(Decimal::ZERO).is_err());
        assert!(validate_quantity(dec("-5.0")).is_err());
    }

    #[test]
    fn price_cannot_be_negative() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(dec("12.50")).is_ok());
        assert!(validate_price(dec("-0.01")).is_err());
    }

    #[test]
    fn name_bounds() {
        assert!(validate_name("Fuji Apple").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn unit_bounds() {
        assert!(validate_unit("kg").is_ok());
        assert!(validate_unit("").is_err());
        assert!(validate_unit("kilogrammmmm").is_err());
    }
}
