//! Price directive evaluation.
//!
//! A definition carries one directive per price field (market and
//! catalog). Each directive is evaluated independently against its own
//! source table. The wire encoding that distinguishes multipliers from
//! absolute prices lives in the definition schema, not here.

use serde::{Deserialize, Serialize};

/// How one price field of a synthesized entity derives from the origin's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PriceDirective {
    /// Copy the origin's value from the corresponding price table.
    Inherit,
    /// Multiply the origin's corresponding-table value by this factor.
    ScaleBy(f64),
    /// Use this value verbatim, ignoring the origin.
    Absolute(f64),
}

/// Evaluate a directive against the origin's price from the corresponding
/// table.
///
/// A missing origin price resolves to a missing price for the inherit and
/// scale cases -- it is passed through, never an error.
pub fn resolve_price(directive: PriceDirective, origin_price: Option<f64>) -> Option<f64> {
    match directive {
        PriceDirective::Inherit => origin_price,
        PriceDirective::ScaleBy(factor) => origin_price.map(|price| price * factor),
        PriceDirective::Absolute(value) => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inherit_copies_origin_value() {
        assert_eq!(resolve_price(PriceDirective::Inherit, Some(1000.0)), Some(1000.0));
    }

    #[test]
    fn inherit_passes_missing_price_through() {
        assert_eq!(resolve_price(PriceDirective::Inherit, None), None);
    }

    #[test]
    fn scale_multiplies_exactly() {
        assert_eq!(resolve_price(PriceDirective::ScaleBy(2.0), Some(1000.0)), Some(2000.0));
        assert_eq!(resolve_price(PriceDirective::ScaleBy(0.5), Some(333.0)), Some(166.5));
    }

    #[test]
    fn scale_of_missing_price_is_missing() {
        assert_eq!(resolve_price(PriceDirective::ScaleBy(2.0), None), None);
    }

    #[test]
    fn absolute_ignores_origin() {
        assert_eq!(resolve_price(PriceDirective::Absolute(7500.0), Some(1000.0)), Some(7500.0));
        assert_eq!(resolve_price(PriceDirective::Absolute(7500.0), None), Some(7500.0));
    }
}
