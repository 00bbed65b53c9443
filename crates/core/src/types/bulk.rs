//! Bulk (tiered) pricing for schools, studios, and large orders.
//!
//! The remote platform expresses a tier as a quantity range plus one of three
//! discount shapes. All derived values are computed in the display currency.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a bulk tier adjusts the base unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierDiscount {
    /// Percentage off the base price (e.g., 15.0 for 15% off).
    PercentOff(Decimal),
    /// Absolute reduction from the base price.
    PriceOff(Decimal),
    /// Fixed unit price that replaces the base price.
    FixedPrice(Decimal),
}

/// One bulk pricing tier: a quantity range and its discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPricingTier {
    /// Smallest quantity this tier applies to.
    pub min_quantity: u32,
    /// Largest quantity this tier applies to; `None` means open-ended.
    pub max_quantity: Option<u32>,
    /// The discount shape.
    pub discount: TierDiscount,
}

impl BulkPricingTier {
    /// Effective unit price at this tier for a given base unit price.
    ///
    /// Never returns a negative price; an over-large `PriceOff` clamps to
    /// zero.
    #[must_use]
    pub fn unit_price(&self, base_price: Decimal) -> Decimal {
        let price = match self.discount {
            TierDiscount::PercentOff(percent) => {
                base_price * (Decimal::ONE_HUNDRED - percent) / Decimal::ONE_HUNDRED
            }
            TierDiscount::PriceOff(off) => base_price - off,
            TierDiscount::FixedPrice(fixed) => fixed,
        };
        price.max(Decimal::ZERO)
    }

    /// Whole-number percentage saved at this tier, for badge display.
    ///
    /// Zero when the base price is zero or the tier does not lower the price.
    #[must_use]
    pub fn save_percent(&self, base_price: Decimal) -> u32 {
        if base_price <= Decimal::ZERO {
            return 0;
        }
        let tier_price = self.unit_price(base_price);
        if tier_price >= base_price {
            return 0;
        }
        let percent = (base_price - tier_price) / base_price * Decimal::ONE_HUNDRED;
        percent.round().to_u32().unwrap_or(0)
    }

    /// Quantity range label, e.g., `"10 - 24"` or `"25+"`.
    #[must_use]
    pub fn range_label(&self) -> String {
        match self.max_quantity {
            Some(max) if max > 0 => format!("{} - {}", self.min_quantity, max),
            _ => format!("{}+", self.min_quantity),
        }
    }

    /// Whether a given order quantity falls in this tier.
    #[must_use]
    pub const fn contains(&self, quantity: u32) -> bool {
        if quantity < self.min_quantity {
            return false;
        }
        match self.max_quantity {
            Some(max) => quantity <= max,
            None => true,
        }
    }
}

/// Pick the applicable tier for an order quantity, if any.
///
/// Tiers are expected to be non-overlapping; if the remote data overlaps, the
/// first match (lowest `min_quantity` after sorting) wins.
#[must_use]
pub fn tier_for_quantity(tiers: &[BulkPricingTier], quantity: u32) -> Option<&BulkPricingTier> {
    let mut sorted: Vec<&BulkPricingTier> = tiers.iter().collect();
    sorted.sort_by_key(|t| t.min_quantity);
    sorted.into_iter().find(|t| t.contains(quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: i64, scale: u32) -> Decimal {
        Decimal::new(value, scale)
    }

    #[test]
    fn percent_off_unit_price() {
        let tier = BulkPricingTier {
            min_quantity: 10,
            max_quantity: Some(24),
            discount: TierDiscount::PercentOff(d(15, 0)),
        };
        // $100.00 at 15% off = $85.00
        assert_eq!(tier.unit_price(d(10000, 2)), d(850_000, 4));
        assert_eq!(tier.save_percent(d(10000, 2)), 15);
    }

    #[test]
    fn price_off_clamps_at_zero() {
        let tier = BulkPricingTier {
            min_quantity: 50,
            max_quantity: None,
            discount: TierDiscount::PriceOff(d(200, 0)),
        };
        assert_eq!(tier.unit_price(d(150, 0)), Decimal::ZERO);
        assert_eq!(tier.save_percent(d(150, 0)), 100);
    }

    #[test]
    fn fixed_price_replaces_base() {
        let tier = BulkPricingTier {
            min_quantity: 25,
            max_quantity: None,
            discount: TierDiscount::FixedPrice(d(7500, 2)),
        };
        assert_eq!(tier.unit_price(d(10000, 2)), d(7500, 2));
        assert_eq!(tier.save_percent(d(10000, 2)), 25);
    }

    #[test]
    fn save_percent_rounds_to_nearest() {
        let tier = BulkPricingTier {
            min_quantity: 10,
            max_quantity: None,
            discount: TierDiscount::FixedPrice(d(666, 2)),
        };
        // (10.00 - 6.66) / 10.00 = 33.4% -> 33
        assert_eq!(tier.save_percent(d(1000, 2)), 33);
    }

    #[test]
    fn save_percent_zero_for_zero_base() {
        let tier = BulkPricingTier {
            min_quantity: 10,
            max_quantity: None,
            discount: TierDiscount::PercentOff(d(10, 0)),
        };
        assert_eq!(tier.save_percent(Decimal::ZERO), 0);
    }

    #[test]
    fn range_labels() {
        let bounded = BulkPricingTier {
            min_quantity: 10,
            max_quantity: Some(24),
            discount: TierDiscount::PercentOff(d(10, 0)),
        };
        assert_eq!(bounded.range_label(), "10 - 24");

        let open = BulkPricingTier {
            min_quantity: 25,
            max_quantity: None,
            discount: TierDiscount::PercentOff(d(20, 0)),
        };
        assert_eq!(open.range_label(), "25+");

        // Zero max is how the remote platform spells "open-ended"
        let zero_max = BulkPricingTier {
            min_quantity: 25,
            max_quantity: Some(0),
            discount: TierDiscount::PercentOff(d(20, 0)),
        };
        assert_eq!(zero_max.range_label(), "25+");
    }

    #[test]
    fn tier_selection_by_quantity() {
        let tiers = vec![
            BulkPricingTier {
                min_quantity: 25,
                max_quantity: None,
                discount: TierDiscount::PercentOff(d(20, 0)),
            },
            BulkPricingTier {
                min_quantity: 10,
                max_quantity: Some(24),
                discount: TierDiscount::PercentOff(d(10, 0)),
            },
        ];

        assert!(tier_for_quantity(&tiers, 5).is_none());
        assert_eq!(
            tier_for_quantity(&tiers, 12).map(|t| t.min_quantity),
            Some(10)
        );
        assert_eq!(
            tier_for_quantity(&tiers, 100).map(|t| t.min_quantity),
            Some(25)
        );
    }
}
