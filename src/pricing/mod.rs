//! Pure derivation of cart totals, shipping, and the amount to pay.
//!
//! Nothing here is cached: every read recomputes the snapshot from the
//! current lines, so there is no derived state to fall out of sync.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::CartLine;

/// Order totals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: u32 = 500;

/// Flat shipping fee charged at or below the threshold.
pub const SHIPPING_FEE: u32 = 40;

/// Totals derived from the cart contents at a point in time.
///
/// Amounts stay at full precision; round for display only, via
/// [`PricingSnapshot::rounded_for_display`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSnapshot {
    /// Cases in the cart (sum of line quantities).
    pub total_items: u32,
    pub order_total: Decimal,
    pub shipping: Decimal,
    pub to_pay: Decimal,
}

impl PricingSnapshot {
    /// Amounts rounded to two decimal places, for rendering.
    pub fn rounded_for_display(&self) -> PricingSnapshot {
        PricingSnapshot {
            total_items: self.total_items,
            order_total: self.order_total.round_dp(2),
            shipping: self.shipping.round_dp(2),
            to_pay: self.to_pay.round_dp(2),
        }
    }
}

/// Compute the snapshot for the given lines.
///
/// An empty cart ships free; otherwise the flat fee applies unless the
/// order total strictly exceeds [`FREE_SHIPPING_THRESHOLD`].
pub fn price_lines(lines: &[CartLine]) -> PricingSnapshot {
    let total_items: u32 = lines.iter().map(|line| line.quantity).sum();

    let order_total: Decimal = lines
        .iter()
        .map(|line| line.case_size.offered_price * Decimal::from(line.quantity))
        .sum();

    let shipping = if lines.is_empty() || order_total > Decimal::from(FREE_SHIPPING_THRESHOLD) {
        Decimal::ZERO
    } else {
        Decimal::from(SHIPPING_FEE)
    };

    PricingSnapshot {
        total_items,
        order_total,
        shipping,
        to_pay: order_total + shipping,
    }
}

/// Convert an amount to the gateway's minor unit (e.g. rupees to paise).
///
/// Rounds to two decimal places first, so the scaling by 100 is exact and
/// the charge cannot drift by a cent from the displayed total. Returns
/// `None` only if the amount does not fit an `i64`.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    (amount.round_dp(2) * Decimal::from(100u32)).to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CaseSize, Product};

    fn product(id: &str, stock: u32, size: u32, offered: Decimal) -> (Product, CaseSize) {
        let case = CaseSize {
            size,
            price: offered + Decimal::from(20u32),
            offered_price: offered,
            is_default: true,
        };
        let product = Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            brand: None,
            images: vec![],
            stock,
            case_sizes: vec![case.clone()],
        };
        (product, case)
    }

    fn line(id: &str, quantity: u32, size: u32, offered: Decimal) -> CartLine {
        let (product, case) = product(id, 1000, size, offered);
        let mut line = CartLine::first(&product, &case);
        line.quantity = quantity;
        line
    }

    #[test]
    fn empty_cart_is_all_zero() {
        let snapshot = price_lines(&[]);
        assert_eq!(snapshot.total_items, 0);
        assert_eq!(snapshot.order_total, Decimal::ZERO);
        assert_eq!(snapshot.shipping, Decimal::ZERO);
        assert_eq!(snapshot.to_pay, Decimal::ZERO);
    }

    #[test]
    fn order_total_is_sum_of_offered_prices() {
        let lines = [
            line("p1", 2, 1, Decimal::from(80u32)),
            line("p2", 1, 6, Decimal::from(120u32)),
        ];
        let snapshot = price_lines(&lines);
        assert_eq!(snapshot.total_items, 3);
        assert_eq!(snapshot.order_total, Decimal::from(280u32));
    }

    #[test]
    fn order_total_is_independent_of_line_order() {
        let a = line("p1", 2, 1, Decimal::from(80u32));
        let b = line("p2", 3, 6, Decimal::from(120u32));
        let forward = price_lines(&[a.clone(), b.clone()]);
        let backward = price_lines(&[b, a]);
        assert_eq!(forward.order_total, backward.order_total);
        assert_eq!(forward.to_pay, backward.to_pay);
    }

    #[test]
    fn shipping_threshold_is_strict() {
        // Exactly 500.00 still pays the fee.
        let at_threshold = price_lines(&[line("p1", 1, 1, Decimal::from(500u32))]);
        assert_eq!(at_threshold.shipping, Decimal::from(SHIPPING_FEE));
        assert_eq!(at_threshold.to_pay, Decimal::from(540u32));

        // 500.01 ships free.
        let above = price_lines(&[line("p1", 1, 1, Decimal::new(50001, 2))]);
        assert_eq!(above.shipping, Decimal::ZERO);
        assert_eq!(above.to_pay, Decimal::new(50001, 2));
    }

    #[test]
    fn free_shipping_above_threshold() {
        let snapshot = price_lines(&[line("p1", 1, 1, Decimal::from(600u32))]);
        assert_eq!(snapshot.shipping, Decimal::ZERO);
        assert_eq!(snapshot.to_pay, Decimal::from(600u32));
    }

    #[test]
    fn basic_add_scenario_totals() {
        // stock 10, size 1, offered 80: one case in the cart.
        let snapshot = price_lines(&[line("p1", 1, 1, Decimal::from(80u32))]);
        assert_eq!(snapshot.total_items, 1);
        assert_eq!(snapshot.order_total, Decimal::from(80u32));
        assert_eq!(snapshot.shipping, Decimal::from(40u32));
        assert_eq!(snapshot.to_pay, Decimal::from(120u32));
    }

    #[test]
    fn minor_units_are_exact() {
        assert_eq!(to_minor_units(Decimal::from(120u32)), Some(12000));
        assert_eq!(to_minor_units(Decimal::new(50001, 2)), Some(50001));
        // Sub-paise noise rounds rather than truncating.
        assert_eq!(to_minor_units(Decimal::new(99999, 3)), Some(10000));
    }

    #[test]
    fn display_rounding_does_not_touch_the_snapshot() {
        let snapshot = price_lines(&[line("p1", 3, 1, Decimal::new(3333, 2))]);
        assert_eq!(snapshot.order_total, Decimal::new(9999, 2));
        let display = snapshot.rounded_for_display();
        assert_eq!(display.order_total, Decimal::new(9999, 2));
        assert_eq!(snapshot.total_items, display.total_items);
    }
}
