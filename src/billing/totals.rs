use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::amount::{Amount, Quantity};

/// One product line of a sale or order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, alias = "productName")]
    pub name: String,
    #[serde(default, alias = "productPrice")]
    pub unit_price: Amount,
    #[serde(default)]
    pub quantity: Quantity,
}

impl LineItem {
    pub fn new(name: impl Into<String>, unit_price: impl Into<Amount>, quantity: impl Into<Quantity>) -> Self {
        Self {
            name: name.into(),
            unit_price: unit_price.into(),
            quantity: quantity.into(),
        }
    }

    pub fn line_total(&self) -> Amount {
        self.unit_price * self.quantity
    }
}

/// Named extra charges (kata, transport, ...) added on top of the product total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Surcharges(BTreeMap<String, Amount>);

impl Surcharges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, amount: impl Into<Amount>) {
        self.0.insert(name.into(), amount.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Amount> {
        self.0.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<Amount> {
        self.0.get(name).copied()
    }

    pub fn total(&self) -> Amount {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Amount)> {
        self.0.iter().map(|(name, amount)| (name.as_str(), *amount))
    }
}

impl<K: Into<String>, V: Into<Amount>> FromIterator<(K, V)> for Surcharges {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Surcharges(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub product_total: Amount,
    pub surcharge_total: Amount,
    pub final_total: Amount,
}

/// Computes the product and final totals from scratch.
///
/// `product_total` is the sum of every line total and `final_total` adds all
/// surcharges to it. Nothing is rounded.
pub fn compute_totals<'a, I>(items: I, surcharges: &Surcharges) -> Totals
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let product_total: Amount = items.into_iter().map(LineItem::line_total).sum();
    let surcharge_total = surcharges.total();

    Totals {
        product_total,
        surcharge_total,
        final_total: product_total + surcharge_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_items() -> Vec<LineItem> {
        vec![LineItem::new("Rice", 100.0, 2u32), LineItem::new("Dal", 50.0, 3u32)]
    }

    #[test]
    fn computes_product_and_final_totals() {
        let surcharges: Surcharges = [("kata", 10.0), ("transport", 20.0)].into_iter().collect();

        let totals = compute_totals(&sample_items(), &surcharges);

        assert_eq!(totals.product_total.value(), 350.0);
        assert_eq!(totals.surcharge_total.value(), 30.0);
        assert_eq!(totals.final_total.value(), 380.0);
    }

    #[test]
    fn final_equals_product_without_surcharges() {
        let totals = compute_totals(&sample_items(), &Surcharges::new());
        assert_eq!(totals.final_total, totals.product_total);
    }

    #[test]
    fn order_of_items_does_not_matter() {
        let mut reversed = sample_items();
        reversed.reverse();
        let surcharges = Surcharges::new();

        assert_eq!(
            compute_totals(&sample_items(), &surcharges),
            compute_totals(&reversed, &surcharges)
        );
    }

    #[test]
    fn fractional_prices_sum_exactly_in_any_order() {
        let items = vec![
            LineItem::new("Tea", 0.1, 1u32),
            LineItem::new("Salt", 0.2, 1u32),
            LineItem::new("Soap", 0.3, 1u32),
        ];
        let mut reversed = items.clone();
        reversed.reverse();
        let surcharges = Surcharges::new();

        let forward = compute_totals(&items, &surcharges);
        assert_eq!(forward, compute_totals(&reversed, &surcharges));
        assert_eq!(forward.product_total.to_string(), "0.6");
    }

    #[test]
    fn huge_totals_saturate_instead_of_vanishing() {
        let items: Vec<LineItem> = serde_json::from_value(json!([
            { "name": "Gold", "unitPrice": 1e308, "quantity": 1 },
            { "name": "Gold", "unitPrice": 1e308, "quantity": 1 }
        ]))
        .unwrap();

        let totals = compute_totals(&items, &Surcharges::new());
        assert!(!totals.product_total.is_zero());
        assert_eq!(totals.final_total, Amount::MAX);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let items = sample_items();
        let surcharges: Surcharges = [("kata", 5.0)].into_iter().collect();
        assert_eq!(compute_totals(&items, &surcharges), compute_totals(&items, &surcharges));
    }

    #[test]
    fn empty_input_totals_zero() {
        let items: Vec<LineItem> = Vec::new();
        let totals = compute_totals(&items, &Surcharges::new());
        assert!(totals.final_total.is_zero());
    }

    #[test]
    fn malformed_lines_contribute_nothing() {
        let items: Vec<LineItem> = serde_json::from_value(json!([
            { "productName": "Oil", "productPrice": 120, "quantity": 2 },
            { "productName": "Salt", "productPrice": "abc", "quantity": 4 },
            { "productName": "Sugar", "quantity": 1 },
            { "name": "Tea", "unitPrice": "30", "quantity": "3" }
        ]))
        .unwrap();

        let totals = compute_totals(&items, &Surcharges::new());
        assert_eq!(totals.product_total.value(), 330.0);
    }

    #[test]
    fn surcharges_deserialize_leniently() {
        let surcharges: Surcharges =
            serde_json::from_value(json!({ "kata": "15", "transport": null, "loading": 5 })).unwrap();

        assert_eq!(surcharges.total().value(), 20.0);
        assert_eq!(surcharges.get("transport"), Some(Amount::ZERO));
    }
}
