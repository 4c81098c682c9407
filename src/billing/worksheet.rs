use super::amount::{Amount, Quantity};
use super::totals::{compute_totals, LineItem, Surcharges, Totals};

/// The lines and surcharges of an order while it is being edited.
///
/// Every edit recomputes the totals from the full current state, so the
/// cached totals always equal `compute_totals(items, surcharges)`.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    items: Vec<LineItem>,
    surcharges: Surcharges,
    totals: Totals,
}

impl Worksheet {
    pub fn new(items: Vec<LineItem>, surcharges: Surcharges) -> Self {
        let mut sheet = Self {
            items,
            surcharges,
            totals: Totals::default(),
        };
        sheet.recompute();
        sheet
    }

    /// One zero-quantity line per catalog product.
    pub fn from_catalog<I>(products: I) -> Self
    where
        I: IntoIterator<Item = (String, Amount)>,
    {
        let items = products
            .into_iter()
            .map(|(name, price)| LineItem::new(name, price, Quantity::ZERO))
            .collect();
        Self::new(items, Surcharges::new())
    }

    /// Returns `None` when `index` is past the last line.
    pub fn set_quantity(&mut self, index: usize, quantity: Quantity) -> Option<Totals> {
        self.items.get_mut(index)?.quantity = quantity;
        Some(self.recompute())
    }

    pub fn set_unit_price(&mut self, index: usize, unit_price: Amount) -> Option<Totals> {
        self.items.get_mut(index)?.unit_price = unit_price;
        Some(self.recompute())
    }

    pub fn set_surcharge(&mut self, name: impl Into<String>, amount: Amount) -> Totals {
        self.surcharges.set(name, amount);
        self.recompute()
    }

    pub fn remove_surcharge(&mut self, name: &str) -> Totals {
        self.surcharges.remove(name);
        self.recompute()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn surcharges(&self) -> &Surcharges {
        &self.surcharges
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    fn recompute(&mut self) -> Totals {
        self.totals = compute_totals(&self.items, &self.surcharges);
        self.totals
    }
}
