//! Carton (box) and carton capacity types.

use serde::{Deserialize, Serialize};

use super::Product;

/// Weight and volume capacity shared by every carton of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartonCapacity {
    /// Maximum accumulated weight.
    pub weight: u64,
    /// Maximum accumulated volume.
    pub volume: u64,
}

impl CartonCapacity {
    /// Creates a capacity bound.
    pub fn new(weight: u64, volume: u64) -> Self {
        Self { weight, volume }
    }
}

/// A quantity of one product packed in a carton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartonLine {
    /// Product ID.
    pub product_id: u32,
    /// Units packed.
    pub quantity: u64,
}

/// A carton filled for exactly one order.
///
/// Lines keep the order in which products were first placed; that is the
/// order in which they appear in the solution file.
///
/// # Examples
///
/// ```
/// use u_picking::models::{Carton, CartonCapacity, Product};
///
/// let cap = CartonCapacity::new(10, 10);
/// let small = Product::new(1, 3, 1, 1);
/// let mut carton = Carton::new(1, 42);
/// carton.add(&small, 3);
/// assert_eq!(carton.weight(), 3);
/// assert_eq!(carton.units_admissible(&small, &cap), 7);
/// assert_eq!(carton.quantity(1), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carton {
    id: u32,
    order_id: u32,
    weight: u64,
    volume: u64,
    lines: Vec<CartonLine>,
}

impl Carton {
    /// Creates an empty carton for the given order.
    pub fn new(id: u32, order_id: u32) -> Self {
        Self {
            id,
            order_id,
            weight: 0,
            volume: 0,
            lines: Vec::new(),
        }
    }

    /// Carton ID.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Owning order ID.
    pub fn order_id(&self) -> u32 {
        self.order_id
    }

    /// Accumulated weight.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Accumulated volume.
    pub fn volume(&self) -> u64 {
        self.volume
    }

    /// Packed lines in first-placement order.
    pub fn lines(&self) -> &[CartonLine] {
        &self.lines
    }

    /// Returns `true` if no product has been placed.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Units of a product packed in this carton.
    pub fn quantity(&self, product_id: u32) -> u64 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map_or(0, |l| l.quantity)
    }

    /// Units of `product` that still fit without exceeding `capacity`.
    pub fn units_admissible(&self, product: &Product, capacity: &CartonCapacity) -> u64 {
        product.units_within(
            capacity.weight.saturating_sub(self.weight),
            capacity.volume.saturating_sub(self.volume),
        )
    }

    /// Places `quantity` units of `product`.
    ///
    /// Capacity is the caller's responsibility (see [`Carton::units_admissible`]).
    pub fn add(&mut self, product: &Product, quantity: u64) {
        self.weight += product.unit_weight() * quantity;
        self.volume += product.unit_volume() * quantity;
        match self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id())
        {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartonLine {
                product_id: product.id(),
                quantity,
            }),
        }
    }

    /// Returns `true` if weight and volume are within `capacity`.
    pub fn fits(&self, capacity: &CartonCapacity) -> bool {
        self.weight <= capacity.weight && self.volume <= capacity.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carton_empty() {
        let c = Carton::new(3, 9);
        assert!(c.is_empty());
        assert_eq!(c.id(), 3);
        assert_eq!(c.order_id(), 9);
        assert_eq!(c.weight(), 0);
        assert_eq!(c.volume(), 0);
    }

    #[test]
    fn test_add_merges_lines_in_first_placement_order() {
        let a = Product::new(5, 1, 1, 2);
        let b = Product::new(2, 1, 3, 1);
        let mut c = Carton::new(1, 1);
        c.add(&a, 1);
        c.add(&b, 2);
        c.add(&a, 3);
        let ids: Vec<u32> = c.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![5, 2]);
        assert_eq!(c.quantity(5), 4);
        assert_eq!(c.weight(), 4 + 6);
        assert_eq!(c.volume(), 8 + 2);
    }

    #[test]
    fn test_units_admissible_saturates() {
        let cap = CartonCapacity::new(5, 5);
        let p = Product::new(1, 1, 2, 1);
        let mut c = Carton::new(1, 1);
        c.add(&p, 4);
        assert!(!c.fits(&cap));
        assert_eq!(c.units_admissible(&p, &cap), 0);
    }
}
