//! Capacity-aware placement of product units into an order's cartons.

use super::{Cart, CartonIds};
use crate::models::{CartonCapacity, Product};

/// Places product units into the cartons of one order under the carton
/// capacity and the cart limit.
///
/// Cartons are filled first-fit in opening order; new cartons are opened
/// only while the cart has a free slot. Placing fewer units than requested
/// is a normal outcome, not an error.
///
/// # Examples
///
/// ```
/// use u_picking::models::{CartonCapacity, Product};
/// use u_picking::packing::{Cart, CartonIds, CartonPacker};
///
/// let packer = CartonPacker::new(CartonCapacity::new(5, 100));
/// let unit = Product::new(1, 3, 1, 1);
/// let mut ids = CartonIds::new();
/// let mut cart = Cart::new(2);
///
/// assert_eq!(packer.placeable_units(&cart, 9, &unit), 10);
/// assert_eq!(packer.pack(&mut cart, &mut ids, 9, &unit, 12), 10);
/// assert_eq!(cart.len(), 2);
/// assert_eq!(packer.placeable_units(&cart, 9, &unit), 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CartonPacker {
    capacity: CartonCapacity,
}

impl CartonPacker {
    /// Creates a packer for cartons of the given capacity.
    pub fn new(capacity: CartonCapacity) -> Self {
        Self { capacity }
    }

    /// Places up to `quantity` units of `product` for `order_id` and returns
    /// the number of units placed.
    ///
    /// Existing cartons of the order are topped up first. While units remain
    /// and the cart has a free slot, a new carton is opened and filled; if a
    /// fresh carton cannot take a single unit it stays open and empty and the
    /// placement stops.
    pub fn pack(
        &self,
        cart: &mut Cart,
        ids: &mut CartonIds,
        order_id: u32,
        product: &Product,
        quantity: u64,
    ) -> u64 {
        let mut placed = 0;

        for carton in cart.cartons_of_mut(order_id) {
            let add = carton
                .units_admissible(product, &self.capacity)
                .min(quantity - placed);
            if add > 0 {
                carton.add(product, add);
                placed += add;
            }
            if placed >= quantity {
                return placed;
            }
        }

        while placed < quantity && cart.has_free_slot() {
            let carton = cart.open(order_id, ids);
            let add = carton
                .units_admissible(product, &self.capacity)
                .min(quantity - placed);
            if add == 0 {
                break;
            }
            carton.add(product, add);
            placed += add;
            debug_assert!(carton.fits(&self.capacity));
        }

        placed
    }

    /// Units of `product` that could be placed for `order_id` without
    /// changing the cart: spare room in the order's open cartons plus full
    /// cartons in every free slot.
    ///
    /// Saturates at `u64::MAX` for dimensionless products.
    pub fn placeable_units(&self, cart: &Cart, order_id: u32, product: &Product) -> u64 {
        let in_open = cart
            .cartons_of(order_id)
            .map(|c| c.units_admissible(product, &self.capacity))
            .fold(0u64, u64::saturating_add);
        let per_fresh = product.units_within(self.capacity.weight, self.capacity.volume);
        let in_free = per_fresh.saturating_mul(cart.free_slots() as u64);
        in_open.saturating_add(in_free)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packer() -> CartonPacker {
        CartonPacker::new(CartonCapacity::new(10, 10))
    }

    #[test]
    fn test_tops_up_existing_carton_first() {
        let small = Product::new(1, 1, 1, 1);
        let big = Product::new(2, 2, 5, 5);
        let mut ids = CartonIds::new();
        let mut cart = Cart::new(6);
        cart.open(1, &mut ids);
        assert_eq!(packer().pack(&mut cart, &mut ids, 1, &small, 3), 3);
        assert_eq!(packer().pack(&mut cart, &mut ids, 1, &big, 1), 1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.cartons()[0].weight(), 8);
        assert_eq!(cart.cartons()[0].volume(), 8);
    }

    #[test]
    fn test_opens_new_cartons_until_limit() {
        let p = Product::new(1, 1, 4, 1);
        let mut ids = CartonIds::new();
        let mut cart = Cart::new(2);
        cart.open(1, &mut ids);
        let placed = packer().pack(&mut cart, &mut ids, 1, &p, 10);
        assert_eq!(placed, 4);
        assert_eq!(cart.len(), 2);
        assert!(cart.cartons().iter().all(|c| c.weight() == 8));
    }

    #[test]
    fn test_does_not_use_other_orders_cartons() {
        let p = Product::new(1, 1, 1, 1);
        let mut ids = CartonIds::new();
        let mut cart = Cart::new(2);
        cart.open(1, &mut ids);
        cart.open(2, &mut ids);
        assert_eq!(packer().pack(&mut cart, &mut ids, 2, &p, 15), 10);
        assert!(cart.cartons()[0].is_empty());
        assert_eq!(cart.cartons()[1].quantity(1), 10);
    }

    #[test]
    fn test_oversized_product_leaves_empty_carton() {
        let huge = Product::new(1, 1, 11, 1);
        let mut ids = CartonIds::new();
        let mut cart = Cart::new(3);
        cart.open(1, &mut ids);
        assert_eq!(packer().pack(&mut cart, &mut ids, 1, &huge, 1), 0);
        assert_eq!(cart.len(), 2);
        assert!(cart.cartons().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_zero_weight_bounded_by_volume() {
        let p = Product::new(1, 1, 0, 3);
        let mut ids = CartonIds::new();
        let mut cart = Cart::new(1);
        assert_eq!(packer().pack(&mut cart, &mut ids, 1, &p, 100), 3);
    }

    #[test]
    fn test_dimensionless_product_bounded_by_request() {
        let p = Product::new(1, 1, 0, 0);
        let mut ids = CartonIds::new();
        let mut cart = Cart::new(1);
        assert_eq!(packer().placeable_units(&cart, 1, &p), u64::MAX);
        assert_eq!(packer().pack(&mut cart, &mut ids, 1, &p, 1_000), 1_000);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_placeable_counts_open_and_free() {
        let p = Product::new(1, 1, 3, 1);
        let mut ids = CartonIds::new();
        let mut cart = Cart::new(3);
        cart.open(1, &mut ids).add(&p, 2);
        cart.open(2, &mut ids);
        // order 1: 1 more unit in its carton, 3 in the single free slot
        assert_eq!(packer().placeable_units(&cart, 1, &p), 4);
        // order 2: 3 in its empty carton, 3 in the free slot
        assert_eq!(packer().placeable_units(&cart, 2, &p), 6);
    }

    #[test]
    fn test_zero_request_places_nothing() {
        let p = Product::new(1, 1, 1, 1);
        let mut ids = CartonIds::new();
        let mut cart = Cart::new(2);
        assert_eq!(packer().pack(&mut cart, &mut ids, 1, &p, 0), 0);
        assert!(cart.is_empty());
    }
}
