//! Cart carried during one tour and the run-wide carton ID sequence.

use crate::models::Carton;

/// Run-wide carton ID sequence, starting at 1.
///
/// Every opened carton consumes an ID, including cartons later discarded
/// because they stayed empty.
#[derive(Debug, Clone)]
pub struct CartonIds {
    next: u32,
}

impl CartonIds {
    /// Creates a sequence starting at 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the next ID.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of IDs handed out so far.
    pub fn issued(&self) -> u32 {
        self.next - 1
    }
}

impl Default for CartonIds {
    fn default() -> Self {
        Self::new()
    }
}

/// The cartons open during one tour, bounded by the cart limit K.
///
/// K is shared by all orders active in the tour.
///
/// # Examples
///
/// ```
/// use u_picking::packing::{Cart, CartonIds};
///
/// let mut ids = CartonIds::new();
/// let mut cart = Cart::new(2);
/// cart.open(7, &mut ids);
/// assert_eq!(cart.free_slots(), 1);
/// cart.open(8, &mut ids);
/// assert!(!cart.has_free_slot());
/// assert_eq!(cart.cartons_of(7).count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Cart {
    cartons: Vec<Carton>,
    limit: usize,
}

impl Cart {
    /// Creates an empty cart holding at most `limit` cartons.
    pub fn new(limit: usize) -> Self {
        Self {
            cartons: Vec::new(),
            limit,
        }
    }

    /// Opens an empty carton for `order_id` and returns it.
    ///
    /// Does not check the limit; callers check [`Cart::has_free_slot`] first
    /// except when opening the first carton of a single-order tour.
    pub fn open(&mut self, order_id: u32, ids: &mut CartonIds) -> &mut Carton {
        self.cartons.push(Carton::new(ids.next_id(), order_id));
        let last = self.cartons.len() - 1;
        &mut self.cartons[last]
    }

    /// Number of open cartons, empty ones included.
    pub fn len(&self) -> usize {
        self.cartons.len()
    }

    /// Returns `true` if no carton is open.
    pub fn is_empty(&self) -> bool {
        self.cartons.is_empty()
    }

    /// Cartons that can still be opened.
    pub fn free_slots(&self) -> usize {
        self.limit.saturating_sub(self.cartons.len())
    }

    /// Returns `true` if another carton can be opened.
    pub fn has_free_slot(&self) -> bool {
        self.cartons.len() < self.limit
    }

    /// All open cartons in opening order.
    pub fn cartons(&self) -> &[Carton] {
        &self.cartons
    }

    /// Open cartons of one order, in opening order.
    pub fn cartons_of(&self, order_id: u32) -> impl Iterator<Item = &Carton> {
        self.cartons.iter().filter(move |c| c.order_id() == order_id)
    }

    pub(crate) fn cartons_of_mut(&mut self, order_id: u32) -> impl Iterator<Item = &mut Carton> {
        self.cartons
            .iter_mut()
            .filter(move |c| c.order_id() == order_id)
    }

    /// Closes the cart, keeping only cartons that received products.
    pub fn into_filled(self) -> Vec<Carton> {
        self.cartons.into_iter().filter(|c| !c.is_empty()).collect()
    }
}
