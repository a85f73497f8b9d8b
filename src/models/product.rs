//! Product reference data.

/// A product stored at one location of the facility.
///
/// Unit weight and volume are the amounts one unit adds to a carton. A zero
/// dimension never limits how many units fit into a carton.
///
/// # Examples
///
/// ```
/// use u_picking::models::Product;
///
/// let p = Product::new(1, 12, 3, 5);
/// assert_eq!(p.id(), 1);
/// assert_eq!(p.location(), 12);
/// assert_eq!(p.unit_weight(), 3);
/// assert_eq!(p.unit_volume(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: u32,
    location: u32,
    unit_weight: u64,
    unit_volume: u64,
}

impl Product {
    /// Creates a new product.
    pub fn new(id: u32, location: u32, unit_weight: u64, unit_volume: u64) -> Self {
        Self {
            id,
            location,
            unit_weight,
            unit_volume,
        }
    }

    /// Product ID.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Location ID where the product is picked.
    pub fn location(&self) -> u32 {
        self.location
    }

    /// Weight of one unit.
    pub fn unit_weight(&self) -> u64 {
        self.unit_weight
    }

    /// Volume of one unit.
    pub fn unit_volume(&self) -> u64 {
        self.unit_volume
    }

    /// Number of units that fit into the given spare weight and volume.
    ///
    /// Returns `u64::MAX` when both unit dimensions are zero.
    pub fn units_within(&self, spare_weight: u64, spare_volume: u64) -> u64 {
        let by_weight = match self.unit_weight {
            0 => u64::MAX,
            w => spare_weight / w,
        };
        let by_volume = match self.unit_volume {
            0 => u64::MAX,
            v => spare_volume / v,
        };
        by_weight.min(by_volume)
    }
}
