//! Instance text format reader.
//!
//! The format is line oriented. Sections start with a `//` header and are
//! matched by prefix; blank lines are ignored everywhere.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};

use crate::error::{PickingError, Result};
use crate::models::{
    Arc, CartonCapacity, DeclaredCounts, Instance, Location, Order, Product, ShortestPath,
};

const NB_LOCATIONS: &str = "//NbLocations";
const NB_PRODUCTS: &str = "//NbProducts";
const CART_LIMIT: &str = "//K: NbBoxesTrolley";
const NB_DIMENSIONS: &str = "//NbDimensionsCapacity";
const CAPACITY: &str = "//B: CapaBox";
const MIXED: &str = "//A box can accept mixed orders";
const PRODUCTS: &str = "//Products";
const NB_ORDERS: &str = "//NbOrders";
const NB_INTERSECTIONS: &str = "//NbVerticesIntersections";
const DEPARTING: &str = "//DepartingDepot";
const ARRIVAL: &str = "//ArrivalDepot";
const ARCS: &str = "//Arcs";
const SHORTEST_PATHS: &str = "//LocStart LocEnd ShortestPath";
const LOCATIONS: &str = "//Location coordinates LocationName";

/// Reads and parses an instance file.
pub fn read_instance(path: &Path) -> Result<Instance> {
    let text = fs::read_to_string(path).map_err(|e| PickingError::io(path, e))?;
    let instance = parse_instance(&text)?;
    debug!(
        "read {}: {} products, {} orders",
        path.display(),
        instance.products().len(),
        instance.orders().len()
    );
    Ok(instance)
}

/// Parses an instance from its text representation.
///
/// # Examples
///
/// ```
/// use u_picking::io::parse_instance;
///
/// let text = "//K: NbBoxesTrolley\n2\n//B: CapaBox\n10 20\n\
///             //Products\n1 5 2 3\n//NbOrders\n1\n1 1 1 1 4\n\
///             //DepartingDepot\n0\n//ArrivalDepot\n0\n";
/// let instance = parse_instance(text).expect("valid instance");
/// assert_eq!(instance.cart_limit(), 2);
/// assert_eq!(instance.capacity().volume, 20);
/// assert_eq!(instance.order(1).map(|o| o.quantity(1)), Some(4));
/// ```
pub fn parse_instance(text: &str) -> Result<Instance> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect();
    let mut cursor = Cursor { lines, pos: 0 };

    let mut declared = DeclaredCounts::default();
    let mut cart_limit: Option<usize> = None;
    let mut capacity: Option<Vec<u64>> = None;
    let mut mixed = false;
    let mut products: Option<Vec<Product>> = None;
    let mut orders: Option<Vec<Order>> = None;
    let mut departing: Option<u32> = None;
    let mut arrival: Option<u32> = None;
    let mut arcs = Vec::new();
    let mut paths = Vec::new();
    let mut locations = Vec::new();

    while let Some((number, line)) = cursor.advance() {
        if line.starts_with(NB_LOCATIONS) {
            declared.locations = Some(cursor.scalar(number, NB_LOCATIONS)?);
        } else if line.starts_with(NB_PRODUCTS) {
            declared.products = Some(cursor.scalar(number, NB_PRODUCTS)?);
        } else if line.starts_with(CART_LIMIT) {
            cart_limit = Some(cursor.scalar(number, CART_LIMIT)?);
        } else if line.starts_with(NB_DIMENSIONS) {
            declared.dimensions = Some(cursor.scalar(number, NB_DIMENSIONS)?);
        } else if line.starts_with(CAPACITY) {
            let (n, row) = cursor.value_line(number, CAPACITY)?;
            capacity = Some(integers(n, row)?);
        } else if line.starts_with(MIXED) {
            mixed = cursor.scalar::<u32>(number, MIXED)? != 0;
        } else if line.starts_with(PRODUCTS) {
            cursor.skip_header("//Idx");
            products = Some(read_products(&mut cursor)?);
        } else if line.starts_with(NB_ORDERS) {
            declared.orders = Some(cursor.scalar(number, NB_ORDERS)?);
            cursor.skip_header("//Idx");
            orders = Some(read_orders(&mut cursor)?);
        } else if line.starts_with(NB_INTERSECTIONS) {
            declared.intersections = Some(cursor.scalar(number, NB_INTERSECTIONS)?);
        } else if line.starts_with(DEPARTING) {
            departing = Some(cursor.scalar(number, DEPARTING)?);
        } else if line.starts_with(ARRIVAL) {
            arrival = Some(cursor.scalar(number, ARRIVAL)?);
        } else if line.starts_with(ARCS) {
            cursor.skip_header("//Start");
            arcs = read_triples(&mut cursor, "arc")?
                .into_iter()
                .map(|(from, to, distance)| Arc { from, to, distance })
                .collect();
        } else if line.starts_with(SHORTEST_PATHS) {
            paths = read_triples(&mut cursor, "shortest path")?
                .into_iter()
                .map(|(from, to, distance)| ShortestPath { from, to, distance })
                .collect();
        } else if line.starts_with(LOCATIONS) {
            cursor.skip_header("//Loc");
            locations = read_locations(&mut cursor)?;
        } else {
            debug!("line {number}: ignoring `{line}`");
        }
    }

    let cart_limit = cart_limit.ok_or(PickingError::MissingSection(CART_LIMIT))?;
    if cart_limit == 0 {
        return Err(PickingError::InvalidValue {
            field: "cart limit",
            reason: "must be at least 1".to_string(),
        });
    }
    let dims = capacity.ok_or(PickingError::MissingSection(CAPACITY))?;
    let capacity = match dims[..] {
        [weight, volume, ..] => CartonCapacity::new(weight, volume),
        _ => {
            return Err(PickingError::InvalidValue {
                field: "box capacity",
                reason: format!("expected at least 2 dimensions, found {}", dims.len()),
            })
        }
    };
    let departing = departing.ok_or(PickingError::MissingSection(DEPARTING))?;
    let arrival = arrival.ok_or(PickingError::MissingSection(ARRIVAL))?;
    let products = products.ok_or(PickingError::MissingSection(PRODUCTS))?;
    let orders = orders.ok_or(PickingError::MissingSection(NB_ORDERS))?;

    for mismatch in check_declared(&declared, dims.len(), &products, &orders) {
        warn!("{mismatch}");
    }

    let instance = Instance::new(products, orders, cart_limit, capacity, departing, arrival)
        .with_mixed_orders(mixed)
        .with_arcs(arcs)
        .with_shortest_paths(paths)
        .with_locations(locations)
        .with_declared(declared);

    for (order_id, product_id) in undefined_products(&instance) {
        warn!("order {order_id} references unknown product {product_id}");
    }

    Ok(instance)
}

/// `(order, product)` pairs whose product the instance does not define.
fn undefined_products(instance: &Instance) -> Vec<(u32, u32)> {
    instance
        .orders()
        .iter()
        .flat_map(|o| o.demand().keys().map(move |&pid| (o.id(), pid)))
        .filter(|&(_, pid)| instance.product(pid).is_none())
        .collect()
}

struct Cursor<'a> {
    lines: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn advance(&mut self) -> Option<(usize, &'a str)> {
        let line = self.lines.get(self.pos).copied();
        self.pos += 1;
        line
    }

    fn peek(&self) -> Option<(usize, &'a str)> {
        self.lines.get(self.pos).copied()
    }

    /// Next non-header row of the current section.
    fn row(&mut self) -> Option<(usize, &'a str)> {
        match self.peek() {
            Some((_, line)) if !line.starts_with("//") => self.advance(),
            _ => None,
        }
    }

    fn skip_header(&mut self, prefix: &str) {
        if matches!(self.peek(), Some((_, line)) if line.starts_with(prefix)) {
            self.pos += 1;
        }
    }

    fn value_line(&mut self, header_line: usize, header: &str) -> Result<(usize, &'a str)> {
        self.row().ok_or_else(|| PickingError::MalformedLine {
            line: header_line,
            reason: format!("`{header}` has no value"),
        })
    }

    fn scalar<T: FromStr>(&mut self, header_line: usize, header: &str) -> Result<T> {
        let (number, line) = self.value_line(header_line, header)?;
        integer(number, line)
    }
}

fn integer<T: FromStr>(line: usize, token: &str) -> Result<T> {
    token.parse().map_err(|_| PickingError::MalformedLine {
        line,
        reason: format!("expected integer, found `{token}`"),
    })
}

fn integers<T: FromStr>(line: usize, row: &str) -> Result<Vec<T>> {
    row.split_whitespace().map(|t| integer(line, t)).collect()
}

fn read_products(cursor: &mut Cursor<'_>) -> Result<Vec<Product>> {
    let mut products = Vec::new();
    while let Some((number, row)) = cursor.row() {
        let fields: Vec<u64> = integers(number, row)?;
        match fields[..] {
            [id, location, weight, volume, ..] => {
                let id = narrow(number, id)?;
                let location = narrow(number, location)?;
                products.push(Product::new(id, location, weight, volume));
            }
            _ => warn!("line {number}: product row has too few fields, skipped"),
        }
    }
    Ok(products)
}

fn read_orders(cursor: &mut Cursor<'_>) -> Result<Vec<Order>> {
    let mut orders = Vec::new();
    while let Some((number, row)) = cursor.row() {
        let fields: Vec<u64> = integers(number, row)?;
        if fields.len() < 3 {
            warn!("line {number}: order row has too few fields, skipped");
            continue;
        }
        let id = narrow(number, fields[0])?;
        let max_boxes = narrow(number, fields[1])?;
        let pairs = fields[3..]
            .chunks_exact(2)
            .map(|pair| Ok((narrow(number, pair[0])?, pair[1])))
            .collect::<Result<Vec<(u32, u64)>>>()?;
        if pairs.len() as u64 != fields[2] {
            warn!(
                "line {number}: order {id} declares {} product lines, found {}",
                fields[2],
                pairs.len()
            );
        }
        orders.push(Order::new(id, max_boxes, pairs));
    }
    Ok(orders)
}

fn read_triples(cursor: &mut Cursor<'_>, what: &str) -> Result<Vec<(u32, u32, u64)>> {
    let mut triples = Vec::new();
    while let Some((number, row)) = cursor.row() {
        let fields: Vec<u64> = integers(number, row)?;
        match fields[..] {
            [from, to, distance, ..] => {
                triples.push((narrow(number, from)?, narrow(number, to)?, distance))
            }
            _ => warn!("line {number}: {what} row has too few fields, skipped"),
        }
    }
    Ok(triples)
}

fn read_locations(cursor: &mut Cursor<'_>) -> Result<Vec<Location>> {
    let mut locations = Vec::new();
    while let Some((number, row)) = cursor.row() {
        let tokens: Vec<&str> = row.split_whitespace().collect();
        if tokens.len() < 4 {
            warn!("line {number}: location row has too few fields, skipped");
            continue;
        }
        locations.push(Location {
            id: integer(number, tokens[0])?,
            x: integer(number, tokens[1])?,
            y: integer(number, tokens[2])?,
            name: tokens[3..].join(" ").trim_matches('"').to_string(),
        });
    }
    Ok(locations)
}

fn narrow(line: usize, value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| PickingError::MalformedLine {
        line,
        reason: format!("identifier {value} out of range"),
    })
}

fn check_declared(
    declared: &DeclaredCounts,
    dimensions: usize,
    products: &[Product],
    orders: &[Order],
) -> Vec<String> {
    let mut mismatches = Vec::new();
    if let Some(n) = declared.dimensions.filter(|&n| n as usize != dimensions) {
        mismatches.push(format!(
            "{NB_DIMENSIONS} declares {n}, {CAPACITY} has {dimensions} values"
        ));
    }
    if let Some(n) = declared.products.filter(|&n| n as usize != products.len()) {
        mismatches.push(format!(
            "{NB_PRODUCTS} declares {n}, found {} product rows",
            products.len()
        ));
    }
    if let Some(n) = declared.orders.filter(|&n| n as usize != orders.len()) {
        mismatches.push(format!(
            "{NB_ORDERS} declares {n}, found {} order rows",
            orders.len()
        ));
    }
    mismatches
}
