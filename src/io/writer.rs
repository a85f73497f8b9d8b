//! Solution and instance text writers.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{PickingError, Result};
use crate::models::{Instance, RunResult};

const BOX_HEADER: &str = "//IdColis IdCommandeInColis NbProducts IdProd1 QtyProd1 IdProd2 QtyProd2 ...";

/// Location of the solution file for `instance_path`: `<folder>/<stem>_sol.txt`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use u_picking::io::solution_path;
///
/// let path = solution_path(Path::new("solutions"), Path::new("instances/inst_01.txt"));
/// assert_eq!(path, Path::new("solutions/inst_01_sol.txt"));
/// ```
pub fn solution_path(folder: &Path, instance_path: &Path) -> PathBuf {
    let stem = instance_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    folder.join(format!("{stem}_sol.txt"))
}

/// Renders a run result in the solution text format.
///
/// Every box line keeps a trailing space, the external validator expects it.
/// A result without tours is rejected.
pub fn format_solution(result: &RunResult) -> Result<String> {
    if result.tours().is_empty() {
        return Err(PickingError::EmptySolution);
    }

    let mut lines = vec!["//NbTournees".to_string(), result.num_tours().to_string()];
    for tour in result.tours() {
        lines.push("//IdTournes NbColis".to_string());
        lines.push(format!("{} {}", tour.id(), tour.cartons().len()));
        lines.push(BOX_HEADER.to_string());
        for carton in tour.cartons() {
            let mut fields = vec![
                carton.id().to_string(),
                carton.order_id().to_string(),
                carton.lines().len().to_string(),
            ];
            for line in carton.lines() {
                fields.push(line.product_id.to_string());
                fields.push(line.quantity.to_string());
            }
            lines.push(fields.join(" ") + " ");
        }
    }
    Ok(lines.join("\n") + "\n")
}

/// Writes the solution of `instance_path` into `folder`, creating it if
/// needed, and returns the written path.
pub fn write_solution(result: &RunResult, folder: &Path, instance_path: &Path) -> Result<PathBuf> {
    let text = format_solution(result)?;
    fs::create_dir_all(folder).map_err(|e| PickingError::io(folder, e))?;
    let path = solution_path(folder, instance_path);
    fs::write(&path, text).map_err(|e| PickingError::io(&path, e))?;
    info!("solution written to {}", path.display());
    Ok(path)
}

/// Renders an instance in the instance text format, so that it parses back
/// to the same instance.
pub fn format_instance(instance: &Instance) -> String {
    let declared = instance.declared();
    let capacity = instance.capacity();
    let nb_locations = declared
        .locations
        .unwrap_or(instance.locations().len() as u32);

    let mut lines = vec![
        "//NbLocations".to_string(),
        nb_locations.to_string(),
        "//NbProducts".to_string(),
        instance.products().len().to_string(),
        "//K: NbBoxesTrolley".to_string(),
        instance.cart_limit().to_string(),
        "//NbDimensionsCapacity".to_string(),
        "2".to_string(),
        "//B: CapaBox".to_string(),
        format!("{} {}", capacity.weight, capacity.volume),
        "//A box can accept mixed orders".to_string(),
        u8::from(instance.mixed_orders()).to_string(),
        "//Products".to_string(),
        "//Idx Location Dim1 Dim2".to_string(),
    ];
    lines.extend(instance.products().iter().map(|p| {
        format!(
            "{} {} {} {}",
            p.id(),
            p.location(),
            p.unit_weight(),
            p.unit_volume()
        )
    }));

    lines.push("//NbOrders".to_string());
    lines.push(instance.orders().len().to_string());
    lines.push("//Idx M NbProdInOrder [ProdIdx Qty]".to_string());
    lines.extend(instance.orders().iter().map(|o| {
        let mut row = format!("{} {} {}", o.id(), o.max_boxes(), o.demand().len());
        for (product_id, quantity) in o.demand() {
            row.push_str(&format!(" {product_id} {quantity}"));
        }
        row
    }));

    lines.push("//NbVerticesIntersections".to_string());
    lines.push(declared.intersections.unwrap_or(0).to_string());
    lines.push("//DepartingDepot".to_string());
    lines.push(instance.departing_depot().to_string());
    lines.push("//ArrivalDepot".to_string());
    lines.push(instance.arrival_depot().to_string());

    lines.push("//Arcs".to_string());
    lines.push("//Start End Distance".to_string());
    lines.extend(
        instance
            .arcs()
            .iter()
            .map(|a| format!("{} {} {}", a.from, a.to, a.distance)),
    );
    lines.push("//LocStart LocEnd ShortestPath".to_string());
    lines.extend(
        instance
            .shortest_paths()
            .iter()
            .map(|s| format!("{} {} {}", s.from, s.to, s.distance)),
    );
    lines.push("//Location coordinates LocationName".to_string());
    lines.push("//Loc x y name".to_string());
    lines.extend(
        instance
            .locations()
            .iter()
            .map(|l| format!("{} {} {} \"{}\"", l.id, l.x, l.y, l.name)),
    );
    lines.join("\n") + "\n"
}

/// Writes an instance file.
pub fn write_instance(instance: &Instance, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PickingError::io(parent, e))?;
    }
    fs::write(path, format_instance(instance)).map_err(|e| PickingError::io(path, e))?;
    info!("instance written to {}", path.display());
    Ok(())
}
