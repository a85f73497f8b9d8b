//! Solver configuration.

use serde::{Deserialize, Serialize};

/// How orders are chosen for a tour when the instance allows mixed orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixedActivation {
    /// Ascending order ID.
    #[default]
    ByIdentifier,
    /// Orders whose nearest needed product is closest to the departing depot first.
    ByProximity,
}

/// Configuration of the tour builder.
///
/// Instance parameters (cart limit, carton capacity, depots, mixed flag) are
/// read from the instance file; this only selects among heuristic variants.
///
/// # Examples
///
/// ```
/// use u_picking::config::{MixedActivation, SolverConfig};
///
/// let config: SolverConfig =
///     serde_json::from_str(r#"{ "mixed_activation": "by_proximity" }"#).unwrap();
/// assert_eq!(config.mixed_activation, MixedActivation::ByProximity);
/// assert!(!config.complete_distances_from_arcs);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Activation order used for mixed-order instances.
    pub mixed_activation: MixedActivation,
    /// Derive distances missing from the shortest-path table from the facility arcs.
    pub complete_distances_from_arcs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reproduces_reference() {
        let config = SolverConfig::default();
        assert_eq!(config.mixed_activation, MixedActivation::ByIdentifier);
        assert!(!config.complete_distances_from_arcs);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SolverConfig {
            mixed_activation: MixedActivation::ByProximity,
            complete_distances_from_arcs: true,
        };
        let json = serde_json::to_string(&config).expect("serializable");
        assert!(json.contains("by_proximity"));
        let back: SolverConfig = serde_json::from_str(&json).expect("valid json");
        assert_eq!(back, config);
    }

    #[test]
    fn test_empty_object_is_default() {
        let config: SolverConfig = serde_json::from_str("{}").expect("valid json");
        assert_eq!(config, SolverConfig::default());
    }
}
