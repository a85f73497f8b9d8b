use proptest::prelude::*;
use u_picking::config::{MixedActivation, SolverConfig};
use u_picking::constructive::solve;
use u_picking::evaluation::SolutionChecker;
use u_picking::generator::{GeneratorConfig, InstanceGenerator};
use u_picking::models::{CartonCapacity, Instance, Order, Product, ShortestPath};
use u_picking::packing::{Cart, CartonIds, CartonPacker};

prop_compose! {
    fn generator_config()
    (
     orders in 1usize..12,
     products in 1usize..15,
     locations in 3usize..20,
     cart_limit in 1usize..7,
     weight in 10u64..200,
     volume in 10u64..200,
     mixed in any::<bool>(),
    ) -> GeneratorConfig {
        GeneratorConfig {
            orders,
            products,
            locations,
            cart_limit,
            capacity: CartonCapacity::new(weight, volume),
            mixed,
            ..GeneratorConfig::default()
        }
    }
}

fn activation() -> impl Strategy<Value = MixedActivation> {
    prop_oneof![Just(MixedActivation::ByIdentifier), Just(MixedActivation::ByProximity)]
}

proptest! {
    #[test]
    fn cartons_never_exceed_capacity(
        unit_weight in 0u64..20,
        unit_volume in 0u64..20,
        cap_weight in 0u64..60,
        cap_volume in 0u64..60,
        limit in 1usize..5,
        requests in prop::collection::vec(0u64..40, 1..8),
    ) {
        let capacity = CartonCapacity::new(cap_weight, cap_volume);
        let packer = CartonPacker::new(capacity);
        let product = Product::new(1, 1, unit_weight, unit_volume);
        let mut cart = Cart::new(limit);
        let mut ids = CartonIds::new();
        for (i, quantity) in requests.into_iter().enumerate() {
            let order_id = (i % 2) as u32;
            let placeable = packer.placeable_units(&cart, order_id, &product);
            let placed = packer.pack(&mut cart, &mut ids, order_id, &product, quantity);
            prop_assert!(placed <= quantity);
            prop_assert!(placed <= placeable);
            prop_assert!(cart.len() <= limit);
            prop_assert!(cart.cartons().iter().all(|c| c.fits(&capacity)));
        }
    }

    #[test]
    fn completed_runs_conserve_demand(config in generator_config(), seed in any::<u64>(), mixed_activation in activation()) {
        let instance = InstanceGenerator::new(config, seed).generate();
        let solver = SolverConfig { mixed_activation, ..SolverConfig::default() };
        let result = solve(&instance, &solver);
        prop_assert!(result.is_complete());
        prop_assert!(SolutionChecker::new(&instance).check(&result).is_empty());
    }

    #[test]
    fn runs_are_reproducible(config in generator_config(), seed in any::<u64>()) {
        let instance = InstanceGenerator::new(config, seed).generate();
        let first = solve(&instance, &SolverConfig::default());
        let second = solve(&instance, &SolverConfig::default());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn single_slot_cart_gives_one_tour_per_carton(
        unit_weight in 1u64..10,
        extra in 0u64..40,
        quantity in 1u64..200,
    ) {
        let capacity = CartonCapacity::new(unit_weight + extra, 0);
        let per_carton = capacity.weight / unit_weight;
        let instance = Instance::new(
            vec![Product::new(1, 5, unit_weight, 0)],
            vec![Order::new(1, 1, [(1, quantity)])],
            1,
            capacity,
            0,
            0,
        )
        .with_shortest_paths(vec![ShortestPath { from: 0, to: 5, distance: 3 }]);
        let result = solve(&instance, &SolverConfig::default());
        let cartons = quantity.div_ceil(per_carton) as usize;
        prop_assert_eq!(result.num_tours(), cartons);
        prop_assert!(result.tours().iter().all(|t| t.cartons().len() == 1));
        prop_assert_eq!(result.travelled_distance(), 6 * cartons as u64);
    }
}
