use lift_core::mocks::{MockCar, MockFloor};
use lift_core::queue::{insert, is_scan_ordered, stop_next};
use lift_core::reconcile::sweep;
use lift_core::{CarExt, KnownFloors, RequestRegistry, TickReport};
use lift_traits::{Direction, Heading};
use proptest::prelude::*;
use std::collections::HashSet;

const FLOORS: i32 = 12;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Up), Just(Direction::Down)]
}

fn heading() -> impl Strategy<Value = Heading> {
    prop_oneof![
        Just(Heading::Up),
        Just(Heading::Down),
        Just(Heading::Stationary)
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Queue(i32, Direction),
    Remove(i32, Direction),
    Best(i32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..FLOORS, direction()).prop_map(|(f, d)| Op::Queue(f, d)),
        (0..FLOORS, direction()).prop_map(|(f, d)| Op::Remove(f, d)),
        (0..FLOORS).prop_map(Op::Best),
    ]
}

prop_compose! {
    fn floor_states()(bits in prop::collection::vec((any::<bool>(), any::<bool>()), FLOORS as usize))
        -> Vec<MockFloor> {
        let mut floors = MockFloor::building(FLOORS);
        for (fl, (up, down)) in floors.iter_mut().zip(bits) {
            fl.buttons.up = up;
            fl.buttons.down = down;
        }
        floors
    }
}

prop_compose! {
    fn loaded_car()(
        floor in 0..FLOORS,
        h in heading(),
        queue in prop::collection::hash_set(0..FLOORS, 0..6),
        pressed in prop::collection::hash_set(0..FLOORS, 0..4),
    ) -> MockCar {
        let queue: Vec<i32> = queue.into_iter().collect();
        let pressed: Vec<i32> = pressed.into_iter().collect();
        MockCar::at(floor).heading(h).queue(&queue).pressed(&pressed)
    }
}

proptest! {
    #[test]
    fn registry_stays_deduplicated(ops in prop::collection::vec(op(), 0..80)) {
        let mut reg = RequestRegistry::default();
        for op in ops {
            match op {
                Op::Queue(f, d) => { reg.queue(f, d); }
                Op::Remove(f, d) => { reg.remove(f, d); }
                Op::Best(f) => { reg.best_of_oldest(f); }
            }
            let unique: HashSet<_> = reg.iter().copied().collect();
            prop_assert_eq!(unique.len(), reg.len());
        }
    }

    #[test]
    fn queue_and_remove_are_idempotent(
        seed in prop::collection::vec((0..FLOORS, direction()), 0..20),
        f in 0..FLOORS,
        d in direction(),
    ) {
        let mut once = RequestRegistry::default();
        let mut twice = RequestRegistry::default();
        for &(sf, sd) in &seed {
            once.queue(sf, sd);
            twice.queue(sf, sd);
        }
        once.queue(f, d);
        twice.queue(f, d);
        twice.queue(f, d);
        prop_assert_eq!(once.iter().collect::<Vec<_>>(), twice.iter().collect::<Vec<_>>());

        once.remove(f, d);
        let snapshot: Vec<_> = once.iter().copied().collect();
        once.remove(f, d);
        prop_assert_eq!(snapshot, once.iter().copied().collect::<Vec<_>>());
    }

    #[test]
    fn inserts_keep_scan_order(
        floor in 0..FLOORS,
        h in heading(),
        stops in prop::collection::vec(-2..FLOORS + 2, 0..20),
    ) {
        let known = KnownFloors::from_floors(&MockFloor::building(FLOORS));
        let mut car = MockCar::at(floor).heading(h);
        for stop in stops {
            insert(&mut car, 0, stop, &known);
            let cur = car.estimated_position();
            prop_assert!(is_scan_ordered(&car.queue, cur), "{:?} around {}", car.queue, cur);
            let unique: HashSet<_> = car.queue.iter().collect();
            prop_assert_eq!(unique.len(), car.queue.len());
            prop_assert!(car.queue.iter().all(|&f| (0..FLOORS).contains(&f)));
        }
    }

    #[test]
    fn inserts_never_duplicate_on_reordered_queues(
        floor in 0..FLOORS,
        h in heading(),
        start in prop::collection::hash_set(0..FLOORS, 0..8),
        pulled in 0..FLOORS,
        stops in prop::collection::vec(0..FLOORS, 1..10),
    ) {
        let known = KnownFloors::from_floors(&MockFloor::building(FLOORS));
        let start: Vec<i32> = start.into_iter().collect();
        let mut car = MockCar::at(floor).heading(h).queue(&start);
        // Pulling a stop forward leaves the queue out of SCAN order.
        stop_next(&mut car, 0, pulled);
        for stop in stops {
            insert(&mut car, 0, stop, &known);
            let unique: HashSet<_> = car.queue.iter().collect();
            prop_assert_eq!(unique.len(), car.queue.len(), "duplicate in {:?}", car.queue);
        }
    }

    #[test]
    fn sweep_never_strands_occupants(
        floors in floor_states(),
        mut cars in prop::collection::vec(loaded_car(), 1..4),
    ) {
        let needed: Vec<Vec<i32>> = cars
            .iter()
            .map(|c| c.queue.iter().copied().filter(|f| c.pressed.contains(f)).collect())
            .collect();
        let mut reg = RequestRegistry::default();
        let mut report = TickReport::default();
        sweep(&mut cars, &floors, &mut reg, &mut report);
        for (car, keep) in cars.iter().zip(needed) {
            for f in keep {
                prop_assert!(car.queue.contains(&f), "stranded occupant for floor {}", f);
            }
        }
    }
}
