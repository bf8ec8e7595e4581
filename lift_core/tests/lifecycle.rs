use lift_core::mocks::{MockCar, MockFloor};
use lift_core::{DispatchError, Scheduler, StrategyKind};
use lift_traits::{Direction, Event};
use rstest::rstest;

fn scheduler(kind: StrategyKind, cars: usize, floors: usize) -> Scheduler {
    Scheduler::builder()
        .with_strategy(kind)
        .with_cars(cars)
        .with_floors(floors)
        .build()
        .unwrap()
}

fn state_error(err: &eyre::Report) -> bool {
    matches!(err.downcast_ref::<DispatchError>(), Some(DispatchError::State(_)))
}

#[rstest]
#[case(StrategyKind::RequestQueue)]
#[case(StrategyKind::FloorScan)]
fn calls_before_init_are_state_errors(#[case] kind: StrategyKind) {
    let mut s = scheduler(kind, 1, 4);
    let mut cars = vec![MockCar::at(0)];
    let floors = MockFloor::building(4);

    let err = s
        .handle_event(Event::Idle { car: 0 }, &mut cars, &floors)
        .unwrap_err();
    assert!(state_error(&err));
    let err = s.update(0.1, &mut cars, &floors).unwrap_err();
    assert!(state_error(&err));
}

#[test]
fn init_twice_is_rejected() {
    let mut s = scheduler(StrategyKind::RequestQueue, 1, 4);
    let mut cars = vec![MockCar::at(0)];
    let floors = MockFloor::building(4);
    s.init(&mut cars, &floors).unwrap();
    assert!(state_error(&s.init(&mut cars, &floors).unwrap_err()));
}

#[rstest]
#[case(2, 4)]
#[case(1, 5)]
fn init_checks_fleet_size(#[case] cars: usize, #[case] floors: i32) {
    let mut s = scheduler(StrategyKind::RequestQueue, 1, 4);
    let mut cars: Vec<MockCar> = (0..cars).map(|_| MockCar::at(0)).collect();
    let floors = MockFloor::building(floors);
    assert!(state_error(&s.init(&mut cars, &floors).unwrap_err()));
}

#[test]
fn init_lights_both_lanterns_on_idle_cars() {
    let mut s = scheduler(StrategyKind::RequestQueue, 1, 4);
    let mut cars = vec![MockCar::at(2)];
    cars[0].going_up = false;
    cars[0].going_down = false;
    s.init(&mut cars, &MockFloor::building(4)).unwrap();
    assert!(cars[0].going_up && cars[0].going_down);
}

#[test]
fn unknown_car_and_floor_events_are_ignored() {
    let mut s = scheduler(StrategyKind::RequestQueue, 1, 4);
    let mut cars = vec![MockCar::at(0)];
    let floors = MockFloor::building(4);
    s.init(&mut cars, &floors).unwrap();
    cars[0].log.clear();

    s.handle_event(Event::CarButtonPressed { car: 7, floor: 2 }, &mut cars, &floors)
        .unwrap();
    s.handle_event(Event::CarButtonPressed { car: 0, floor: 9 }, &mut cars, &floors)
        .unwrap();
    s.handle_event(
        Event::FloorButtonPressed {
            floor: -2,
            direction: Direction::Up,
        },
        &mut cars,
        &floors,
    )
    .unwrap();
    assert!(cars[0].queue.is_empty());
    assert!(cars[0].log.is_empty());
    assert_eq!(s.pending_calls(), 0);
}

#[test]
fn failing_host_commands_do_not_abort_dispatch() {
    let mut s = scheduler(StrategyKind::RequestQueue, 2, 6);
    let mut cars = vec![MockCar::at(0).failing(), MockCar::at(5)];
    let mut floors = MockFloor::building(6);
    s.init(&mut cars, &floors).unwrap();

    floors[2].press(Direction::Up);
    s.handle_event(
        Event::FloorButtonPressed {
            floor: 2,
            direction: Direction::Up,
        },
        &mut cars,
        &floors,
    )
    .unwrap();
    s.update(0.1, &mut cars, &floors).unwrap();
    // The failing car took the call but its host refused the queue.
    assert!(cars[0].queue.is_empty());
}

#[test]
fn car_button_always_honoured_even_when_full() {
    let mut s = scheduler(StrategyKind::RequestQueue, 1, 8);
    let mut cars = vec![MockCar::at(0).load(1.0)];
    let floors = MockFloor::building(8);
    s.init(&mut cars, &floors).unwrap();
    s.handle_event(Event::CarButtonPressed { car: 0, floor: 6 }, &mut cars, &floors)
        .unwrap();
    assert_eq!(cars[0].queue, vec![6]);
}
