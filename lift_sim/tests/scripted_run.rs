use lift_sim::{Arrival, Building, SimConfig};
use lift_traits::{Car, Event};
use rstest::rstest;

fn cfg(cars: u32) -> SimConfig {
    SimConfig {
        floors: 8,
        cars,
        capacity: 4,
        speed_floors_per_s: 2.0,
        spawn_per_s: 0.0,
        seed: 3,
    }
}

/// Naive host: car 0 visits every lit floor and every pressed floor, in
/// event order.
fn drive(b: &mut Building, steps: usize) -> Vec<Event> {
    let mut all = Vec::new();
    for _ in 0..steps {
        let events = b.step(0.25);
        let (cars, _) = b.parts_mut();
        for e in &events {
            match *e {
                Event::FloorButtonPressed { floor, .. } => {
                    cars[0].go_to_floor(floor, false).unwrap();
                }
                Event::CarButtonPressed { car, floor } => {
                    cars[car].go_to_floor(floor, false).unwrap();
                }
                _ => {}
            }
        }
        all.extend(events);
    }
    all
}

#[rstest]
#[case(vec![(0, 0, 5)])]
#[case(vec![(0, 6, 1), (4, 2, 7)])]
#[case(vec![(0, 3, 0), (0, 3, 7), (10, 0, 4)])]
fn scripted_passengers_are_delivered(#[case] trips: Vec<(u64, i32, i32)>) {
    let arrivals: Vec<Arrival> = trips
        .iter()
        .map(|&(step, origin, destination)| Arrival {
            step,
            origin,
            destination,
        })
        .collect();
    let mut b = Building::with_script(&cfg(1), arrivals).unwrap();
    drive(&mut b, 400);
    let stats = b.stats();
    assert_eq!(stats.spawned, trips.len() as u64);
    assert_eq!(stats.delivered, trips.len() as u64);
    assert_eq!(b.in_flight(), 0);
    assert!(!b.script_pending());
    assert!(stats.max_wait_s >= stats.avg_wait_s);
}

#[test]
fn same_seed_replays_identically() {
    let run = || {
        let mut b = Building::new(&SimConfig {
            spawn_per_s: 1.0,
            ..cfg(2)
        })
        .unwrap();
        drive(&mut b, 200)
    };
    assert_eq!(run(), run());
}

#[test]
fn every_stop_is_reported() {
    let mut b = Building::with_script(
        &cfg(1),
        vec![Arrival {
            step: 0,
            origin: 4,
            destination: 2,
        }],
    )
    .unwrap();
    let events = drive(&mut b, 200);
    let stops = events
        .iter()
        .filter(|e| matches!(e, Event::StoppedAtFloor { .. }))
        .count() as u64;
    assert_eq!(stops, b.stats().moves);
    assert_eq!(b.stats().delivered, 1);
}
