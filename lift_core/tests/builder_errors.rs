use lift_core::error::BuildError;
use lift_core::{CapacityCfg, DispatchCfg, Scheduler, StrategyKind};
use rstest::rstest;

#[rstest]
fn builder_missing_strategy_yields_typed_build_error() {
    let err = Scheduler::builder()
        // missing with_strategy()
        .with_cars(2)
        .with_floors(5)
        .try_build()
        .expect_err("should fail with MissingStrategy");

    match err.downcast_ref::<BuildError>() {
        Some(BuildError::MissingStrategy) => {}
        other => panic!("expected MissingStrategy, got: {other:?}"),
    }
}

#[rstest]
fn builder_missing_cars_and_floors() {
    let err = Scheduler::builder()
        .with_strategy(StrategyKind::RequestQueue)
        .with_floors(5)
        .try_build()
        .expect_err("missing cars");
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::MissingCars)
    ));

    let err = Scheduler::builder()
        .with_strategy(StrategyKind::RequestQueue)
        .with_cars(1)
        .try_build()
        .expect_err("missing floors");
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::MissingFloors)
    ));
}

#[rstest]
#[case(0, 5, DispatchCfg::default(), CapacityCfg::default(), "car count")]
#[case(2, 1, DispatchCfg::default(), CapacityCfg::default(), "floor count")]
#[case(2, 5, DispatchCfg { oldest_window: 0, ..DispatchCfg::default() }, CapacityCfg::default(), "oldest_window")]
#[case(2, 5, DispatchCfg::default(), CapacityCfg { min_free_fraction: 1.5, ..CapacityCfg::default() }, "min_free_fraction")]
#[case(2, 5, DispatchCfg::default(), CapacityCfg { pickup_min_space: f64::NAN, ..CapacityCfg::default() }, "pickup_min_space")]
fn builder_rejects_invalid_config(
    #[case] cars: usize,
    #[case] floors: usize,
    #[case] dispatch: DispatchCfg,
    #[case] capacity: CapacityCfg,
    #[case] needle: &str,
) {
    let err = Scheduler::builder()
        .with_strategy(StrategyKind::FloorScan)
        .with_cars(cars)
        .with_floors(floors)
        .with_dispatch(dispatch)
        .with_capacity(capacity)
        .build()
        .expect_err("invalid config must fail");
    match err.downcast_ref::<BuildError>() {
        Some(BuildError::InvalidConfig(msg)) => assert!(msg.contains(needle), "{msg}"),
        other => panic!("expected InvalidConfig, got: {other:?}"),
    }
}

#[test]
fn explicit_strategy_wins_over_dispatch_cfg() {
    let s = Scheduler::builder()
        .with_dispatch(DispatchCfg {
            strategy: StrategyKind::RequestQueue,
            ..DispatchCfg::default()
        })
        .with_strategy(StrategyKind::FloorScan)
        .with_cars(1)
        .with_floors(3)
        .build()
        .unwrap();
    assert_eq!(s.strategy(), StrategyKind::FloorScan);
    assert!(!s.is_initialized());
}

#[test]
fn from_config_uses_building_and_dispatch_sections() {
    let cfg = lift_config::load_toml(
        r#"
[building]
floors = 12
cars = 4
[dispatch]
strategy = "floor_scan"
"#,
    )
    .unwrap();
    let s = Scheduler::from_config(&cfg).unwrap();
    assert_eq!(s.strategy(), StrategyKind::FloorScan);
}
