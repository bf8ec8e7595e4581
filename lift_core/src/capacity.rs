//! Free-space model over a car's approximate load.

use lift_traits::Car;

use crate::config::CapacityCfg;

/// Estimated free passenger slots, or 0 when the car counts as full.
pub fn space_left<C: Car + ?Sized>(car: &C, cfg: &CapacityCfg) -> f64 {
    let load = car.load_factor();
    let load = if load.is_finite() { load.clamp(0.0, 1.0) } else { 1.0 };
    let free = 1.0 - load;
    if free < cfg.min_free_fraction {
        0.0
    } else {
        f64::from(car.max_passenger_count()) * free
    }
}

/// Room to take a brand new call.
pub fn can_take_call<C: Car + ?Sized>(car: &C, cfg: &CapacityCfg) -> bool {
    space_left(car, cfg) > cfg.assign_min_space
}

/// Room to pick up a call along an already committed path.
pub fn can_pick_up<C: Car + ?Sized>(car: &C, cfg: &CapacityCfg) -> bool {
    space_left(car, cfg) >= cfg.pickup_min_space
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockCar;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 4.0)]
    #[case(0.5, 2.0)]
    #[case(0.6, 1.6)]
    #[case(0.7, 0.0)]
    #[case(1.0, 0.0)]
    #[case(-3.0, 4.0)]
    #[case(f64::NAN, 0.0)]
    fn space_left_thresholds(#[case] load: f64, #[case] want: f64) {
        let car = MockCar::at(0).capacity(4).load(load);
        let got = space_left(&car, &CapacityCfg::default());
        assert!((got - want).abs() < 1e-9, "load {load}: got {got}, want {want}");
    }

    #[test]
    fn pickup_is_more_permissive_than_assignment() {
        let cfg = CapacityCfg::default();
        // One free slot exactly: enough to pick up, not enough for a new call.
        let car = MockCar::at(0).capacity(2).load(0.5);
        assert!(!can_take_call(&car, &cfg));
        assert!(can_pick_up(&car, &cfg));
    }
}
