#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse and validation errors are fine; panics are not.
    let Ok(cfg) = lift_config::load_toml(data) else {
        return;
    };
    if cfg.validate().is_err() {
        return;
    }
    // Anything the loader accepts must also be accepted by the scheduler builder.
    if let Err(e) = lift_core::Scheduler::from_config(&cfg) {
        panic!("validated config rejected by builder: {e}");
    }
});
