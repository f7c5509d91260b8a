//! Shared helpers for controller integration tests

#![allow(dead_code)]

use stagestat_core::{StageEncoding, Thermostat};

/// Thermostat whose alarms are live from the first tick
pub fn thermostat_without_startup(stages: u8, encoding: StageEncoding) -> Thermostat {
    let mut thermostat = Thermostat::new(stages, encoding).expect("supported stage count");
    thermostat.set_startup_suppression(0);
    thermostat
}

/// Feed the same value for `ticks` ticks, returning how many recommended a send
pub fn run_ticks(thermostat: &mut Thermostat, value: f32, ticks: u32) -> u32 {
    (0..ticks).filter(|_| thermostat.tick(value)).count() as u32
}
