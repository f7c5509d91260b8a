//! Integration tests for publishing thermostat output through a connector

use stagestat_connectors::{
    Endpoint, EndpointRegistry, MemoryConnector, ThermostatLink,
};
use stagestat_core::{AlarmPhase, StageEncoding, Thermostat};

const PUBLISH_TOPIC: &str = "house/boiler/data";
const SUBSCRIBE_TOPIC: &str = "house/boiler/ctrl";

fn link(stages: u8) -> ThermostatLink<MemoryConnector> {
    let mut thermostat = Thermostat::new(stages, StageEncoding::Linear).unwrap();
    thermostat.set_setpoint(50.0, 0.0);
    thermostat.set_startup_suppression(0);
    let endpoint = Endpoint::new(SUBSCRIBE_TOPIC, PUBLISH_TOPIC).unwrap();
    ThermostatLink::new(thermostat, endpoint, MemoryConnector::new())
}

#[test]
fn test_status_published_and_acknowledged() {
    let mut link = link(1);

    let report = link.sample(40.0).unwrap();
    assert!(report.status_sent);
    assert!(!report.low_alarm_sent);

    let messages = link.connector().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].topic, PUBLISH_TOPIC);
    assert_eq!(messages[0].payload, "value=40.00 ; setpoint=50.00 ; output=100%");

    // Acknowledged, nothing changed
    assert!(!link.sample(40.0).unwrap().status_sent);
    assert_eq!(link.connector().messages().len(), 1);
}

#[test]
fn test_failed_publish_retried_next_sample() {
    let mut link = link(1);
    link.sample(40.0).unwrap();

    link.connector_mut().set_online(false);
    assert!(link.sample(60.0).is_err());
    assert_eq!(link.thermostat().gate().last_value(), 40.0);

    link.connector_mut().set_online(true);
    let report = link.sample(60.0).unwrap();
    assert!(report.status_sent);
    assert_eq!(link.thermostat().gate().last_value(), 60.0);
    assert_eq!(
        link.connector().messages().last().unwrap().payload,
        "value=60.00 ; setpoint=50.00 ; output=000%"
    );
}

#[test]
fn test_alarm_published_once() {
    let mut link = link(1);
    link.thermostat_mut().set_alarm_levels(false, 0.0, true, 5.0);

    let report = link.sample(60.0).unwrap();
    assert!(report.status_sent);
    assert!(report.high_alarm_sent);
    assert_eq!(link.thermostat().high_alarm_phase(), AlarmPhase::ActiveSent);

    let alarm = &link.connector().messages()[1];
    assert_eq!(
        alarm.payload,
        "Alarm: High ; value=60.00 ; alarm=55.00 ; setpoint=50.00 ; output=000%"
    );

    let report = link.sample(60.0).unwrap();
    assert!(!report.high_alarm_sent);
    assert_eq!(link.connector_mut().drain().len(), 2);
}

#[test]
fn test_registry_routes_to_links() {
    let mut registry: EndpointRegistry<2> = EndpointRegistry::new();
    let boiler = registry
        .register(Endpoint::new(SUBSCRIBE_TOPIC, PUBLISH_TOPIC).unwrap())
        .unwrap();
    let tank = registry
        .register(Endpoint::new("house/tank/ctrl", "house/tank/data").unwrap())
        .unwrap();

    assert_eq!(registry.route("house/tank/ctrl"), Some(tank));
    assert_eq!(registry.route(SUBSCRIBE_TOPIC), Some(boiler));

    let link = link(2);
    assert!(link.accepts(SUBSCRIBE_TOPIC));
    assert!(!link.accepts("house/tank/ctrl"));
}
