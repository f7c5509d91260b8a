//! Thermostat link
//!
//! Owns one thermostat, its endpoint and a connector, and runs the
//! publish-then-acknowledge cycle for each sample.

use stagestat_core::{AlarmKind, Thermostat};

use crate::{Connector, ConnectorError, Endpoint};

/// What one [`ThermostatLink::sample`] call published
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Status line published and acknowledged
    pub status_sent: bool,
    /// Low alarm published and acknowledged
    pub low_alarm_sent: bool,
    /// High alarm published and acknowledged
    pub high_alarm_sent: bool,
}

/// One thermostat wired to one endpoint
#[derive(Debug)]
pub struct ThermostatLink<C> {
    thermostat: Thermostat,
    endpoint: Endpoint,
    connector: C,
}

impl<C> ThermostatLink<C>
where
    C: Connector<Error = ConnectorError>,
{
    pub fn new(thermostat: Thermostat, endpoint: Endpoint, connector: C) -> Self {
        Self {
            thermostat,
            endpoint,
            connector,
        }
    }

    pub fn thermostat(&self) -> &Thermostat {
        &self.thermostat
    }

    /// Mutable access for configuration changes between samples
    pub fn thermostat_mut(&mut self) -> &mut Thermostat {
        &mut self.thermostat
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn connector_mut(&mut self) -> &mut C {
        &mut self.connector
    }

    /// Whether an incoming message on `topic` belongs to this link
    pub fn accepts(&self, topic: &str) -> bool {
        self.endpoint.accepts(topic)
    }

    /// Tick the thermostat with `value` and publish whatever is due.
    ///
    /// Stops at the first failed publish; everything not acknowledged is
    /// offered again on the next sample.
    pub fn sample(&mut self, value: f32) -> Result<LinkReport, ConnectorError> {
        let mut report = LinkReport::default();

        if self.thermostat.tick(value) {
            let line = self.thermostat.status_message()?;
            self.publish(&line)?;
            self.thermostat.acknowledge_sent();
            report.status_sent = true;
        }

        if self.thermostat.low_alarm_pending() {
            let text = self.thermostat.alarm_message(AlarmKind::Low)?;
            self.publish(&text)?;
            self.thermostat.acknowledge_low_alarm_sent();
            report.low_alarm_sent = true;
        }

        if self.thermostat.high_alarm_pending() {
            let text = self.thermostat.alarm_message(AlarmKind::High)?;
            self.publish(&text)?;
            self.thermostat.acknowledge_high_alarm_sent();
            report.high_alarm_sent = true;
        }

        Ok(report)
    }

    /// Take the parts back
    pub fn into_parts(self) -> (Thermostat, Endpoint, C) {
        (self.thermostat, self.endpoint, self.connector)
    }

    fn publish(&mut self, text: &str) -> Result<(), ConnectorError> {
        let topic = self.endpoint.publish_topic();
        match self.connector.send(topic, text.as_bytes()) {
            Ok(()) => {
                log::debug!("published to {}: {}", topic, text);
                Ok(())
            }
            Err(err) => {
                log::warn!("publish to {} failed: {}", topic, err);
                Err(err)
            }
        }
    }
}
