//! In-memory connector
//!
//! Records every published message instead of sending it. Used by tests and
//! host-side tooling; `set_online(false)` simulates a dropped broker link.

use crate::{Connector, ConnectorError};

/// One recorded publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: String,
}

/// Connector that keeps messages in a `Vec`
#[derive(Debug)]
pub struct MemoryConnector {
    online: bool,
    messages: Vec<PublishedMessage>,
}

impl Default for MemoryConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self {
            online: true,
            messages: Vec::new(),
        }
    }

    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    /// Messages published so far, oldest first
    pub fn messages(&self) -> &[PublishedMessage] {
        &self.messages
    }

    /// Remove and return everything published so far
    pub fn drain(&mut self) -> Vec<PublishedMessage> {
        std::mem::take(&mut self.messages)
    }
}

impl Connector for MemoryConnector {
    type Error = ConnectorError;

    fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error> {
        if !self.online {
            return Err(ConnectorError::NotConnected);
        }

        let payload = std::str::from_utf8(data)
            .map_err(|e| ConnectorError::ProtocolError(e.to_string()))?;
        self.messages.push(PublishedMessage {
            topic: topic.to_string(),
            payload: payload.to_string(),
        });
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.online
    }
}
