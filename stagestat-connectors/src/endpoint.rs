//! Topic endpoints and their registry
//!
//! An [`Endpoint`] is the pair of topics one controller uses: commands come in
//! on the subscribe topic and status/alarm text goes out on the publish topic.
//! Topics are opaque; the only operation on them is exact comparison.
//!
//! A device running several controllers keeps their endpoints in an
//! [`EndpointRegistry`], which assigns each one an explicit [`EndpointId`] so
//! incoming messages can be routed back to the right controller.

use heapless::{String, Vec};

use crate::ConnectorError;

/// Longest topic an endpoint stores
pub const MAX_TOPIC_LEN: usize = 64;

type Topic = String<MAX_TOPIC_LEN>;

/// Subscribe/publish topic pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    subscribe: Topic,
    publish: Topic,
}

impl Endpoint {
    /// Create from two topics. Fails if either exceeds [`MAX_TOPIC_LEN`].
    pub fn new(subscribe: &str, publish: &str) -> Result<Self, ConnectorError> {
        Ok(Self {
            subscribe: topic(subscribe)?,
            publish: topic(publish)?,
        })
    }

    /// Topic carrying data from the server
    pub fn subscribe_topic(&self) -> &str {
        &self.subscribe
    }

    /// Topic carrying data to the server
    pub fn publish_topic(&self) -> &str {
        &self.publish
    }

    /// Whether an incoming message on `topic` is meant for this endpoint
    pub fn accepts(&self, topic: &str) -> bool {
        self.subscribe.as_str() == topic
    }
}

fn topic(s: &str) -> Result<Topic, ConnectorError> {
    Topic::try_from(s).map_err(|_| {
        ConnectorError::ConfigError(format!(
            "topic {s:?} longer than {MAX_TOPIC_LEN} bytes"
        ))
    })
}

/// Identifier assigned by an [`EndpointRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointId(pub u16);

/// Fixed-capacity set of endpoints with sequential ids
#[derive(Debug, Default)]
pub struct EndpointRegistry<const N: usize> {
    entries: Vec<(EndpointId, Endpoint), N>,
    next_id: u16,
}

impl<const N: usize> EndpointRegistry<N> {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Store an endpoint and return its id
    pub fn register(&mut self, endpoint: Endpoint) -> Result<EndpointId, ConnectorError> {
        let id = EndpointId(self.next_id);
        self.entries
            .push((id, endpoint))
            .map_err(|_| ConnectorError::RegistryFull)?;
        self.next_id = self.next_id.wrapping_add(1);
        log::debug!("registered endpoint {:?}", id);
        Ok(id)
    }

    /// Endpoint for an id
    pub fn get(&self, id: EndpointId) -> Option<&Endpoint> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, endpoint)| endpoint)
    }

    /// Id of the endpoint subscribed to `topic`
    pub fn route(&self, topic: &str) -> Option<EndpointId> {
        self.entries
            .iter()
            .find(|(_, endpoint)| endpoint.accepts(topic))
            .map(|(id, _)| *id)
    }

    /// Number of registered endpoints
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered endpoints in registration order
    pub fn iter(&self) -> impl Iterator<Item = (EndpointId, &Endpoint)> {
        self.entries.iter().map(|(id, endpoint)| (*id, endpoint))
    }
}
