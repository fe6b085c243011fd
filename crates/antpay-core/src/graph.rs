use dashmap::{DashMap, DashSet};

use crate::error::CoreError;
use crate::types::{Channel, NodeId, PaymentEdge};

/// Read-only view of a payment network's topology.
///
/// The router only ever asks two questions: which nodes exist, and which
/// edges leave a given node. Implementations are expected to answer from
/// memory; the router calls `outgoing` in its hot loop.
pub trait ChannelGraph {
    /// The edge type handed out by this graph.
    type Edge: PaymentEdge;

    /// Every node known to the graph, including pure sinks.
    fn nodes(&self) -> Vec<NodeId>;

    /// Outgoing edges of `node`, in a stable order. Unknown nodes have none.
    fn outgoing(&self, node: &NodeId) -> Vec<Self::Edge>;

    /// Number of nodes in the graph.
    fn node_count(&self) -> usize {
        self.nodes().len()
    }
}

/// A concurrent in-memory channel graph backed by DashMap.
///
/// Channels are grouped by source node and keep their insertion order, so
/// `outgoing` is stable across calls and across identically built tables.
/// At most one channel exists per `(source, destination)` pair.
pub struct ChannelTable {
    outgoing: DashMap<NodeId, Vec<Channel>>,
    nodes: DashSet<NodeId>,
}

impl ChannelTable {
    /// Create a new, empty channel table.
    pub fn new() -> Self {
        Self {
            outgoing: DashMap::new(),
            nodes: DashSet::new(),
        }
    }

    /// Build a table from a list of channels, validating each one.
    pub fn from_channels(channels: impl IntoIterator<Item = Channel>) -> Result<Self, CoreError> {
        let table = Self::new();
        for channel in channels {
            table.insert(channel)?;
        }
        Ok(table)
    }

    /// Insert or overwrite a channel. Returns the previous channel for the
    /// same `(source, destination)` pair, if any.
    pub fn insert(&self, channel: Channel) -> Result<Option<Channel>, CoreError> {
        channel.validate()?;

        self.nodes.insert(channel.source.clone());
        self.nodes.insert(channel.destination.clone());

        let mut edges = self.outgoing.entry(channel.source.clone()).or_default();
        if let Some(existing) = edges
            .iter_mut()
            .find(|e| e.destination == channel.destination)
        {
            tracing::debug!(
                source = %channel.source,
                destination = %channel.destination,
                "replacing existing channel"
            );
            return Ok(Some(std::mem::replace(existing, channel)));
        }
        edges.push(channel);
        Ok(None)
    }

    /// Convenience wrapper around [`ChannelTable::insert`] for a linear fee
    /// channel.
    pub fn add_channel(
        &self,
        source: &str,
        destination: &str,
        capacity: u64,
        base_fee: f64,
        fee_rate: f64,
    ) -> Result<Option<Channel>, CoreError> {
        self.insert(Channel::new(source, destination, capacity, base_fee, fee_rate))
    }

    /// Look up the channel from `source` to `destination`.
    pub fn get(&self, source: &NodeId, destination: &NodeId) -> Option<Channel> {
        self.outgoing.get(source).and_then(|edges| {
            edges
                .iter()
                .find(|e| &e.destination == destination)
                .cloned()
        })
    }

    /// Update an existing channel in place. Returns `true` if it was found.
    ///
    /// The updater must keep the endpoints unchanged; a channel whose
    /// endpoints or fee become invalid is rolled back and reported.
    pub fn update<F>(&self, source: &NodeId, destination: &NodeId, updater: F) -> Result<bool, CoreError>
    where
        F: FnOnce(&mut Channel),
    {
        let Some(mut edges) = self.outgoing.get_mut(source) else {
            return Ok(false);
        };
        let Some(channel) = edges.iter_mut().find(|e| &e.destination == destination) else {
            return Ok(false);
        };

        let before = channel.clone();
        updater(channel);
        if channel.source != before.source || channel.destination != before.destination {
            *channel = before;
            return Err(CoreError::InvalidChannel {
                source_node: source.clone(),
                destination: destination.clone(),
                reason: "update must not change channel endpoints".into(),
            });
        }
        if let Err(e) = channel.validate() {
            *channel = before;
            return Err(e);
        }
        Ok(true)
    }

    /// Remove the channel from `source` to `destination`.
    ///
    /// Endpoint nodes stay in the node set even when they lose their last
    /// channel.
    pub fn remove(&self, source: &NodeId, destination: &NodeId) -> Option<Channel> {
        let mut edges = self.outgoing.get_mut(source)?;
        let index = edges.iter().position(|e| &e.destination == destination)?;
        Some(edges.remove(index))
    }

    /// Total number of channels.
    pub fn channel_count(&self) -> usize {
        self.outgoing.iter().map(|r| r.value().len()).sum()
    }

    /// Returns `true` if the table holds no channels.
    pub fn is_empty(&self) -> bool {
        self.channel_count() == 0
    }

    /// All channels, grouped by source in node order.
    pub fn all_channels(&self) -> Vec<Channel> {
        let mut sources: Vec<NodeId> = self.outgoing.iter().map(|r| r.key().clone()).collect();
        sources.sort();
        sources
            .iter()
            .flat_map(|source| self.outgoing_channels(source))
            .collect()
    }

    fn outgoing_channels(&self, node: &NodeId) -> Vec<Channel> {
        self.outgoing
            .get(node)
            .map(|edges| edges.value().clone())
            .unwrap_or_default()
    }
}

impl Default for ChannelTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelGraph for ChannelTable {
    type Edge = Channel;

    fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.nodes.iter().map(|n| n.key().clone()).collect();
        nodes.sort();
        nodes
    }

    fn outgoing(&self, node: &NodeId) -> Vec<Channel> {
        self.outgoing_channels(node)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
