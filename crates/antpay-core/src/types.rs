use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Opaque identifier of a node in the payment network.
///
/// Carries no structure beyond equality and hashing; serialized as a bare
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A directed edge the router can traverse.
///
/// Any topology source (in-memory table, live channel-graph adapter) exposes
/// its channels through this trait.
pub trait PaymentEdge {
    /// The node the payment leaves from.
    fn source(&self) -> &NodeId;
    /// The node the payment arrives at.
    fn destination(&self) -> &NodeId;
    /// Largest amount this edge can carry, in atomic units.
    fn capacity(&self) -> u64;
    /// Fee charged to forward `amount`. Never negative.
    fn fee_for(&self, amount: u64) -> f64;

    /// Returns true if the edge has liquidity for `amount`.
    fn can_carry(&self, amount: u64) -> bool {
        self.capacity() >= amount
    }
}

/// Lightning-style fee: a flat base fee plus a proportional rate.
///
/// `fee = base_fee + amount * fee_rate`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Flat fee charged per forwarded payment.
    pub base_fee: f64,
    /// Proportional fee as a fraction of the amount (e.g., 0.001 = 0.1%).
    pub fee_rate: f64,
}

impl FeeSchedule {
    /// Create a fee schedule, rejecting negative or non-finite components.
    pub fn new(base_fee: f64, fee_rate: f64) -> Result<Self, CoreError> {
        let schedule = Self { base_fee, fee_rate };
        schedule.validate()?;
        Ok(schedule)
    }

    /// A schedule that charges nothing.
    pub fn free() -> Self {
        Self {
            base_fee: 0.0,
            fee_rate: 0.0,
        }
    }

    /// Fee for forwarding `amount`.
    pub fn fee_for(&self, amount: u64) -> f64 {
        self.base_fee + (amount as f64) * self.fee_rate
    }

    /// Validate that both components are finite and non-negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.base_fee.is_finite() || self.base_fee < 0.0 {
            return Err(CoreError::InvalidFee(format!(
                "base_fee must be finite and >= 0, got {}",
                self.base_fee
            )));
        }
        if !self.fee_rate.is_finite() || self.fee_rate < 0.0 {
            return Err(CoreError::InvalidFee(format!(
                "fee_rate must be finite and >= 0, got {}",
                self.fee_rate
            )));
        }
        Ok(())
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::free()
    }
}

/// A directed payment channel between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Sending side of the channel.
    pub source: NodeId,
    /// Receiving side of the channel.
    pub destination: NodeId,
    /// Outbound liquidity available from `source`, in atomic units.
    pub capacity: u64,
    /// Fee charged by `source` to forward a payment.
    pub fee: FeeSchedule,
}

impl Channel {
    /// Create a channel with a linear fee schedule.
    pub fn new(
        source: impl Into<NodeId>,
        destination: impl Into<NodeId>,
        capacity: u64,
        base_fee: f64,
        fee_rate: f64,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            capacity,
            fee: FeeSchedule { base_fee, fee_rate },
        }
    }

    /// Validate endpoints and fee schedule.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.source.is_empty() || self.destination.is_empty() {
            return Err(CoreError::InvalidChannel {
                source_node: self.source.clone(),
                destination: self.destination.clone(),
                reason: "endpoint identifier is empty".into(),
            });
        }
        if self.source == self.destination {
            return Err(CoreError::SelfLoop(self.source.clone()));
        }
        self.fee.validate().map_err(|e| CoreError::InvalidChannel {
            source_node: self.source.clone(),
            destination: self.destination.clone(),
            reason: e.to_string(),
        })
    }
}

impl PaymentEdge for Channel {
    fn source(&self) -> &NodeId {
        &self.source
    }

    fn destination(&self) -> &NodeId {
        &self.destination
    }

    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn fee_for(&self, amount: u64) -> f64 {
        self.fee.fee_for(amount)
    }
}
