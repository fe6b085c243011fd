//! antpay core: the passive side of payment routing.
//!
//! This crate provides:
//! - [`NodeId`]: an opaque node identifier.
//! - [`Channel`] and [`FeeSchedule`]: directed payment channels with a
//!   capacity and an amount-dependent fee.
//! - [`ChannelGraph`] and [`PaymentEdge`]: the capability interface the
//!   router queries for topology.
//! - [`ChannelTable`]: a concurrent in-memory channel graph backed by DashMap.
//! - [`NetworkSnapshot`]: serde-friendly import/export of a channel set.

pub mod error;
pub mod graph;
pub mod snapshot;
pub mod types;

pub use error::CoreError;
pub use graph::{ChannelGraph, ChannelTable};
pub use snapshot::NetworkSnapshot;
pub use types::{Channel, FeeSchedule, NodeId, PaymentEdge};
