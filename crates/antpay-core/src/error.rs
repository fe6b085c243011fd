use crate::types::NodeId;

/// Errors raised while building or loading a channel graph.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid channel {source_node} -> {destination}: {reason}")]
    InvalidChannel {
        source_node: NodeId,
        destination: NodeId,
        reason: String,
    },

    #[error("self-loop channel on node {0}")]
    SelfLoop(NodeId),

    #[error("invalid fee schedule: {0}")]
    InvalidFee(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}
