//! Serializable node snapshot used by regression tests and debugging tooling.

use serde::{Deserialize, Serialize};

use crate::error::{SpringError, SpringResult};
use crate::render::PathPrimitive;
use crate::scene::{NodeState, SpringNode};

pub const NODE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Deterministic summary of a node's retained state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub state: NodeState,
    pub row_count: usize,
    pub path_count: usize,
    pub point_count: usize,
    pub last_version: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: NodeSnapshot,
}

impl SpringNode {
    #[must_use]
    pub fn snapshot(&self) -> NodeSnapshot {
        let resolved = self.resolved_paths();
        NodeSnapshot {
            state: self.state(),
            row_count: self.row_count(),
            path_count: resolved.len(),
            point_count: resolved.iter().map(PathPrimitive::point_count).sum(),
            last_version: self.last_version().map(|version| version.raw()),
        }
    }
}

impl NodeSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> SpringResult<String> {
        let payload = NodeSnapshotJsonContractV1 {
            schema_version: NODE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: *self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SpringError::InvalidConfiguration(format!(
                "failed to serialize node snapshot contract v1: {e}"
            ))
        })
    }

    pub fn from_json_compat_str(input: &str) -> SpringResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<NodeSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: NodeSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            SpringError::InvalidConfiguration(format!(
                "failed to parse node snapshot json payload: {e}"
            ))
        })?;
        if payload.schema_version != NODE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(SpringError::InvalidConfiguration(format!(
                "unsupported node snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
