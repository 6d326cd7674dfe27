mod batch;
mod node;
mod snapshot;

pub use node::{NodeState, SpringNode, SpringNodeBuilder, SpringParams, UnitInput};
pub use snapshot::{NODE_SNAPSHOT_JSON_SCHEMA_V1, NodeSnapshot, NodeSnapshotJsonContractV1};
