//! Change notifications published after mutations

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which list a client has to re-fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChangeEvent {
    Equipment,
    Records,
}

impl ChangeEvent {
    /// SSE event name
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeEvent::Equipment => "equipment",
            ChangeEvent::Records => "records",
        }
    }
}
