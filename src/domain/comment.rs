use serde::{Deserialize, Serialize};

use crate::domain::de;

/// Only ever counted; bodies are not modeled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub post_id: Option<String>,
}
