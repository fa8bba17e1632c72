//! Services express ways of communicating with the DID subject or associated entities.

use serde::{Deserialize, Serialize};

/// Service description.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Identifier for the service. Should be unique for services within the DID document.
    pub id: String,
    /// The type of service.
    #[serde(rename = "type")]
    pub type_: String,
    /// Location of the service.
    pub service_endpoint: String,
}
