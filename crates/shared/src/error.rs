use thiserror::Error;

use crate::models::StoreId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocatorError {
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("map SDK failed to load: {0}")]
    SdkLoad(String),

    #[error("store {store_id} has no usable coordinates")]
    NoCoordinates { store_id: StoreId },
}

impl LocatorError {
    /// Transport failures and non-success statuses both count as network errors.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            LocatorError::Network { .. } | LocatorError::HttpStatus { .. }
        )
    }

    /// Short text for the indicator under the map or inside the bottom sheet.
    pub fn user_message(&self) -> String {
        match self {
            LocatorError::Network { .. } => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            LocatorError::HttpStatus { status, .. } => {
                format!("The server responded with an error ({status}).")
            }
            LocatorError::SdkLoad(_) => "The map failed to load.".to_string(),
            LocatorError::NoCoordinates { .. } => "Store location is unavailable.".to_string(),
        }
    }
}
