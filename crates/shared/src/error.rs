use thiserror::Error;

use crate::domain::OperationKind;

pub const FAILED_TO_CREATE_WALLET: &str = "Failed to create wallet";
pub const FAILED_TO_RUN_SCRIPT: &str = "Failed to run script";
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// Backend answered with a status outside 2xx; the body is ignored.
    #[error("{}", .kind.rejection_message())]
    Rejected { kind: OperationKind, status: u16 },
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Decode(String),
}

impl OperationError {
    /// Text stored in the store's `error` slot.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }
}

impl From<serde_json::Error> for OperationError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}
