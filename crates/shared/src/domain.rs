use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FAILED_TO_CREATE_WALLET, FAILED_TO_RUN_SCRIPT};

/// Key material issued by the backend. Opaque to the client; never validated.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub address: String,
    #[serde(alias = "public_key")]
    pub public_key: String,
    #[serde(alias = "public_key_hash")]
    pub public_key_hash: String,
    #[serde(alias = "private_key")]
    pub private_key: String,
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .field("public_key_hash", &self.public_key_hash)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptExecutionResult {
    pub code: String,
    pub result: bool,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptCompileResult {
    #[serde(alias = "script_sig")]
    pub script_sig: String,
    #[serde(alias = "script_pub_key")]
    pub script_pub_key: String,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptParseResult {
    #[serde(alias = "script_sig")]
    pub script_sig: String,
    #[serde(alias = "script_pub_key")]
    pub script_pub_key: String,
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    CreateWallet,
    RunScript,
    CompileScript,
    ParseScript,
}

impl OperationKind {
    /// Backend route for this operation. The `sript` segment matches the
    /// deployed backend and must not be corrected on the client alone.
    pub fn path(self) -> &'static str {
        match self {
            OperationKind::CreateWallet => "/api/wallet",
            OperationKind::RunScript => "/api/sript/run",
            OperationKind::CompileScript => "/api/sript/compile",
            OperationKind::ParseScript => "/api/sript/parse",
        }
    }

    /// Message stored when the backend answers with a non-success status.
    pub fn rejection_message(self) -> &'static str {
        match self {
            OperationKind::CreateWallet => FAILED_TO_CREATE_WALLET,
            OperationKind::RunScript
            | OperationKind::CompileScript
            | OperationKind::ParseScript => FAILED_TO_RUN_SCRIPT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::CreateWallet => "create_wallet",
            OperationKind::RunScript => "run_script",
            OperationKind::CompileScript => "compile_script",
            OperationKind::ParseScript => "parse_script",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_accepts_camel_and_snake_case_keys() {
        let camel: Wallet = serde_json::from_str(
            r#"{"address":"a","publicKey":"b","publicKeyHash":"c","privateKey":"d"}"#,
        )
        .expect("camel");
        let snake: Wallet = serde_json::from_str(
            r#"{"address":"a","public_key":"b","public_key_hash":"c","private_key":"d"}"#,
        )
        .expect("snake");
        assert_eq!(camel, snake);
        assert_eq!(camel.public_key_hash, "c");
    }

    #[test]
    fn wallet_debug_hides_private_key() {
        let wallet = Wallet {
            address: "addr".into(),
            public_key: "pk".into(),
            public_key_hash: "pkh".into(),
            private_key: "super-secret".into(),
        };
        let rendered = format!("{wallet:?}");
        assert!(rendered.contains("addr"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn script_routes_keep_backend_spelling() {
        assert_eq!(OperationKind::CreateWallet.path(), "/api/wallet");
        for kind in [
            OperationKind::RunScript,
            OperationKind::CompileScript,
            OperationKind::ParseScript,
        ] {
            assert!(kind.path().starts_with("/api/sript/"), "{kind}");
            assert_eq!(kind.rejection_message(), "Failed to run script");
        }
        assert_eq!(
            OperationKind::CreateWallet.rejection_message(),
            "Failed to create wallet"
        );
    }
}
