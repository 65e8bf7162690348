use std::sync::Arc;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{OperationKind, ScriptCompileResult, ScriptExecutionResult, ScriptParseResult, Wallet},
    error::OperationError,
    protocol::{RunScriptInput, RunScriptRequest, ScriptInput, ScriptPairRequest},
};
use tokio::sync::watch;
use tracing::{info, warn};

pub mod config;
pub mod transport;

pub use transport::{BackendTransport, HttpTransport, TransportFailure, TransportReply};

/// Latest outcome of each operation kind plus the shared busy/error flags.
///
/// Result slots are written only by their own operation kind. `loading` and
/// `error` are shared by all four, so overlapping calls race on them and the
/// last call to settle wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationState {
    pub wallet: Option<Wallet>,
    pub script_result: Option<ScriptExecutionResult>,
    pub compile_result: Option<ScriptCompileResult>,
    pub parse_result: Option<ScriptParseResult>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct OperationStore {
    transport: Arc<dyn BackendTransport>,
    state: watch::Sender<OperationState>,
}

/// Clears `loading` on every exit path, including a dropped future.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<OperationState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|state| state.loading = false);
    }
}

impl OperationStore {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Arc<Self> {
        let (state, _) = watch::channel(OperationState::default());
        Arc::new(Self { transport, state })
    }

    pub fn connect(server_url: &str) -> Result<Arc<Self>> {
        Ok(Self::new(Arc::new(HttpTransport::new(server_url)?)))
    }

    pub fn snapshot(&self) -> OperationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<OperationState> {
        self.state.subscribe()
    }

    pub async fn create_wallet(&self) {
        self.perform(OperationKind::CreateWallet, None::<&()>, |state, wallet: Wallet| {
            state.wallet = Some(wallet);
        })
        .await;
    }

    pub async fn run_script(&self, input: &RunScriptInput) {
        let body = RunScriptRequest::from(input);
        self.perform(
            OperationKind::RunScript,
            Some(&body),
            |state, result: ScriptExecutionResult| state.script_result = Some(result),
        )
        .await;
    }

    pub async fn compile_script(&self, input: &ScriptInput) {
        let body = ScriptPairRequest::from(input);
        self.perform(
            OperationKind::CompileScript,
            Some(&body),
            |state, result: ScriptCompileResult| state.compile_result = Some(result),
        )
        .await;
    }

    pub async fn parse_script(&self, input: &ScriptInput) {
        let body = ScriptPairRequest::from(input);
        self.perform(
            OperationKind::ParseScript,
            Some(&body),
            |state, result: ScriptParseResult| state.parse_result = Some(result),
        )
        .await;
    }

    async fn perform<B, T, F>(&self, kind: OperationKind, body: Option<&B>, apply: F)
    where
        B: Serialize,
        T: DeserializeOwned,
        F: FnOnce(&mut OperationState, T),
    {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        let _loading = LoadingGuard { state: &self.state };
        info!(operation = %kind, path = kind.path(), "operation started");

        match self.request::<B, T>(kind, body).await {
            Ok(value) => {
                self.state.send_modify(|state| apply(state, value));
                info!(operation = %kind, "operation succeeded");
            }
            Err(err) => {
                let message = err.user_message();
                warn!(operation = %kind, error = %message, "operation failed");
                self.state.send_modify(|state| state.error = Some(message));
            }
        }
    }

    async fn request<B, T>(
        &self,
        kind: OperationKind,
        body: Option<&B>,
    ) -> std::result::Result<T, OperationError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = body.map(serde_json::to_value).transpose()?;
        let reply = self
            .transport
            .post(kind.path(), body)
            .await
            .map_err(|failure| OperationError::Transport(failure.message))?;

        if !reply.is_success() {
            return Err(OperationError::Rejected {
                kind,
                status: reply.status,
            });
        }

        Ok(serde_json::from_slice(&reply.body)?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
