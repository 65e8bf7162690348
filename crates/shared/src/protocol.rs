use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunScriptInput {
    pub script_sig: String,
    pub script_pub_key: String,
    pub signed_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptInput {
    pub script_sig: String,
    pub script_pub_key: String,
}

/// Body of `POST /api/sript/run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunScriptRequest {
    pub script_sig: String,
    pub script_pub_key: String,
    pub signed_data: String,
}

/// Body of `POST /api/sript/compile` and `POST /api/sript/parse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptPairRequest {
    pub script_sig: String,
    pub script_pub_key: String,
}

impl From<&RunScriptInput> for RunScriptRequest {
    fn from(value: &RunScriptInput) -> Self {
        Self {
            script_sig: value.script_sig.clone(),
            script_pub_key: value.script_pub_key.clone(),
            signed_data: value.signed_data.clone(),
        }
    }
}

impl From<&ScriptInput> for ScriptPairRequest {
    fn from(value: &ScriptInput) -> Self {
        Self {
            script_sig: value.script_sig.clone(),
            script_pub_key: value.script_pub_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_script_request_uses_snake_case_keys() {
        let input = RunScriptInput {
            script_sig: "OP_DUP".into(),
            script_pub_key: "OP_HASH160".into(),
            signed_data: "deadbeef".into(),
        };
        let value = serde_json::to_value(RunScriptRequest::from(&input)).expect("json");
        assert_eq!(
            value,
            serde_json::json!({
                "script_sig": "OP_DUP",
                "script_pub_key": "OP_HASH160",
                "signed_data": "deadbeef",
            })
        );
    }

    #[test]
    fn script_pair_request_has_exactly_two_fields() {
        let input = ScriptInput {
            script_sig: "OP_1".into(),
            script_pub_key: "OP_EQUAL".into(),
        };
        let value = serde_json::to_value(ScriptPairRequest::from(&input)).expect("json");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 2);
        assert_eq!(object["script_sig"], "OP_1");
        assert_eq!(object["script_pub_key"], "OP_EQUAL");
    }
}
