//! JSON-RPC message types and request dispatch

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info, warn};
use crate::tools;

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "larder";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Deserialize)]
pub struct McpRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl McpError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        McpError { code: INVALID_PARAMS, message: message.into(), data: None }
    }
}

impl McpResponse {
    fn reply(id: Option<JsonValue>, result: Result<JsonValue, McpError>) -> Self {
        let (result, error) = match result {
            Ok(r) => (Some(r), None),
            Err(e) => (None, Some(e)),
        };
        McpResponse { jsonrpc: "2.0".to_string(), id, result, error }
    }
}

/// Handle one line of input. Returns the serialized response, or `None`
/// for notifications, which get no reply.
pub fn handle_line(line: &str) -> Option<String> {
    let response = match serde_json::from_str::<McpRequest>(line) {
        Ok(request) => {
            debug!(method = %request.method, "processing request");
            let response = handle_request(&request);
            if request.id.is_none() {
                debug!(method = %request.method, "notification processed");
                return None;
            }
            response
        }
        Err(e) => {
            warn!(error = %e, "unparseable request");
            McpResponse::reply(
                None,
                Err(McpError { code: PARSE_ERROR, message: format!("Parse error: {}", e), data: None }),
            )
        }
    };

    match serde_json::to_string(&response) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!(error = %e, "failed to serialize response");
            None
        }
    }
}

pub fn handle_request(request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => Ok(tools::list()),
        "tools/call" => tools::call(&request.params),

        _ => Err(McpError {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    McpResponse::reply(request.id.clone(), result)
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Pantry quantity reconciliation and unit conversion"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Use reduce_quantity to record what was used from a pantry item, convert_unit to rescale an amount when the unit changes, and list_units for the accepted units. Mass and volume convert through an approximate 1 g per ml density."
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(line: &str) -> JsonValue {
        let out = handle_line(line).expect("expected a response");
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn test_initialize_echoes_protocol() {
        let resp = call(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","clientInfo":{"name":"test"}}}"#);
        assert_eq!(resp["id"], 1);
        assert_eq!(resp["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(resp["result"]["serverInfo"]["name"], SERVER_NAME);
    }

    #[test]
    fn test_notifications_get_no_reply() {
        assert!(handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).is_none());
    }

    #[test]
    fn test_parse_error() {
        let resp = call("{not json");
        assert_eq!(resp["error"]["code"], PARSE_ERROR);
        assert!(resp.get("id").is_none());
    }

    #[test]
    fn test_unknown_method() {
        let resp = call(r#"{"jsonrpc":"2.0","id":"a","method":"resources/list"}"#);
        assert_eq!(resp["error"]["code"], METHOD_NOT_FOUND);
        assert_eq!(resp["id"], "a");
    }

    #[test]
    fn test_ping() {
        let resp = call(r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
        assert_eq!(resp["result"], json!({}));
    }
}
