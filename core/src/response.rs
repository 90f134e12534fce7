//! Response — the result of executing one `Command`.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Ok { output: String },
    Error { message: String },
}


impl Response {
    pub fn ok(output: impl Into<String>) -> Response {
        Response::Ok {
            output: output.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Response {
        Response::Error {
            message: message.into(),
        }
    }

    /// Serialize `value` as pretty JSON into an `Ok` response.
    pub fn json<T: Serialize>(value: &T) -> Response {
        match serde_json::to_string_pretty(value) {
            Ok(output) => Response::Ok { output },
            Err(e) => Response::error(format!("Failed to encode response: {}", e)),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok { .. })
    }
}
