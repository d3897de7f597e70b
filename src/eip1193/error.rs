use ethers::prelude::{JsonRpcError, ProviderError, RpcError};
use gloo_utils::format::JsValueSerdeExt;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// EIP-1193 code returned when the user dismisses a wallet prompt
pub const USER_REJECTED_REQUEST: i64 = 4001;

#[derive(Error, Debug)]
/// Error raised while talking to the injected provider
pub enum Eip1193Error {
    /// The provider threw something that is not a JSON-RPC error object
    #[error("JsValue error: {0}")]
    JsValueError(String),

    /// No `window.ethereum` in the DOM
    #[error("No injected wallet found")]
    JsNoEthereum,

    #[error(transparent)]
    /// The provider answered with a JSON-RPC error
    JsonRpcError(#[from] JsonRpcError),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error("Communication error")]
    CommunicationError,
}

impl Eip1193Error {
    /// True if the wallet reported that the user declined the prompt
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Eip1193Error::JsonRpcError(e) if e.code == USER_REJECTED_REQUEST)
    }
}

impl RpcError for Eip1193Error {
    fn as_error_response(&self) -> Option<&JsonRpcError> {
        match self {
            Eip1193Error::JsonRpcError(e) => Some(e),
            _ => None,
        }
    }

    fn is_error_response(&self) -> bool {
        self.as_error_response().is_some()
    }

    fn as_serde_error(&self) -> Option<&serde_json::Error> {
        match self {
            Eip1193Error::SerdeJson(e) => Some(e),
            _ => None,
        }
    }

    fn is_serde_error(&self) -> bool {
        self.as_serde_error().is_some()
    }
}

impl From<JsValue> for Eip1193Error {
    fn from(src: JsValue) -> Self {
        match src.into_serde::<JsonRpcError>() {
            Ok(rpc) => Eip1193Error::JsonRpcError(rpc),
            Err(_) => Eip1193Error::JsValueError(format!("{:?}", src)),
        }
    }
}

impl From<Eip1193Error> for ProviderError {
    fn from(src: Eip1193Error) -> Self {
        ProviderError::JsonRpcClientError(Box::new(src))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpc_error(code: i64) -> Eip1193Error {
        Eip1193Error::JsonRpcError(JsonRpcError {
            code,
            message: "nope".to_string(),
            data: None,
        })
    }

    #[test]
    fn user_rejection_is_recognised_by_code() {
        assert!(rpc_error(USER_REJECTED_REQUEST).is_user_rejection());
        assert!(!rpc_error(-32603).is_user_rejection());
        assert!(!Eip1193Error::JsNoEthereum.is_user_rejection());
    }

    #[test]
    fn rpc_error_is_exposed_as_error_response() {
        let err = rpc_error(-32000);
        assert!(err.is_error_response());
        assert_eq!(err.as_error_response().map(|e| e.code), Some(-32000));
        assert!(!err.is_serde_error());
    }
}
