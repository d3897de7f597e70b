pub mod error;
pub mod ethereum;
pub mod request;

use crate::{
    eip1193::{error::Eip1193Error, ethereum::Ethereum, request::Eip1193Request},
    event::WalletEvent,
};
use async_trait::async_trait;
use ethers::providers::JsonRpcClient;
use futures::channel::oneshot;
use gloo_utils::format::JsValueSerdeExt;
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::{closure::Closure, JsValue};
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone)]
// `window.ethereum` is a JS object and neither Send nor Sync, so it is looked up
// again on every call instead of being stored here.
pub struct Eip1193 {}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl JsonRpcClient for Eip1193 {
    type Error = Eip1193Error;

    /// Sends the request via `window.ethereum` in Js
    async fn request<T: Serialize + Send + Sync, R: DeserializeOwned + Send>(
        &self,
        method: &str,
        params: T,
    ) -> Result<R, Self::Error> {
        let (sender, receiver) = oneshot::channel();

        let method = method.to_string();
        let params = parse_params(params)?;
        spawn_local(async move {
            let res = match Ethereum::injected() {
                Ok(ethereum) => {
                    let payload = Eip1193Request::new(method, params);
                    match ethereum.request(payload).await {
                        Ok(r) => js_sys::JSON::stringify(&r)
                            .map(|s| s.as_string().unwrap_or_else(|| "null".to_string()))
                            .map_err(Eip1193Error::from),
                        Err(e) => Err(e.into()),
                    }
                }
                Err(e) => Err(e),
            };
            _ = sender.send(res);
        });

        let res = receiver.await.map_err(|_| Eip1193Error::CommunicationError)?;
        Ok(serde_json::from_str(&res?)?)
    }
}

impl Default for Eip1193 {
    fn default() -> Self {
        Self::new()
    }
}

impl Eip1193 {
    pub fn new() -> Self {
        Eip1193 {}
    }

    /// Whether the page has an injected provider at all
    pub fn is_available() -> bool {
        Ethereum::injected().is_ok()
    }

    /// Registers a listener for a provider event for the lifetime of the page
    pub fn on(&self, event: WalletEvent, callback: Box<dyn FnMut(JsValue)>) -> Result<(), Eip1193Error> {
        let ethereum = Ethereum::injected()?;
        let closure = Closure::wrap(callback);
        ethereum.on(event.as_str(), &closure);
        closure.forget();
        Ok(())
    }
}

fn parse_params<T: Serialize + Send + Sync>(params: T) -> Result<JsValue, Eip1193Error> {
    let js_params = JsValue::from_serde(&params)?;
    if js_params.is_null() {
        return Ok(js_sys::Array::new().into());
    }

    let normalized = js_sys::Array::new();
    for param in js_sys::Array::from(&js_params).iter() {
        normalized.push(&normalize_tx_type(param)?);
    }
    Ok(normalized.into())
}

// ethers serializes typed transactions as `"type": "0x02"`, injected wallets
// only accept the unpadded `"0x2"`.
fn normalize_tx_type(param: JsValue) -> Result<JsValue, Eip1193Error> {
    let key = JsValue::from_str("type");
    let Some(obj) = js_sys::Object::try_from(&param) else {
        return Ok(param);
    };
    let Some(tx_type) = js_sys::Reflect::get(obj, &key).ok().and_then(|t| t.as_string()) else {
        return Ok(param);
    };
    if let Some(digits) = tx_type.strip_prefix("0x0").filter(|d| !d.is_empty()) {
        js_sys::Reflect::set(obj, &key, &JsValue::from_str(&format!("0x{digits}")))?;
    }
    Ok(param)
}
