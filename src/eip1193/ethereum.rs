use crate::eip1193::{error::Eip1193Error, request::Eip1193Request};
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsValue};

#[wasm_bindgen]
extern "C" {
    #[derive(Clone, Debug)]
    /// An EIP-1193 provider object. Available by convention at `window.ethereum`
    pub(crate) type Ethereum;

    #[wasm_bindgen(catch, method)]
    pub(crate) async fn request(_: &Ethereum, args: Eip1193Request) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    pub(crate) fn on(_: &Ethereum, eventName: &str, listener: &Closure<dyn FnMut(JsValue)>);
}

impl Ethereum {
    /// Looks up the injected provider, failing if the page has none
    pub(crate) fn injected() -> Result<Self, Eip1193Error> {
        match get_provider_js() {
            Ok(Some(eth)) => Ok(eth),
            _ => Err(Eip1193Error::JsNoEthereum),
        }
    }
}

#[wasm_bindgen(inline_js = "export function get_provider_js() {return window.ethereum}")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn get_provider_js() -> Result<Option<Ethereum>, JsValue>;
}
