use crate::{
    contract::{AtmClient, AtmContract},
    eip1193::Eip1193,
    event::WalletEvent,
    AtmConfig, AtmError,
};
use async_trait::async_trait;
use ethers::{
    providers::{JsonRpcClient, Provider},
    types::{Address, U256},
};
use gloo_utils::format::JsValueSerdeExt;
use log::{debug, error};
use std::sync::Arc;

/// A wallet the session can authorise against and derive a signing contract
/// client from
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Wallet: Clone {
    type Client: AtmClient + Clone;

    /// Accounts the user already authorised for this page. Never prompts.
    async fn accounts(&self) -> Result<Vec<Address>, AtmError>;

    /// Asks the user to authorise the page. May wait on the wallet UI indefinitely.
    async fn request_accounts(&self) -> Result<Vec<Address>, AtmError>;

    async fn chain_id(&self) -> Result<u64, AtmError>;

    /// Binds the configured contract to `signer`
    fn bind(&self, config: &AtmConfig, signer: Address) -> Self::Client;
}

/// The wallet injected by a browser extension at `window.ethereum`
#[derive(Clone, Debug, Default)]
pub struct InjectedWallet {
    provider: Eip1193,
}

impl InjectedWallet {
    /// Returns the injected wallet if the page has one
    pub fn detect() -> Option<Self> {
        if Eip1193::is_available() {
            Some(Self { provider: Eip1193::new() })
        } else {
            debug!("No injected wallet on this page");
            None
        }
    }

    /// Calls `callback` with the new account list whenever the user switches accounts
    pub fn on_accounts_changed(
        &self,
        mut callback: impl FnMut(Vec<Address>) + 'static,
    ) -> Result<(), AtmError> {
        let handler = move |accounts: wasm_bindgen::JsValue| match accounts.into_serde::<Vec<Address>>() {
            Ok(accounts) => callback(accounts),
            Err(err) => error!("Unreadable {} payload: {err}", WalletEvent::AccountsChanged),
        };
        Ok(self.provider.on(WalletEvent::AccountsChanged, Box::new(handler))?)
    }

    /// Calls `callback` with the new chain id whenever the wallet switches network
    pub fn on_chain_changed(&self, mut callback: impl FnMut(u64) + 'static) -> Result<(), AtmError> {
        let handler = move |chain_id: wasm_bindgen::JsValue| match chain_id.into_serde::<U256>() {
            Ok(chain_id) => callback(chain_id.low_u64()),
            Err(err) => error!("Unreadable {} payload: {err}", WalletEvent::ChainChanged),
        };
        Ok(self.provider.on(WalletEvent::ChainChanged, Box::new(handler))?)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Wallet for InjectedWallet {
    type Client = AtmContract<Provider<Eip1193>>;

    async fn accounts(&self) -> Result<Vec<Address>, AtmError> {
        Ok(self.provider.request("eth_accounts", ()).await?)
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, AtmError> {
        Ok(self.provider.request("eth_requestAccounts", ()).await?)
    }

    async fn chain_id(&self) -> Result<u64, AtmError> {
        let chain_id: U256 = self.provider.request("eth_chainId", ()).await?;
        Ok(chain_id.low_u64())
    }

    fn bind(&self, config: &AtmConfig, signer: Address) -> Self::Client {
        let provider = Provider::new(self.provider.clone()).interval(config.poll_interval);
        AtmContract::new(config.contract_address, signer, Arc::new(provider), config.poll_interval)
    }
}
