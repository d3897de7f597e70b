pub mod contract;
pub mod eip1193;
pub mod event;
pub mod expenses;
pub mod session;
pub mod wallet;
#[cfg(feature = "yew")]
pub mod views;
#[cfg(feature = "yew")]
pub mod yew;

use eip1193::error::Eip1193Error;
use ethers::{
    providers::ProviderError,
    types::{Address, TxHash},
};
use std::{fmt::Display, str::FromStr, time::Duration};
use thiserror::Error;

pub use contract::{AtmClient, AtmContract};
pub use session::{Screen, Session, UNIT_AMOUNT};
pub use wallet::{InjectedWallet, Wallet};

/// Address hardhat assigns to the first contract deployed on a fresh local node
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 4_000;

pub struct AtmBuilder {
    pub title: String,
    pub contract_address: String,
    pub poll_interval_ms: u64,
}

impl Default for AtmBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AtmBuilder {
    /// Starts from the built-in defaults, overridden by `ATM_CONTRACT_ADDRESS` and
    /// `ATM_POLL_INTERVAL_MS` if they were set at compile time
    pub fn new() -> Self {
        let mut builder = Self {
            title: "Welcome to the Metacrafters ATM!".to_string(),
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        };
        if let Some(address) = std::option_env!("ATM_CONTRACT_ADDRESS") {
            builder.contract_address(address);
        }
        if let Some(interval) = std::option_env!("ATM_POLL_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            builder.poll_interval(interval);
        }
        builder
    }

    pub fn title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn contract_address(&mut self, address: &str) -> &mut Self {
        self.contract_address = address.trim().to_string();
        self
    }

    pub fn poll_interval(&mut self, millis: u64) -> &mut Self {
        self.poll_interval_ms = millis;
        self
    }

    pub fn build(&self) -> Result<AtmConfig, AtmError> {
        let contract_address = Address::from_str(&self.contract_address)
            .map_err(|_| AtmError::InvalidAddress(self.contract_address.clone()))?;
        Ok(AtmConfig {
            title: self.title.clone(),
            contract_address,
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
        })
    }
}

/// Settings the page is built with
#[derive(Clone, Debug, PartialEq)]
pub struct AtmConfig {
    pub title: String,
    pub contract_address: Address,
    /// How often a submitted transaction is polled for its receipt
    pub poll_interval: Duration,
}

/// User-triggered operations, named the way they appear in alerts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Connect,
    Deposit,
    Withdraw,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Connect => "connect",
            Action::Deposit => "deposit",
            Action::Withdraw => "withdraw",
        };
        f.write_str(name)
    }
}

/// Everything that can go wrong in a session. The `Display` text is what the
/// user gets to see.
#[derive(Error, Debug)]
pub enum AtmError {
    #[error("MetaMask wallet is required to {0}")]
    WalletRequired(Action),

    #[error("ATM contract not initialized")]
    ContractNotInitialized,

    #[error("No account found")]
    NoAccount,

    #[error("Failed to {action}")]
    Failed {
        action: Action,
        #[source]
        source: Box<AtmError>,
    },

    #[error("Transaction {0:?} was dropped before confirmation")]
    Dropped(TxHash),

    #[error("Transaction {0:?} reverted")]
    Reverted(TxHash),

    #[error("Invalid contract address {0:?}")]
    InvalidAddress(String),

    #[error("Contract call failed: {0}")]
    Contract(String),

    #[error(transparent)]
    ProviderError(#[from] ProviderError),

    #[error(transparent)]
    Eip1193Error(#[from] Eip1193Error),
}

impl AtmError {
    pub(crate) fn failed(action: Action, source: AtmError) -> Self {
        AtmError::Failed { action, source: Box::new(source) }
    }

    /// True if the wallet reported that the user declined its prompt
    pub fn is_user_rejection(&self) -> bool {
        match self {
            AtmError::Eip1193Error(e) => e.is_user_rejection(),
            AtmError::Failed { source, .. } => source.is_user_rejection(),
            _ => false,
        }
    }
}
