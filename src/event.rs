use std::fmt::Display;

/// Provider events the page reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    AccountsChanged,
    ChainChanged,
}

impl WalletEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletEvent::AccountsChanged => "accountsChanged",
            WalletEvent::ChainChanged => "chainChanged",
        }
    }
}

impl Display for WalletEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
