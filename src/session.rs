//! The page's whole state, kept in one value.
//!
//! Every operation takes the session by `&mut` and leaves it in the state the
//! page should render next: connect, bind the contract, read the balance,
//! deposit or withdraw, read the balance again.

use crate::{contract::AtmClient, wallet::Wallet, Action, AtmConfig, AtmError};
use ethers::types::{Address, TransactionReceipt, U256};
use log::{error, info};
use std::fmt::{Debug, Formatter, Result as FmtResult};

/// Every deposit and withdrawal moves exactly this many units
pub const UNIT_AMOUNT: u64 = 1;

/// What the page shows, recomputed from the session on every render
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    /// No injected wallet, ask the user to install one
    InstallWallet,
    /// Wallet present but the page is not authorised yet
    Connect,
    Connected {
        account: Address,
        chain_id: Option<u64>,
        balance: Option<U256>,
        show_expenses: bool,
        pending: Option<Action>,
    },
}

#[derive(Clone)]
pub struct Session<W: Wallet> {
    config: AtmConfig,
    wallet: Option<W>,
    account: Option<Address>,
    chain_id: Option<u64>,
    // bumped on every `chainChanged`, ties a snapshot's reads to the chain they ran on
    chain_epoch: u64,
    contract: Option<W::Client>,
    balance: Option<U256>,
    show_expenses: bool,
    pending: Option<Action>,
}

impl<W: Wallet> Debug for Session<W> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(
            f,
            "Session with wallet: {}, account: {:?}, chain_id: {:?}, balance: {:?}",
            self.wallet.is_some(),
            self.account,
            self.chain_id,
            self.balance
        )
    }
}

impl<W: Wallet> Session<W> {
    /// Starts a session around whatever wallet detection found
    pub fn new(config: AtmConfig, wallet: Option<W>) -> Self {
        Self {
            config,
            wallet,
            account: None,
            chain_id: None,
            chain_epoch: 0,
            contract: None,
            balance: None,
            show_expenses: false,
            pending: None,
        }
    }

    pub fn config(&self) -> &AtmConfig {
        &self.config
    }

    pub fn wallet(&self) -> Option<&W> {
        self.wallet.as_ref()
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    pub fn contract(&self) -> Option<&W::Client> {
        self.contract.as_ref()
    }

    pub fn balance(&self) -> Option<U256> {
        self.balance
    }

    pub fn show_expenses(&self) -> bool {
        self.show_expenses
    }

    pub fn pending(&self) -> Option<Action> {
        self.pending
    }

    /// True when a contract is bound but its balance has not been read yet
    pub fn needs_balance(&self) -> bool {
        self.contract.is_some() && self.balance.is_none()
    }

    /// Picks up an account the user authorised on an earlier visit, without
    /// prompting. Does nothing without a wallet.
    pub async fn restore(&mut self) -> Result<Option<Address>, AtmError> {
        let Some(wallet) = self.wallet.clone() else {
            return Ok(None);
        };

        match wallet.accounts().await?.first().copied() {
            Some(account) => {
                info!("Account connected: {account:?}");
                self.authorise(&wallet, account).await;
                Ok(Some(account))
            }
            None => {
                info!("No account found");
                Ok(None)
            }
        }
    }

    /// Prompts the wallet for an account and binds the contract to it
    pub async fn connect(&mut self) -> Result<Address, AtmError> {
        let Some(wallet) = self.wallet.clone() else {
            return Err(AtmError::WalletRequired(Action::Connect));
        };

        let account = wallet
            .request_accounts()
            .await
            .and_then(|accounts| accounts.first().copied().ok_or(AtmError::NoAccount));
        match account {
            Ok(account) => {
                info!("Account connected: {account:?}");
                self.authorise(&wallet, account).await;
                Ok(account)
            }
            Err(err) if err.is_user_rejection() => {
                info!("Connection request rejected by the user");
                Err(AtmError::failed(Action::Connect, err))
            }
            Err(err) => {
                error!("Connection error: {err}");
                Err(AtmError::failed(Action::Connect, err))
            }
        }
    }

    async fn authorise(&mut self, wallet: &W, account: Address) {
        self.chain_id = match wallet.chain_id().await {
            Ok(chain_id) => Some(chain_id),
            Err(err) => {
                error!("Could not read chain id: {err}");
                None
            }
        };
        self.switch_account(account);
    }

    /// Makes `account` the signer, rebinding the contract if it changed
    pub fn switch_account(&mut self, account: Address) {
        let Some(wallet) = &self.wallet else {
            return;
        };
        if self.account == Some(account) && self.contract.is_some() {
            return;
        }
        self.contract = Some(wallet.bind(&self.config, account));
        self.account = Some(account);
        self.balance = None;
    }

    /// Applies an `accountsChanged` notification. An empty list keeps the
    /// current account, the page has no disconnected state.
    pub fn accounts_changed(&mut self, accounts: &[Address]) {
        match accounts.first() {
            Some(account) => self.switch_account(*account),
            None => info!("Wallet reported no accounts, keeping {:?}", self.account),
        }
    }

    /// Applies a `chainChanged` notification. The balance is read again.
    pub fn chain_changed(&mut self, chain_id: u64) {
        self.chain_id = Some(chain_id);
        self.chain_epoch += 1;
        self.balance = None;
    }

    /// Reads the balance from the contract. Without a bound contract this is a
    /// no-op returning `None`.
    pub async fn refresh_balance(&mut self) -> Result<Option<U256>, AtmError> {
        let Some(contract) = &self.contract else {
            return Ok(None);
        };
        let balance = contract.get_balance().await?;
        self.balance = Some(balance);
        Ok(Some(balance))
    }

    pub async fn deposit(&mut self) -> Result<TransactionReceipt, AtmError> {
        let contract = self.ready_contract(Action::Deposit)?;
        let result: Result<TransactionReceipt, AtmError> = async {
            let tx = contract.deposit(U256::from(UNIT_AMOUNT)).await?;
            contract.confirm(tx).await
        }
        .await;
        self.settle(Action::Deposit, result).await
    }

    pub async fn withdraw(&mut self) -> Result<TransactionReceipt, AtmError> {
        let contract = self.ready_contract(Action::Withdraw)?;
        let result: Result<TransactionReceipt, AtmError> = async {
            let tx = contract.withdraw(U256::from(UNIT_AMOUNT)).await?;
            contract.confirm(tx).await
        }
        .await;
        self.settle(Action::Withdraw, result).await
    }

    fn ready_contract(&self, action: Action) -> Result<W::Client, AtmError> {
        if self.wallet.is_none() {
            return Err(AtmError::WalletRequired(action));
        }
        self.contract.clone().ok_or(AtmError::ContractNotInitialized)
    }

    async fn settle(
        &mut self,
        action: Action,
        result: Result<TransactionReceipt, AtmError>,
    ) -> Result<TransactionReceipt, AtmError> {
        match result {
            Ok(receipt) => {
                info!("{action} confirmed in {:?}", receipt.transaction_hash);
                // the transaction went through, a failed read only leaves the balance unset
                if let Err(err) = self.refresh_balance().await {
                    error!("Could not read balance after {action}: {err}");
                }
                Ok(receipt)
            }
            Err(err) => {
                error!("Failed to {action}: {err}");
                Err(AtmError::failed(action, err))
            }
        }
    }

    pub fn toggle_expenses(&mut self) {
        self.show_expenses = !self.show_expenses;
    }

    /// Marks a transaction as in flight
    pub fn begin(&mut self, action: Action) {
        self.pending = Some(action);
    }

    pub fn finish(&mut self) {
        self.pending = None;
    }

    /// Takes over what an operation run on a snapshot of this session learned
    /// from the wallet. View state set in the meantime is kept, results for
    /// an account the user has since switched away from are dropped, and a
    /// chain switch in the meantime keeps the live chain with no balance.
    pub fn adopt(&mut self, settled: Session<W>) {
        if self.account.is_some() && self.account != settled.account {
            info!("Dropping result for {:?}, now on {:?}", settled.account, self.account);
            return;
        }
        self.account = settled.account;
        self.contract = settled.contract;
        if self.chain_epoch == settled.chain_epoch {
            self.chain_id = settled.chain_id;
            self.balance = settled.balance;
        } else {
            info!("Chain switched to {:?} meanwhile, balance is read again", self.chain_id);
        }
    }

    pub fn screen(&self) -> Screen {
        if self.wallet.is_none() {
            return Screen::InstallWallet;
        }
        match self.account {
            None => Screen::Connect,
            Some(account) => Screen::Connected {
                account,
                chain_id: self.chain_id,
                balance: self.balance,
                show_expenses: self.show_expenses,
                pending: self.pending,
            },
        }
    }
}
