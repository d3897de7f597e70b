use crate::AtmError;
use async_trait::async_trait;
use ethers::{
    contract::abigen,
    providers::{Middleware, PendingTransaction},
    types::{Address, TransactionReceipt, TxHash, U256, U64},
};
use log::debug;
use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
    time::Duration,
};

abigen!(Assessment, "abi/Assessment.json");

/// Typed client for the ATM contract.
///
/// The three contract calls mirror the ABI; `confirm` waits for the ledger to
/// include a transaction returned by `deposit` or `withdraw`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AtmClient {
    async fn get_balance(&self) -> Result<U256, AtmError>;

    async fn deposit(&self, amount: U256) -> Result<TxHash, AtmError>;

    async fn withdraw(&self, amount: U256) -> Result<TxHash, AtmError>;

    async fn confirm(&self, tx: TxHash) -> Result<TransactionReceipt, AtmError>;
}

/// `Assessment` binding with the account that signs every call
pub struct AtmContract<M> {
    inner: Assessment<M>,
    address: Address,
    signer: Address,
    poll_interval: Duration,
}

impl<M> Clone for AtmContract<M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            address: self.address,
            signer: self.signer,
            poll_interval: self.poll_interval,
        }
    }
}

impl<M> Debug for AtmContract<M> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "ATM contract at {:?} signed by {:?}", self.address, self.signer)
    }
}

impl<M: Middleware + 'static> AtmContract<M> {
    pub fn new(address: Address, signer: Address, client: Arc<M>, poll_interval: Duration) -> Self {
        Self { inner: Assessment::new(address, client), address, signer, poll_interval }
    }
}

impl<M> AtmContract<M> {
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn signer(&self) -> Address {
        self.signer
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<M: Middleware + 'static> AtmClient for AtmContract<M> {
    async fn get_balance(&self) -> Result<U256, AtmError> {
        self.inner
            .get_balance()
            .from(self.signer)
            .call()
            .await
            .map_err(|e| AtmError::Contract(e.to_string()))
    }

    async fn deposit(&self, amount: U256) -> Result<TxHash, AtmError> {
        let call = self.inner.deposit(amount).from(self.signer);
        let pending = call.send().await.map_err(|e| AtmError::Contract(e.to_string()))?;
        debug!("Deposit of {amount} submitted as {:?}", pending.tx_hash());
        Ok(pending.tx_hash())
    }

    async fn withdraw(&self, amount: U256) -> Result<TxHash, AtmError> {
        let call = self.inner.withdraw(amount).from(self.signer);
        let pending = call.send().await.map_err(|e| AtmError::Contract(e.to_string()))?;
        debug!("Withdrawal of {amount} submitted as {:?}", pending.tx_hash());
        Ok(pending.tx_hash())
    }

    async fn confirm(&self, tx: TxHash) -> Result<TransactionReceipt, AtmError> {
        let client = self.inner.client();
        let receipt = PendingTransaction::new(tx, client.provider())
            .interval(self.poll_interval)
            .await?
            .ok_or(AtmError::Dropped(tx))?;

        if receipt.status == Some(U64::zero()) {
            return Err(AtmError::Reverted(tx));
        }
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::{
        abi::{encode, Token},
        providers::Provider,
        types::Bytes,
    };
    use futures::executor::block_on;

    fn address(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[test]
    fn balance_is_decoded_from_eth_call() {
        let (provider, mock) = Provider::mocked();
        mock.push::<Bytes, _>(Bytes::from(encode(&[Token::Uint(U256::from(5))]))).unwrap();

        let contract =
            AtmContract::new(address(0xaa), address(0xbb), Arc::new(provider), Duration::from_millis(1));

        assert_eq!(block_on(contract.get_balance()).unwrap(), U256::from(5));
    }

    #[test]
    fn failed_call_surfaces_as_contract_error() {
        // nothing queued on the mock, so the call errors out
        let (provider, _mock) = Provider::mocked();
        let contract =
            AtmContract::new(address(0xaa), address(0xbb), Arc::new(provider), Duration::from_millis(1));

        assert!(matches!(block_on(contract.get_balance()), Err(AtmError::Contract(_))));
    }

    #[test]
    fn binding_keeps_address_and_signer() {
        let (provider, _mock) = Provider::mocked();
        let contract =
            AtmContract::new(address(0x11), address(0x22), Arc::new(provider), Duration::from_secs(1));

        assert_eq!(contract.address(), address(0x11));
        assert_eq!(contract.signer(), address(0x22));
        assert_eq!(contract.clone().address(), address(0x11));
    }
}
