pub mod account;
pub mod expenses;
pub mod page;
pub mod transactions;

pub use account::{AccountPanel, ConnectButton, InstallPrompt};
pub use expenses::{ExpenseChart, ExpenseList, ExpenseToggle};
pub use page::AtmPage;
pub use transactions::TransactionButtons;
