use crate::{
    session::Screen,
    views::{
        AccountPanel, ConnectButton, ExpenseChart, ExpenseList, ExpenseToggle, InstallPrompt,
        TransactionButtons,
    },
    yew::UseAtm,
};
use yew::prelude::*;

#[function_component(AtmPage)]
pub fn atm_page() -> Html {
    let atm = use_context::<UseAtm>()
        .expect("No ATM session found. You must wrap your components in an <AtmContextProvider />");

    let body = match atm.screen() {
        Screen::InstallWallet => html! { <InstallPrompt /> },
        Screen::Connect => html! { <ConnectButton /> },
        Screen::Connected { show_expenses, .. } => html! {
            <div>
                <AccountPanel />
                <TransactionButtons />
                <ExpenseToggle />
                if show_expenses {
                    <ExpenseList />
                }
                <ExpenseChart />
            </div>
        },
    };

    html! {
        <main class="container">
            <header>
                <h1>{atm.title()}</h1>
            </header>
            {body}
        </main>
    }
}
