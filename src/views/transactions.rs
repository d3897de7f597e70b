use crate::{session::Screen, yew::UseAtm, Action};
use yew::prelude::*;

#[function_component(TransactionButtons)]
pub fn transaction_buttons() -> Html {
    let atm = use_context::<UseAtm>()
        .expect("No ATM session found. You must wrap your components in an <AtmContextProvider />");

    let pending = match atm.screen() {
        Screen::Connected { pending, .. } => pending,
        _ => None,
    };

    let deposit = {
        let atm = atm.clone();
        Callback::from(move |_: MouseEvent| atm.deposit())
    };
    let withdraw = Callback::from(move |_: MouseEvent| atm.withdraw());

    html! {
        <>
            <button onclick={deposit} disabled={pending.is_some()}>{"Deposit 1 ETH"}</button>
            <button onclick={withdraw} disabled={pending.is_some()}>{"Withdraw 1 ETH"}</button>
            if let Some(action) = pending {
                <p class="pending">{pending_text(action)}</p>
            }
        </>
    }
}

fn pending_text(action: Action) -> String {
    format!("Waiting for your {action} to be confirmed...")
}
