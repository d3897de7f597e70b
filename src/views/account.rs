use crate::{session::Screen, yew::UseAtm};
use ethers::{types::Address, utils::to_checksum};
use yew::prelude::*;

/// Mixed-case form, as wallets display it
fn display_address(account: &Address) -> String {
    to_checksum(account, None)
}

#[function_component(InstallPrompt)]
pub fn install_prompt() -> Html {
    html! {
        <p>{"Please install Metamask in order to use this ATM."}</p>
    }
}

#[function_component(ConnectButton)]
pub fn connect_button() -> Html {
    let atm = use_context::<UseAtm>()
        .expect("No ATM session found. You must wrap your components in an <AtmContextProvider />");

    let onclick = Callback::from(move |_: MouseEvent| atm.connect());
    html! {
        <button {onclick}>{"Please connect your Metamask wallet"}</button>
    }
}

#[function_component(AccountPanel)]
pub fn account_panel() -> Html {
    let atm = use_context::<UseAtm>()
        .expect("No ATM session found. You must wrap your components in an <AtmContextProvider />");

    let Screen::Connected { account, chain_id, balance, .. } = atm.screen() else {
        return html! {};
    };

    html! {
        <>
            <p>{format!("Your Account: {}", display_address(&account))}</p>
            if let Some(chain_id) = chain_id {
                <p class="chain">{format!("Network: {chain_id}")}</p>
            }
            <p>{"Your Balance: "}{balance.map(|b| b.to_string()).unwrap_or_default()}</p>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn account_is_shown_checksummed() {
        let account = Address::from_str("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap();
        assert_eq!(display_address(&account), "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    }
}
