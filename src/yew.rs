use crate::{
    session::{Screen, Session},
    wallet::InjectedWallet,
    Action, AtmConfig, AtmError,
};
use ethers::types::Address;
use log::{debug, error};
use std::rc::Rc;
use yew::{
    function_component, html, platform::spawn_local, prelude::*, Children, ContextProvider, Html,
    Properties,
};

pub type AtmSession = Session<InjectedWallet>;

/// Changes applied to the page's session
pub enum SessionAction {
    /// An async operation finished on a snapshot, take over what it learned
    Settled(AtmSession),
    Begin(Action),
    Finish,
    ToggleExpenses,
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
}

impl Reducible for AtmSession {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            SessionAction::Settled(settled) => next.adopt(settled),
            SessionAction::Begin(action) => next.begin(action),
            SessionAction::Finish => next.finish(),
            SessionAction::ToggleExpenses => next.toggle_expenses(),
            SessionAction::AccountsChanged(accounts) => next.accounts_changed(&accounts),
            SessionAction::ChainChanged(chain_id) => next.chain_changed(chain_id),
        }
        next.into()
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub config: AtmConfig,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(AtmContextProvider)]
pub fn atm_context_provider(props: &Props) -> Html {
    let atm = use_atm(props.config.clone());

    html! {
        <ContextProvider<UseAtm> context={atm}>
            {for props.children.iter()}
        </ContextProvider<UseAtm>>
    }
}

#[derive(Clone)]
pub struct UseAtm {
    pub session: UseReducerHandle<AtmSession>,
}

impl PartialEq for UseAtm {
    fn eq(&self, other: &Self) -> bool {
        self.session.screen() == other.session.screen()
    }
}

impl UseAtm {
    /// What the page should show right now
    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    pub fn title(&self) -> String {
        self.session.config().title.clone()
    }

    /// Prompts the wallet for an account
    pub fn connect(&self) {
        let handle = self.session.clone();
        let mut snapshot = (*self.session).clone();
        spawn_local(async move {
            let result = snapshot.connect().await;
            handle.dispatch(SessionAction::Settled(snapshot));
            if let Err(err) = result {
                alert(&err);
            }
        });
    }

    /// Reads the balance. Failures are only logged.
    pub fn refresh_balance(&self) {
        let handle = self.session.clone();
        let mut snapshot = (*self.session).clone();
        spawn_local(async move {
            match snapshot.refresh_balance().await {
                Ok(Some(_)) => handle.dispatch(SessionAction::Settled(snapshot)),
                Ok(None) => debug!("No contract bound, balance not read"),
                Err(err) => error!("Could not read balance: {err}"),
            }
        });
    }

    pub fn deposit(&self) {
        let Some((handle, mut snapshot)) = self.begin(Action::Deposit) else {
            return;
        };
        spawn_local(async move {
            let result = snapshot.deposit().await.map(|_| ());
            settle(&handle, snapshot, result);
        });
    }

    pub fn withdraw(&self) {
        let Some((handle, mut snapshot)) = self.begin(Action::Withdraw) else {
            return;
        };
        spawn_local(async move {
            let result = snapshot.withdraw().await.map(|_| ());
            settle(&handle, snapshot, result);
        });
    }

    pub fn toggle_expenses(&self) {
        self.session.dispatch(SessionAction::ToggleExpenses);
    }

    fn begin(&self, action: Action) -> Option<(UseReducerHandle<AtmSession>, AtmSession)> {
        if let Some(pending) = self.session.pending() {
            debug!("Ignoring {action}, {pending} still pending");
            return None;
        }
        let snapshot = (*self.session).clone();
        self.session.dispatch(SessionAction::Begin(action));
        Some((self.session.clone(), snapshot))
    }
}

fn settle(handle: &UseReducerHandle<AtmSession>, snapshot: AtmSession, result: Result<(), AtmError>) {
    handle.dispatch(SessionAction::Settled(snapshot));
    handle.dispatch(SessionAction::Finish);
    if let Err(err) = result {
        alert(&err);
    }
}

fn alert(err: &AtmError) {
    gloo::dialogs::alert(&err.to_string());
}

#[hook]
pub fn use_atm(config: AtmConfig) -> UseAtm {
    let session = use_reducer(move || Session::new(config, InjectedWallet::detect()));

    {
        let session = session.clone();
        yew_hooks::use_effect_once(move || {
            if let Some(wallet) = session.wallet().cloned() {
                listen(&wallet, session.dispatcher());

                let mut snapshot = (*session).clone();
                spawn_local(async move {
                    match snapshot.restore().await {
                        Ok(Some(_)) => session.dispatch(SessionAction::Settled(snapshot)),
                        Ok(None) => {}
                        Err(err) => error!("Could not restore session: {err}"),
                    }
                });
            }
            || {}
        });
    }

    let atm = UseAtm { session };

    // the balance is read lazily once a contract is bound, and again whenever
    // the account or chain changes
    {
        let deps = (atm.session.account(), atm.session.chain_id(), atm.session.needs_balance());
        let atm = atm.clone();
        use_effect_with(deps, move |(_, _, needs_balance)| {
            if *needs_balance {
                atm.refresh_balance();
            }
        });
    }

    atm
}

fn listen(wallet: &InjectedWallet, dispatcher: UseReducerDispatcher<AtmSession>) {
    let accounts = dispatcher.clone();
    if let Err(err) = wallet.on_accounts_changed(move |list| {
        accounts.dispatch(SessionAction::AccountsChanged(list));
    }) {
        error!("Could not listen for account changes: {err}");
    }
    if let Err(err) = wallet.on_chain_changed(move |chain_id| {
        dispatcher.dispatch(SessionAction::ChainChanged(chain_id));
    }) {
        error!("Could not listen for chain changes: {err}");
    }
}
