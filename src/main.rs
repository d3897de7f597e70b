use atm_web::{views::AtmPage, yew::AtmContextProvider, AtmBuilder, AtmConfig};
use log::{error, Level};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: AtmConfig,
}

#[function_component]
fn App(props: &AppProps) -> Html {
    html! {
        <AtmContextProvider config={props.config.clone()}>
            <AtmPage />
        </AtmContextProvider>
    }
}

fn main() {
    _ = console_log::init_with_level(Level::Debug);
    console_error_panic_hook::set_once();

    match AtmBuilder::new().build() {
        Ok(config) => {
            yew::Renderer::<App>::with_props(AppProps { config }).render();
        }
        Err(err) => error!("Invalid configuration: {err}"),
    }
}
