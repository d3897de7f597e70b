use crate::{
    expenses::{axis_ticks, bar_heights, CHART_TITLE, MONTHLY_EXPENSES},
    session::Screen,
    yew::UseAtm,
};
use yew::prelude::*;

const BAR_FILL: &str = "rgba(75,192,192,0.2)";
const BAR_BORDER: &str = "rgba(75,192,192,1)";

#[function_component(ExpenseToggle)]
pub fn expense_toggle() -> Html {
    let atm = use_context::<UseAtm>()
        .expect("No ATM session found. You must wrap your components in an <AtmContextProvider />");

    let shown = matches!(atm.screen(), Screen::Connected { show_expenses: true, .. });
    let onclick = Callback::from(move |_: MouseEvent| atm.toggle_expenses());
    html! {
        <button {onclick}>{if shown { "Hide Expenses" } else { "View Expenses" }}</button>
    }
}

#[function_component(ExpenseList)]
pub fn expense_list() -> Html {
    html! {
        <div style="margin-top: 20px;">
            <h2>{"Expenses of the Month"}</h2>
            <ul>
                {for MONTHLY_EXPENSES.iter().map(|e| html! { <li key={e.month}>{e.label()}</li> })}
            </ul>
        </div>
    }
}

/// Bar chart of the monthly figures drawn with plain CSS
#[function_component(ExpenseChart)]
pub fn expense_chart() -> Html {
    let heights = bar_heights(&MONTHLY_EXPENSES);

    html! {
        <figure class="expense-chart" style="margin-top: 20px;">
            <figcaption>
                <span class="legend" style={format!("background: {BAR_FILL}; border: 1px solid {BAR_BORDER};")}></span>
                {CHART_TITLE}
            </figcaption>
            <div class="chart" style="display: flex; height: 200px; max-width: 400px; margin: 0 auto;">
                <div class="axis" style="display: flex; flex-direction: column; justify-content: space-between; padding-right: 4px;">
                    {for axis_ticks(&MONTHLY_EXPENSES).into_iter().map(|t| html! { <small key={t}>{t.to_string()}</small> })}
                </div>
                {for MONTHLY_EXPENSES.iter().zip(heights).map(|(expense, height)| html! {
                    <div key={expense.month} class="bar-column" style="flex: 1; display: flex; flex-direction: column; justify-content: flex-end;">
                        <div
                            class="bar"
                            title={expense.label()}
                            style={format!("height: {height:.1}%; margin: 0 2px; background: {BAR_FILL}; border: 1px solid {BAR_BORDER};")}
                        ></div>
                    </div>
                })}
            </div>
            <div class="labels" style="display: flex; max-width: 400px; margin: 0 auto; padding-left: 20px;">
                {for MONTHLY_EXPENSES.iter().map(|e| html! { <small key={e.month} style="flex: 1;">{&e.month[..3]}</small> })}
            </div>
        </figure>
    }
}
