use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shortlink_client::dashboard::{
    chart_points, format_count, format_growth, format_rate, polyline,
};
use shortlink_client::{DashboardStats, messages};

use crate::api;
use crate::pages::LoginRequired;
use crate::state::AppState;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 200.0;

#[component]
pub(crate) fn DashboardPage(state: AppState) -> impl IntoView {
    let stats = RwSignal::new(None::<DashboardStats>);
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    let load = move || {
        let Some(token) = state
            .session
            .with_untracked(|s| s.access_token().map(str::to_string))
        else {
            return;
        };
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match api::dashboard_stats(&token).await {
                Ok(fetched) => stats.set(Some(fetched)),
                Err(err) => {
                    logging::error!("dashboard stats: {err}");
                    error.set(Some(messages::DASHBOARD_FAILED.to_string()));
                }
            }
            loading.set(false);
        });
    };
    load();

    view! {
        <Show when=move || state.is_authenticated() fallback=|| view! { <LoginRequired /> }>
            <section class="dashboard">
                <header>
                    <h1>"Dashboard"</h1>
                    <button on:click=move |_| load() disabled=move || loading.get()>
                        {move || if error.with(Option::is_some) { "Retry" } else { "Refresh" }}
                    </button>
                </header>

                <Show when=move || error.with(Option::is_some)>
                    <p class="error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || loading.get() && stats.with(Option::is_none)>
                    <p>"Loading..."</p>
                </Show>

                {move || stats.get().map(|stats| view! { <StatsView stats=stats /> })}
            </section>
        </Show>
    }
}

#[component]
fn StatsView(stats: DashboardStats) -> impl IntoView {
    let points = chart_points(&stats.last_7_days, CHART_WIDTH, CHART_HEIGHT);
    let line = polyline(&points);

    view! {
        <div class="cards">
            <div class="card">
                <h3>"Total Links"</h3>
                <p class="value">{format_count(stats.total_links)}</p>
                <p class="delta">"+" {format_count(stats.links_this_week)} " this week"</p>
            </div>
            <div class="card">
                <h3>"Total Visits"</h3>
                <p class="value">{format_count(stats.total_visits)}</p>
                <p class="delta">{format_growth(stats.visits_growth)} " from last week"</p>
            </div>
            <div class="card">
                <h3>"Avg. Click Rate"</h3>
                <p class="value">{format_rate(stats.avg_click_rate)} "%"</p>
                <p class="delta">{format_growth(stats.click_rate_change)} " from last week"</p>
            </div>
        </div>

        <div class="chart">
            <h3>"Visits, last 7 days"</h3>
            <svg
                viewBox=format!("0 0 {CHART_WIDTH} {CHART_HEIGHT}")
                preserveAspectRatio="none"
                width="100%"
                height="200"
            >
                <polyline points=line fill="none" stroke="currentColor" stroke-width="2" />
            </svg>
            <ul class="chart-labels">
                {points
                    .into_iter()
                    .map(|point| view! { <li>{point.label} ": " {point.visits}</li> })
                    .collect_view()}
            </ul>
        </div>
    }
}
