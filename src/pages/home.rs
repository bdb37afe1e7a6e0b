use leptos::prelude::*;
use log::error;

use crate::components::sankey::{Journey, SankeyCanvas, SankeyConfig, truncate_journeys};

const SAMPLE_JOURNEYS: &str = include_str!("sample_journeys.json");

/// Decode the bundled sample journeys.
fn sample_journeys() -> Vec<Journey> {
	serde_json::from_str(SAMPLE_JOURNEYS).unwrap_or_else(|err| {
		error!("bundled journeys are malformed: {err}");
		Vec::new()
	})
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let all = sample_journeys();
	let (steps, set_steps) = signal(3usize);
	let (max_journeys, set_max_journeys) = signal(SankeyConfig::default().max_journeys);

	let journeys = Signal::derive(move || truncate_journeys(&all, steps.get()));
	let config = Signal::derive(move || SankeyConfig {
		max_journeys: max_journeys.get(),
		..SankeyConfig::default()
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="journeys">
				<h1>"User Journeys"</h1>
				<p class="subtitle">"Hover a step or a flow to trace every path through it."</p>
				<div class="controls">
					<label>
						"Steps "
						<select on:change=move |ev| {
							if let Ok(n) = event_target_value(&ev).parse() {
								set_steps.set(n);
							}
						}>
							{(2..=5usize)
								.map(|n| {
									view! {
										<option value=n.to_string() selected=move || steps.get() == n>
											{n}
										</option>
									}
								})
								.collect_view()}
						</select>
					</label>
					<label>
						"Max journeys "
						<input
							type="number"
							min="1"
							prop:value=move || max_journeys.get().to_string()
							on:change=move |ev| {
								if let Ok(n) = event_target_value(&ev).parse() {
									set_max_journeys.set(n);
								}
							}
						/>
					</label>
				</div>
				<SankeyCanvas journeys=journeys steps=steps config=config />
			</div>
		</ErrorBoundary>
	}
}
