use std::rc::Rc;

use leptos::prelude::*;
use log::info;

use crate::components::force_graph::ConstellationCanvas;
use crate::components::overlay::{Legend, YearIndicator};
use crate::config::{Config, EMBEDDED_CONFIG};
use crate::error::ConstellationError;
use crate::graph::{EMBEDDED_DATASET, load_graph};
use crate::reveal::{Indicator, RevealSequencer};

/// Load config and dataset; either failure stops the page from drawing anything.
fn constellation(indicator: RwSignal<Indicator>) -> Result<impl IntoView, ConstellationError> {
	let config = Config::from_json(EMBEDDED_CONFIG)?;
	let graph = Rc::new(load_graph(EMBEDDED_DATASET)?);
	info!("Starting reveal of {} nodes", graph.nodes().len());
	let sequencer = RevealSequencer::new(graph)?;
	let (title, subtitle) = (config.title.clone(), config.subtitle.clone());

	Ok(view! {
		<div class="fullscreen-graph">
			<ConstellationCanvas sequencer=sequencer config=config indicator=indicator />
			<div class="graph-overlay">
				<h1>{title}</h1>
				<p class="subtitle">{subtitle}</p>
				<p class="hint">"Click an edge to focus its endpoints. Click empty space to reset."</p>
				<Legend />
			</div>
			<YearIndicator indicator=indicator />
		</div>
	})
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let indicator = RwSignal::new(Indicator::Starting);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<div class="graph-error">
					<h1>"The constellation could not be loaded"</h1>

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
				</div>
			}
		}>{constellation(indicator)}</ErrorBoundary>
	}
}
