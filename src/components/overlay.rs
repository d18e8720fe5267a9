//! Page furniture drawn over the canvas.

use leptos::prelude::*;

use crate::graph::style::LEGEND;
use crate::reveal::Indicator;

/// Category swatches.
#[component]
pub fn Legend() -> impl IntoView {
	view! {
		<ul class="legend">
			{LEGEND
				.iter()
				.map(|(label, color)| {
					view! {
						<li>
							<span class="swatch" style=format!("color: {color}")>"●"</span>
							" "
							{*label}
						</li>
					}
				})
				.collect_view()}
		</ul>
	}
}

/// Year of the most recently revealed paper.
#[component]
pub fn YearIndicator(indicator: RwSignal<Indicator>) -> impl IntoView {
	let text = move || match indicator.get() {
		Indicator::Starting => Indicator::Starting.to_string(),
		year @ Indicator::Year(_) => format!("📅 {year}"),
		Indicator::Complete => format!("✅ {}", Indicator::Complete),
	};
	view! { <div id="year-label" class="year-label">{text}</div> }
}
