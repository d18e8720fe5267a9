//! Animated co-authorship constellation: a Leptos client-side app that reveals
//! a precomputed academic graph paper by paper on a force-directed canvas.
//!
//! The graph logic ([`graph`], [`projection`], [`reveal`], [`highlight`]) is
//! independent of the browser and drives any [`projection::RenderSurface`].

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod config;
pub mod error;
pub mod graph;
pub mod highlight;
pub mod projection;
pub mod reveal;
pub mod schedule;

// Browser shell
mod components;
mod pages;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the constellation and handles 404's
/// Root component: the constellation page and a fallback route.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Academic Constellation" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
