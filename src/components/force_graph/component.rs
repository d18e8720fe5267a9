use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{CLICK_SLOP_PX, ForceGraphState};
use super::timer::RepeatingTask;
use crate::config::Config;
use crate::error::{ConstellationError, RenderingSurfaceUnavailableError};
use crate::highlight::HighlightController;
use crate::projection::Projection;
use crate::reveal::{Indicator, RevealSequencer};
use crate::schedule::{CancelToken, TaskControl};

type SharedProjection = Rc<RefCell<Option<Projection<ForceGraphState>>>>;
type SharedClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn unavailable(reason: &str) -> RenderingSurfaceUnavailableError {
	RenderingSurfaceUnavailableError::new(reason)
}

fn window() -> Result<Window, RenderingSurfaceUnavailableError> {
	web_sys::window().ok_or_else(|| unavailable("no window"))
}

fn window_size(window: &Window) -> Result<(f64, f64), RenderingSurfaceUnavailableError> {
	let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
	match (dim(window.inner_width()), dim(window.inner_height())) {
		(Some(w), Some(h)) => Ok((w, h)),
		_ => Err(unavailable("window has no size")),
	}
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Everything the mounted canvas keeps alive.
#[derive(Clone, Default)]
struct Mounted {
	projection: SharedProjection,
	highlight: Rc<RefCell<HighlightController>>,
	animate: SharedClosure,
	resize_cb: SharedClosure,
	reveal: Rc<RefCell<Option<RepeatingTask>>>,
	/// Cancelled on unmount; stops the frame loop, resize handling and the reveal.
	teardown: CancelToken,
}

fn mount(
	canvas: HtmlCanvasElement,
	mut sequencer: RevealSequencer,
	config: &Config,
	indicator: RwSignal<Indicator>,
	mounted: &Mounted,
) -> Result<(), ConstellationError> {
	let window = window()?;
	let (w, h) = window_size(&window)?;
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.ok()
		.flatten()
		.ok_or_else(|| unavailable("canvas has no 2d context"))?
		.dyn_into()
		.map_err(|_| unavailable("2d context has unexpected type"))?;

	let mut projection = Projection::new(ForceGraphState::new(config, w, h));
	// Priming happens now so the layout settles before the first reveal tick.
	if let Some(text) = sequencer.advance(&mut projection)? {
		indicator.set(text);
	}
	*mounted.projection.borrow_mut() = Some(projection);

	let (projection_resize, canvas_resize, teardown_resize) = (
		mounted.projection.clone(),
		canvas.clone(),
		mounted.teardown.clone(),
	);
	*mounted.resize_cb.borrow_mut() = Some(Closure::new(move || {
		if teardown_resize.is_cancelled() {
			return;
		}
		let Some((nw, nh)) = web_sys::window().and_then(|win| window_size(&win).ok()) else {
			return;
		};
		canvas_resize.set_width(nw as u32);
		canvas_resize.set_height(nh as u32);
		if let Some(ref mut p) = *projection_resize.borrow_mut() {
			p.surface_mut().resize(nw, nh);
		}
	}));
	if let Some(ref cb) = *mounted.resize_cb.borrow() {
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}

	let (projection_anim, animate_inner, teardown_anim) = (
		mounted.projection.clone(),
		mounted.animate.clone(),
		mounted.teardown.clone(),
	);
	*mounted.animate.borrow_mut() = Some(Closure::new(move || {
		// Not rescheduling ends the loop; the closure itself is freed with `Mounted`.
		if teardown_anim.is_cancelled() {
			return;
		}
		if let Some(ref mut p) = *projection_anim.borrow_mut() {
			let s = p.surface_mut();
			if s.animation_running {
				s.tick(0.016);
			}
			render::render(s, &ctx);
		}
		if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));
	if let Some(ref cb) = *mounted.animate.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}

	let (projection_tick, highlight_tick) = (mounted.projection.clone(), mounted.highlight.clone());
	let task = RepeatingTask::start(config.reveal_interval, mounted.teardown.clone(), move || {
		let mut guard = projection_tick.borrow_mut();
		let Some(projection) = guard.as_mut() else {
			return TaskControl::Break;
		};
		match sequencer.advance(projection) {
			Ok(Some(text)) => indicator.set(text),
			Ok(None) => {}
			Err(err) => {
				error!("Reveal aborted: {err}");
				return TaskControl::Break;
			}
		}
		highlight_tick.borrow_mut().refresh(projection);
		if sequencer.is_complete() {
			info!("Reveal complete: {} papers", sequencer.paper_count());
			TaskControl::Break
		} else {
			TaskControl::Continue
		}
	})?;
	*mounted.reveal.borrow_mut() = Some(task);
	Ok(())
}

/// Canvas that plays `sequencer` and handles pan, zoom, drag and edge focus.
#[component]
pub fn ConstellationCanvas(
	sequencer: RevealSequencer,
	config: Config,
	indicator: RwSignal<Indicator>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let surface_error = RwSignal::new(None::<String>);
	let mounted = Mounted::default();
	let highlight = mounted.highlight.clone();

	let teardown = mounted.teardown.clone();
	on_cleanup(move || teardown.cancel());

	let mounted_init = mounted.clone();
	let mut pending = Some(sequencer);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(sequencer) = pending.take() else {
			return;
		};
		if let Err(err) = mount(canvas.into(), sequencer, &config, indicator, &mounted_init) {
			error!("{err}");
			surface_error.set(Some(err.to_string()));
		}
	});

	let projection_md = mounted.projection.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut p) = *projection_md.borrow_mut() {
			let s = p.surface_mut();
			s.pointer.down_x = x;
			s.pointer.down_y = y;
			s.pointer.moved = false;
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
					}
				});
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let projection_mm = mounted.projection.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut p) = *projection_mm.borrow_mut() {
			let s = p.surface_mut();
			if (s.drag.active || s.pan.active)
				&& (x - s.pointer.down_x).hypot(y - s.pointer.down_y) > CLICK_SLOP_PX
			{
				s.pointer.moved = true;
			}

			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered, x, y);
			}

			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let (projection_mu, highlight_mu) = (mounted.projection.clone(), highlight.clone());
	let on_mouseup = move |ev: MouseEvent| {
		let point = pointer(canvas_ref, &ev);
		if let Some(ref mut p) = *projection_mu.borrow_mut() {
			let s = p.surface_mut();
			let clicked = !s.pointer.moved && (s.drag.active || s.pan.active) && s.visible;
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;

			if let (true, Some((x, y))) = (clicked, point) {
				let selection = p.surface().pick(x, y);
				highlight_mu.borrow_mut().select(p, selection);
			}
		}
	};

	let projection_ml = mounted.projection.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut p) = *projection_ml.borrow_mut() {
			let s = p.surface_mut();
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			s.set_hover(None, 0.0, 0.0);
		}
	};

	let projection_wh = mounted.projection.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut p) = *projection_wh.borrow_mut() {
			let s = p.surface_mut();
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		<Show when=move || surface_error.get().is_some()>
			<div class="graph-error">
				<h2>"The constellation could not be drawn"</h2>
				<p>{move || surface_error.get().unwrap_or_default()}</p>
			</div>
		</Show>
	}
}
