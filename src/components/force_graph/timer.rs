use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::error::RenderingSurfaceUnavailableError;
use crate::schedule::{CancelToken, TaskControl};

/// `setInterval`-backed periodic task. Stops on `Break`, on cancel, or on drop.
pub struct RepeatingTask {
	handle: Rc<Cell<Option<i32>>>,
	token: CancelToken,
	_callback: Closure<dyn FnMut()>,
}

fn clear(handle: &Cell<Option<i32>>) {
	if let (Some(window), Some(h)) = (web_sys::window(), handle.take()) {
		window.clear_interval_with_handle(h);
	}
}

impl RepeatingTask {
	pub fn start(
		period: Duration,
		token: CancelToken,
		mut body: impl FnMut() -> TaskControl + 'static,
	) -> Result<Self, RenderingSurfaceUnavailableError> {
		let window =
			web_sys::window().ok_or_else(|| RenderingSurfaceUnavailableError::new("no window"))?;
		let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

		let (tick_token, tick_handle) = (token.clone(), handle.clone());
		let callback = Closure::<dyn FnMut()>::new(move || {
			if tick_token.run_tick(&mut body) == TaskControl::Break {
				clear(&tick_handle);
			}
		});

		let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
		let id = window
			.set_interval_with_callback_and_timeout_and_arguments_0(
				callback.as_ref().unchecked_ref(),
				millis,
			)
			.map_err(|e| RenderingSurfaceUnavailableError::new(format!("setInterval: {e:?}")))?;
		handle.set(Some(id));

		Ok(Self {
			handle,
			token,
			_callback: callback,
		})
	}

	pub fn cancel(&self) {
		self.token.cancel();
		clear(&self.handle);
	}
}

impl Drop for RepeatingTask {
	fn drop(&mut self) {
		self.cancel();
	}
}
