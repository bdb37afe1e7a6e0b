use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::error::CanvasError;
use super::render;
use super::state::SankeyState;
use super::types::{Journey, SankeyConfig};

type SharedState = Rc<RefCell<Option<SankeyState>>>;

/// Canvas-backed Sankey diagram. The whole layout is rebuilt whenever
/// `journeys`, `steps` or `config` change; hovering a node or link dims
/// everything not connected to it.
#[component]
pub fn SankeyCanvas(
	#[prop(into)] journeys: Signal<Vec<Journey>>,
	#[prop(into)] steps: Signal<usize>,
	#[prop(into, default = Signal::stored(SankeyConfig::default()))] config: Signal<SankeyConfig>,
	#[prop(default = None)] width: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));

	let state_init = state.clone();
	Effect::new(move |_| {
		let journeys = journeys.get();
		let steps = steps.get();
		let config = checked(config.get());
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		let w = width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(config.width)
		});
		let next = SankeyState::new(
			&journeys,
			steps,
			SankeyConfig {
				width: w,
				..config
			},
		);
		canvas.set_width(w as u32);
		canvas.set_height(next.height().ceil() as u32);
		*state_init.borrow_mut() = Some(next);
		redraw(&canvas, &state_init);
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		let changed = match *state_mm.borrow_mut() {
			Some(ref mut s) => {
				let before = s.hover.target;
				let target = s.target_at_position(x, y);
				s.set_hover(target);
				before != s.hover.target
			}
			None => false,
		};
		if changed {
			redraw(&canvas, &state_mm);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.set_hover(None);
		}
		redraw(&canvas, &state_ml);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="sankey-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block;"
		/>
	}
}

fn checked(config: SankeyConfig) -> SankeyConfig {
	match config.validate() {
		Ok(()) => config,
		Err(err) => {
			warn!("invalid sankey config ({err}), falling back to defaults");
			SankeyConfig::default()
		}
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, CanvasError> {
	canvas
		.get_context("2d")
		.map_err(|_| CanvasError::NoContext)?
		.ok_or(CanvasError::NoContext)?
		.dyn_into()
		.map_err(|_| CanvasError::WrongContextType)
}

fn redraw(canvas: &HtmlCanvasElement, state: &SharedState) {
	let ctx = match context_2d(canvas) {
		Ok(ctx) => ctx,
		Err(err) => {
			error!("cannot draw sankey: {err}");
			return;
		}
	};
	if let Some(ref s) = *state.borrow() {
		render::render(s, &ctx);
	}
}
