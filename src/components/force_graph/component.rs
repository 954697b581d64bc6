use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::selection::Tooltip;
use super::state::GraphView;
use super::tooltip::NodeTooltip;
use super::types::{Scope, ViewEvent};
use crate::api::Preference;
use crate::config::ViewConfig;
use crate::graph::{Dataset, NodeId};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	let w = window.inner_width().ok()?.as_f64()?;
	let h = window.inner_height().ok()?.as_f64()?;
	Some((w, h))
}

fn pointer_in(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<Dataset>,
	/// Node ids to narrow the view to; empty shows everything.
	#[prop(into, default = Signal::stored(Vec::new()))]
	mentioned: Signal<Vec<NodeId>>,
	/// Related-nodes or component scope around a clicked node.
	#[prop(into, default = Signal::stored(Scope::All))]
	scope: Signal<Scope>,
	#[prop(optional)] on_event: Option<Callback<ViewEvent>>,
	#[prop(optional)] config: ViewConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = Rc::new(RefCell::new(GraphView::new(config)));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let tooltip = RwSignal::new(None::<Tooltip>);
	let alive = Arc::new(AtomicBool::new(true));

	let emit = move |events: Vec<ViewEvent>| {
		if let Some(cb) = on_event {
			for event in events {
				cb.run(event);
			}
		}
	};

	let state_data = state.clone();
	Effect::new(move |_| {
		let dataset = data.get();
		debug!("graph data changed: {} nodes", dataset.nodes.len());
		let mut view = state_data.borrow_mut();
		view.set_dataset(dataset);
		let ids = mentioned.get_untracked();
		if !ids.is_empty() {
			view.set_mentioned(ids);
		}
		tooltip.set(None);
	});

	let state_mentioned = state.clone();
	Effect::new(move |prev: Option<()>| {
		let ids = mentioned.get();
		// the data effect already applied the initial value
		if prev.is_some() {
			state_mentioned.borrow_mut().set_mentioned(ids);
			tooltip.set(None);
		}
	});

	let state_scope = state.clone();
	Effect::new(move |prev: Option<()>| {
		let next = scope.get();
		if prev.is_some() {
			state_scope.borrow_mut().set_scope(next);
			tooltip.set(None);
		}
	});

	let (state_init, animate_init, resize_cb_init, alive_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), alive.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window; graph canvas not started");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("2d context has an unexpected type");
					return;
				}
			},
			_ => {
				error!("canvas has no 2d context");
				return;
			}
		};
		state_init.borrow_mut().mount(w, h);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				state_resize.borrow_mut().resize(nw, nh);
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner, alive_anim) =
			(state_init.clone(), animate_init.clone(), alive_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				state_anim.borrow_mut().unmount();
				return;
			}
			{
				let mut view = state_anim.borrow_mut();
				view.tick();
				view.animate(0.016);
				render::render(&view, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let alive_cleanup = alive.clone();
	on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer_in(canvas_ref, &ev) {
			state_md.borrow_mut().pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer_in(canvas_ref, &ev) {
			state_mm.borrow_mut().pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_in(canvas_ref, &ev) else {
			return;
		};
		let (events, open) = {
			let mut view = state_mu.borrow_mut();
			let events = view.pointer_up(x, y);
			(events, view.tooltip().cloned())
		};
		if !events.is_empty() {
			tooltip.set(open);
		}
		emit(events);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		state_ml.borrow_mut().pointer_leave();
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = pointer_in(canvas_ref, &ev) {
			state_wh.borrow_mut().zoom_at(x, y, ev.delta_y());
		}
	};

	let state_choose = state.clone();
	let on_choose = move |preference: Preference| {
		let event = state_choose.borrow_mut().choose(preference);
		tooltip.set(None);
		emit(event.into_iter().collect());
	};

	let state_close = state.clone();
	let on_close = move || {
		state_close.borrow_mut().close_tooltip();
		tooltip.set(None);
	};

	view! {
		<div class="force-graph" style="position: relative;">
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
			<NodeTooltip tooltip=tooltip on_choose=on_choose on_close=on_close />
		</div>
	}
}
