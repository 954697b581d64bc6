use std::rc::Rc;

use leptos::prelude::*;

use super::selection::Tooltip;
use crate::api::Preference;

/// Include/exclude prompt shown where an actionable node was clicked.
#[component]
pub fn NodeTooltip(
	#[prop(into)] tooltip: Signal<Option<Tooltip>>,
	on_choose: impl Fn(Preference) + 'static,
	on_close: impl Fn() + 'static,
) -> impl IntoView {
	let on_choose = Rc::new(on_choose);
	let (include, exclude) = (on_choose.clone(), on_choose);

	let style = move || match tooltip.get() {
		Some(t) => format!(
			"display: block; position: absolute; left: {}px; top: {}px;",
			t.x + 10.0,
			t.y + 10.0
		),
		None => "display: none;".to_string(),
	};
	let title = move || tooltip.get().map(|t| t.title).unwrap_or_default();

	view! {
		<div class="node-tooltip" style=style>
			<div class="node-tooltip-header">
				<span class="node-tooltip-title">{title}</span>
				<button class="node-tooltip-close" on:click=move |_| on_close()>"×"</button>
			</div>
			<div class="node-tooltip-actions">
				<button on:click=move |_| include(Preference::Include)>"Include"</button>
				<button on:click=move |_| exclude(Preference::Exclude)>"Exclude"</button>
			</div>
		</div>
	}
}
