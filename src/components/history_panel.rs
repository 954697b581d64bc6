use leptos::prelude::*;

use crate::api::HistoryKind;
use crate::chat::HistoryLog;

/// Pending include/exclude operations with undo and apply.
///
/// Apply waits while `busy` so it never supersedes a pending chat reply.
#[component]
pub fn HistoryPanel(
	#[prop(into)] history: Signal<HistoryLog>,
	#[prop(into)] busy: Signal<bool>,
	on_undo: Callback<()>,
	on_apply: Callback<()>,
) -> impl IntoView {
	let empty = move || history.with(|h| h.is_empty());

	view! {
		<section class="history-panel">
			<header>
				<h2>"Preferences"</h2>
				<button disabled=empty on:click=move |_| on_undo.run(())>"Undo"</button>
				<button disabled={move || empty() || busy.get()} on:click=move |_| on_apply.run(())>
					"Apply"
				</button>
			</header>
			<Show
				when=move || !empty()
				fallback=|| view! { <p class="history-empty">"No pending choices"</p> }
			>
				<ul class="history-operations">
					{move || {
						history
							.with(|h| h.operations().to_vec())
							.into_iter()
							.map(|record| {
								let (class, sign) = match record.kind {
									HistoryKind::Include => ("history-include", "+"),
									_ => ("history-exclude", "−"),
								};
								view! {
									<li class=class>
										<span class="history-sign">{sign}</span>
										{record.content}
									</li>
								}
							})
							.collect_view()
					}}
				</ul>
			</Show>
		</section>
	}
}
