use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info, warn};
use uuid::Uuid;

use crate::api::{Answer, ApiClient, ApiError, HistoryKind, HistoryRecord, IncludeExcludeRequest};
use crate::chat::{ChatSession, HistoryLog, Resolution, Ticket};
use crate::components::chat_panel::ChatPanel;
use crate::components::force_graph::{ForceGraphCanvas, RELATED_STEPS, Scope, ViewEvent};
use crate::components::history_panel::HistoryPanel;
use crate::graph::reduce::mentioned_from_keywords;
use crate::graph::{Dataset, NodeId};

fn now() -> String {
	js_sys::Date::new_0().to_iso_string().into()
}

/// Chat on the right, knowledge graph and pending preferences on the left.
#[component]
pub fn Home() -> impl IntoView {
	let user_id = StoredValue::new(Uuid::new_v4().to_string());
	let client = StoredValue::new_local(ApiClient::default());
	let chat = RwSignal::new(ChatSession::new());
	let history = RwSignal::new(HistoryLog::default());
	let graph = RwSignal::new(Dataset::default());
	let mentioned = RwSignal::new(Vec::<NodeId>::new());
	let clicked = RwSignal::new(None::<(NodeId, String)>);
	let scope = RwSignal::new(Scope::All);

	info!("session user {}", user_id.get_value());
	spawn_local(async move {
		match client.get_value().fetch_history(&user_id.get_value()).await {
			Ok(records) => history.set(HistoryLog::from_server(records)),
			Err(err) => warn!("could not load history: {err}"),
		}
	});

	let write_history = move |kind: HistoryKind, content: String| -> HistoryRecord {
		let record = HistoryRecord::new(user_id.get_value(), kind, content, now());
		let sent = record.clone();
		spawn_local(async move {
			if let Err(err) = client.get_value().append_history(&sent).await {
				error!("could not record {:?} history: {err}", sent.kind);
			}
		});
		record
	};

	let settle = move |ticket: Ticket, result: Result<Answer, ApiError>| {
		let Some(resolution) = chat.try_update(|c| c.resolve(ticket, result)) else {
			return;
		};
		let Resolution::Answered { graph: next, keywords } = resolution else {
			return;
		};
		if let Some(next) = next {
			mentioned.set(Vec::new());
			clicked.set(None);
			scope.set(Scope::All);
			graph.set(next);
		} else if !keywords.is_empty() {
			let mentions = graph.with_untracked(|d| mentioned_from_keywords(&keywords, d));
			scope.set(Scope::All);
			mentioned.set(mentions.mentioned_ids);
		}
	};

	let on_ask = Callback::new(move |question: String| {
		let Some(ticket) = chat.try_update(|c| c.submit(&question)).flatten() else {
			return;
		};
		write_history(HistoryKind::Chat, question.clone());
		spawn_local(async move {
			let result = client.get_value().ask_question(&question, &user_id.get_value()).await;
			settle(ticket, result);
		});
	});

	let on_recommend = Callback::new(move |()| {
		let Some(ticket) = chat.try_update(|c| c.begin_if_idle()).flatten() else {
			return;
		};
		write_history(HistoryKind::Recommendation, String::new());
		spawn_local(async move {
			let result = client.get_value().recommend(&user_id.get_value()).await;
			settle(ticket, result);
		});
	});

	let on_graph_event = Callback::new(move |event: ViewEvent| match event {
		ViewEvent::NodeClicked(id) => {
			let name = graph.with_untracked(|d| d.node(id).map(|n| n.display_name.clone()));
			clicked.set(name.map(|name| (id, name)));
		}
		// choices are only recorded; Apply is what asks for new recipes
		ViewEvent::History { kind, content } => {
			let record = write_history(kind, content);
			if kind.is_preference() {
				history.update(|h| {
					h.record(record);
				});
			}
		}
	});

	let on_undo = Callback::new(move |()| {
		let Some(last) = history.with_untracked(|h| h.last().cloned()) else {
			return;
		};
		spawn_local(async move {
			match client.get_value().delete_last_history(&user_id.get_value(), &last.time).await {
				Ok(()) => history.update(|h| {
					h.undo_last();
				}),
				Err(err) => error!("could not undo {:?} {}: {err}", last.kind, last.content),
			}
		});
	});

	let on_apply = Callback::new(move |()| {
		if history.with_untracked(|h| h.to_operation().is_empty()) {
			return;
		}
		let Some(ticket) = chat.try_update(|c| c.begin_if_idle()).flatten() else {
			info!("apply deferred: a reply is still pending");
			return;
		};
		write_history(HistoryKind::Apply, String::new());
		let Some(operation) = history.try_update(|h| h.apply()) else {
			return;
		};
		let request = IncludeExcludeRequest {
			user_id: user_id.get_value(),
			operation,
		};
		spawn_local(async move {
			let result = client.get_value().include_exclude(&request).await;
			settle(ticket, result);
		});
	});

	let show_all = move |_| {
		mentioned.set(Vec::new());
		clicked.set(None);
		scope.set(Scope::All);
	};

	let related_step = move || match scope.get() {
		Scope::Related { step, .. } => step.to_string(),
		_ => RELATED_STEPS.to_string(),
	};
	let on_related = move |ev: leptos::ev::Event| {
		let (Some((seed, _)), Ok(step)) = (clicked.get_untracked(), event_target_value(&ev).parse())
		else {
			return;
		};
		scope.set(Scope::Related { seed, step });
	};
	let whole_cluster = move |_| {
		if let Some((seed, _)) = clicked.get_untracked() {
			scope.set(Scope::Component(seed));
		}
	};
	let busy = Signal::derive(move || chat.with(|c| c.is_waiting()));

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
			<div class="health-mate">
				<div class="graph-column">
					<div class="graph-area">
						<ForceGraphCanvas
							data=graph
							mentioned=mentioned
							scope=scope
							on_event=on_graph_event
						/>
						<div class="graph-overlay">
							<Show when=move || clicked.with(Option::is_some)>
								<p class="clicked-node">
									{move || clicked.get().map(|(_, name)| name).unwrap_or_default()}
								</p>
								<label class="related-nodes">
									"Related"
									<input
										type="range"
										min="0"
										max=RELATED_STEPS.to_string()
										prop:value=related_step
										on:input=on_related
									/>
								</label>
								<button on:click=whole_cluster>"Whole cluster"</button>
							</Show>
							<button on:click=show_all>"Show all"</button>
						</div>
					</div>
					<HistoryPanel history=history busy=busy on_undo=on_undo on_apply=on_apply />
				</div>
				<ChatPanel chat=chat on_ask=on_ask on_recommend=on_recommend />
			</div>
		</ErrorBoundary>
	}
}
