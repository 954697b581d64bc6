use leptos::prelude::*;

use crate::chat::{ChatMessage, ChatSession, Speaker};

#[component]
fn ChatBubble(message: ChatMessage) -> impl IntoView {
	let class = match message.from {
		Speaker::User => "chat-bubble chat-bubble-user",
		Speaker::Bot => "chat-bubble chat-bubble-bot",
	};
	view! {
		<div class=class>
			{message
				.content
				.lines()
				.map(|line| view! { <p>{line.to_string()}</p> })
				.collect_view()}
		</div>
	}
}

/// Transcript plus the question box. Input is disabled while a reply is pending.
#[component]
pub fn ChatPanel(
	#[prop(into)] chat: Signal<ChatSession>,
	on_ask: Callback<String>,
	on_recommend: Callback<()>,
) -> impl IntoView {
	let draft = RwSignal::new(String::new());
	let waiting = move || chat.with(|c| c.is_waiting());

	let send = move || {
		let text = draft.get_untracked();
		if text.trim().is_empty() || chat.with_untracked(|c| c.is_waiting()) {
			return;
		}
		draft.set(String::new());
		on_ask.run(text);
	};

	view! {
		<section class="chat-panel">
			<div class="chat-messages">
				<For
					each=move || chat.with(|c| c.messages().to_vec())
					key=|message| message.id
					children=move |message| view! { <ChatBubble message=message /> }
				/>
				<Show when=waiting>
					<div class="chat-bubble chat-bubble-bot chat-typing">"…"</div>
				</Show>
			</div>
			<form
				class="chat-input"
				on:submit=move |ev| {
					ev.prevent_default();
					send();
				}
			>
				<textarea
					placeholder="Ask about food and health"
					prop:value=move || draft.get()
					on:input=move |ev| draft.set(event_target_value(&ev))
					on:keydown=move |ev| {
						if ev.key() == "Enter" && !ev.shift_key() {
							ev.prevent_default();
							send();
						}
					}
					disabled=waiting
				/>
				<button type="submit" disabled=waiting>"Send"</button>
				<button type="button" disabled=waiting on:click=move |_| on_recommend.run(())>
					"Recommend"
				</button>
			</form>
		</section>
	}
}
