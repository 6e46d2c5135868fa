//! Floating chat widget hosting the PLMS Assistant.
//!
//! The widget state lives in a signal. Typing delays and redirects are
//! browser timers; route changes go through the router.

use crate::user::{get_assistant_settings, get_session_context};
use chrono::Local;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use plms_assistant::{
    AssistantConfig, ChatWidget, Message, PendingReply, Sender, SessionContext, WidgetCommand,
};

/// Chat launcher button and panel, mounted on every page.
#[component]
pub fn ChatBot() -> impl IntoView {
    let setup = Resource::new(
        || (),
        |_| async move {
            let context = get_session_context().await.unwrap_or_default();
            let config = get_assistant_settings().await.unwrap_or_default();
            (context, config)
        },
    );

    view! {
        <Suspense fallback=|| ()>
            {move || {
                setup.get().map(|(context, config)| view! {
                    <ChatPanel context=context config=config/>
                })
            }}
        </Suspense>
    }
}

/// The chat window itself.
#[component]
fn ChatPanel(context: SessionContext, config: AssistantConfig) -> impl IntoView {
    let widget = RwSignal::new(ChatWidget::new(context, config));
    let (open, set_open) = signal(false);
    let (input, set_input) = signal(String::new());
    let navigate = StoredValue::new_local(use_navigate());
    let end_of_log = NodeRef::<leptos::html::Div>::new();

    // Keep the newest message in view.
    Effect::new(move || {
        widget.track();
        if let Some(el) = end_of_log.get() {
            el.scroll_into_view();
        }
    });

    let send = move |text: String| {
        let Some(result) = widget.try_update(|w| w.submit(&text)) else {
            return;
        };
        match result {
            Ok(pending) => {
                set_input.set(String::new());
                schedule_reply(widget, navigate, pending);
            }
            Err(e) => leptos::logging::debug_warn!("chat input ignored: {e}"),
        }
    };

    let is_typing = move || widget.with(ChatWidget::is_typing);
    let is_loading = move || widget.with(ChatWidget::is_loading);

    view! {
        <div class="chatbot">
            <button
                class="chatbot-launcher"
                aria-label="Open PLMS Assistant"
                on:click=move |_| set_open.update(|o| *o = !*o)
            >
                {move || if open.get() { "✕" } else { "💬" }}
            </button>
            <Show when=move || open.get()>
                <div class="chatbot-window">
                    <div class="chatbot-header">"PLMS Assistant"</div>
                    <div class="chatbot-log">
                        {move || {
                            widget.with(|w| {
                                w.log()
                                    .messages()
                                    .iter()
                                    .map(|message| view! { <ChatMessage message=message.clone() send=send/> })
                                    .collect_view()
                            })
                        }}
                        <Show when=is_typing>
                            <div class="chat-row bot">
                                <div class="chat-bubble bot typing">"Typing..."</div>
                            </div>
                        </Show>
                        <Show when=is_loading>
                            <div class="chatbot-spinner" role="status"></div>
                        </Show>
                        <div node_ref=end_of_log></div>
                    </div>
                    <div class="chatbot-input">
                        <input
                            type="text"
                            placeholder="Ask about your loan..."
                            prop:value=move || input.get()
                            prop:disabled=is_loading
                            on:input=move |ev| set_input.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    send(input.get_untracked());
                                }
                            }
                        />
                        <button
                            class="chatbot-send"
                            disabled=move || is_loading() || input.get().trim().is_empty()
                            on:click=move |_| send(input.get_untracked())
                        >
                            "Send"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}

/// One message bubble, with option buttons under bot messages.
#[component]
fn ChatMessage(
    message: Message,
    send: impl Fn(String) + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let side = match message.sender {
        Sender::User => "user",
        Sender::Bot => "bot",
    };
    let sent_at = message
        .sent_at
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string();
    let options = message.has_options().then(|| {
        view! {
            <div class="chat-options">
                {message
                    .options
                    .iter()
                    .cloned()
                    .map(|option| {
                        let label = option.clone();
                        view! {
                            <button class="chat-option" on:click=move |_| send(option.clone())>
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        }
    });

    view! {
        <div class="chat-message">
            <div class=format!("chat-row {side}")>
                <div class=format!("chat-bubble {side}")>
                    {message.text}
                    <span class="chat-time">{sent_at}</span>
                </div>
            </div>
            {options}
        </div>
    }
}

/// Delivers a reply once its typing delay has elapsed.
fn schedule_reply<N>(
    widget: RwSignal<ChatWidget>,
    navigate: StoredValue<N, LocalStorage>,
    pending: PendingReply,
) where
    N: Fn(&str, NavigateOptions) + 'static,
{
    let delay = pending.delay;
    set_timeout(
        move || {
            let commands = widget
                .try_update(|w| w.deliver(pending))
                .unwrap_or_default();
            run_commands(widget, navigate, commands);
        },
        delay,
    );
}

/// Carries out the widget's navigation and timer requests.
fn run_commands<N>(
    widget: RwSignal<ChatWidget>,
    navigate: StoredValue<N, LocalStorage>,
    commands: Vec<WidgetCommand>,
) where
    N: Fn(&str, NavigateOptions) + 'static,
{
    for command in commands {
        match command {
            WidgetCommand::Navigate(route) => {
                navigate.with_value(|nav| nav(route.path(), NavigateOptions::default()));
            }
            WidgetCommand::Schedule { delay, effects } => {
                set_timeout(
                    move || {
                        let next = widget
                            .try_update(|w| w.apply_deferred(effects))
                            .unwrap_or_default();
                        run_commands(widget, navigate, next);
                    },
                    delay,
                );
            }
        }
    }
}
