//! Login page component.

use crate::user::get_session_context;
use leptos::prelude::*;

/// Login page. Sign-in itself is handled by the PLMS backend.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = Resource::new(|| (), |_| get_session_context());

    view! {
        <div class="login-page">
            <div class="login-box">
                <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                    {move || {
                        session.get().map(|result| match result {
                            Ok(context) if context.is_logged_in => {
                                let name = context.display_name().unwrap_or("there").to_string();
                                view! {
                                    <div>
                                        <h1>{format!("Hi {}, you are signed in", name)}</h1>
                                        <a href="/" class="link-button">"Back to home"</a>
                                    </div>
                                }.into_any()
                            }
                            _ => view! {
                                <div>
                                    <h1>"Log in to PLMS"</h1>
                                    <p>"Sign in with your PLMS account to manage your loans and EMIs."</p>
                                    <p class="hint">"Once you are signed in, the assistant can take you straight to EMI payments and loan applications."</p>
                                </div>
                            }.into_any(),
                        })
                    }}
                </Suspense>
            </div>
        </div>
    }
}
