//! Home page component.

use crate::user::get_session_context;
use leptos::prelude::*;

/// The home page component.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = Resource::new(|| (), |_| get_session_context());

    view! {
        <div class="home-page">
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    session.get().map(|result| {
                        let context = result.unwrap_or_default();
                        let greeting = context
                            .display_name()
                            .map(|n| format!("Welcome back, {}!", n))
                            .unwrap_or_else(|| "Welcome to PLMS".to_string());
                        view! {
                            <div>
                                <h1>{greeting}</h1>
                                <p>"Personal loans with transparent EMIs and quick approvals."</p>
                                <div class="quick-links">
                                    <a href="/apply-loan" class="cta-button">"Apply for a Loan"</a>
                                    <a href="/pay-emi" class="link-button">"Pay EMI"</a>
                                    <a href="/upload-documents" class="link-button">"Upload Documents"</a>
                                </div>
                                <p class="hint">"Questions? Ask the PLMS Assistant in the corner."</p>
                            </div>
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}
