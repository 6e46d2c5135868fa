//! Loan application page.

use crate::user::get_session_context;
use leptos::prelude::*;
use plms_assistant::LoanRoster;

/// Loan application landing page. Requires a signed-in user.
#[component]
pub fn ApplyLoanPage() -> impl IntoView {
    let session = Resource::new(|| (), |_| get_session_context());

    view! {
        <div class="apply-loan-page">
            <h1>"Apply for a New Loan"</h1>
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    session.get().map(|result| match result {
                        Ok(context) if context.is_logged_in => view! {
                            <div>
                                <p>"Keep these documents ready before you start:"</p>
                                <RequiredDocuments/>
                                <p>"Applications are usually reviewed within 2-3 business days."</p>
                            </div>
                        }.into_any(),
                        _ => view! {
                            <div>
                                <p>"Please log in to apply for a loan."</p>
                                <a href="/login" class="login-button">"Log in"</a>
                            </div>
                        }.into_any(),
                    })
                }}
            </Suspense>
        </div>
    }
}

/// Checklist of the documents every application needs.
#[component]
pub fn RequiredDocuments() -> impl IntoView {
    let roster = LoanRoster::sample();

    view! {
        <ul class="document-list">
            {roster
                .required_documents()
                .iter()
                .map(|doc| view! { <li>{doc.clone()}</li> })
                .collect_view()}
        </ul>
    }
}
