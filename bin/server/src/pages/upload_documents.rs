//! Document upload page.

use super::apply_loan::RequiredDocuments;
use crate::user::get_session_context;
use leptos::prelude::*;

/// Document upload page. Requires a signed-in user.
#[component]
pub fn UploadDocumentsPage() -> impl IntoView {
    let session = Resource::new(|| (), |_| get_session_context());

    view! {
        <div class="upload-documents-page">
            <h1>"Upload Documents"</h1>
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    session.get().map(|result| match result {
                        Ok(context) if context.is_logged_in => view! {
                            <div>
                                <p>"Upload clear scans or photos in PDF, JPG or PNG format."</p>
                                <RequiredDocuments/>
                                <p class="hint">"Uploads are processed by the PLMS document service."</p>
                            </div>
                        }.into_any(),
                        _ => view! {
                            <div>
                                <p>"Please log in to upload your documents."</p>
                                <a href="/login" class="login-button">"Log in"</a>
                            </div>
                        }.into_any(),
                    })
                }}
            </Suspense>
        </div>
    }
}
