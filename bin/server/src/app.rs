//! Main Leptos application component and routing.

use crate::components::ChatBot;
use crate::pages::{ApplyLoanPage, HomePage, LoginPage, PayEmiPage, UploadDocumentsPage};
use crate::user::get_session_context;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="PLMS"/>
        <Router>
            <Header/>
            <main class="container">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/pay-emi") view=PayEmiPage/>
                    <Route path=path!("/apply-loan") view=ApplyLoanPage/>
                    <Route path=path!("/upload-documents") view=UploadDocumentsPage/>
                </Routes>
            </main>
            <ChatBot/>
        </Router>
    }
}

/// Header component with navigation and the signed-in user.
#[component]
fn Header() -> impl IntoView {
    let session = Resource::new(|| (), |_| get_session_context());

    view! {
        <header class="header">
            <div class="header-left">
                <a href="/" class="logo">"PLMS"</a>
                <nav>
                    <a href="/apply-loan">"Apply"</a>
                    <a href="/pay-emi">"Pay EMI"</a>
                    <a href="/upload-documents">"Documents"</a>
                </nav>
            </div>
            <div class="header-right">
                <Suspense fallback=move || view! { <span>"Loading..."</span> }>
                    {move || {
                        session.get().map(|result| match result {
                            Ok(context) if context.is_logged_in => {
                                let name = context.display_name().unwrap_or("Account").to_string();
                                view! { <span class="user-name">{name}</span> }.into_any()
                            }
                            _ => view! {
                                <a href="/login" class="login-button">"Log in"</a>
                            }.into_any(),
                        })
                    }}
                </Suspense>
            </div>
        </header>
    }
}
