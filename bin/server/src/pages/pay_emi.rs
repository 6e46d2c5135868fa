//! EMI payment page.
//!
//! Creates a checkout order for a repayment, loads the checkout SDK, opens the
//! checkout and verifies the result with the backend.

pub mod checkout;
pub mod server;

use crate::error::user_message;
use crate::types::RepaymentReceipt;
use checkout::{load_payment_sdk, open_checkout};
use leptos::prelude::*;
use leptos::task::spawn_local;
use server::{create_payment_order, verify_repayment};

/// Where the payment flow currently stands.
#[derive(Clone, Debug, PartialEq, Eq)]
enum PaymentStatus {
    Idle,
    Working(&'static str),
    AwaitingCheckout,
    Paid(RepaymentReceipt),
    Failed(String),
}

impl PaymentStatus {
    fn is_busy(&self) -> bool {
        matches!(self, Self::Working(_) | Self::AwaitingCheckout)
    }
}

/// The EMI payment page component.
#[component]
pub fn PayEmiPage() -> impl IntoView {
    let (repayment_id, set_repayment_id) = signal(String::new());
    let (status, set_status) = signal(PaymentStatus::Idle);

    let on_pay = move |_| {
        let id = repayment_id.get_untracked().trim().to_string();
        if id.is_empty() {
            set_status.set(PaymentStatus::Failed(
                "Please enter a repayment ID".to_string(),
            ));
            return;
        }
        if status.get_untracked().is_busy() {
            return;
        }

        set_status.set(PaymentStatus::Working("Creating payment order..."));
        spawn_local(async move {
            let session = match create_payment_order(id).await {
                Ok(session) => session,
                Err(e) => {
                    set_status.set(PaymentStatus::Failed(user_message(&e)));
                    return;
                }
            };

            set_status.set(PaymentStatus::Working("Loading payment gateway..."));
            if !load_payment_sdk(&session.script_url).await {
                set_status.set(PaymentStatus::Failed(
                    "Failed to load the payment gateway. Please check your connection.".to_string(),
                ));
                return;
            }

            let repayment_id = session.repayment_id.clone();
            let opened = open_checkout(
                &session.options,
                move |confirmation| {
                    let confirmation = match confirmation {
                        Ok(confirmation) => confirmation,
                        Err(e) => {
                            set_status.set(PaymentStatus::Failed(e));
                            return;
                        }
                    };
                    set_status.set(PaymentStatus::Working("Verifying payment..."));
                    spawn_local(async move {
                        let result = verify_repayment(
                            repayment_id,
                            confirmation.order_id,
                            confirmation.payment_id,
                            confirmation.signature,
                        )
                        .await;
                        set_status.set(match result {
                            Ok(receipt) => PaymentStatus::Paid(receipt),
                            Err(e) => PaymentStatus::Failed(user_message(&e)),
                        });
                    });
                },
                move || set_status.set(PaymentStatus::Failed("Payment cancelled".to_string())),
            );
            match opened {
                Ok(()) => set_status.set(PaymentStatus::AwaitingCheckout),
                Err(e) => set_status.set(PaymentStatus::Failed(e)),
            }
        });
    };

    view! {
        <div class="pay-emi-page">
            <h1>"Pay EMI"</h1>
            <p>"Enter the repayment ID from your loan dashboard to pay your EMI online."</p>
            <div class="form-row">
                <label for="repayment-id">"Repayment ID"</label>
                <input
                    id="repayment-id"
                    type="text"
                    prop:value=move || repayment_id.get()
                    on:input=move |ev| set_repayment_id.set(event_target_value(&ev))
                />
                <button
                    class="cta-button"
                    disabled=move || status.get().is_busy()
                    on:click=on_pay
                >
                    "Pay Now"
                </button>
            </div>
            {move || match status.get() {
                PaymentStatus::Idle => view! { <span></span> }.into_any(),
                PaymentStatus::Working(step) => view! {
                    <p class="status working">{step}</p>
                }.into_any(),
                PaymentStatus::AwaitingCheckout => view! {
                    <p class="status working">"Complete the payment in the checkout window."</p>
                }.into_any(),
                PaymentStatus::Paid(receipt) => view! {
                    <div class="status success">
                        <p>{format!("✅ {}", receipt.message)}</p>
                        <p>{format!("Repayment {} · Payment {}", receipt.repayment_id, receipt.payment_id)}</p>
                    </div>
                }.into_any(),
                PaymentStatus::Failed(message) => view! {
                    <p class="status error">{format!("❌ {}", message)}</p>
                }.into_any(),
            }}
        </div>
    }
}
