//! Browser side of the checkout: script injection and the checkout dialog.
//!
//! Only the hydrated client can load the SDK. During server rendering the
//! loader reports failure and the dialog cannot be opened.

use plms_payment::{CheckoutOptions, PaymentConfirmation};

/// Global the checkout script defines once loaded.
#[cfg(feature = "hydrate")]
const CHECKOUT_GLOBAL: &str = "Razorpay";

#[cfg(feature = "hydrate")]
mod sdk {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_name = Razorpay)]
        pub type Checkout;

        #[wasm_bindgen(constructor, js_class = "Razorpay", catch)]
        pub fn new(options: &JsValue) -> Result<Checkout, JsValue>;

        #[wasm_bindgen(method)]
        pub fn open(this: &Checkout);
    }
}

/// Injects the checkout script into the page.
///
/// Resolves to `true` once the script has loaded (or was already present) and
/// to `false` if it failed to load.
#[cfg(feature = "hydrate")]
pub async fn load_payment_sdk(script_url: &str) -> bool {
    use futures::channel::oneshot;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::{JsCast, JsValue, closure::Closure};

    let global = js_sys::global();
    if js_sys::Reflect::has(&global, &JsValue::from_str(CHECKOUT_GLOBAL)).unwrap_or(false) {
        return true;
    }

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return false;
    };
    let Some(script) = document
        .create_element("script")
        .ok()
        .and_then(|el| el.dyn_into::<web_sys::HtmlScriptElement>().ok())
    else {
        return false;
    };
    script.set_src(script_url);

    let (tx, rx) = oneshot::channel::<bool>();
    let tx = Rc::new(RefCell::new(Some(tx)));
    let settle = move |loaded: bool| {
        let tx = Rc::clone(&tx);
        Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(loaded);
            }
        })
    };
    let on_load = settle(true);
    let on_error = settle(false);
    script.set_onload(Some(on_load.as_ref().unchecked_ref()));
    script.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    let Some(body) = document.body() else {
        return false;
    };
    if body.append_child(&script).is_err() {
        return false;
    }

    // The closures must outlive the load event.
    let loaded = rx.await.unwrap_or(false);
    drop((on_load, on_error));
    loaded
}

#[cfg(not(feature = "hydrate"))]
pub async fn load_payment_sdk(_script_url: &str) -> bool {
    false
}

/// Opens the checkout dialog.
///
/// `on_complete` receives the confirmation the checkout hands back, or an
/// error if it could not be read. `on_dismiss` runs when the user closes the
/// dialog without paying.
///
/// # Errors
///
/// Returns a message if the SDK is not loaded or rejects the options.
#[cfg(feature = "hydrate")]
pub fn open_checkout(
    options: &CheckoutOptions,
    on_complete: impl FnOnce(Result<PaymentConfirmation, String>) + 'static,
    on_dismiss: impl FnOnce() + 'static,
) -> Result<(), String> {
    use wasm_bindgen::{JsValue, closure::Closure};

    let json = serde_json::to_string(options).map_err(|e| e.to_string())?;
    let js_options =
        js_sys::JSON::parse(&json).map_err(|_| "Invalid checkout options".to_string())?;

    let handler = Closure::once_into_js(move |response: JsValue| {
        let confirmation = js_sys::JSON::stringify(&response)
            .ok()
            .and_then(|s| s.as_string())
            .ok_or_else(|| "Unreadable checkout response".to_string())
            .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()));
        on_complete(confirmation);
    });
    let modal = js_sys::Object::new();
    let set = |target: &JsValue, key: &str, value: &JsValue| {
        js_sys::Reflect::set(target, &JsValue::from_str(key), value)
            .map(|_| ())
            .map_err(|_| format!("Cannot set checkout option '{key}'"))
    };
    set(&modal, "ondismiss", &Closure::once_into_js(on_dismiss))?;
    set(&js_options, "handler", &handler)?;
    set(&js_options, "modal", &modal)?;

    let checkout =
        sdk::Checkout::new(&js_options).map_err(|_| "Payment SDK not available".to_string())?;
    checkout.open();
    Ok(())
}

#[cfg(not(feature = "hydrate"))]
pub fn open_checkout(
    _options: &CheckoutOptions,
    _on_complete: impl FnOnce(Result<PaymentConfirmation, String>) + 'static,
    _on_dismiss: impl FnOnce() + 'static,
) -> Result<(), String> {
    Err("Payment SDK not available".to_string())
}

#[cfg(all(test, not(feature = "hydrate")))]
mod tests {
    use super::*;

    #[test]
    fn checkout_cannot_open_outside_the_browser() {
        let options: CheckoutOptions = serde_json::from_value(serde_json::json!({
            "key": "rzp_test_1",
            "amount": 1_250_000,
            "currency": "INR",
            "name": "PLMS",
            "description": "EMI repayment 42",
            "order_id": "order_1",
            "theme": { "color": "#1a73e8" },
        }))
        .expect("options");

        let err = open_checkout(&options, |_| {}, || {}).unwrap_err();
        assert_eq!(err, "Payment SDK not available");
    }
}
