//! Browser entry point: binds page events to a [`SentimentController`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, KeyboardEvent};

use crate::api::FetchBackend;
use crate::config::ClientConfig;
use crate::controller::{KeyChord, Mode, Platform, SentimentController, Submission};
use crate::dom::{WebDocument, ids};
use crate::logging;

/// Body attribute overriding the backend origin.
const API_BASE_ATTR: &str = "data-api-base";
/// Body attribute overriding the batch size limit.
const MAX_BATCH_ATTR: &str = "data-max-batch-items";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(err) = logging::init_console() {
        web_sys::console::warn_1(&format!("Logging disabled: {err}").into());
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document available"))?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::<dyn FnMut()>::once(move || {
            if let Err(err) = mount() {
                tracing::error!("Failed to bind page: {err:?}");
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
        return Ok(());
    }
    mount()
}

fn mount() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document available"))?;
    let config = page_config(&document);
    let platform = window
        .navigator()
        .platform()
        .map(|raw| Platform::from_navigator(&raw))
        .unwrap_or(Platform::Other);

    let controller = SentimentController::new(WebDocument::new(window, document.clone()), &config)
        .with_platform(platform);
    let page = Page {
        controller: Rc::new(RefCell::new(controller)),
        backend: Rc::new(FetchBackend::new(&config)),
    };

    for mode in [Mode::Single, Mode::Batch] {
        match document.get_element_by_id(mode.input_id()) {
            Some(input) => page.bind_input(&input, mode)?,
            None => tracing::warn!("#{} missing; {mode:?} input not bound", mode.input_id()),
        }
        if let Some(button) = document.get_element_by_id(mode.submit_id()) {
            page.bind_submit(&button, mode)?;
        }
    }
    let buttons = document.get_elements_by_class_name(ids::TAB_BUTTON_CLASS);
    for idx in 0..buttons.length() {
        if let Some(button) = buttons.item(idx) {
            page.bind_tab(button)?;
        }
    }

    tracing::info!(
        "Sentiment page ready (batch limit {}, {:?})",
        config.max_batch_items,
        platform
    );
    Ok(())
}

fn page_config(document: &web_sys::Document) -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(body) = document.body() {
        if let Some(base) = body.get_attribute(API_BASE_ATTR) {
            config.base_url = base;
        }
        if let Some(limit) = body
            .get_attribute(MAX_BATCH_ATTR)
            .and_then(|raw| raw.trim().parse().ok())
        {
            config.max_batch_items = limit;
        }
    }
    config.normalized()
}

#[derive(Clone)]
struct Page {
    controller: Rc<RefCell<SentimentController<WebDocument>>>,
    backend: Rc<FetchBackend>,
}

impl Page {
    fn bind_input(&self, input: &Element, mode: Mode) -> Result<(), JsValue> {
        let page = self.clone();
        let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let chord = KeyChord {
                key: event.key(),
                ctrl: event.ctrl_key(),
                meta: event.meta_key(),
            };
            let submission = page.controller.borrow_mut().handle_keydown(mode, &chord);
            if let Some(submission) = submission {
                event.prevent_default();
                page.dispatch(submission);
            }
        });
        input.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
        on_keydown.forget();

        let page = self.clone();
        let on_focus = Closure::<dyn FnMut()>::new(move || {
            page.controller.borrow_mut().handle_focus(mode);
        });
        input.add_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref())?;
        on_focus.forget();
        Ok(())
    }

    fn bind_submit(&self, button: &Element, mode: Mode) -> Result<(), JsValue> {
        let page = self.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            let submission = page.controller.borrow_mut().submit(mode);
            if let Some(submission) = submission {
                page.dispatch(submission);
            }
        });
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        Ok(())
    }

    fn bind_tab(&self, button: Element) -> Result<(), JsValue> {
        let page = self.clone();
        let target = button.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            if !page.controller.borrow_mut().click_tab_button(&target) {
                tracing::debug!("Tab button without {} clicked", ids::TAB_TARGET_ATTR);
            }
        });
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        Ok(())
    }

    /// Run the request off the event handler; the controller is only borrowed again once
    /// the response is in.
    fn dispatch(&self, submission: Submission) {
        let page = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match submission {
                Submission::Single(job) => {
                    let outcome = page.backend.analyze(&job.request).await;
                    page.controller.borrow_mut().finish_single(job.ticket, outcome);
                }
                Submission::Batch(job) => {
                    let outcome = page.backend.batch_analyze(&job.request).await;
                    page.controller.borrow_mut().finish_batch(job.ticket, outcome);
                }
            }
        });
    }
}
