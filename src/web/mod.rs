//! Browser adapter: wires the coordinator to `web-sys` observers, media
//! queries and timers.
//!
//! JavaScript calls `initAnimateOnScroll(optionsJson?)` once per page. The
//! coordinator, its observers and their callbacks then live until the page
//! unloads; nothing is torn down explicitly.

mod host;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub use host::WebHost;
use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, IntersectionObserver,
    IntersectionObserverEntry, MediaQueryListEvent, MutationObserver, Window,
};
use web_time::Instant;

use crate::coordinator::{Coordinator, Event, Status};
use crate::error::RevealError;
use crate::host::Capabilities;
use crate::options::Options;

/// Entry point exposed to JavaScript.
///
/// `options_json` is an optional partial [`Options`] document.
///
/// # Errors
///
/// Throws a string describing a malformed options document or a failed
/// browser API call.
#[wasm_bindgen(js_name = initAnimateOnScroll)]
pub fn init_animate_on_scroll(
    options_json: Option<String>,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Another module may already have installed a logger.
    let _ = console_log::init_with_level(log::Level::Info);

    let options = match options_json {
        Some(json) => Options::from_json(&json),
        None => Ok(Options::default()),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let status =
        install(options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::debug!("Scroll reveal installed: {status:?}");
    Ok(())
}

/// Probe the browser once for the observer APIs the coordinator needs.
#[must_use]
pub fn detect_capabilities(window: &Window) -> Capabilities {
    // Safari < 14 exposes MediaQueryList without EventTarget methods.
    let media_change = Reflect::get(window, &JsValue::from_str("MediaQueryList"))
        .and_then(|ctor| Reflect::get(&ctor, &JsValue::from_str("prototype")))
        .is_ok_and(|proto| {
            !proto.is_undefined() && has_property(&proto, "addEventListener")
        });
    Capabilities {
        intersection: has_property(window, "IntersectionObserver"),
        mutation: has_property(window, "MutationObserver"),
        media_change,
    }
}

fn has_property(target: &JsValue, name: &str) -> bool {
    Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

/// Build the coordinator against the current page and hook it up to the
/// browser. Returns the startup outcome.
///
/// # Errors
///
/// [`RevealError::Host`] if the page has no window, document or body, or
/// the browser refuses to construct an observer or register a listener.
pub fn install(options: Options) -> Result<Status, RevealError> {
    let window = web_sys::window()
        .ok_or_else(|| RevealError::Host("no global window".to_owned()))?;
    let document = window
        .document()
        .ok_or_else(|| RevealError::Host("no document".to_owned()))?;
    let body = document
        .body()
        .ok_or_else(|| RevealError::Host("document has no body".to_owned()))?;
    let capabilities = detect_capabilities(&window);

    let runtime = Rc::new(Runtime {
        window: window.clone(),
        coordinator: RefCell::new(None),
        timer: Cell::new(None),
        tick: RefCell::new(None),
    });

    let intersection = if capabilities.intersection {
        Some(intersection_observer(&runtime)?)
    } else {
        None
    };
    let mutation = if capabilities.mutation {
        Some(mutation_observer(&runtime)?)
    } else {
        None
    };
    let on_timer = {
        let rt = Rc::clone(&runtime);
        Closure::<dyn FnMut()>::new(move || rt.on_timer())
    };
    *runtime.tick.borrow_mut() = Some(on_timer);

    let host = WebHost {
        window: window.clone(),
        document: document.clone(),
        body,
        intersection,
        mutation,
    };
    let coordinator = Coordinator::start(host, options, capabilities);
    let status = coordinator.status();
    let listen_width = coordinator.listens_for_width();
    let min_width = coordinator.min_width();
    *runtime.coordinator.borrow_mut() = Some(coordinator);

    if status != Status::Active {
        return Ok(status);
    }
    if listen_width {
        listen_for_width(&runtime, &window, min_width);
    }
    if document.ready_state() == "loading" {
        let rt = Rc::clone(&runtime);
        let on_loaded = Closure::<dyn FnMut()>::new(move || {
            rt.dispatch([Event::Loaded]);
        });
        document
            .add_event_listener_with_callback(
                "DOMContentLoaded",
                on_loaded.as_ref().unchecked_ref(),
            )
            .map_err(|e| host_error(&e))?;
        on_loaded.forget();
    } else {
        runtime.dispatch([Event::Loaded]);
    }
    Ok(status)
}

fn host_error(e: &JsValue) -> RevealError {
    RevealError::Host(format!("{e:?}"))
}

fn intersection_observer(
    runtime: &Rc<Runtime>,
) -> Result<IntersectionObserver, RevealError> {
    let rt = Rc::clone(runtime);
    let on_entries =
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                rt.dispatch(entries.iter().map(|entry| {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        Event::Visible(entry.target())
                    } else {
                        Event::Hidden(entry.target())
                    }
                }));
            },
        );
    let observer =
        IntersectionObserver::new(on_entries.as_ref().unchecked_ref())
            .map_err(|e| host_error(&e))?;
    on_entries.forget();
    Ok(observer)
}

fn mutation_observer(
    runtime: &Rc<Runtime>,
) -> Result<MutationObserver, RevealError> {
    let rt = Rc::clone(runtime);
    let on_records = Closure::<dyn FnMut(Array, MutationObserver)>::new(
        move |_records: Array, _observer: MutationObserver| {
            rt.dispatch([Event::Mutated]);
        },
    );
    let observer = MutationObserver::new(on_records.as_ref().unchecked_ref())
        .map_err(|e| host_error(&e))?;
    on_records.forget();
    Ok(observer)
}

/// Register the media-query change listener. Failure is expected on
/// legacy engines and leaves the page in its startup state.
fn listen_for_width(runtime: &Rc<Runtime>, window: &Window, min_width: u32) {
    let mq = match window.match_media(&host::min_width_query(min_width)) {
        Ok(Some(mq)) => mq,
        Ok(None) | Err(_) => {
            log::debug!("matchMedia unavailable; width changes ignored");
            return;
        }
    };
    let rt = Rc::clone(runtime);
    let on_change = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
        move |evt: MediaQueryListEvent| {
            rt.dispatch([Event::WidthChanged {
                matches: evt.matches(),
            }]);
        },
    );
    match mq.add_event_listener_with_callback(
        "change",
        on_change.as_ref().unchecked_ref(),
    ) {
        Ok(()) => on_change.forget(),
        Err(e) => log::debug!("Media query change listener rejected: {e:?}"),
    }
}

/// Shared state behind every browser callback.
///
/// Callbacks hold strong references and are never dropped, so the runtime
/// lives as long as the page.
struct Runtime {
    window: Window,
    coordinator: RefCell<Option<Coordinator<WebHost>>>,
    /// Handle of the armed `setTimeout`, if any.
    timer: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Runtime {
    /// Feed a batch of events, then re-arm the timer.
    fn dispatch(&self, events: impl IntoIterator<Item = Event<Element>>) {
        let now = Instant::now();
        if let Some(coordinator) = self.coordinator.borrow_mut().as_mut() {
            for event in events {
                coordinator.handle(event, now);
            }
        }
        self.rearm();
    }

    fn on_timer(&self) {
        self.timer.set(None);
        if let Some(coordinator) = self.coordinator.borrow_mut().as_mut() {
            let report = coordinator.tick(Instant::now());
            if report.prepared > 0 {
                log::debug!("Rescan prepared {} element(s)", report.prepared);
            }
        }
        self.rearm();
    }

    /// Replace any armed timer with one for the coordinator's next
    /// deadline.
    fn rearm(&self) {
        if let Some(handle) = self.timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        let deadline = self
            .coordinator
            .borrow()
            .as_ref()
            .and_then(Coordinator::next_deadline);
        let Some(deadline) = deadline else {
            return;
        };
        let delay_ms = i32::try_from(
            deadline.saturating_duration_since(Instant::now()).as_millis(),
        )
        .unwrap_or(i32::MAX);
        let tick = self.tick.borrow();
        let Some(tick) = tick.as_ref() else {
            return;
        };
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                delay_ms,
            ) {
            Ok(handle) => self.timer.set(Some(handle)),
            Err(e) => log::error!("setTimeout failed: {e:?}"),
        }
    }
}
