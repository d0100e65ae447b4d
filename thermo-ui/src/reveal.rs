#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::{Array, Reflect};
use thermo_core::{
    marker_value, InstanceReading, RevealAction, RevealController, RevealState,
    VISIBILITY_THRESHOLD,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    console, Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

const ROOT_SELECTOR: &str = ".thermo";
const FILL_SELECTOR: &str = ".thermo-fill";
const MARKER_SELECTOR: &str = ".thermo-marker";
const MARKER_LABEL_SELECTOR: &str = ".thermo-marker-label";
const STATE_ATTRIBUTE: &str = "data-thermo-state";

thread_local! {
    static RUNTIME: RefCell<Option<Rc<RevealRuntime>>> = RefCell::new(None);
}

/// Chạy lần quét đầu khi DOM sẵn sàng.
pub fn init_when_ready() -> Result<(), JsValue> {
    let runtime = runtime()?;
    if runtime.document.ready_state() == "loading" {
        let callback = Closure::once_into_js(|| {
            if let Err(err) = scan() {
                console::error_1(&err);
            }
        });
        runtime
            .document
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
        return Ok(());
    }
    runtime.scan()
}

/// Ghi nhận mọi `.thermo` chưa được xử lý trong document.
pub fn scan() -> Result<(), JsValue> {
    runtime()?.scan()
}

fn runtime() -> Result<Rc<RevealRuntime>, JsValue> {
    RUNTIME.with(|slot| {
        if let Some(existing) = slot.borrow().as_ref() {
            return Ok(existing.clone());
        }
        let created = RevealRuntime::create()?;
        *slot.borrow_mut() = Some(created.clone());
        Ok(created)
    })
}

/// Host của `RevealController`: thực thi lệnh bằng IntersectionObserver và requestAnimationFrame.
struct RevealRuntime {
    window: Window,
    document: Document,
    controller: RefCell<RevealController>,
    observer: RefCell<Option<IntersectionObserver>>,
    auto_ids: Cell<u32>,
}

impl RevealRuntime {
    fn create() -> Result<Rc<Self>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;
        let supported = Reflect::has(&window, &JsValue::from_str("IntersectionObserver"))?;

        let runtime = Rc::new(Self {
            window,
            document,
            controller: RefCell::new(RevealController::new(supported)),
            observer: RefCell::new(None),
            auto_ids: Cell::new(0),
        });

        if supported {
            let observer = runtime.create_observer()?;
            *runtime.observer.borrow_mut() = Some(observer);
        } else {
            console::warn_1(&JsValue::from_str(
                "IntersectionObserver không khả dụng, hiển thị ngay",
            ));
        }

        Ok(runtime)
    }

    fn create_observer(self: &Rc<Self>) -> Result<IntersectionObserver, JsValue> {
        let runtime = Rc::downgrade(self);
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let Some(runtime) = runtime.upgrade() else {
                    return;
                };
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let key = entry.target().id();
                    let actions = runtime
                        .controller
                        .borrow_mut()
                        .on_visibility(&key, entry.intersection_ratio());
                    if let Err(err) = runtime.apply(&actions) {
                        console::error_1(&err);
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        callback.forget();
        Ok(observer)
    }

    fn scan(&self) -> Result<(), JsValue> {
        let roots = self.document.query_selector_all(ROOT_SELECTOR)?;
        for index in 0..roots.length() {
            let Some(root) = roots.item(index).and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            if root.has_attribute(STATE_ATTRIBUTE) {
                continue;
            }

            let key = self.ensure_key(&root);
            let reading = InstanceReading::from_attributes(
                root.get_attribute("data-percent").as_deref(),
                root.get_attribute("data-current").as_deref(),
                root.get_attribute("data-target").as_deref(),
            );
            let markers = marker_values(&root)?;

            let actions = self.controller.borrow_mut().discover(key, reading, &markers);
            self.apply(&actions)?;
        }
        Ok(())
    }

    fn apply(&self, actions: &[RevealAction]) -> Result<(), JsValue> {
        for action in actions {
            match action {
                RevealAction::Observe { key } => {
                    if let (Some(observer), Some(root)) =
                        (self.observer.borrow().as_ref(), self.element(key))
                    {
                        observer.observe(&root);
                    }
                }
                RevealAction::Unobserve { key } => {
                    if let (Some(observer), Some(root)) =
                        (self.observer.borrow().as_ref(), self.element(key))
                    {
                        observer.unobserve(&root);
                    }
                }
                RevealAction::AnimateFill { key, percent } => self.animate_fill(key, *percent)?,
                RevealAction::SetMarkerMet { key, index, met } => {
                    self.set_marker_met(key, *index, *met)?
                }
            }
            self.reflect_state(action.key())?;
        }
        Ok(())
    }

    fn animate_fill(&self, key: &str, percent: f64) -> Result<(), JsValue> {
        let Some(root) = self.element(key) else {
            return Ok(());
        };
        let Some(fill) = root.query_selector(FILL_SELECTOR)? else {
            return Ok(());
        };
        let fill: HtmlElement = fill.dyn_into()?;

        // Đợi frame kế tiếp để width 0% được vẽ trước, transition mới chạy.
        let width = format!("{percent}%");
        let frame = Closure::once_into_js(move || {
            if let Err(err) = fill.style().set_property("width", &width) {
                console::error_1(&err);
            }
        });
        self.window.request_animation_frame(frame.unchecked_ref())?;
        Ok(())
    }

    fn set_marker_met(&self, key: &str, index: usize, met: bool) -> Result<(), JsValue> {
        let Some(root) = self.element(key) else {
            return Ok(());
        };
        let markers = root.query_selector_all(MARKER_SELECTOR)?;
        if let Some(marker) = markers
            .item(index as u32)
            .and_then(|node| node.dyn_into::<Element>().ok())
        {
            marker.class_list().toggle_with_force("met", met)?;
        }
        Ok(())
    }

    fn reflect_state(&self, key: &str) -> Result<(), JsValue> {
        let state = self.controller.borrow().state(key);
        if let (Some(state), Some(root)) = (state, self.element(key)) {
            root.set_attribute(STATE_ATTRIBUTE, state_name(state))?;
        }
        Ok(())
    }

    /// Id của root làm khóa; cấp id mới nếu rỗng hoặc đang trùng với phần tử khác.
    fn ensure_key(&self, root: &Element) -> String {
        let id = root.id();
        if !id.is_empty() && self.resolves_to(&id, root) {
            return id;
        }
        loop {
            let next = self.auto_ids.get() + 1;
            self.auto_ids.set(next);
            let id = format!("thermo-auto-{next}");
            if self.element(&id).is_none() {
                root.set_id(&id);
                return id;
            }
        }
    }

    fn resolves_to(&self, id: &str, root: &Element) -> bool {
        self.element(id)
            .map_or(false, |found| found.is_same_node(Some(&**root)))
    }

    fn element(&self, key: &str) -> Option<Element> {
        self.document.get_element_by_id(key)
    }
}

fn marker_values(root: &Element) -> Result<Vec<f64>, JsValue> {
    let markers = root.query_selector_all(MARKER_SELECTOR)?;
    let mut values = Vec::with_capacity(markers.length() as usize);
    for index in 0..markers.length() {
        let Some(marker) = markers.item(index).and_then(|node| node.dyn_into::<Element>().ok())
        else {
            values.push(0.0);
            continue;
        };
        let label = marker
            .query_selector(MARKER_LABEL_SELECTOR)?
            .and_then(|label| label.text_content());
        values.push(marker_value(
            marker.get_attribute("data-value").as_deref(),
            label.as_deref(),
        ));
    }
    Ok(values)
}

fn state_name(state: RevealState) -> &'static str {
    match state {
        RevealState::Pending => "pending",
        RevealState::Observing => "observing",
        RevealState::Animated => "animated",
    }
}
