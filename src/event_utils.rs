use leptos::ev::EventDescriptor;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event};

#[derive(Clone, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
    pub once: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self { passive: true, capture: false, once: false }
    }
}

/// Handle owning a window-level listener. Removal is explicit during chart
/// teardown; dropping an un-removed handle also detaches the callback so a
/// leaked handle can never keep firing into a disposed chart.
pub struct WindowEventListenerHandle {
    event_name: String,
    callback: Option<Closure<dyn FnMut(Event)>>,
    capture: bool,
}

impl WindowEventListenerHandle {
    pub fn remove(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(callback) = self.callback.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback_and_bool(
                    &self.event_name,
                    callback.as_ref().unchecked_ref(),
                    self.capture,
                );
            }
        }
    }
}

impl Drop for WindowEventListenerHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for WindowEventListenerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowEventListenerHandle")
            .field("event_name", &self.event_name)
            .field("capture", &self.capture)
            .finish()
    }
}

pub fn window_event_listener_with_options<E>(
    event: E,
    options: &EventOptions,
    mut cb: impl FnMut(E::EventType) + 'static,
) -> WindowEventListenerHandle
where
    E: EventDescriptor + 'static,
    E::EventType: JsCast,
{
    let opts = AddEventListenerOptions::new();
    opts.set_passive(options.passive);
    opts.set_capture(options.capture);
    opts.set_once(options.once);

    let event_name = event.name().into_owned();
    let callback = Closure::wrap(Box::new(move |ev: Event| {
        cb(ev.unchecked_into::<E::EventType>());
    }) as Box<dyn FnMut(Event)>);

    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            &event_name,
            callback.as_ref().unchecked_ref(),
            &opts,
        );
    }

    WindowEventListenerHandle { event_name, callback: Some(callback), capture: options.capture }
}

/// Window resize listener feeding the mounted chart controller.
///
/// Not debounced: spacing and layout recomputation are cheap enough to run
/// on every resize tick. The handle is owned by the controller and removed
/// as part of teardown.
pub fn listen_to_window_resize() -> WindowEventListenerHandle {
    window_event_listener_with_options(leptos::ev::resize, &EventOptions::default(), move |_| {
        let Some(width) = crate::app::chart_container_width() else {
            return;
        };
        crate::domain::chart::lifecycle::with_chart_controller(|controller| {
            controller.handle_resize(width);
        });
    })
}
