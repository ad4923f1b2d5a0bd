use std::cell::{Cell, RefCell};
use std::rc::Rc;

use stardrift::{Engine, EngineConfig, FrameStats, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, EventTarget, HtmlCanvasElement, Window};

use crate::canvas::CanvasSurface;

type SharedEngine = Rc<RefCell<Engine<CanvasSurface>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A registered DOM listener, kept so teardown can remove it.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut()>,
}

impl Listener {
    fn remove(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Wires an `Engine` to the browser: one `requestAnimationFrame` chain plus
/// resize and visibility listeners.
///
/// The frame closure holds a reference to its own slot so it can reschedule
/// itself; `teardown` empties the slot, which breaks the cycle.
pub struct BackdropRunner {
    engine: SharedEngine,
    frame: FrameCallback,
    frame_handle: Rc<Cell<Option<i32>>>,
    listeners: Vec<Listener>,
}

impl BackdropRunner {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: Rc::new(RefCell::new(Engine::new(config))),
            frame: Rc::new(RefCell::new(None)),
            frame_handle: Rc::new(Cell::new(None)),
            listeners: Vec::new(),
        }
    }

    /// Start drawing onto `canvas`. Any failure leaves the runner idle.
    pub fn mount(&mut self, canvas: HtmlCanvasElement) {
        if self.engine.borrow().is_running() {
            self.teardown();
        }
        let Some(window) = web_sys::window() else {
            log::warn!("no window, backdrop not started");
            return;
        };
        let surface = match CanvasSurface::new(canvas) {
            Ok(surface) => Some(surface),
            Err(err) => {
                log::warn!("{}", err);
                None
            }
        };
        if !self.engine.borrow_mut().mount(surface, viewport_of(&window)) {
            return;
        }
        let document = window.document();
        if let Some(document) = &document {
            self.engine.borrow_mut().set_hidden(document.hidden());
        }

        let result = self
            .listen_resize(&window)
            .and_then(|_| match &document {
                Some(document) => self.listen_visibility(document),
                None => Ok(()),
            })
            .and_then(|_| self.start_loop(&window));
        if let Err(err) = result {
            log::warn!("backdrop setup failed: {:?}", err);
            self.teardown();
        }
    }

    pub fn activate(&self, active: bool) {
        self.engine.borrow_mut().activate(active);
    }

    /// Cancel the pending frame, remove listeners and drop all engine state.
    pub fn teardown(&mut self) {
        if let Some(id) = self.frame_handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.frame.borrow_mut().take();
        for listener in self.listeners.drain(..) {
            listener.remove();
        }
        self.engine.borrow_mut().teardown();
    }

    pub fn is_running(&self) -> bool {
        self.engine.borrow().is_running()
    }

    pub fn stats(&self) -> FrameStats {
        self.engine.borrow().stats()
    }

    fn listen_resize(&mut self, window: &Window) -> Result<(), JsValue> {
        let engine = self.engine.clone();
        let win = window.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            engine.borrow_mut().notify_resize(viewport_of(&win), now_ms(&win));
        });
        self.add_listener(window.clone().into(), "resize", callback)
    }

    fn listen_visibility(&mut self, document: &Document) -> Result<(), JsValue> {
        let engine = self.engine.clone();
        let doc = document.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            engine.borrow_mut().set_hidden(doc.hidden());
        });
        self.add_listener(document.clone().into(), "visibilitychange", callback)
    }

    fn add_listener(
        &mut self,
        target: EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut()>,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener { target, event, callback });
        Ok(())
    }

    fn start_loop(&mut self, window: &Window) -> Result<(), JsValue> {
        let engine = self.engine.clone();
        let slot = self.frame.clone();
        let handle = self.frame_handle.clone();
        let win = window.clone();
        *self.frame.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            handle.set(None);
            if !engine.borrow_mut().frame(now).reschedule() {
                return;
            }
            if let Some(callback) = slot.borrow().as_ref() {
                match win.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(id) => handle.set(Some(id)),
                    Err(err) => log::warn!("requestAnimationFrame failed: {:?}", err),
                }
            }
        }));

        let id = match self.frame.borrow().as_ref() {
            Some(callback) => window.request_animation_frame(callback.as_ref().unchecked_ref())?,
            None => return Ok(()),
        };
        self.frame_handle.set(Some(id));
        Ok(())
    }
}

impl Drop for BackdropRunner {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn viewport_of(window: &Window) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Viewport::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
        window.device_pixel_ratio() as f32,
    )
}

fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}
