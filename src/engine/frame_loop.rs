//! `requestAnimationFrame` tick source (wasm32 only)

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::TickSource;

struct LoopInner {
    running: bool,
    /// Pending request id, if a frame is scheduled
    handle: Option<i32>,
    on_frame: Option<Box<dyn FnMut(f64)>>,
    closure: Option<Closure<dyn FnMut(f64)>>,
}

impl Drop for LoopInner {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

/// Re-registers itself every display refresh while running.
///
/// Clones share one scheduler. The engine owns one clone as its
/// `TickSource`; the entry point keeps another to install the frame handler
/// once the engine exists.
#[derive(Clone)]
pub struct AnimationFrameLoop {
    inner: Rc<RefCell<LoopInner>>,
}

impl AnimationFrameLoop {
    pub fn new() -> Self {
        let inner = Rc::new(RefCell::new(LoopInner {
            running: false,
            handle: None,
            on_frame: None,
            closure: None,
        }));

        // The closure only holds a weak handle, so dropping the loop frees it
        let weak = Rc::downgrade(&inner);
        let closure = Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            if let Some(inner) = weak.upgrade() {
                run_frame(&inner, now);
            }
        });
        inner.borrow_mut().closure = Some(closure);

        Self { inner }
    }

    /// Install the per-frame handler (receives the frame timestamp in ms)
    pub fn set_handler(&self, handler: impl FnMut(f64) + 'static) {
        self.inner.borrow_mut().on_frame = Some(Box::new(handler));
    }
}

impl Default for AnimationFrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

fn run_frame(inner: &Rc<RefCell<LoopInner>>, now: f64) {
    // Take the handler out so it may call back into `stop`/`start`
    let handler = {
        let mut l = inner.borrow_mut();
        l.handle = None;
        if !l.running {
            return;
        }
        l.on_frame.take()
    };

    let Some(mut handler) = handler else {
        log::warn!("Animation frame fired with no handler installed");
        return;
    };
    handler(now);

    let mut l = inner.borrow_mut();
    if l.on_frame.is_none() {
        l.on_frame = Some(handler);
    }
    if l.running && l.handle.is_none() {
        schedule(&mut l);
    }
}

fn schedule(l: &mut LoopInner) {
    let Some(window) = web_sys::window() else {
        log::error!("No window; cannot schedule animation frames");
        l.running = false;
        return;
    };
    let Some(closure) = l.closure.as_ref() else {
        return;
    };
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => l.handle = Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {e:?}");
            l.running = false;
        }
    }
}

impl TickSource for AnimationFrameLoop {
    fn start(&mut self) {
        let mut l = self.inner.borrow_mut();
        l.running = true;
        if l.handle.is_none() {
            schedule(&mut l);
        }
    }

    fn stop(&mut self) {
        let mut l = self.inner.borrow_mut();
        l.running = false;
        if let (Some(id), Some(window)) = (l.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }

    fn is_running(&self) -> bool {
        self.inner.borrow().running
    }
}
