//! Frame scheduling and platform signals.
//!
//! The animator never talks to the display directly: it is handed a
//! [`FrameScheduler`] that queues a callback for the next repaint and a
//! [`MotionPreference`] that reports the user's reduced-motion setting.
//! Hosts that own their own render loop drive a [`ManualFrameScheduler`];
//! web builds get bindings to `requestAnimationFrame` / `matchMedia`
//! behind the `web` feature.

use std::cell::RefCell;

/// Queues callbacks to run once before the next repaint.
///
/// Implementations invoke each queued callback exactly once,
/// asynchronously with respect to `request_frame`, passing a timestamp
/// in milliseconds. Timestamps must be non-decreasing across frames;
/// their origin is otherwise unspecified (a timestamp of `0.0` is valid).
/// No per-callback cancellation is offered; the animator governs its own
/// lifetime through its run-state instead.
pub trait FrameScheduler {
    /// Queue `callback` for the next display-refresh opportunity.
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>);
}

/// Reports whether the user prefers reduced motion.
///
/// Queried once per animation, when it is started, never per frame.
pub trait MotionPreference {
    /// True when a reduced-motion preference is currently active.
    fn prefers_reduced_motion(&self) -> bool;
}

/// A [`FrameScheduler`] ticked explicitly by the host.
///
/// `request_frame` queues callbacks; [`run_frame`](Self::run_frame)
/// delivers one frame to everything queued before the call. Callbacks
/// that re-queue during the frame (as a running animation does) land in
/// the next frame's batch, never the current one.
///
/// This is the embedding path for hosts with their own render loop, and
/// doubles as a deterministic driver for tests: feed it whatever
/// timestamps the scenario calls for.
///
/// ## Example
///
/// ```rust
/// use tween_driver::{FrameScheduler, ManualFrameScheduler};
///
/// let scheduler = ManualFrameScheduler::new();
/// scheduler.request_frame(Box::new(|ts| assert_eq!(ts, 16.7)));
/// assert_eq!(scheduler.pending(), 1);
/// scheduler.run_frame(16.7);
/// assert_eq!(scheduler.pending(), 0);
/// ```
#[derive(Default)]
pub struct ManualFrameScheduler {
    queue: RefCell<Vec<Box<dyn FnOnce(f64)>>>,
}

impl ManualFrameScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Deliver one frame at `timestamp_ms` to every queued callback.
    ///
    /// Returns the number of callbacks invoked.
    pub fn run_frame(&self, timestamp_ms: f64) -> usize {
        let callbacks = self.queue.take();
        let count = callbacks.len();
        for callback in callbacks {
            callback(timestamp_ms);
        }
        count
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) {
        self.queue.borrow_mut().push(callback);
    }
}

/// A [`MotionPreference`] with a constant answer.
///
/// `FixedMotionPreference(true)` reports an active reduced-motion
/// preference; `FixedMotionPreference(false)` reports none. Use it for
/// hosts without a platform signal, or to pin the preference in tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedMotionPreference(pub bool);

impl MotionPreference for FixedMotionPreference {
    fn prefers_reduced_motion(&self) -> bool {
        self.0
    }
}

/// Web-specific scheduling implementation.
#[cfg(feature = "web")]
pub mod web {
    use super::{FrameScheduler, MotionPreference};
    use crate::Animator;
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::Window;

    /// A [`FrameScheduler`] backed by `window.requestAnimationFrame`.
    pub struct WindowFrameScheduler {
        window: Window,
    }

    impl WindowFrameScheduler {
        /// Bind to the current browser window.
        pub fn new() -> Result<Self, String> {
            let window = web_sys::window().ok_or("No window available")?;
            Ok(Self { window })
        }
    }

    impl FrameScheduler for WindowFrameScheduler {
        fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) {
            let closure = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
            let func: &js_sys::Function = closure.unchecked_ref();
            // A failed request ends the frame chain; the animation stops advancing.
            let _ = self.window.request_animation_frame(func);
        }
    }

    /// A [`MotionPreference`] backed by
    /// `window.matchMedia("(prefers-reduced-motion)")`.
    pub struct WindowMotionPreference {
        window: Window,
    }

    impl WindowMotionPreference {
        /// Bind to the current browser window.
        pub fn new() -> Result<Self, String> {
            let window = web_sys::window().ok_or("No window available")?;
            Ok(Self { window })
        }
    }

    impl MotionPreference for WindowMotionPreference {
        fn prefers_reduced_motion(&self) -> bool {
            self.window
                .match_media("(prefers-reduced-motion)")
                .ok()
                .flatten()
                .map(|list| list.matches())
                .unwrap_or(false)
        }
    }

    /// Create an [`Animator`] driven by the browser's frame clock and
    /// reduced-motion media query.
    ///
    /// ## Example
    ///
    /// ```rust,ignore
    /// use tween_driver::{scheduler::web::window_animator, AnimationCallbacks, AnimationConfig};
    ///
    /// let animator = window_animator()?;
    /// let handle = animator.animate(
    ///     AnimationConfig { duration_ms: 300.0, ..Default::default() },
    ///     AnimationCallbacks::new().on_step(|p| set_opacity(p)),
    /// )?;
    /// ```
    pub fn window_animator() -> Result<Animator, String> {
        let scheduler = Rc::new(WindowFrameScheduler::new()?);
        let motion = Rc::new(WindowMotionPreference::new()?);
        Ok(Animator::new(scheduler, motion))
    }
}
