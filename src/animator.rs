//! Time-driven progress animator.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::{AnimationConfig, ConfigError, FrameScheduler, MotionPreference};

/// Lifecycle state of a single animation run.
///
/// NotStarted becomes Running on the first observed frame; Running
/// becomes Stopped when progress reaches 1, or Cancelled when a cancel
/// request is observed at a frame boundary. Stopped and Cancelled are
/// permanent and mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    NotStarted,
    Running,
    Stopped,
    Cancelled,
}

impl Phase {
    fn is_terminal(self) -> bool {
        matches!(self, Phase::Stopped | Phase::Cancelled)
    }
}

/// Lifecycle callbacks for one animation run.
///
/// Every callback defaults to a no-op. Build with the consuming setters:
///
/// ```rust
/// use tween_driver::AnimationCallbacks;
///
/// let callbacks = AnimationCallbacks::new()
///     .on_step(|progress| println!("opacity = {progress}"))
///     .on_stop(|| println!("done"));
/// ```
///
/// Ordering per run: `on_start` fires before any `on_step`; the terminal
/// `on_step(1.0)` fires before `on_stop`; `on_cancel` replaces `on_stop`
/// when the run is cancelled and the two never both fire. No callback
/// fires more than once, except `on_step` which fires at most once per
/// frame.
pub struct AnimationCallbacks {
    on_start: Option<Box<dyn FnOnce()>>,
    on_step: Box<dyn FnMut(f64)>,
    on_stop: Option<Box<dyn FnOnce()>>,
    on_cancel: Option<Box<dyn FnOnce()>>,
}

impl AnimationCallbacks {
    /// Create a callback set where every hook is a no-op.
    pub fn new() -> Self {
        Self {
            on_start: None,
            on_step: Box::new(|_| {}),
            on_stop: None,
            on_cancel: None,
        }
    }

    /// Invoked once, on the first scheduled frame, before the delay check.
    pub fn on_start(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_start = Some(Box::new(callback));
        self
    }

    /// Invoked with the eased progress, at most once per frame, only
    /// after the delay has elapsed. The final invocation passes exactly
    /// `1.0`; intermediate values may leave [0, 1] for overshooting
    /// curves.
    pub fn on_step(mut self, callback: impl FnMut(f64) + 'static) -> Self {
        self.on_step = Box::new(callback);
        self
    }

    /// Invoked once, on natural completion, right after the terminal
    /// `on_step(1.0)`.
    pub fn on_stop(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_stop = Some(Box::new(callback));
        self
    }

    /// Invoked once, on the first frame after cancellation was requested.
    pub fn on_cancel(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_cancel = Some(Box::new(callback));
        self
    }
}

impl Default for AnimationCallbacks {
    fn default() -> Self {
        Self::new()
    }
}

/// Run-state shared between the frame chain and the control handle.
///
/// Owned by a single-threaded cooperative scheduler, so plain `Cell`s
/// suffice; callbacks sit in their own `RefCell` so a callback may use
/// the handle reentrantly without tripping a borrow.
struct Run {
    config: AnimationConfig,
    phase: Cell<Phase>,
    cancel_requested: Cell<bool>,
    start_timestamp: Cell<Option<f64>>,
    callbacks: RefCell<AnimationCallbacks>,
    scheduler: Rc<dyn FrameScheduler>,
}

impl Run {
    /// Queue the next frame-step. Each scheduled closure keeps the run
    /// alive; once a frame declines to reschedule, the run is dropped.
    fn schedule(this: &Rc<Self>) {
        let run = Rc::clone(this);
        this.scheduler
            .request_frame(Box::new(move |timestamp| Run::on_frame(&run, timestamp)));
    }

    /// One frame-step of the state machine.
    fn on_frame(this: &Rc<Self>, timestamp: f64) {
        if this.cancel_requested.get() {
            this.phase.set(Phase::Cancelled);
            let on_cancel = this.callbacks.borrow_mut().on_cancel.take();
            if let Some(callback) = on_cancel {
                callback();
            }
            return;
        }

        if this.start_timestamp.get().is_none() {
            this.phase.set(Phase::Running);
            this.start_timestamp.set(Some(timestamp));
            let on_start = this.callbacks.borrow_mut().on_start.take();
            if let Some(callback) = on_start {
                callback();
            }
        }

        let start = this.start_timestamp.get().unwrap_or(timestamp);
        let elapsed = timestamp - start;

        if elapsed > this.config.delay_ms {
            let since_delay = elapsed - this.config.delay_ms;
            let linear = since_delay / this.config.duration_ms;

            if linear >= 1.0 {
                // Terminal frame: the eased value is forced to exactly 1
                // regardless of curve shape or frame-timing jitter.
                this.phase.set(Phase::Stopped);
                let on_stop = {
                    let mut callbacks = this.callbacks.borrow_mut();
                    (callbacks.on_step)(1.0);
                    callbacks.on_stop.take()
                };
                if let Some(callback) = on_stop {
                    callback();
                }
                return;
            }

            let eased = this.config.easing.sample(linear);
            (this.callbacks.borrow_mut().on_step)(eased);
        }

        Self::schedule(this);
    }
}

/// Control handle for a running animation.
///
/// Clones observe and control the same run. After the run terminates the
/// handle stays valid for queries; `cancel` becomes a no-op.
#[derive(Clone)]
pub struct AnimationHandle {
    run: Rc<Run>,
}

impl AnimationHandle {
    /// Request cancellation.
    ///
    /// Takes effect at the next frame boundary: `on_cancel` fires on the
    /// next scheduled frame-step, never synchronously, so there is a
    /// latency of at most one frame. Idempotent, and a no-op once the
    /// run has stopped or been cancelled.
    pub fn cancel(&self) {
        if self.run.phase.get().is_terminal() {
            return;
        }
        self.run.cancel_requested.set(true);
    }

    /// True while the run is neither complete nor cancelled.
    ///
    /// Returns false as soon as [`cancel`](Self::cancel) is called, even
    /// though `on_cancel` has not fired yet.
    pub fn is_running(&self) -> bool {
        !self.run.phase.get().is_terminal() && !self.run.cancel_requested.get()
    }
}

/// Drives eased progress values through per-frame callbacks.
///
/// An `Animator` binds a [`FrameScheduler`] and a [`MotionPreference`]
/// once; each [`animate`](Self::animate) call starts an independent run
/// against them.
///
/// ## Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use tween_driver::{
///     AnimationCallbacks, AnimationConfig, Animator, FixedMotionPreference,
///     FrameScheduler, ManualFrameScheduler,
/// };
///
/// let scheduler = Rc::new(ManualFrameScheduler::new());
/// let scheduler_dyn: Rc<dyn FrameScheduler> = Rc::clone(&scheduler) as Rc<dyn FrameScheduler>;
/// let animator = Animator::new(scheduler_dyn, Rc::new(FixedMotionPreference(false)));
///
/// let steps = Rc::new(RefCell::new(Vec::new()));
/// let recorded = Rc::clone(&steps);
/// let handle = animator
///     .animate(
///         AnimationConfig { duration_ms: 100.0, ..Default::default() },
///         AnimationCallbacks::new().on_step(move |p| recorded.borrow_mut().push(p)),
///     )
///     .unwrap()
///     .expect("a non-zero duration yields a handle");
///
/// // The host delivers frame timestamps; 60fps, a raf loop, or a test
/// // script all look the same to the animator.
/// for timestamp in [0.0, 50.0, 100.0] {
///     scheduler.run_frame(timestamp);
/// }
///
/// assert_eq!(*steps.borrow(), vec![0.5, 1.0]);
/// assert!(!handle.is_running());
/// ```
#[derive(Clone)]
pub struct Animator {
    scheduler: Rc<dyn FrameScheduler>,
    motion: Rc<dyn MotionPreference>,
}

impl Animator {
    /// Create an animator bound to the given platform collaborators.
    pub fn new(scheduler: Rc<dyn FrameScheduler>, motion: Rc<dyn MotionPreference>) -> Self {
        Self { scheduler, motion }
    }

    /// Start one animation run.
    ///
    /// When `config.duration_ms` is zero, or the platform reports an
    /// active reduced-motion preference and the config respects it, the
    /// run completes synchronously before this returns: `on_start`,
    /// `on_step(1.0)`, `on_stop`, no frames scheduled, and `Ok(None)` —
    /// there is nothing left to cancel. The preference is consulted
    /// here, once, never per frame.
    ///
    /// Otherwise the first frame is scheduled and `Ok(Some(handle))` is
    /// returned. Callback panics are not caught; a panicking callback
    /// ends the frame chain because the rescheduling it would have
    /// performed never happens.
    pub fn animate(
        &self,
        config: AnimationConfig,
        mut callbacks: AnimationCallbacks,
    ) -> Result<Option<AnimationHandle>, ConfigError> {
        config.validate()?;

        if config.duration_ms == 0.0
            || (config.respect_reduced_motion && self.motion.prefers_reduced_motion())
        {
            if let Some(callback) = callbacks.on_start.take() {
                callback();
            }
            (callbacks.on_step)(1.0);
            if let Some(callback) = callbacks.on_stop.take() {
                callback();
            }
            return Ok(None);
        }

        let run = Rc::new(Run {
            config,
            phase: Cell::new(Phase::NotStarted),
            cancel_requested: Cell::new(false),
            start_timestamp: Cell::new(None),
            callbacks: RefCell::new(callbacks),
            scheduler: Rc::clone(&self.scheduler),
        });
        Run::schedule(&run);
        Ok(Some(AnimationHandle { run }))
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::{FixedMotionPreference, ManualFrameScheduler};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn progress_is_monotonic_under_frame_jitter(
            gaps in proptest::collection::vec(0.1f64..50.0, 1..40)
        ) {
            let scheduler = Rc::new(ManualFrameScheduler::new());
            let scheduler_concrete = Rc::clone(&scheduler);
            let scheduler_dyn: Rc<dyn FrameScheduler> = scheduler_concrete;
            let animator = Animator::new(
                scheduler_dyn,
                Rc::new(FixedMotionPreference(false)),
            );
            let steps = Rc::new(RefCell::new(Vec::new()));
            let stops = Rc::new(Cell::new(0u32));

            let recorded = Rc::clone(&steps);
            let stopped = Rc::clone(&stops);
            let handle = animator
                .animate(
                    AnimationConfig { duration_ms: 100.0, ..Default::default() },
                    AnimationCallbacks::new()
                        .on_step(move |p| recorded.borrow_mut().push(p))
                        .on_stop(move || stopped.set(stopped.get() + 1)),
                )
                .unwrap()
                .expect("handle for a timed run");

            let mut now = 0.0;
            scheduler.run_frame(now);
            for gap in gaps {
                now += gap;
                scheduler.run_frame(now);
            }
            while scheduler.pending() > 0 {
                now += 40.0;
                scheduler.run_frame(now);
            }

            let steps = steps.borrow();
            prop_assert!(!steps.is_empty());
            prop_assert!(steps.windows(2).all(|pair| pair[0] <= pair[1]));
            prop_assert_eq!(*steps.last().unwrap(), 1.0);
            prop_assert_eq!(stops.get(), 1);
            prop_assert!(!handle.is_running());
        }
    }
}
