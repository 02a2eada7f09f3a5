//! # tween-driver
//!
//! Frame-driven easing animation library for UI transitions.
//!
//! This crate provides platform-agnostic logic for:
//! - Driving a monotonically progressing, eased progress value in [0, 1],
//!   delivered once per display-refresh tick
//! - Cubic-bezier easing curves with the CSS preset shapes
//! - Lifecycle hooks for start, per-frame step, completion, and cancellation
//! - Fast-forwarding when the user prefers reduced motion
//!
//! The animator never owns a clock: frame timing comes from an injected
//! [`FrameScheduler`] and the reduced-motion signal from an injected
//! [`MotionPreference`], so the same state machine runs under a browser's
//! `requestAnimationFrame`, a game loop, or a scripted test driver.
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for configuration
//! - `toml` - Parse [`AnimationConfig`] from TOML snippets
//! - `web` - Schedule via `requestAnimationFrame` and read
//!   `prefers-reduced-motion` through `matchMedia`
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use tween_driver::{
//!     AnimationCallbacks, AnimationConfig, Animator, EasingCurve,
//!     FixedMotionPreference, FrameScheduler, ManualFrameScheduler,
//! };
//!
//! let scheduler = Rc::new(ManualFrameScheduler::new());
//! let scheduler_dyn: Rc<dyn FrameScheduler> = Rc::clone(&scheduler) as Rc<dyn FrameScheduler>;
//! let animator = Animator::new(scheduler_dyn, Rc::new(FixedMotionPreference(false)));
//!
//! let config = AnimationConfig {
//!     duration_ms: 200.0,
//!     easing: EasingCurve::EASE_OUT,
//!     ..AnimationConfig::default()
//! };
//! let handle = animator
//!     .animate(
//!         config,
//!         AnimationCallbacks::new().on_step(|progress| {
//!             // apply `progress` to opacity, position, ...
//!             assert!((0.0..=1.0).contains(&progress));
//!         }),
//!     )
//!     .expect("valid configuration")
//!     .expect("timed runs return a handle");
//!
//! // The host pumps frames at its own pace.
//! scheduler.run_frame(0.0);
//! scheduler.run_frame(100.0);
//! assert!(handle.is_running());
//! scheduler.run_frame(200.0);
//! assert!(!handle.is_running());
//! ```

mod animator;
mod config;
mod easing;
pub mod scheduler;

pub use animator::{AnimationCallbacks, AnimationHandle, Animator};
pub use config::{AnimationConfig, ConfigError, DEFAULT_DURATION_MS};
pub use easing::EasingCurve;
pub use scheduler::{
    FixedMotionPreference, FrameScheduler, ManualFrameScheduler, MotionPreference,
};

#[cfg(feature = "web")]
pub use scheduler::web::window_animator;
