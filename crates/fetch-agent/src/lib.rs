//! The fetching agent: a five-state behavior controller driven once per tick.
//!
//! ```text
//! Idle ──grounded──► Chase ──caught──► PickUp ─(same tick)─► Deliver ──delivered──► ReturnToIdle
//!  ▲                                                                                     │
//!  └──────────────────────────────────── home ──────────────────────────────────────────┘
//! ```
//!
//! Movement goes through [`MotionStepper`]; animation requests go to an [`Animator`] that must
//! ignore repeats of the current clip.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod animation;
pub mod controller;
pub mod head_look;
pub mod stepper;

pub use animation::{AnimationBackend, AnimationClip, Animator, ClipTable, CrossfadeAnimator};
pub use controller::{AgentBehaviorController, ArrivalRanges, BehaviorState, Transition};
pub use head_look::{HeadLookController, HeadLookStage};
pub use stepper::{MotionStep, MotionStepper};
