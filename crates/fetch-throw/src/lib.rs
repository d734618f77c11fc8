//! Gesture-to-impulse pipeline and the ball's lifecycle.
//!
//! Pointer events arrive through a [`PointerHub`], the [`GestureSampler`] turns a primary-pointer
//! down/up pair into a [`SwipeSample`], and the [`ImpulseResolver`] converts that into a force on
//! the ball. The [`ObjectDeliveryTracker`] owns the ball's lifecycle phase and is the single
//! arbiter of who may move it.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod hub;
pub mod impulse;
pub mod sampler;
pub mod tracker;

pub use hub::{PointerEvent, PointerHub, PointerPhase, SubscriptionId, PRIMARY_POINTER};
pub use impulse::{ImpulseResolver, ThrowImpulse};
pub use sampler::{GestureSampler, SwipeSample};
pub use tracker::{BallPhase, ObjectDeliveryTracker, PositionAuthority};
