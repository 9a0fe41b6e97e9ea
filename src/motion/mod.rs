//! Small timeline and scroll-trigger engine behind the page's animations.

pub mod ease;
pub mod frame;
pub mod paint;
pub mod registry;
pub mod ticker;
pub mod timeline;
pub mod trigger;
pub mod tween;

pub use ease::Ease;
pub use registry::{play, register_scene, SceneGuard, SceneTrigger, TweenHandle};
pub use timeline::{Position, Timeline};
pub use trigger::{Band, Edge, TriggerSpec};
pub use tween::{Prop, Tween};
