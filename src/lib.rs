#![forbid(unsafe_code)]

pub mod color;
pub mod compile;
pub mod config;
pub mod core;
pub mod error;
pub mod guide;
pub mod layout;
pub mod model;
pub mod scenes;
pub mod script;
pub mod timeline;

pub use crate::core::{ElementId, NodeId, Point, Vec2};
pub use color::Color;
pub use compile::compile_scene;
pub use config::RenderConfig;
pub use error::{StackVizError, StackVizResult};
pub use layout::{ElementMetrics, StackFrame, StackLayout};
pub use model::{StackElement, StackModel};
pub use scenes::{InitialElement, Scene, StackPanel, scene_by_name, scene_names};
pub use script::{ScriptStep, StackScript};
pub use timeline::{Directive, Ease, RecordingBackend, SceneBackend, Timeline, play};
