pub use kurbo::{Point, Vec2};

/// Identity of a scene-graph node emitted by the compiler.
///
/// Node ids are allocated per timeline and are stable across serialization,
/// so an external engine can key its own objects on them.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u64);

/// Identity of an element within one [`StackModel`](crate::StackModel).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u64);
