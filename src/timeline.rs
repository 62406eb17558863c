use std::collections::BTreeSet;

use kurbo::Point;

use crate::{
    color::Color,
    config::RenderConfig,
    core::NodeId,
    error::{StackVizError, StackVizResult},
};

/// Easing hint attached to animated directives. Interpolation itself is the
/// rendering engine's concern; this only states the intent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    Smooth,
}

/// One scene-graph mutation, pure data. The full vocabulary the external
/// engine needs: place a labeled box at a point with a color, draw an
/// arrow/label at a point, move, fade, write text, hold.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    /// Draw the stack container outline with an emphasized base line.
    /// `origin` is the bottom-center of the frame.
    SpawnFrame {
        node: NodeId,
        origin: Point,
        width: f64,
        height: f64,
    },
    /// Place a labeled box at `at` filled with `color`.
    SpawnBox {
        node: NodeId,
        label: String,
        color: Color,
        at: Point,
        width: f64,
        height: f64,
    },
    /// Write a text run at `at` over `secs` seconds. Multi-line text is the
    /// engine's layout problem; `mono` requests a monospace face.
    SpawnText {
        node: NodeId,
        text: String,
        at: Point,
        size_pt: f64,
        color: Color,
        mono: bool,
        secs: f64,
    },
    /// Draw the stack-pointer arrow and its "SP" label at `at`.
    SpawnPointer { node: NodeId, at: Point, color: Color },
    /// Animate a node to a new position.
    MoveTo {
        node: NodeId,
        to: Point,
        secs: f64,
        ease: Ease,
    },
    /// Re-stroke a node to call attention to it.
    Highlight {
        node: NodeId,
        color: Color,
        secs: f64,
    },
    /// Fade a node to transparent and drop it from the scene graph.
    FadeOut { node: NodeId, secs: f64 },
    /// Drop a node without animation.
    Despawn { node: NodeId },
    /// Hold the current picture.
    Wait { secs: f64 },
}

impl Directive {
    /// Wall-clock seconds this directive contributes to the scene.
    pub fn secs(&self) -> f64 {
        match self {
            Self::SpawnText { secs, .. }
            | Self::MoveTo { secs, .. }
            | Self::Highlight { secs, .. }
            | Self::FadeOut { secs, .. }
            | Self::Wait { secs } => *secs,
            Self::SpawnFrame { .. } | Self::SpawnBox { .. } | Self::SpawnPointer { .. } => 0.0,
            Self::Despawn { .. } => 0.0,
        }
    }

    fn target(&self) -> Option<NodeId> {
        match self {
            Self::MoveTo { node, .. }
            | Self::Highlight { node, .. }
            | Self::FadeOut { node, .. }
            | Self::Despawn { node } => Some(*node),
            _ => None,
        }
    }

    fn spawned(&self) -> Option<NodeId> {
        match self {
            Self::SpawnFrame { node, .. }
            | Self::SpawnBox { node, .. }
            | Self::SpawnText { node, .. }
            | Self::SpawnPointer { node, .. } => Some(*node),
            _ => None,
        }
    }
}

/// Everything the external engine needs to play one scene: output
/// configuration plus the ordered directive list.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    pub name: String,
    pub config: RenderConfig,
    pub directives: Vec<Directive>,
}

impl Timeline {
    /// Total scripted duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.directives.iter().map(Directive::secs).sum()
    }

    /// Structural checks: valid config, and every directive targets a node
    /// that is alive at that point in the sequence.
    pub fn validate(&self) -> StackVizResult<()> {
        if self.name.trim().is_empty() {
            return Err(StackVizError::validation("timeline name must be non-empty"));
        }
        self.config.validate()?;

        let mut live = BTreeSet::new();
        for (idx, d) in self.directives.iter().enumerate() {
            let secs = d.secs();
            if !secs.is_finite() || secs < 0.0 {
                return Err(StackVizError::validation(format!(
                    "directive {idx}: secs must be finite and >= 0"
                )));
            }

            if let Some(node) = d.spawned() {
                if !live.insert(node) {
                    return Err(StackVizError::validation(format!(
                        "directive {idx}: node {} spawned twice",
                        node.0
                    )));
                }
            }
            if let Some(node) = d.target() {
                if !live.contains(&node) {
                    return Err(StackVizError::validation(format!(
                        "directive {idx}: node {} is not alive",
                        node.0
                    )));
                }
            }
            match d {
                Directive::FadeOut { node, .. } | Directive::Despawn { node } => {
                    live.remove(node);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Executes directives strictly in order; implemented by the external
/// rendering engine (and by [`RecordingBackend`] in tests).
pub trait SceneBackend {
    fn apply(&mut self, directive: &Directive) -> StackVizResult<()>;
}

/// Feed a validated timeline to a backend, one directive at a time. Each
/// directive conceptually completes before the next is issued.
#[tracing::instrument(skip(timeline, backend), fields(name = %timeline.name))]
pub fn play(timeline: &Timeline, backend: &mut dyn SceneBackend) -> StackVizResult<()> {
    timeline.validate()?;
    for directive in &timeline.directives {
        backend.apply(directive)?;
    }
    tracing::debug!(
        directives = timeline.directives.len(),
        secs = timeline.duration_secs(),
        "timeline played"
    );
    Ok(())
}

/// Backend that records every applied directive, in order.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub applied: Vec<Directive>,
}

impl SceneBackend for RecordingBackend {
    fn apply(&mut self, directive: &Directive) -> StackVizResult<()> {
        self.applied.push(directive.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    fn frame_spawn(node: u64) -> Directive {
        Directive::SpawnFrame {
            node: NodeId(node),
            origin: Point::new(0.0, -2.5),
            width: 2.5,
            height: 5.0,
        }
    }

    fn timeline(directives: Vec<Directive>) -> Timeline {
        Timeline {
            name: "t".to_string(),
            config: RenderConfig::default(),
            directives,
        }
    }

    #[test]
    fn validate_accepts_spawn_move_fade() {
        let t = timeline(vec![
            frame_spawn(0),
            Directive::MoveTo {
                node: NodeId(0),
                to: Point::new(1.0, 1.0),
                secs: 0.5,
                ease: Ease::Smooth,
            },
            Directive::FadeOut {
                node: NodeId(0),
                secs: 0.5,
            },
        ]);
        t.validate().unwrap();
        assert_eq!(t.duration_secs(), 1.0);
    }

    #[test]
    fn validate_rejects_dead_or_duplicate_nodes() {
        let t = timeline(vec![Directive::MoveTo {
            node: NodeId(7),
            to: Point::new(0.0, 0.0),
            secs: 0.5,
            ease: Ease::Smooth,
        }]);
        assert!(t.validate().is_err());

        let t = timeline(vec![frame_spawn(0), frame_spawn(0)]);
        assert!(t.validate().is_err());
    }

    #[test]
    fn faded_node_cannot_be_moved_again() {
        let t = timeline(vec![
            frame_spawn(0),
            Directive::FadeOut {
                node: NodeId(0),
                secs: 0.2,
            },
            Directive::MoveTo {
                node: NodeId(0),
                to: Point::new(0.0, 0.0),
                secs: 0.2,
                ease: Ease::Linear,
            },
        ]);
        assert!(t.validate().is_err());
    }

    #[test]
    fn play_feeds_directives_in_order() {
        let t = timeline(vec![
            frame_spawn(0),
            Directive::Wait { secs: 1.0 },
            Directive::Despawn { node: NodeId(0) },
        ]);
        let mut backend = RecordingBackend::default();
        play(&t, &mut backend).unwrap();
        assert_eq!(backend.applied, t.directives);
    }

    #[test]
    fn play_rejects_an_invalid_timeline_before_applying_anything() {
        let t = timeline(vec![Directive::Highlight {
            node: NodeId(3),
            color: color::RED,
            secs: 0.5,
        }]);
        let mut backend = RecordingBackend::default();
        assert!(play(&t, &mut backend).is_err());
        assert!(backend.applied.is_empty());
    }
}
