use std::collections::BTreeMap;

use kurbo::Point;

use crate::{
    color::{self, Color},
    core::{ElementId, NodeId},
    error::{StackVizError, StackVizResult},
    layout::StackLayout,
    model::StackModel,
    scenes::Scene,
    script::ScriptStep,
    timeline::{Directive, Ease, Timeline},
};

// Scene space spans roughly 14.2 x 8 units, y-up, origin at canvas center.
const TITLE_AT: Point = Point::new(0.0, 3.6);
const SUBTITLE_AT: Point = Point::new(0.0, 3.0);
const OPS_LABEL_AT: Point = Point::new(-6.0, -3.6);
const CAPTION_AT: Point = Point::new(-4.2, -3.6);
const CODE_AT: Point = Point::new(4.6, 1.5);
const FINALE_AT: Point = Point::new(0.0, 0.0);

const TITLE_PT: f64 = 54.0;
const SUBTITLE_PT: f64 = 28.0;
const LABEL_PT: f64 = 26.0;
const CODE_PT: f64 = 18.0;
const FINALE_PT: f64 = 42.0;

const WRITE_SECS: f64 = 1.0;
const CAPTION_SECS: f64 = 0.5;
const POPULATE_SECS: f64 = 0.6;
const PUSH_SECS: f64 = 1.2;
const POINTER_SECS: f64 = 0.5;
const HIGHLIGHT_SECS: f64 = 0.5;
const EXIT_SECS: f64 = 1.0;
const FADE_SECS: f64 = 0.5;
const SETTLE_SECS: f64 = 1.0;
const FINALE_HOLD_SECS: f64 = 2.0;

/// Lifecycle of one scene compilation. Push/pop are only legal from
/// `Ready`; `Done` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Populating,
    Ready,
    Pushing,
    Popping,
    Done,
}

/// Interpret a scene's declarative script into the directive timeline the
/// external rendering engine consumes.
///
/// Fails before emitting anything if the scene, its configuration, or its
/// script is malformed; a script that pops past the initial population
/// never compiles.
#[tracing::instrument(skip(scene), fields(scene = %scene.name))]
pub fn compile_scene(scene: &Scene) -> StackVizResult<Timeline> {
    scene.validate()?;

    let mut compiler = Compiler::new(scene)?;
    compiler.opening();
    compiler.populate()?;
    for step in &scene.script.steps {
        compiler.step(step)?;
    }
    compiler.finish();

    let timeline = Timeline {
        name: scene.name.clone(),
        config: scene.config,
        directives: compiler.directives,
    };
    tracing::debug!(
        directives = timeline.directives.len(),
        secs = timeline.duration_secs(),
        "scene compiled"
    );
    Ok(timeline)
}

struct Compiler<'a> {
    scene: &'a Scene,
    layout: Option<StackLayout>,
    model: StackModel,
    element_nodes: BTreeMap<ElementId, NodeId>,
    pointer: Option<NodeId>,
    caption: Option<NodeId>,
    code: Option<NodeId>,
    next_node: u64,
    directives: Vec<Directive>,
    phase: Phase,
}

impl<'a> Compiler<'a> {
    fn new(scene: &'a Scene) -> StackVizResult<Self> {
        let layout = match &scene.stack {
            Some(panel) => Some(StackLayout::new(panel.frame, panel.metrics)?),
            None => None,
        };
        Ok(Self {
            scene,
            layout,
            model: StackModel::new(),
            element_nodes: BTreeMap::new(),
            pointer: None,
            caption: None,
            code: None,
            next_node: 0,
            directives: Vec::new(),
            phase: Phase::Idle,
        })
    }

    fn alloc(&mut self) -> NodeId {
        let node = NodeId(self.next_node);
        self.next_node += 1;
        node
    }

    fn emit(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    fn write_text(
        &mut self,
        text: impl Into<String>,
        at: Point,
        size_pt: f64,
        color: Color,
        mono: bool,
        secs: f64,
    ) -> NodeId {
        let node = self.alloc();
        self.emit(Directive::SpawnText {
            node,
            text: text.into(),
            at,
            size_pt,
            color,
            mono,
            secs,
        });
        node
    }

    fn opening(&mut self) {
        let title = self.scene.title.clone();
        self.write_text(title, TITLE_AT, TITLE_PT, color::BLUE, false, WRITE_SECS);
        if let Some(subtitle) = self.scene.subtitle.clone() {
            self.write_text(subtitle, SUBTITLE_AT, SUBTITLE_PT, color::GRAY, false, WRITE_SECS);
        }
    }

    /// Build the stack panel: frame, operations label, the initial
    /// population one element at a time, then the pointer.
    fn populate(&mut self) -> StackVizResult<()> {
        let Some(layout) = self.layout else {
            self.phase = Phase::Ready;
            return Ok(());
        };
        self.phase = Phase::Populating;

        let frame_node = self.alloc();
        self.emit(Directive::SpawnFrame {
            node: frame_node,
            origin: layout.frame.origin,
            width: layout.frame.width,
            height: layout.frame.height,
        });
        self.write_text(
            "operations:",
            OPS_LABEL_AT,
            LABEL_PT,
            color::WHITE,
            false,
            CAPTION_SECS,
        );

        let initial = self
            .scene
            .stack
            .as_ref()
            .map(|p| p.initial.clone())
            .unwrap_or_default();
        for init in initial {
            let target = layout.slot_position(self.model.len());
            let id = self.model.push(init.label.clone());
            let node = self.alloc();
            self.element_nodes.insert(id, node);
            self.emit(Directive::SpawnBox {
                node,
                label: init.label,
                color: init.color,
                at: layout.entry_position(),
                width: layout.metrics.element_width,
                height: layout.metrics.element_height,
            });
            self.emit(Directive::MoveTo {
                node,
                to: target,
                secs: POPULATE_SECS,
                ease: Ease::Smooth,
            });
        }
        self.emit(Directive::Wait { secs: SETTLE_SECS });

        let pointer = self.alloc();
        self.pointer = Some(pointer);
        self.emit(Directive::SpawnPointer {
            node: pointer,
            at: layout.pointer_position(self.model.len()),
            color: color::YELLOW,
        });

        self.phase = Phase::Ready;
        Ok(())
    }

    fn step(&mut self, step: &ScriptStep) -> StackVizResult<()> {
        match step {
            ScriptStep::Push { label, color } => self.push_element(label, *color),
            ScriptStep::Pop => self.pop_element(),
            ScriptStep::Caption { text, color } => {
                self.replace_caption(text.clone(), *color);
                Ok(())
            }
            ScriptStep::ShowCode { lines } => {
                self.show_code(lines);
                Ok(())
            }
            ScriptStep::Wait { secs } => {
                self.emit(Directive::Wait { secs: *secs });
                Ok(())
            }
            ScriptStep::Finale { text } => {
                self.finale(text.clone());
                Ok(())
            }
        }
    }

    fn expect_ready(&self, op: &str) -> StackVizResult<StackLayout> {
        if self.phase != Phase::Ready {
            return Err(StackVizError::script(format!(
                "{op} outside the Ready phase (bug)"
            )));
        }
        self.layout
            .ok_or_else(|| StackVizError::script(format!("{op} without a stack panel (bug)")))
    }

    fn push_element(&mut self, label: &str, color: Color) -> StackVizResult<()> {
        let layout = self.expect_ready("push")?;
        self.phase = Phase::Pushing;

        self.replace_caption(format!("push('{label}')"), color::GREEN);

        let target = layout.push_target(self.model.len());
        let id = self.model.push(label);
        let node = self.alloc();
        self.element_nodes.insert(id, node);

        self.emit(Directive::SpawnBox {
            node,
            label: label.to_string(),
            color,
            at: layout.entry_position(),
            width: layout.metrics.element_width,
            height: layout.metrics.element_height,
        });
        self.emit(Directive::MoveTo {
            node,
            to: target,
            secs: PUSH_SECS,
            ease: Ease::Smooth,
        });
        self.move_pointer(layout);
        self.emit(Directive::Wait { secs: SETTLE_SECS });

        self.phase = Phase::Ready;
        Ok(())
    }

    fn pop_element(&mut self) -> StackVizResult<()> {
        let layout = self.expect_ready("pop")?;
        self.phase = Phase::Popping;

        let count = self.model.len();
        layout.pop_source(count)?;
        let element = self.model.pop()?;
        let node = self.element_nodes.remove(&element.id).ok_or_else(|| {
            StackVizError::script(format!("no node for element '{}' (bug)", element.label))
        })?;

        self.replace_caption(format!("pop() → '{}'", element.label), color::RED);
        self.emit(Directive::Highlight {
            node,
            color: color::RED,
            secs: HIGHLIGHT_SECS,
        });
        self.move_pointer(layout);
        self.emit(Directive::MoveTo {
            node,
            to: layout.exit_position(count - 1),
            secs: EXIT_SECS,
            ease: Ease::Smooth,
        });
        self.emit(Directive::FadeOut {
            node,
            secs: FADE_SECS,
        });
        self.emit(Directive::Wait { secs: SETTLE_SECS });

        self.phase = Phase::Ready;
        Ok(())
    }

    /// Track the pointer to the current top slot.
    fn move_pointer(&mut self, layout: StackLayout) {
        if let Some(pointer) = self.pointer {
            self.emit(Directive::MoveTo {
                node: pointer,
                to: layout.pointer_position(self.model.len()),
                secs: POINTER_SECS,
                ease: Ease::Smooth,
            });
        }
    }

    fn replace_caption(&mut self, text: String, color: Color) {
        if let Some(old) = self.caption.take() {
            self.emit(Directive::Despawn { node: old });
        }
        let node = self.write_text(text, CAPTION_AT, LABEL_PT, color, false, CAPTION_SECS);
        self.caption = Some(node);
    }

    fn show_code(&mut self, lines: &[String]) {
        if let Some(old) = self.code.take() {
            self.emit(Directive::Despawn { node: old });
        }
        let node = self.write_text(
            lines.join("\n"),
            CODE_AT,
            CODE_PT,
            color::WHITE,
            true,
            WRITE_SECS,
        );
        self.code = Some(node);
    }

    fn finale(&mut self, text: String) {
        if let Some(old) = self.caption.take() {
            self.emit(Directive::FadeOut {
                node: old,
                secs: FADE_SECS,
            });
        }
        self.write_text(text, FINALE_AT, FINALE_PT, color::GREEN, false, WRITE_SECS);
        self.emit(Directive::Wait {
            secs: FINALE_HOLD_SECS,
        });
        self.phase = Phase::Done;
    }

    fn finish(&mut self) {
        // A script without a finale still terminates the state machine.
        self.phase = Phase::Done;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::{stack_lifo, stl_stack_usage};

    fn spawned_boxes(t: &Timeline) -> Vec<&str> {
        t.directives
            .iter()
            .filter_map(|d| match d {
                Directive::SpawnBox { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn lifo_timeline_is_structurally_valid() {
        let t = compile_scene(&stack_lifo()).unwrap();
        t.validate().unwrap();
        assert!(t.duration_secs() > 0.0);
    }

    #[test]
    fn lifo_timeline_spawns_initial_elements_then_the_pushed_one() {
        let t = compile_scene(&stack_lifo()).unwrap();
        assert_eq!(
            spawned_boxes(&t),
            vec!["Data A", "Data B", "Data C", "Data D", "New Data"]
        );
    }

    #[test]
    fn lifo_timeline_fades_exactly_the_popped_element() {
        let t = compile_scene(&stack_lifo()).unwrap();
        let fades: Vec<_> = t
            .directives
            .iter()
            .filter(|d| matches!(d, Directive::FadeOut { .. }))
            .collect();
        // One for the popped element, one for the pop caption at the finale.
        assert_eq!(fades.len(), 2);
    }

    #[test]
    fn code_walkthrough_compiles_without_a_stack_panel() {
        let t = compile_scene(&stl_stack_usage()).unwrap();
        t.validate().unwrap();
        assert!(spawned_boxes(&t).is_empty());
        assert!(
            !t.directives
                .iter()
                .any(|d| matches!(d, Directive::SpawnPointer { .. }))
        );
    }

    #[test]
    fn pointer_follows_the_top_of_the_stack() {
        let t = compile_scene(&stack_lifo()).unwrap();
        let pointer = t
            .directives
            .iter()
            .find_map(|d| match d {
                Directive::SpawnPointer { node, at, .. } => Some((*node, *at)),
                _ => None,
            })
            .unwrap();
        let moves: Vec<Point> = t
            .directives
            .iter()
            .filter_map(|d| match d {
                Directive::MoveTo { node, to, .. } if *node == pointer.0 => Some(*to),
                _ => None,
            })
            .collect();

        // Spawned above four elements, raised by the push, lowered by the pop.
        let base_y = stack_lifo().stack.unwrap().frame.origin.y;
        assert_eq!(round1(pointer.1.y - base_y), 3.6);
        assert_eq!(moves.len(), 2);
        assert_eq!(round1(moves[0].y - base_y), 4.4);
        assert_eq!(round1(moves[1].y - base_y), 3.6);
    }

    fn round1(v: f64) -> f64 {
        (v * 10.0).round() / 10.0
    }

    #[test]
    fn malformed_scripts_never_compile() {
        let mut scene = stack_lifo();
        for _ in 0..8 {
            scene.script.steps.insert(0, ScriptStep::Pop);
        }
        assert!(compile_scene(&scene).is_err());
    }
}
