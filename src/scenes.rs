use kurbo::Point;

use crate::{
    color::{self, Color},
    config::RenderConfig,
    error::{StackVizError, StackVizResult},
    layout::{ElementMetrics, StackFrame},
    script::{ScriptStep, StackScript},
};

/// A complete authored animation: titles, optional stack panel, and the
/// declarative script the compiler interprets.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub name: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub config: RenderConfig,
    pub stack: Option<StackPanel>,
    pub script: StackScript,
}

/// The stack visual: frame geometry, element metrics, and the elements
/// present before the scripted operations begin.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StackPanel {
    pub frame: StackFrame,
    pub metrics: ElementMetrics,
    pub initial: Vec<InitialElement>,
}

/// Label and fill color of one pre-populated element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InitialElement {
    pub label: String,
    pub color: Color,
}

impl Scene {
    pub fn validate(&self) -> StackVizResult<()> {
        if self.name.trim().is_empty() {
            return Err(StackVizError::validation("scene name must be non-empty"));
        }
        if self.title.trim().is_empty() {
            return Err(StackVizError::validation("scene title must be non-empty"));
        }
        self.config.validate()?;

        if let Some(panel) = &self.stack {
            panel.frame.validate()?;
            panel.metrics.validate()?;
            for init in &panel.initial {
                if init.label.trim().is_empty() {
                    return Err(StackVizError::validation(
                        "initial element labels must be non-empty",
                    ));
                }
            }
        }

        self.script
            .validate(self.stack.as_ref().map(|p| p.initial.len()))
    }
}

/// Names of the built-in scenes, in presentation order.
pub fn scene_names() -> &'static [&'static str] {
    &["stack_lifo", "stl_stack_usage"]
}

/// Look up a built-in scene by name.
pub fn scene_by_name(name: &str) -> Option<Scene> {
    match name {
        "stack_lifo" => Some(stack_lifo()),
        "stl_stack_usage" => Some(stl_stack_usage()),
        _ => None,
    }
}

/// The LIFO walkthrough: four pre-populated elements, one push, one pop,
/// with `std::stack` snippets alongside.
pub fn stack_lifo() -> Scene {
    Scene {
        name: "stack_lifo".to_string(),
        title: "Stack | LIFO".to_string(),
        subtitle: Some("Last in, first out".to_string()),
        config: RenderConfig::default(),
        stack: Some(StackPanel {
            frame: StackFrame {
                origin: Point::new(-2.8, -2.5),
                width: 2.5,
                height: 5.0,
            },
            metrics: ElementMetrics::default(),
            initial: vec![
                InitialElement {
                    label: "Data A".to_string(),
                    color: color::BLUE,
                },
                InitialElement {
                    label: "Data B".to_string(),
                    color: color::GREEN,
                },
                InitialElement {
                    label: "Data C".to_string(),
                    color: color::YELLOW,
                },
                InitialElement {
                    label: "Data D".to_string(),
                    color: color::RED,
                },
            ],
        }),
        script: StackScript::new(vec![
            ScriptStep::ShowCode {
                lines: vec![
                    "std::stack<std::string> s;".to_string(),
                    String::new(),
                    "// push onto the stack".to_string(),
                    "s.push(\"New Data\");".to_string(),
                ],
            },
            ScriptStep::Push {
                label: "New Data".to_string(),
                color: color::PURPLE,
            },
            ScriptStep::ShowCode {
                lines: vec![
                    "// inspect the top".to_string(),
                    "std::string top = s.top();".to_string(),
                    "// top == \"New Data\"".to_string(),
                    String::new(),
                    "// pop it back off".to_string(),
                    "s.pop();".to_string(),
                ],
            },
            ScriptStep::Pop,
            ScriptStep::Wait { secs: 1.0 },
            ScriptStep::Finale {
                text: "Last in, first out!".to_string(),
            },
        ]),
    }
}

/// The `std::stack` usage demo: a pure code walkthrough, no stack panel.
pub fn stl_stack_usage() -> Scene {
    Scene {
        name: "stl_stack_usage".to_string(),
        title: "Using std::stack".to_string(),
        subtitle: None,
        config: RenderConfig::default(),
        stack: None,
        script: StackScript::new(vec![
            ScriptStep::ShowCode {
                lines: vec![
                    "#include <stack>".to_string(),
                    "#include <iostream>".to_string(),
                ],
            },
            ScriptStep::Wait { secs: 1.0 },
            ScriptStep::ShowCode {
                lines: vec![
                    "std::stack<int> s;".to_string(),
                    String::new(),
                    "s.push(10);".to_string(),
                    "s.push(20);".to_string(),
                    "s.push(30);".to_string(),
                    String::new(),
                    "int top = s.top();      // 30".to_string(),
                    "s.pop();                // removes 30".to_string(),
                    "bool empty = s.empty(); // false".to_string(),
                    "int size = s.size();    // 2".to_string(),
                ],
            },
            ScriptStep::Wait { secs: 2.0 },
            ScriptStep::Caption {
                text: "draining a stack reverses insertion order".to_string(),
                color: color::YELLOW,
            },
            ScriptStep::ShowCode {
                lines: vec![
                    "int main() {".to_string(),
                    "    std::stack<int> s;".to_string(),
                    "    s.push(1);".to_string(),
                    "    s.push(2);".to_string(),
                    "    s.push(3);".to_string(),
                    String::new(),
                    "    while (!s.empty()) {".to_string(),
                    "        std::cout << s.top() << \" \";".to_string(),
                    "        s.pop();".to_string(),
                    "    }".to_string(),
                    "    // prints: 3 2 1".to_string(),
                    "    return 0;".to_string(),
                    "}".to_string(),
                ],
            },
            ScriptStep::Wait { secs: 3.0 },
            ScriptStep::Finale {
                text: "std::stack: push, top, pop".to_string(),
            },
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_scenes_validate() {
        for name in scene_names() {
            let scene = scene_by_name(name).unwrap();
            assert_eq!(&scene.name, name);
            scene.validate().unwrap();
        }
    }

    #[test]
    fn unknown_scene_is_none() {
        assert!(scene_by_name("nope").is_none());
    }

    #[test]
    fn lifo_scene_populates_four_elements() {
        let scene = stack_lifo();
        let panel = scene.stack.as_ref().unwrap();
        let labels: Vec<&str> = panel.initial.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Data A", "Data B", "Data C", "Data D"]);
    }

    #[test]
    fn scene_json_roundtrip() {
        let scene = stack_lifo();
        let s = serde_json::to_string_pretty(&scene).unwrap();
        let de: Scene = serde_json::from_str(&s).unwrap();
        assert_eq!(de, scene);
    }

    #[test]
    fn validate_rejects_blank_initial_label() {
        let mut scene = stack_lifo();
        scene.stack.as_mut().unwrap().initial[0].label = "  ".to_string();
        assert!(scene.validate().is_err());
    }
}
