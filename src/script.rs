use crate::{
    color::Color,
    error::{StackVizError, StackVizResult},
};

/// One step of a scene's animation sequence: what happens, not how it is
/// drawn. Push/pop choreography (captions, highlight, pointer moves) is
/// filled in by the compiler.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Append one element at the current top slot.
    Push { label: String, color: Color },
    /// Carry the top element off-frame and remove it.
    Pop,
    /// Replace the commentary caption next to the operations label.
    Caption { text: String, color: Color },
    /// Replace the code panel contents.
    ShowCode { lines: Vec<String> },
    /// Hold the current picture.
    Wait { secs: f64 },
    /// Closing message; must be the last step.
    Finale { text: String },
}

/// Declarative animation sequence interpreted by the compiler.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StackScript {
    pub steps: Vec<ScriptStep>,
}

impl StackScript {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps }
    }

    /// Check the script against the scene it will run in before any
    /// directive is emitted.
    ///
    /// `initial_count` is the size of the initial stack population, or
    /// `None` when the scene has no stack panel at all (push/pop are then
    /// illegal). Popping past the known population is a scripting bug and
    /// is rejected here, fatally.
    pub fn validate(&self, initial_count: Option<usize>) -> StackVizResult<()> {
        let mut count = initial_count;
        let last = self.steps.len().saturating_sub(1);

        for (idx, step) in self.steps.iter().enumerate() {
            match step {
                ScriptStep::Push { label, .. } => {
                    if label.trim().is_empty() {
                        return Err(StackVizError::validation(format!(
                            "step {idx}: push label must be non-empty"
                        )));
                    }
                    match count.as_mut() {
                        Some(n) => *n += 1,
                        None => {
                            return Err(StackVizError::script(format!(
                                "step {idx}: push in a scene without a stack panel"
                            )));
                        }
                    }
                }
                ScriptStep::Pop => match count.as_mut() {
                    Some(n) if *n == 0 => {
                        return Err(StackVizError::script(format!(
                            "step {idx}: pop on an empty stack"
                        )));
                    }
                    Some(n) => *n -= 1,
                    None => {
                        return Err(StackVizError::script(format!(
                            "step {idx}: pop in a scene without a stack panel"
                        )));
                    }
                },
                ScriptStep::Caption { text, .. } => {
                    if text.trim().is_empty() {
                        return Err(StackVizError::validation(format!(
                            "step {idx}: caption text must be non-empty"
                        )));
                    }
                }
                ScriptStep::ShowCode { lines } => {
                    if lines.is_empty() {
                        return Err(StackVizError::validation(format!(
                            "step {idx}: show_code must have at least one line"
                        )));
                    }
                }
                ScriptStep::Wait { secs } => {
                    if !(secs.is_finite() && *secs > 0.0) {
                        return Err(StackVizError::validation(format!(
                            "step {idx}: wait secs must be finite and > 0"
                        )));
                    }
                }
                ScriptStep::Finale { text } => {
                    if text.trim().is_empty() {
                        return Err(StackVizError::validation(format!(
                            "step {idx}: finale text must be non-empty"
                        )));
                    }
                    if idx != last {
                        return Err(StackVizError::script(format!(
                            "step {idx}: finale must be the last step"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    fn push(label: &str) -> ScriptStep {
        ScriptStep::Push {
            label: label.to_string(),
            color: color::PURPLE,
        }
    }

    #[test]
    fn balanced_script_validates() {
        let script = StackScript::new(vec![push("New Data"), ScriptStep::Pop, ScriptStep::Pop]);
        script.validate(Some(1)).unwrap();
    }

    #[test]
    fn pop_past_initial_population_is_rejected() {
        let script = StackScript::new(vec![ScriptStep::Pop, ScriptStep::Pop]);
        let err = script.validate(Some(1)).unwrap_err();
        assert!(matches!(err, StackVizError::Script(_)));
        assert!(err.to_string().contains("step 1"));
    }

    #[test]
    fn push_without_a_stack_panel_is_rejected() {
        let script = StackScript::new(vec![push("x")]);
        assert!(script.validate(None).is_err());
    }

    #[test]
    fn finale_must_be_terminal() {
        let script = StackScript::new(vec![
            ScriptStep::Finale {
                text: "done".to_string(),
            },
            ScriptStep::Wait { secs: 1.0 },
        ]);
        assert!(script.validate(Some(0)).is_err());
    }

    #[test]
    fn bad_payloads_are_rejected() {
        assert!(
            StackScript::new(vec![push("  ")])
                .validate(Some(0))
                .is_err()
        );
        assert!(
            StackScript::new(vec![ScriptStep::Wait { secs: 0.0 }])
                .validate(Some(0))
                .is_err()
        );
        assert!(
            StackScript::new(vec![ScriptStep::ShowCode { lines: vec![] }])
                .validate(Some(0))
                .is_err()
        );
    }

    #[test]
    fn steps_roundtrip_through_json_as_op_payload() {
        let script = StackScript::new(vec![push("New Data"), ScriptStep::Pop]);
        let s = serde_json::to_string(&script).unwrap();
        assert!(s.contains("\"op\":\"push\""));
        assert!(s.contains("\"op\":\"pop\""));
        let de: StackScript = serde_json::from_str(&s).unwrap();
        assert_eq!(de, script);
    }
}
