use crate::{
    core::ElementId,
    error::{StackVizError, StackVizResult},
};

/// One element of the visualized stack: identity plus label.
///
/// Color and highlight state are presentation annotations and live in
/// script payloads and directives, not here.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StackElement {
    pub id: ElementId,
    pub label: String,
}

/// Ordered sequence of elements with true LIFO discipline.
///
/// Index 0 is the bottom; the last element is the top and is the only one
/// that may be removed. Ids are unique per model and assigned monotonically.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct StackModel {
    elements: Vec<StackElement>,
    next_id: u64,
}

impl StackModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one element at the top; returns its id.
    pub fn push(&mut self, label: impl Into<String>) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push(StackElement {
            id,
            label: label.into(),
        });
        id
    }

    /// Remove and return the top element.
    pub fn pop(&mut self) -> StackVizResult<StackElement> {
        self.elements
            .pop()
            .ok_or_else(|| StackVizError::empty_stack("pop on an empty stack"))
    }

    pub fn top(&self) -> Option<&StackElement> {
        self.elements.last()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Bottom-to-top view of the current elements.
    pub fn elements(&self) -> &[StackElement] {
        &self.elements
    }
}
