pub type StackVizResult<T> = Result<T, StackVizError>;

#[derive(thiserror::Error, Debug)]
pub enum StackVizError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("empty stack: {0}")]
    EmptyStack(String),

    #[error("script error: {0}")]
    Script(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StackVizError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn empty_stack(msg: impl Into<String>) -> Self {
        Self::EmptyStack(msg.into())
    }

    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            StackVizError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            StackVizError::empty_stack("x")
                .to_string()
                .contains("empty stack:")
        );
        assert!(
            StackVizError::script("x")
                .to_string()
                .contains("script error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = StackVizError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
