/// Errors raised by [`PhaseSequencer`](crate::sequencer::PhaseSequencer) transitions.
///
/// Both variants indicate a wiring bug between phases; the host decides whether
/// to halt or recover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequencerError<S> {
    #[error("invalid state id: {0:?}")]
    UnknownState(S),

    #[error("return with empty gosub stack")]
    EmptyStack,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_state_display() {
        let err = SequencerError::UnknownState(7u32);
        assert_eq!(err.to_string(), "invalid state id: 7");
    }

    #[test]
    fn test_empty_stack_display() {
        let err: SequencerError<u32> = SequencerError::EmptyStack;
        assert_eq!(err.to_string(), "return with empty gosub stack");
    }
}
