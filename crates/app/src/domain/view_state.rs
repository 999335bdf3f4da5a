//! Per-view loading state.

/// Loading and error state tracked independently by each view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState<T> {
    /// Nothing requested yet.
    #[default]
    Idle,

    /// A request is in flight.
    Loading,

    /// Last request succeeded.
    Loaded(T),

    /// Last request failed with a user-facing message.
    Failed(String),
}

impl<T> ViewState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Loaded value, if any.
    #[must_use]
    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        let loaded = ViewState::Loaded(3);
        let failed: ViewState<u8> = ViewState::Failed("boom".to_string());

        assert_eq!(loaded.loaded(), Some(&3));
        assert_eq!(failed.error(), Some("boom"));
        assert!(ViewState::<u8>::Loading.is_loading());
        assert_eq!(ViewState::<u8>::default(), ViewState::Idle);
    }
}
