/// Boolean-driven busy indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingIndicator {
    visible: bool,
}

impl LoadingIndicator {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true when the visibility actually changed.
    pub fn set(&mut self, loading: bool) -> bool {
        let changed = self.visible != loading;
        self.visible = loading;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_changes_only() {
        let mut loader = LoadingIndicator::default();
        assert!(!loader.is_visible());
        assert!(loader.set(true));
        assert!(!loader.set(true));
        assert!(loader.is_visible());
        assert!(loader.set(false));
        assert!(!loader.is_visible());
    }
}
