use indexmap::IndexMap;

/// Per-line visibility flags
///
/// Only booleans live here; turning a flag into a visible or hidden layer is
/// the job of [`crate::viewer::Viewer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    visible: IndexMap<String, bool>,
}

impl FilterState {
    /// Track the given lines, all visible
    #[must_use]
    pub fn new<I, S>(line_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            visible: line_ids.into_iter().map(|id| (id.into(), true)).collect(),
        }
    }

    /// Untracked lines count as visible
    #[must_use]
    pub fn is_visible(&self, line_id: &str) -> bool {
        self.visible.get(line_id).copied().unwrap_or(true)
    }

    /// Set one line's flag. Returns whether the flag changed; untracked ids
    /// are ignored.
    pub fn set_visible(&mut self, line_id: &str, visible: bool) -> bool {
        match self.visible.get_mut(line_id) {
            Some(flag) if *flag != visible => {
                *flag = visible;
                true
            }
            _ => false,
        }
    }

    pub fn set_all(&mut self, visible: bool) {
        for flag in self.visible.values_mut() {
            *flag = visible;
        }
    }

    #[must_use]
    pub fn contains(&self, line_id: &str) -> bool {
        self.visible.contains_key(line_id)
    }

    pub fn line_ids(&self) -> impl Iterator<Item = &str> {
        self.visible.keys().map(String::as_str)
    }
}
