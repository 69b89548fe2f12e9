/// Open or closed notification emitted by a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Open,
    Close,
}

impl Toggled {
    pub fn from_open(open: bool) -> Self {
        if open {
            Toggled::Open
        } else {
            Toggled::Close
        }
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            Toggled::Open => "open",
            Toggled::Close => "close",
        }
    }
}

/// Open/closed container over a replaceable list of content items.
#[derive(Debug, Clone, PartialEq)]
pub struct Disclosure<T> {
    open: bool,
    contents: Vec<T>,
}

impl<T> Disclosure<T> {
    pub fn new(open: bool) -> Self {
        Self {
            open,
            contents: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) -> Option<Toggled> {
        if self.open == open {
            return None;
        }
        self.open = open;
        Some(Toggled::from_open(open))
    }

    pub fn toggle(&mut self) -> Toggled {
        self.open = !self.open;
        Toggled::from_open(self.open)
    }

    pub fn contents(&self) -> &[T] {
        &self.contents
    }

    /// Replaces every content item; the previous items are returned detached.
    pub fn set_contents(&mut self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let detached = std::mem::take(&mut self.contents);
        self.contents.extend(items);
        detached
    }
}

impl<T> Default for Disclosure<T> {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_emits_open_then_close() {
        let mut details: Disclosure<&str> = Disclosure::default();
        assert_eq!(details.toggle(), Toggled::Open);
        assert_eq!(details.toggle(), Toggled::Close);
        assert_eq!(Toggled::Open.event_name(), "open");
    }

    #[test]
    fn test_set_open_only_reports_changes() {
        let mut details: Disclosure<&str> = Disclosure::new(true);
        assert_eq!(details.set_open(true), None);
        assert_eq!(details.set_open(false), Some(Toggled::Close));
    }

    #[test]
    fn test_set_contents_detaches_old_items() {
        let mut details = Disclosure::new(false);
        assert!(details.set_contents(["a", "b"]).is_empty());
        assert_eq!(details.set_contents(["c"]), vec!["a", "b"]);
        assert_eq!(details.contents(), ["c"]);
    }
}
