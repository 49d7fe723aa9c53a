use crate::model::Screen;

/// A completed screen transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenChange {
    pub from: Screen,
    pub to: Screen,
}

impl ScreenChange {
    /// True when this transition moves away from `screen`.
    #[must_use]
    pub fn leaves(&self, screen: Screen) -> bool {
        self.from == screen && self.to != screen
    }
}

/// Tracks the active screen. Holds no selection or quiz state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    current: Screen,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            current: Screen::Main,
        }
    }
}

impl Navigator {
    #[must_use]
    pub fn current(&self) -> Screen {
        self.current
    }

    /// Switch to `screen` unconditionally. Validation is the caller's job.
    pub fn go_to(&mut self, screen: Screen) -> ScreenChange {
        let change = ScreenChange {
            from: self.current,
            to: screen,
        };
        self.current = screen;
        change
    }

    /// Move to the canonical parent of the current screen. No-op on `Main`.
    pub fn go_back(&mut self) -> Option<ScreenChange> {
        let parent = self.current.parent()?;
        Some(self.go_to(parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_from_main_is_noop() {
        let mut nav = Navigator::default();
        assert_eq!(nav.go_back(), None);
        assert_eq!(nav.current(), Screen::Main);
    }

    #[test]
    fn back_returns_to_canonical_parent_regardless_of_path() {
        let mut nav = Navigator::default();
        // Jump straight to Question without walking the chain.
        nav.go_to(Screen::Question);
        let change = nav.go_back().unwrap();
        assert_eq!(change.to, Screen::Exams);
        assert!(change.leaves(Screen::Question));

        nav.go_back();
        nav.go_back();
        nav.go_back();
        assert_eq!(nav.current(), Screen::Main);
    }

    #[test]
    fn go_to_same_screen_does_not_leave_it() {
        let mut nav = Navigator::default();
        nav.go_to(Screen::Question);
        let change = nav.go_to(Screen::Question);
        assert!(!change.leaves(Screen::Question));
    }
}
