/// The fixed set of screens in the exam flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Main,
    Grades,
    Years,
    Exams,
    Question,
}

struct Transition {
    parent: Option<Screen>,
    forward: &'static [Screen],
}

// Indexed by `Screen as usize`.
const TRANSITIONS: [Transition; 5] = [
    // Main
    Transition {
        parent: None,
        forward: &[Screen::Grades],
    },
    // Grades
    Transition {
        parent: Some(Screen::Main),
        forward: &[Screen::Years],
    },
    // Years
    Transition {
        parent: Some(Screen::Grades),
        forward: &[Screen::Exams],
    },
    // Exams
    Transition {
        parent: Some(Screen::Years),
        forward: &[Screen::Question],
    },
    // Question (completing the exam returns to Main)
    Transition {
        parent: Some(Screen::Exams),
        forward: &[Screen::Main],
    },
];

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Main,
        Screen::Grades,
        Screen::Years,
        Screen::Exams,
        Screen::Question,
    ];

    fn transition(self) -> &'static Transition {
        &TRANSITIONS[self as usize]
    }

    /// Canonical parent used for "back". `None` for `Main`.
    #[must_use]
    pub fn parent(self) -> Option<Screen> {
        self.transition().parent
    }

    /// Screens reachable by forward progression from this one.
    #[must_use]
    pub fn forward_targets(self) -> &'static [Screen] {
        self.transition().forward
    }

    #[must_use]
    pub fn can_advance_to(self, target: Screen) -> bool {
        self.forward_targets().contains(&target)
    }
}
