use std::time::Duration;

use crate::section::Section;

// class names stay literal so tailwind picks them up from source
const TRANSITION_CLASSES: &str = "transition-all duration-1500";
const SHOWN_CLASSES: &str = "opacity-100 translate-y-0";
const HIDDEN_CLASSES: &str = "opacity-0 translate-y-8";

/// Styling of one section's content for a given visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStyle {
    pub section: Section,
    pub visible: bool,
}

pub fn reveal(section: Section, visible: bool) -> RevealStyle {
    RevealStyle { section, visible }
}

impl RevealStyle {
    /// Stagger so later sections settle slightly after earlier ones.
    pub fn delay(&self) -> Duration {
        match self.section {
            Section::Hero => Duration::ZERO,
            Section::About => Duration::from_millis(200),
            Section::Contact => Duration::from_millis(300),
        }
    }

    pub fn class(&self) -> String {
        let mut classes = vec![TRANSITION_CLASSES];
        let delay = match self.delay().as_millis() {
            200 => Some("delay-200"),
            300 => Some("delay-300"),
            _ => None,
        };
        classes.extend(delay);
        classes.push(if self.visible {
            SHOWN_CLASSES
        } else {
            HIDDEN_CLASSES
        });
        classes.join(" ")
    }

    /// Like [`RevealStyle::class`], with layout classes of the wrapper in front.
    pub fn class_with(&self, extra: &str) -> String {
        if extra.is_empty() {
            self.class()
        } else {
            format!("{extra} {}", self.class())
        }
    }
}
