//! Class and section catalogue used to scope student lists.

/// Classes offered by the school, in display order.
pub const CLASS_NAMES: &[&str] = &[
    "Nursery", "LKG", "UKG", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10",
];

/// Sections of `class_name`; empty for an unknown class.
pub fn sections_for(class_name: &str) -> &'static [&'static str] {
    match class_name {
        "Nursery" | "LKG" | "UKG" => &["A"],
        "1" | "2" | "3" | "4" | "5" => &["A", "B", "C"],
        "6" | "7" | "8" | "9" | "10" => &["A", "B"],
        _ => &[],
    }
}

/// Upstream filter of class-scoped lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassScope {
    class_name: String,
    section: String,
}

impl Default for ClassScope {
    fn default() -> Self {
        Self::new(CLASS_NAMES[0])
    }
}

impl ClassScope {
    /// Scope at the first section of `class_name`.
    pub fn new(class_name: &str) -> Self {
        let mut scope = Self {
            class_name: String::new(),
            section: String::new(),
        };
        scope.set_class(class_name);
        scope
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn sections(&self) -> &'static [&'static str] {
        sections_for(&self.class_name)
    }

    /// Switches class; the section falls back to the first valid one.
    pub fn set_class(&mut self, class_name: &str) {
        self.class_name = class_name.to_string();
        self.section = self
            .sections()
            .first()
            .map(|s| s.to_string())
            .unwrap_or_default();
    }

    /// Returns `false` when `section` does not exist in the current class.
    pub fn set_section(&mut self, section: &str) -> bool {
        if !self.sections().contains(&section) {
            return false;
        }
        self.section = section.to_string();
        true
    }

    /// A scope with no section cannot be queried.
    pub fn is_complete(&self) -> bool {
        !self.section.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_table() {
        assert_eq!(sections_for("LKG"), ["A"]);
        assert_eq!(sections_for("3"), ["A", "B", "C"]);
        assert_eq!(sections_for("10"), ["A", "B"]);
        assert!(sections_for("11").is_empty());
    }

    #[test]
    fn every_class_has_sections() {
        for class in CLASS_NAMES {
            assert!(!sections_for(class).is_empty(), "{}", class);
        }
    }

    #[test]
    fn changing_class_resets_section() {
        let mut scope = ClassScope::new("1");
        assert!(scope.set_section("C"));
        scope.set_class("7");
        assert_eq!(scope.section(), "A");
        assert!(!scope.set_section("C"));
        assert_eq!(scope.section(), "A");
    }

    #[test]
    fn unknown_class_is_incomplete() {
        let scope = ClassScope::new("Grade 12");
        assert!(!scope.is_complete());
        assert!(ClassScope::default().is_complete());
    }
}
