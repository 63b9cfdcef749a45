//! What one rendering pass was asked to show

use serde::{Deserialize, Serialize};

use crate::query::QueryInput;

/// The toggle-controlled sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Returns,
    Fundamentals,
    News,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Returns, Section::Fundamentals, Section::News];

    /// Caption of the button that activates the section
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Returns => "Toggle Pricing Data",
            Self::Fundamentals => "Toggle Fundamental Data",
            Self::News => "Toggle News",
        }
    }

    /// Query parameter carrying the flag
    pub fn param(self) -> &'static str {
        match self {
            Self::Returns => "returns",
            Self::Fundamentals => "fundamentals",
            Self::News => "news",
        }
    }
}

/// Sections active in a pass. Any subset is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSet {
    pub returns: bool,
    pub fundamentals: bool,
    pub news: bool,
}

impl SectionSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            returns: true,
            fundamentals: true,
            news: true,
        }
    }

    pub fn with(mut self, section: Section) -> Self {
        self.set(section, true);
        self
    }

    pub fn set(&mut self, section: Section, active: bool) {
        match section {
            Section::Returns => self.returns = active,
            Section::Fundamentals => self.fundamentals = active,
            Section::News => self.news = active,
        }
    }

    pub fn contains(&self, section: Section) -> bool {
        match section {
            Section::Returns => self.returns,
            Section::Fundamentals => self.fundamentals,
            Section::News => self.news,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.returns || self.fundamentals || self.news)
    }

    pub fn iter(&self) -> impl Iterator<Item = Section> + '_ {
        Section::ALL.into_iter().filter(|s| self.contains(*s))
    }
}

/// Widget values plus the toggles pressed for this pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRequest {
    pub input: QueryInput,
    pub sections: SectionSet,
}

impl DashboardRequest {
    pub fn new(input: QueryInput) -> Self {
        Self {
            input,
            sections: SectionSet::none(),
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.set(section, true);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_set_subsets() {
        let set = SectionSet::none().with(Section::News).with(Section::Returns);
        assert!(set.contains(Section::News));
        assert!(!set.contains(Section::Fundamentals));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Section::Returns, Section::News]);

        assert!(SectionSet::none().is_empty());
        assert_eq!(SectionSet::all().iter().count(), 3);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Section::Returns.toggle_label(), "Toggle Pricing Data");
        assert_eq!(Section::Fundamentals.param(), "fundamentals");
    }
}
