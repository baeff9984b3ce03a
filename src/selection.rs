//! Ingredient, allergy and dietary-restriction selections.
//!
//! Entries are trimmed and lower-cased on the way in, so a list never holds
//! two spellings of the same value.

/// Result of [`SelectionList::add`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The normalised value that was appended
    Added(String),
    /// Input was empty after trimming
    Empty,
    /// An equal entry (ignoring case) is already present
    Duplicate(String),
}

/// Ordered list of unique, normalised entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionList {
    items: Vec<String>,
}

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: &str) -> AddOutcome {
        let normalized = normalize(value);
        if normalized.is_empty() {
            return AddOutcome::Empty;
        }
        if self.contains(&normalized) {
            return AddOutcome::Duplicate(normalized);
        }
        self.items.push(normalized.clone());
        AddOutcome::Added(normalized)
    }

    /// Removes the matching entry; returns `false` when there was nothing to remove.
    pub fn remove(&mut self, value: &str) -> bool {
        let normalized = normalize(value);
        let before = self.items.len();
        self.items.retain(|item| *item != normalized);
        self.items.len() != before
    }

    pub fn contains(&self, value: &str) -> bool {
        let normalized = normalize(value);
        self.items.iter().any(|item| *item == normalized)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SelectionList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = SelectionList::new();
        for value in iter {
            list.add(value.as_ref());
        }
        list
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Everything the user has picked on the search and preferences forms
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub ingredients: SelectionList,
    pub allergies: SelectionList,
    pub restrictions: SelectionList,
}
