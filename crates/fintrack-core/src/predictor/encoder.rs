//! Category label encoder

use std::collections::BTreeMap;

use serde::Serialize;

/// Immutable category → integer code table.
///
/// Codes are the positions of the categories in sorted order, so fitting the
/// same set of names always yields the same table. Built once at training
/// time and owned by the model that was trained with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEncoder {
    codes: BTreeMap<String, usize>,
}

impl CategoryEncoder {
    pub fn fit<'a>(categories: impl IntoIterator<Item = &'a str>) -> Self {
        let mut names: Vec<&str> = categories.into_iter().collect();
        names.sort_unstable();
        names.dedup();

        let codes = names
            .into_iter()
            .enumerate()
            .map(|(code, name)| (name.to_string(), code))
            .collect();
        Self { codes }
    }

    /// Code for a category seen during fit
    pub fn encode(&self, category: &str) -> Option<usize> {
        self.codes.get(category).copied()
    }

    /// Fitted categories in code order
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
