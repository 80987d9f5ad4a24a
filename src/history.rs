use std::sync::{Mutex, MutexGuard};

/// Append-only list of generated recipe titles for this process.
///
/// Appends take a mutex so overlapping generations never corrupt the list.
/// Nothing is evicted and nothing is persisted.
#[derive(Debug, Default)]
pub struct RecipeHistory {
    titles: Mutex<Vec<String>>,
}

impl RecipeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, title: impl Into<String>) {
        self.lock().push(title.into());
    }

    /// The last `n` titles, most recent first
    pub fn recent(&self, n: usize) -> Vec<String> {
        self.lock().iter().rev().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        // Pushes are atomic, so a poisoned list is still consistent
        self.titles.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Shorten a title for display, cutting at a char boundary
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    match title.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &title[..cut]),
        None => title.to_string(),
    }
}
