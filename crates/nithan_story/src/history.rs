//! Session-scoped history of finished stories.

use nithan_core::HistoryItem;
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Finished stories for this session, newest first.
///
/// Items are only ever added; nothing is deduplicated, deleted or persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionHistory {
    items: VecDeque<HistoryItem>,
}

impl SessionHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item as the newest entry.
    pub fn push(&mut self, item: HistoryItem) {
        self.items.push_front(item);
    }

    /// Item at `index` (0 is newest).
    pub fn get(&self, index: usize) -> Option<&HistoryItem> {
        self.items.get(index)
    }

    /// Items, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryItem> {
        self.items.iter()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Totals for the dashboard.
    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            stories: self.items.len(),
            scenes: self.items.iter().map(|i| i.media().len()).sum(),
            total_audio: self.items.iter().map(HistoryItem::total_duration).sum(),
        }
    }
}

/// Session totals shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Stories generated
    pub stories: usize,
    /// Scenes across all stories
    pub scenes: usize,
    /// Narration length across all stories
    pub total_audio: Duration,
}

impl fmt::Display for DashboardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.total_audio.as_secs();
        write!(
            f,
            "{} stories, {} scenes, {}:{:02} of narration",
            self.stories,
            self.scenes,
            secs / 60,
            secs % 60
        )
    }
}
