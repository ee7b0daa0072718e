//! Day-bucketed folder view over completed notes.

use crate::model::note::CompletedNote;
use chrono::{NaiveDate, TimeZone};
use serde::Serialize;
use std::collections::BTreeMap;

const FOLDER_KEY_FORMAT: &str = "%Y-%m-%d";

/// One calendar day of completed notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    pub date: NaiveDate,
    /// Newest `completed_at` first.
    pub items: Vec<CompletedNote>,
}

impl Folder {
    /// `YYYY-MM-DD` key used for display and search.
    pub fn key(&self) -> String {
        self.date.format(FOLDER_KEY_FORMAT).to_string()
    }

    /// Whether this folder survives the archive search `query`.
    ///
    /// The date key is matched verbatim; note text case-insensitively.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() || self.key().contains(query) {
            return true;
        }
        let needle = query.to_lowercase();
        self.items
            .iter()
            .any(|item| item.text.to_lowercase().contains(&needle))
    }
}

/// Groups `completed` by local calendar day in `tz`.
///
/// Folders are ordered newest day first.
pub fn build_folders<Tz: TimeZone>(completed: &[CompletedNote], tz: &Tz) -> Vec<Folder> {
    let mut days: BTreeMap<NaiveDate, Vec<CompletedNote>> = BTreeMap::new();
    for item in completed {
        let day = item.completed_at.with_timezone(tz).date_naive();
        days.entry(day).or_default().push(item.clone());
    }

    days.into_iter()
        .rev()
        .map(|(date, mut items)| {
            items.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
            Folder { date, items }
        })
        .collect()
}

/// Keeps folders that match `query`; an empty query keeps everything.
pub fn filter_folders(folders: Vec<Folder>, query: &str) -> Vec<Folder> {
    folders
        .into_iter()
        .filter(|folder| folder.matches(query))
        .collect()
}
