//! Ordered note store.

use crate::model::note::{Note, NoteId};
use std::collections::HashSet;

/// Active notes in insertion order.
///
/// Lookups are linear; boards hold tens of notes, not thousands.
#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `note`, replacing any existing note with the same ID in place.
    pub fn insert(&mut self, note: Note) {
        match self.position_of(note.id) {
            Some(index) => self.notes[index] = note,
            None => self.notes.push(note),
        }
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn get_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| note.id == id)
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn remove(&mut self, id: NoteId) -> Option<Note> {
        self.position_of(id).map(|index| self.notes.remove(index))
    }

    /// Removes every note in `ids`, returning the removed IDs in store order.
    pub fn remove_all(&mut self, ids: &HashSet<NoteId>) -> Vec<NoteId> {
        let mut removed = Vec::new();
        self.notes.retain(|note| {
            if ids.contains(&note.id) {
                removed.push(note.id);
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Note> {
        self.notes.iter_mut()
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn as_mut_slice(&mut self) -> &mut [Note] {
        &mut self.notes
    }

    /// IDs of notes currently flagged as selected, in store order.
    pub fn selected_ids(&self) -> Vec<NoteId> {
        self.notes
            .iter()
            .filter(|note| note.is_selected)
            .map(|note| note.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    fn position_of(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::NoteStore;
    use crate::model::note::{Note, PaperColor};
    use chrono::Utc;
    use std::collections::HashSet;

    fn note(text: &str) -> Note {
        Note::print(text, PaperColor::Yellow, Utc::now(), 50).unwrap()
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut store = NoteStore::new();
        let (a, b, c) = (note("a"), note("b"), note("c"));
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);
        store.insert(a);
        store.insert(b);
        store.insert(c);

        assert!(store.remove(b_id).is_some());
        let ids: Vec<_> = store.as_slice().iter().map(|note| note.id).collect();
        assert_eq!(ids, vec![a_id, c_id]);
        assert!(store.remove(b_id).is_none());
    }

    #[test]
    fn remove_all_reports_only_present_ids() {
        let mut store = NoteStore::new();
        let (a, b) = (note("a"), note("b"));
        let (a_id, b_id) = (a.id, b.id);
        store.insert(a);
        store.insert(b);

        let stray = uuid::Uuid::new_v4();
        let removed = store.remove_all(&HashSet::from([b_id, stray]));
        assert_eq!(removed, vec![b_id]);
        assert!(store.contains(a_id));
        assert_eq!(store.len(), 1);
    }
}
