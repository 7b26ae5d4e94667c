//! Insertion-ordered record collection.
//!
//! Lookups are linear scans by id. Collections hold dozens to hundreds of
//! records, so no index is kept; listing order is the insertion order.

use std::{collections::HashSet, fmt, hash::Hash};

use crate::{EngineError, ResultEngine, ids::short_id};

/// A record that can live in a [`Collection`].
pub(crate) trait Record {
    type Id: Clone + Eq + Hash + fmt::Display + From<String>;

    /// Human readable kind, used in error messages.
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;
}

#[derive(Debug)]
pub(crate) struct Collection<T: Record> {
    records: Vec<T>,
    /// Every id ever handed out, including those of deleted records.
    issued: HashSet<T::Id>,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            issued: HashSet::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    /// Reserve an id that was never issued by this collection.
    pub fn issue_id(&mut self) -> T::Id {
        loop {
            let id = T::Id::from(short_id());
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    pub fn push(&mut self, record: T) {
        self.issued.insert(record.id().clone());
        self.records.push(record);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.find(id).is_some()
    }

    pub fn get(&self, id: &T::Id) -> ResultEngine<&T> {
        self.find(id).ok_or_else(|| not_found::<T>(id))
    }

    pub fn get_mut(&mut self, id: &T::Id) -> ResultEngine<&mut T> {
        self.records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| not_found::<T>(id))
    }

    pub fn remove(&mut self, id: &T::Id) -> ResultEngine<T> {
        match self.records.iter().position(|record| record.id() == id) {
            Some(index) => Ok(self.records.remove(index)),
            None => Err(not_found::<T>(id)),
        }
    }
}

fn not_found<T: Record>(id: &T::Id) -> EngineError {
    EngineError::KeyNotFound(format!("{} {id}", T::KIND))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Note {
        id: String,
        body: &'static str,
    }

    impl Record for Note {
        type Id = String;
        const KIND: &'static str = "note";

        fn id(&self) -> &String {
            &self.id
        }
    }

    fn note(collection: &mut Collection<Note>, body: &'static str) -> String {
        let id = collection.issue_id();
        collection.push(Note {
            id: id.clone(),
            body,
        });
        id
    }

    #[test]
    fn keeps_insertion_order() {
        let mut notes = Collection::default();
        let first = note(&mut notes, "first");
        let second = note(&mut notes, "second");

        let ids: Vec<_> = notes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn removed_ids_are_not_issued_again() {
        let mut notes = Collection::default();
        let id = note(&mut notes, "gone");
        notes.remove(&id).unwrap();

        assert!(notes.as_slice().is_empty());
        assert!(notes.issued.contains(&id));
        for _ in 0..64 {
            assert_ne!(notes.issue_id(), id);
        }
    }

    #[test]
    fn missing_ids_report_kind() {
        let mut notes: Collection<Note> = Collection::default();
        assert_eq!(
            notes.remove(&"nope".to_string()),
            Err(EngineError::KeyNotFound("note nope".to_string()))
        );
    }

    #[test]
    fn pushed_ids_count_as_issued() {
        let mut notes = Collection::default();
        notes.push(Note {
            id: "fixed".to_string(),
            body: "seeded",
        });
        assert!(notes.contains(&"fixed".to_string()));
        assert!(notes.issued.contains("fixed"));
    }
}
