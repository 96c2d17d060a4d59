use chrono::Utc;
use log::debug;

use crate::model::{Notification, NotificationKind};
use crate::ops::filter::{contains_ci, normalized_needle};
use crate::ops::store::{IdSequence, StoreError};

/// Which notifications to show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    pub kind: Option<NotificationKind>,
    /// `Some(false)` for unread only, `Some(true)` for read only
    pub read: Option<bool>,
    /// Substring of title or message
    pub search: Option<String>,
}

/// Newest-first notification list
#[derive(Debug, Clone)]
pub struct NotificationStore {
    items: Vec<Notification>,
    ids: IdSequence,
    dirty: bool,
}

impl NotificationStore {
    pub fn new(items: Vec<Notification>) -> Self {
        let ids = IdSequence::after("n", items.iter().map(|n| n.id.as_str()));
        NotificationStore {
            items,
            ids,
            dirty: false,
        }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Force the next save to write this collection.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Prepend a new unread notification and return it.
    pub fn add(
        &mut self,
        kind: NotificationKind,
        title: &str,
        message: &str,
        href: Option<String>,
    ) -> Result<&Notification, StoreError> {
        let id = self.ids.next_id()?;
        debug!("notification {} added: {}", id, title);
        self.items.insert(
            0,
            Notification {
                id,
                kind,
                title: title.to_string(),
                message: message.to_string(),
                read: false,
                created_at: Utc::now(),
                href,
            },
        );
        self.dirty = true;
        Ok(&self.items[0])
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        self.set_read(id, true)
    }

    pub fn mark_unread(&mut self, id: &str) -> bool {
        self.set_read(id, false)
    }

    /// Returns how many notifications changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for n in self.items.iter_mut().filter(|n| !n.read) {
            n.read = true;
            changed += 1;
        }
        if changed > 0 {
            self.dirty = true;
        }
        changed
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        let removed = self.items.len() != before;
        self.dirty |= removed;
        removed
    }

    /// Returns how many were removed.
    pub fn delete_all_read(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|n| !n.read);
        let removed = before - self.items.len();
        self.dirty |= removed > 0;
        removed
    }

    pub fn filter(&self, filter: &NotificationFilter) -> Vec<&Notification> {
        let needle = normalized_needle(filter.search.as_deref());
        self.items
            .iter()
            .filter(|n| filter.kind.is_none_or(|k| n.kind == k))
            .filter(|n| filter.read.is_none_or(|r| n.read == r))
            .filter(|n| match &needle {
                Some(s) => contains_ci(&n.title, s) || contains_ci(&n.message, s),
                None => true,
            })
            .collect()
    }

    fn set_read(&mut self, id: &str, read: bool) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                if n.read != read {
                    n.read = read;
                    self.dirty = true;
                }
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn store() -> NotificationStore {
        NotificationStore::new(seed::notifications())
    }

    #[test]
    fn add_prepends_unread() {
        let mut s = store();
        let id = s
            .add(NotificationKind::Success, "Deployed", "v1.2 is live", None)
            .unwrap()
            .id
            .clone();
        assert_eq!(id, "n-006");
        assert_eq!(s.items()[0].id, "n-006");
        assert!(!s.items()[0].read);
        assert_eq!(s.unread_count(), 4);
        assert!(s.is_dirty());
    }

    #[test]
    fn read_state_round_trip() {
        let mut s = store();
        assert!(s.mark_read("n-005"));
        assert!(s.get("n-005").unwrap().read);
        assert!(s.mark_unread("n-005"));
        assert!(!s.get("n-005").unwrap().read);
        assert!(!s.mark_read("n-404"));
    }

    #[test]
    fn marking_unchanged_state_stays_clean() {
        let mut s = store();
        assert!(s.mark_read("n-001"));
        assert!(!s.is_dirty());
    }

    #[test]
    fn mark_all_read_counts_changes() {
        let mut s = store();
        assert_eq!(s.mark_all_read(), 3);
        assert_eq!(s.unread_count(), 0);
        assert_eq!(s.mark_all_read(), 0);
    }

    #[test]
    fn delete_and_delete_all_read() {
        let mut s = store();
        assert!(s.delete("n-005"));
        assert!(!s.delete("n-005"));
        assert_eq!(s.delete_all_read(), 2);
        assert!(s.items().iter().all(|n| !n.read));
        assert_eq!(s.items().len(), 2);
    }

    #[test]
    fn deleted_newest_id_is_not_reused() {
        let mut s = store();
        let first = s
            .add(NotificationKind::Info, "Ping", "one", None)
            .unwrap()
            .id
            .clone();
        assert!(s.delete(&first));
        let second = s.add(NotificationKind::Info, "Ping", "two", None).unwrap();
        assert_eq!(first, "n-006");
        assert_eq!(second.id, "n-007");
    }

    #[test]
    fn filter_by_kind_read_and_search() {
        let s = store();
        let unread = s.filter(&NotificationFilter {
            read: Some(false),
            ..Default::default()
        });
        assert_eq!(unread.len(), 3);

        let warnings = s.filter(&NotificationFilter {
            kind: Some(NotificationKind::Warning),
            ..Default::default()
        });
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].id, "n-003");

        let calendar = s.filter(&NotificationFilter {
            search: Some("CALENDAR".into()),
            ..Default::default()
        });
        assert_eq!(calendar.len(), 1);
        assert_eq!(calendar[0].id, "n-002");
    }
}
