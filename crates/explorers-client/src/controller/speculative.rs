//! Speculative Mutation
//!
//! Apply a change to a row before the server confirms it, then either commit
//! the server's copy or put the old row back.

/// Snapshot of one row taken before a local change
#[derive(Debug, Clone)]
pub struct SpeculativeMutation<T> {
    key: String,
    before: T,
    key_of: fn(&T) -> &str,
}

impl<T: Clone> SpeculativeMutation<T> {
    /// Change the row with `key` in place; `None` when no such row exists
    pub fn apply(
        rows: &mut [T],
        key_of: fn(&T) -> &str,
        key: &str,
        change: impl FnOnce(&mut T),
    ) -> Option<Self> {
        let row = rows.iter_mut().find(|row| key_of(row) == key)?;
        let before = row.clone();
        change(row);
        Some(Self {
            key: key.to_string(),
            before,
            key_of,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The row as it was before the change
    pub fn snapshot(&self) -> &T {
        &self.before
    }

    /// Replace the row with the server's copy
    pub fn commit(self, rows: &mut [T], confirmed: T) {
        if let Some(row) = rows.iter_mut().find(|row| (self.key_of)(row) == self.key) {
            *row = confirmed;
        }
    }

    /// Restore the snapshot
    ///
    /// Works per row, so it still applies after the list was refetched; a row
    /// that has since left the page is not brought back.
    pub fn rollback(self, rows: &mut [T]) {
        if let Some(row) = rows.iter_mut().find(|row| (self.key_of)(row) == self.key) {
            *row = self.before;
        }
    }
}

/// A mutation the list controller has applied locally and is waiting on
#[derive(Debug)]
pub struct PendingMutation<T> {
    pub(crate) mutation: SpeculativeMutation<T>,
    /// Banner text if the server refuses
    pub(crate) failure_message: String,
}

impl<T: Clone> PendingMutation<T> {
    pub fn id(&self) -> &str {
        self.mutation.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        on: bool,
    }

    fn row_id(row: &Row) -> &str {
        &row.id
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: "a".into(), on: false },
            Row { id: "b".into(), on: true },
        ]
    }

    #[test]
    fn rollback_restores_the_snapshot() {
        let mut rows = rows();
        let m = SpeculativeMutation::apply(&mut rows, row_id, "a", |r| r.on = true).unwrap();
        assert!(rows[0].on);
        m.rollback(&mut rows);
        assert_eq!(rows, self::rows());
    }

    #[test]
    fn commit_takes_the_confirmed_row() {
        let mut rows = rows();
        let m = SpeculativeMutation::apply(&mut rows, row_id, "b", |r| r.on = false).unwrap();
        m.commit(&mut rows, Row { id: "b".into(), on: true });
        assert!(rows[1].on);
    }

    #[test]
    fn rollback_after_refetch_touches_only_its_row() {
        let mut rows = rows();
        let m = SpeculativeMutation::apply(&mut rows, row_id, "a", |r| r.on = true).unwrap();
        // A refetch replaced the page while the request was in flight
        let mut refetched = vec![
            Row { id: "c".into(), on: false },
            Row { id: "a".into(), on: true },
        ];
        m.rollback(&mut refetched);
        assert_eq!(refetched[0], Row { id: "c".into(), on: false });
        assert!(!refetched[1].on);
    }

    #[test]
    fn missing_row_yields_nothing() {
        let mut rows = rows();
        assert!(SpeculativeMutation::apply(&mut rows, row_id, "zz", |r| r.on = true).is_none());
    }
}
