use std::collections::HashMap;

use crate::core::models::BaseEntity;
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Unordered,
    IdAsc,
}

#[derive(Debug)]
struct Staged<T: BaseEntity> {
    pending: Vec<T>,
    next_id_start: i32,
    cleared: bool,
}

/// Snapshot produced by `prepare_commit`, applied atomically.
#[derive(Debug)]
pub struct PreparedRepo<T: BaseEntity> {
    pub items: HashMap<i32, T>,
    pub next_id: i32,
}

#[derive(Debug)]
pub struct Repository<T: BaseEntity> {
    items: HashMap<i32, T>,
    next_id: i32,
    staged: Option<Staged<T>>,
}

impl<T: BaseEntity> Default for Repository<T> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            next_id: 1,
            staged: None,
        }
    }
}

impl<T: BaseEntity> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn insert(&mut self, mut entity: T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        entity.set_id(id);
        if let Some(staged) = &mut self.staged {
            staged.pending.push(entity);
            staged
                .pending
                .last()
                .expect("staged entity missing after push")
        } else {
            self.items.insert(id, entity);
            self.items.get(&id).expect("inserted entity missing")
        }
    }

    pub fn get(&self, id: i32) -> Result<&T> {
        self.items
            .get(&id)
            .ok_or_else(|| Error::Parse(format!("Entity with id {} not found.", id)))
    }

    pub fn values(&self, sort: Sort) -> Vec<&T> {
        let mut v: Vec<&T> = self.items.values().collect();
        match sort {
            Sort::Unordered => {}
            Sort::IdAsc => v.sort_by_key(|e| e.id()),
        }
        v
    }

    pub fn query(&self) -> Query<'_, T> {
        Query::new(self)
    }

    /// Open a staging transaction. Inserts collect in the stage and only
    /// land in the repository on `apply_prepared`.
    pub fn begin_stage(&mut self, clear_existing: bool) -> Result<()> {
        if self.staged.is_some() {
            return Err(Error::Parse("Transaction already in progress.".into()));
        }
        if clear_existing {
            self.next_id = 1;
        }
        self.staged = Some(Staged {
            pending: Vec::new(),
            next_id_start: self.next_id,
            cleared: clear_existing,
        });
        Ok(())
    }

    pub fn discard_stage(&mut self) {
        if let Some(staged) = self.staged.take() {
            self.next_id = staged.next_id_start;
        }
    }

    pub fn prepare_commit(&self) -> Result<PreparedRepo<T>>
    where
        T: Clone,
    {
        let Some(staged) = &self.staged else {
            return Err(Error::Parse("No active transaction to commit.".into()));
        };

        let mut items = if staged.cleared {
            HashMap::new()
        } else {
            self.items.clone()
        };

        for entity in &staged.pending {
            let id = entity.id();
            if items.contains_key(&id) {
                return Err(Error::Parse(format!(
                    "Entity with id {} already exists.",
                    id
                )));
            }
            items.insert(id, entity.clone());
        }

        let next_id = items
            .keys()
            .max()
            .map(|m| m + 1)
            .unwrap_or(1)
            .max(self.next_id);

        Ok(PreparedRepo { items, next_id })
    }

    pub fn apply_prepared(&mut self, prepared: PreparedRepo<T>) {
        self.items = prepared.items;
        self.next_id = prepared.next_id;
        self.staged = None;
    }
}

/// Read-only filtered view over a repository.
pub struct Query<'a, T: BaseEntity> {
    store: &'a Repository<T>,
    filters: Vec<Box<dyn Fn(&T) -> bool + 'a>>,
    sort: Sort,
}

impl<'a, T: BaseEntity> Query<'a, T> {
    fn new(store: &'a Repository<T>) -> Self {
        Self {
            store,
            filters: Vec::new(),
            sort: Sort::Unordered,
        }
    }

    pub fn r#where(mut self, pred: impl Fn(&T) -> bool + 'a) -> Self {
        self.filters.push(Box::new(pred));
        self
    }

    pub fn order(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn collect(self) -> Vec<&'a T> {
        let mut ids: Vec<i32> = self
            .store
            .items
            .iter()
            .filter(|(_, e)| self.filters.iter().all(|f| f(e)))
            .map(|(id, _)| *id)
            .collect();
        match self.sort {
            Sort::Unordered => {}
            Sort::IdAsc => ids.sort(),
        }
        ids.into_iter()
            .filter_map(|id| self.store.items.get(&id))
            .collect()
    }

    pub fn exists(self) -> bool {
        if self.filters.is_empty() {
            !self.store.items.is_empty()
        } else {
            self.store
                .items
                .values()
                .any(|e| self.filters.iter().all(|f| f(e)))
        }
    }
}
