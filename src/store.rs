use std::sync::Arc;

use crate::error::{PersistenceError, StoreError};
use crate::persistence::Persistence;
use crate::types::sort::SortCriterion;
use crate::types::workout::Workout;

pub const WORKOUTS_KEY: &str = "workouts";
pub const SORT_KEY: &str = "sortBy";

/// Ordered, id-unique collection of workouts mirrored to persistence on every mutation.
pub struct WorkoutStore {
    records: Vec<Workout>,
    criterion: SortCriterion,
    persistence: Arc<dyn Persistence>,
}

impl WorkoutStore {
    pub fn empty(persistence: Arc<dyn Persistence>) -> Self {
        Self {
            records: Vec::new(),
            criterion: SortCriterion::default(),
            persistence,
        }
    }

    /// Restores records and the last sort criterion. A missing entry yields an
    /// empty store; unreadable JSON is an error, never an empty fallback.
    pub fn load(persistence: Arc<dyn Persistence>) -> Result<Self, PersistenceError> {
        let criterion = match persistence.load(SORT_KEY)? {
            Some(token) => SortCriterion::from_token(&token).unwrap_or_else(|| {
                tracing::warn!("Ignoring unknown sort preference '{}'", token);
                SortCriterion::default()
            }),
            None => SortCriterion::default(),
        };

        let records = match persistence.load(WORKOUTS_KEY)? {
            Some(json) => Self::deserialize(&json)?,
            None => Vec::new(),
        };

        let mut store = Self {
            records,
            criterion,
            persistence,
        };
        store.reorder();

        tracing::info!(
            "Loaded {} workouts sorted by {}",
            store.records.len(),
            store.criterion.as_token()
        );
        Ok(store)
    }

    pub fn add(&mut self, record: Workout) -> Result<(), StoreError> {
        if self.get(record.id()).is_some() {
            return Err(StoreError::DuplicateId(record.id().to_string()));
        }

        let id = record.id().to_string();
        self.records.push(record);
        self.reorder();

        if let Err(err) = self.persist() {
            self.records.retain(|w| w.id() != id);
            return Err(err.into());
        }
        Ok(())
    }

    /// On a failed write the previous criterion and order are restored.
    pub fn sort_by(&mut self, criterion: SortCriterion) -> Result<(), PersistenceError> {
        let previous = self.criterion;
        self.criterion = criterion;
        self.reorder();

        // Load re-sorts by the stored token, so a workouts write that landed
        // before a failed token write still reloads in the previous order.
        let written = self
            .persist()
            .and_then(|()| self.persistence.save(SORT_KEY, criterion.as_token()));
        if let Err(err) = written {
            self.criterion = previous;
            self.reorder();
            tracing::warn!("Sort by {} not saved: {}", criterion.as_token(), err);
            return Err(err);
        }
        Ok(())
    }

    pub fn serialize(&self) -> Result<String, PersistenceError> {
        serde_json::to_string(&self.records).map_err(PersistenceError::Encode)
    }

    /// Reads records back as stored. Derived metrics come from the data, the
    /// constructors are not re-run.
    pub fn deserialize(json: &str) -> Result<Vec<Workout>, PersistenceError> {
        serde_json::from_str(json).map_err(PersistenceError::Corrupt)
    }

    /// Drops every persisted and in-memory workout. The sort preference survives.
    pub fn reset(&mut self) -> Result<(), PersistenceError> {
        self.persistence.remove(WORKOUTS_KEY)?;
        self.records.clear();
        tracing::info!("Workout store reset");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Workout> {
        self.records.iter().find(|w| w.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workout> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Workout] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn criterion(&self) -> SortCriterion {
        self.criterion
    }

    // Ties fall back to creation order, so the result depends only on the
    // active criterion and never on earlier sorts.
    fn reorder(&mut self) {
        let key = sort_key(self.criterion);
        self.records.sort_by(|a, b| {
            key(b)
                .total_cmp(&key(a))
                .then_with(|| a.created_at().cmp(&b.created_at()))
        });
    }

    fn persist(&self) -> Result<(), PersistenceError> {
        let json = self.serialize()?;
        self.persistence.save(WORKOUTS_KEY, &json)
    }
}

fn sort_key(criterion: SortCriterion) -> fn(&Workout) -> f64 {
    match criterion {
        SortCriterion::Distance => Workout::distance_km,
        SortCriterion::Duration => Workout::duration_min,
    }
}
