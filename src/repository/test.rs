//! In-memory resource client recording every call, for controller tests.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Resource;
use crate::domain::types::RecordId;
use crate::dto::envelope::{ApiMessage, Saved};
use crate::pagination::Page;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ListQuery, ResourceReader, ResourceWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(ListQuery),
    Get(RecordId),
    Create,
    Update(RecordId),
    Delete(RecordId),
    DeleteMany(Vec<RecordId>),
}

pub struct TestRepository<T> {
    records: Mutex<Vec<T>>,
    calls: Mutex<Vec<Call>>,
    failure: Mutex<Option<RepositoryError>>,
    next_id: Mutex<i64>,
}

impl<T: Resource> TestRepository<T> {
    pub fn new(records: Vec<T>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| r.id())
            .map(RecordId::get)
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            records: Mutex::new(records),
            calls: Mutex::new(vec![]),
            failure: Mutex::new(None),
            next_id: Mutex::new(next_id),
        }
    }

    /// Makes the next call fail with `err`.
    pub fn fail_next(&self, err: RepositoryError) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn records(&self) -> Vec<T> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record_call(&self, call: Call) -> RepositoryResult<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        match self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn matches_filter(record: &T, filter: &str) -> bool {
        let Ok(Value::Object(map)) = serde_json::to_value(record) else {
            return false;
        };
        let needle = filter.to_lowercase();
        T::FILTER_FIELDS.iter().any(|field| match map.get(*field) {
            Some(Value::String(value)) => value.to_lowercase().contains(&needle),
            _ => false,
        })
    }

    fn not_found(id: RecordId) -> RepositoryError {
        RepositoryError::NotFound(ApiMessage::new(
            "Not found",
            format!("No {} record with id {id}", T::PATH),
        ))
    }
}

fn with_id<T: Resource>(record: &T, id: RecordId) -> RepositoryResult<T> {
    let mut value = serde_json::to_value(record)?;
    if let Value::Object(map) = &mut value {
        map.insert("id".to_string(), Value::from(id.get()));
    }
    Ok(serde_json::from_value(value)?)
}

#[async_trait]
impl<T: Resource> ResourceReader<T> for TestRepository<T> {
    async fn list(&self, query: &ListQuery) -> RepositoryResult<Page<T>> {
        self.record_call(Call::List(query.clone()))?;

        let records = self.records();
        let matching: Vec<T> = match &query.filter {
            Some(filter) => records
                .into_iter()
                .filter(|r| Self::matches_filter(r, filter))
                .collect(),
            None => records,
        };
        let total = matching.len();
        let per_page = query.pagination.per_page;
        let page = matching
            .into_iter()
            .skip((query.pagination.page - 1) * per_page)
            .take(per_page)
            .collect();

        Ok(Page::new(page, query.pagination.page, per_page, total))
    }

    async fn get(&self, id: RecordId) -> RepositoryResult<T> {
        self.record_call(Call::Get(id))?;

        self.records()
            .into_iter()
            .find(|r| r.id() == Some(id))
            .ok_or_else(|| Self::not_found(id))
    }
}

#[async_trait]
impl<T: Resource> ResourceWriter<T> for TestRepository<T> {
    async fn create(&self, record: &T) -> RepositoryResult<Saved<T>> {
        self.record_call(Call::Create)?;

        let id = {
            let mut next_id = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
            let id = RecordId::new(*next_id).map_err(|e| RepositoryError::Decode(e.to_string()))?;
            *next_id += 1;
            id
        };
        let stored = with_id(record, id)?;
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(stored.clone());

        Ok(Saved {
            data: stored,
            msg: Some(ApiMessage::new("Created", "The record was created.")),
        })
    }

    async fn update(&self, id: RecordId, record: &T) -> RepositoryResult<Saved<T>> {
        self.record_call(Call::Update(id))?;

        let stored = with_id(record, id)?;
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = records
            .iter_mut()
            .find(|r| r.id() == Some(id))
            .ok_or_else(|| Self::not_found(id))?;
        *slot = stored.clone();

        Ok(Saved {
            data: stored,
            msg: Some(ApiMessage::new("Updated", "The record was updated.")),
        })
    }

    async fn delete(&self, id: RecordId) -> RepositoryResult<Option<ApiMessage>> {
        self.record_call(Call::Delete(id))?;

        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let before = records.len();
        records.retain(|r| r.id() != Some(id));
        if records.len() == before {
            return Err(Self::not_found(id));
        }

        Ok(Some(ApiMessage::new("Deleted", "The record was deleted.")))
    }

    async fn delete_many(&self, ids: &[RecordId]) -> RepositoryResult<Option<ApiMessage>> {
        self.record_call(Call::DeleteMany(ids.to_vec()))?;

        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|r| !r.id().is_some_and(|id| ids.contains(&id)));

        Ok(Some(ApiMessage::new("Deleted", "The records were deleted.")))
    }
}
