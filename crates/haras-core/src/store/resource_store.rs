// ── Generic resource store ──
//
// List cache, selected record, filters and pagination for one resource
// type. Every mutation of the state publishes a fresh snapshot on a
// `watch` channel. Fetches are numbered; only the most recently issued
// one may write the list.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use haras_api::{ApiClient, Page, Resource, ResourceClient};
use serde_json::{Map, Value};
use tokio::sync::{RwLock, watch};
use tracing::{debug, info};

use super::filter::FilterSet;
use super::pagination::{FetchOverrides, Pagination, PaginationUpdate};
use crate::error::CoreError;
use crate::form::prepare_form_data;

/// Observable state of one store.
#[derive(Debug, Clone)]
pub struct StoreState<T> {
    /// Rows of the current page.
    pub items: Vec<T>,
    pub current: Option<T>,
    pub filters: FilterSet,
    pub pagination: Pagination,
    pub loading: bool,
}

struct StoreInner<T> {
    client: ResourceClient<T>,
    default_filters: FilterSet,
    state: RwLock<StoreState<T>>,
    snapshot: watch::Sender<Arc<StoreState<T>>>,
    generation: AtomicU64,
}

/// Cheaply cloneable store for resource `T`.
pub struct ResourceStore<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> Clone for ResourceStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Resource> ResourceStore<T> {
    /// Store with the resource's default pagination and the given filter
    /// fields (all inactive until set).
    pub fn new(api: ApiClient, default_filters: FilterSet) -> Self {
        let state = StoreState {
            items: Vec::new(),
            current: None,
            filters: default_filters.clone(),
            pagination: Pagination::for_spec(&T::SPEC),
            loading: false,
        };
        let (snapshot, _) = watch::channel(Arc::new(state.clone()));
        Self {
            inner: Arc::new(StoreInner {
                client: ResourceClient::new(api),
                default_filters,
                state: RwLock::new(state),
                snapshot,
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn client(&self) -> &ResourceClient<T> {
        &self.inner.client
    }

    pub fn snapshot(&self) -> Arc<StoreState<T>> {
        self.inner.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<StoreState<T>>> {
        self.inner.snapshot.subscribe()
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// Load one page using the store's filters and pagination, with
    /// `overrides` applied for this call.
    ///
    /// The page is always returned to the caller, but it only replaces the
    /// cached rows and pagination when no newer fetch was started in the
    /// meantime.
    pub async fn fetch(&self, overrides: FetchOverrides) -> Result<Page<T>, CoreError> {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = {
            let mut state = self.inner.state.write().await;
            state.loading = true;
            self.publish(&state);
            overrides.to_query(&state.pagination, &state.filters)
        };

        let result = self.inner.client.list(&query).await;

        let mut state = self.inner.state.write().await;
        let latest = self.inner.generation.load(Ordering::SeqCst) == generation;
        if latest {
            state.loading = false;
        }

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                self.publish(&state);
                return Err(e.into());
            }
        };

        if latest {
            state.items.clone_from(&page.items);
            state.pagination.page = page.page;
            state.pagination.rows_number = page.total;
            state.pagination.rows_per_page = page.limit;
        } else {
            debug!(
                resource = T::SPEC.name,
                generation, "discarding superseded list response"
            );
        }
        self.publish(&state);
        Ok(page)
    }

    /// Fetch one record and make it the current selection.
    pub async fn get(&self, id: i64) -> Result<T, CoreError> {
        let record = self.inner.client.get(id).await.map_err(|e| {
            CoreError::from(e).or_not_found(T::SPEC.label, id)
        })?;
        let mut state = self.inner.state.write().await;
        state.current = Some(record.clone());
        self.publish(&state);
        Ok(record)
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Normalize and submit a new record, then reload the current page.
    pub async fn create(&self, form: Map<String, Value>) -> Result<T, CoreError> {
        let body = Value::Object(prepare_form_data(form, T::SPEC.date_fields));
        let created = self.inner.client.create(&body).await?;
        info!(resource = T::SPEC.name, id = created.id(), "record created");
        self.fetch(FetchOverrides::default()).await?;
        Ok(created)
    }

    pub async fn update(&self, id: i64, form: Map<String, Value>) -> Result<T, CoreError> {
        let body = Value::Object(prepare_form_data(form, T::SPEC.date_fields));
        let updated = self
            .inner
            .client
            .update(id, &body)
            .await
            .map_err(|e| CoreError::from(e).or_not_found(T::SPEC.label, id))?;
        info!(resource = T::SPEC.name, id, "record updated");
        {
            let mut state = self.inner.state.write().await;
            if state.current.as_ref().is_some_and(|c| c.id() == id) {
                state.current = Some(updated.clone());
                self.publish(&state);
            }
        }
        self.fetch(FetchOverrides::default()).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.inner
            .client
            .delete(id)
            .await
            .map_err(|e| CoreError::from(e).or_not_found(T::SPEC.label, id))?;
        info!(resource = T::SPEC.name, id, "record deleted");
        {
            let mut state = self.inner.state.write().await;
            if state.current.as_ref().is_some_and(|c| c.id() == id) {
                state.current = None;
                self.publish(&state);
            }
        }
        self.fetch(FetchOverrides::default()).await?;
        Ok(())
    }

    // ── Local state ─────────────────────────────────────────────────

    /// Overlay `filters` on the current ones. Takes effect on the next
    /// fetch.
    pub async fn set_filters(&self, filters: &FilterSet) {
        let mut state = self.inner.state.write().await;
        state.filters.merge(filters);
        self.publish(&state);
    }

    /// Back to the default (inactive) filters.
    pub async fn clear_filters(&self) {
        let mut state = self.inner.state.write().await;
        state.filters = self.inner.default_filters.clone();
        self.publish(&state);
    }

    pub async fn set_pagination(&self, update: &PaginationUpdate) {
        let mut state = self.inner.state.write().await;
        state.pagination.apply(update);
        self.publish(&state);
    }

    /// Set or clear the current record without a request.
    pub async fn select(&self, record: Option<T>) {
        let mut state = self.inner.state.write().await;
        state.current = record;
        self.publish(&state);
    }

    /// Find a loaded row by id.
    pub async fn find(&self, id: i64) -> Option<T> {
        let state = self.inner.state.read().await;
        state.items.iter().find(|r| r.id() == id).cloned()
    }

    fn publish(&self, state: &StoreState<T>) {
        // `send_replace` stores the value even with no receivers.
        self.inner.snapshot.send_replace(Arc::new(state.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haras_api::models::Terreno;

    #[tokio::test]
    #[allow(clippy::unwrap_used)]
    async fn local_state_changes_are_published() {
        let api = ApiClient::from_reqwest(
            "http://localhost:1",
            reqwest::Client::new(),
            haras_api::SessionHandle::in_memory(),
        )
        .unwrap();
        let store: ResourceStore<Terreno> =
            ResourceStore::new(api, FilterSet::new().with("nome", "").with("status", ""));
        let mut rx = store.subscribe();

        store
            .set_filters(&FilterSet::new().with("status", "OCUPADO"))
            .await;
        assert!(rx.has_changed().unwrap());
        let snap = rx.borrow_and_update().clone();
        assert_eq!(
            snap.filters.to_query(),
            vec![("status".to_owned(), "OCUPADO".to_owned())]
        );

        store.clear_filters().await;
        assert!(store.snapshot().filters.to_query().is_empty());

        store
            .set_pagination(&PaginationUpdate {
                page: Some(3),
                ..PaginationUpdate::default()
            })
            .await;
        assert_eq!(store.snapshot().pagination.page, 3);
        assert_eq!(store.snapshot().pagination.rows_per_page, 10);
    }
}
