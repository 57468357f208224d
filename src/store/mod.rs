//! Generic paginated resource store.
//!
//! One [`ResourceStore`] caches the current page of one backend resource and
//! exposes the fetch/create/update/change-status operations every admin list page
//! uses. Reads degrade to the mock catalog; writes surface their errors.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::client::ApiClient;
use crate::errors::AppError;
use crate::mock;
use crate::models::{PageEnvelope, PageQuery, PageWindow};

/// Endpoint receiving status toggles for every resource type.
pub const CHANGE_STATUS_PATH: &str = "change-status";

/// Form draft submitted by a create/edit dialog.
pub trait FormDraft: Serialize + Clone + Default + fmt::Debug + Send + Sync + 'static {
    /// Human-readable problems with the draft; empty when it can be submitted.
    fn validate(&self) -> Vec<String>;
}

/// A backend entity type managed by a [`ResourceStore`].
pub trait Resource: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Tag sent with status changes, e.g. `"Salon"`.
    const TYPE_NAME: &'static str;
    /// Collection path relative to the API base URL, e.g. `"salons"`.
    const ENDPOINT: &'static str;

    /// Record shape as sent by the backend.
    type Raw: DeserializeOwned + Send;
    /// Editable subset submitted on create/update.
    type Draft: FormDraft;

    fn from_raw(raw: Self::Raw) -> Self;

    fn id(&self) -> &str;

    fn is_active(&self) -> bool;

    /// Fields matched by client-side search over the mock catalog.
    fn search_fields(&self) -> Vec<&str>;

    /// Prefilled draft for the edit dialog.
    fn to_draft(&self) -> Self::Draft;

    fn mock_catalog() -> Vec<Self>;

    /// Case-insensitive substring match; `needle` must already be lowercase.
    fn matches_search(&self, needle: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// When a read falls back to the mock catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Only on network, HTTP or decoding failures.
    FailureOnly,
    /// Also when an unfiltered fetch succeeds with zero records.
    #[default]
    FailureOrEmpty,
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "failure" | "failure-only" => Ok(FallbackPolicy::FailureOnly),
            "failure-or-empty" | "empty" => Ok(FallbackPolicy::FailureOrEmpty),
            other => Err(format!("Unknown fallback policy: {:?}", other)),
        }
    }
}

/// Where the records currently held came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Mock,
}

/// Whole-state snapshot published to subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState<R> {
    pub records: Vec<R>,
    pub window: PageWindow,
    pub is_loading: bool,
    pub source: DataSource,
    /// Search term the records were fetched with.
    pub search: String,
}

impl<R> Default for StoreState<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            window: PageWindow::default(),
            is_loading: false,
            source: DataSource::Live,
            search: String::new(),
        }
    }
}

/// What happened to a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result was written to the store.
    Applied(DataSource),
    /// A newer fetch started before this one finished; its result was dropped.
    Superseded,
    /// The store was disposed.
    Disposed,
}

/// Client-side cache and operations for one resource type.
pub struct ResourceStore<R: Resource> {
    client: ApiClient,
    policy: FallbackPolicy,
    state: watch::Sender<StoreState<R>>,
    sequence: AtomicU64,
    inflight: Mutex<CancellationToken>,
    lifetime: CancellationToken,
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(client: ApiClient, policy: FallbackPolicy) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        let lifetime = CancellationToken::new();
        Self {
            client,
            policy,
            state,
            sequence: AtomicU64::new(0),
            inflight: Mutex::new(lifetime.child_token()),
            lifetime,
        }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> StoreState<R> {
        self.state.borrow().clone()
    }

    /// Receive a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<StoreState<R>> {
        self.state.subscribe()
    }

    pub fn is_disposed(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    /// Cancel any in-flight fetch; the store ignores every later fetch.
    pub fn dispose(&self) {
        self.lifetime.cancel();
        self.state.send_modify(|state| state.is_loading = false);
        tracing::debug!("{} store disposed", R::ENDPOINT);
    }

    /// Load one page into the store.
    ///
    /// Starting a fetch cancels the previous one; only the most recently started
    /// fetch may write its result, whatever order the responses arrive in.
    pub async fn fetch(&self, query: PageQuery) -> FetchOutcome {
        if self.is_disposed() {
            return FetchOutcome::Disposed;
        }

        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let token = self.lifetime.child_token();
        {
            let mut inflight = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::replace(&mut *inflight, token.clone()).cancel();
        }

        self.state.send_modify(|state| state.is_loading = true);
        let _loading = LoadingGuard { store: self, seq };

        let (records, window, source) = tokio::select! {
            _ = token.cancelled() => {
                if self.is_disposed() {
                    return FetchOutcome::Disposed;
                }
                tracing::debug!("{} fetch #{} superseded", R::ENDPOINT, seq);
                return FetchOutcome::Superseded;
            }
            loaded = self.load(&query) => loaded,
        };

        let applied = self.state.send_if_modified(|state| {
            if self.sequence.load(Ordering::SeqCst) != seq || self.is_disposed() {
                return false;
            }
            state.records = records;
            state.window = window;
            state.source = source;
            state.search = query.search_term().to_string();
            state.is_loading = false;
            true
        });

        if applied {
            FetchOutcome::Applied(source)
        } else {
            tracing::debug!("Discarding stale {} response #{}", R::ENDPOINT, seq);
            FetchOutcome::Superseded
        }
    }

    /// Live page, or the mock catalog when the live read fails or the policy
    /// treats an empty unfiltered page as a failure.
    async fn load(&self, query: &PageQuery) -> (Vec<R>, PageWindow, DataSource) {
        match self.fetch_live(query).await {
            Ok((records, _))
                if records.is_empty()
                    && query.search_term().is_empty()
                    && self.policy == FallbackPolicy::FailureOrEmpty =>
            {
                tracing::warn!("Backend returned no {}, showing mock catalog", R::ENDPOINT);
                let (records, window) = mock::fallback_page::<R>(query);
                (records, window, DataSource::Mock)
            }
            Ok((records, window)) => (records, window, DataSource::Live),
            Err(e) => {
                tracing::warn!("Failed to load {}: {}; showing mock catalog", R::ENDPOINT, e);
                let (records, window) = mock::fallback_page::<R>(query);
                (records, window, DataSource::Mock)
            }
        }
    }

    async fn fetch_live(&self, query: &PageQuery) -> Result<(Vec<R>, PageWindow), AppError> {
        let body = self.client.get_json(R::ENDPOINT, &query.to_params()).await?;
        let page = serde_json::from_value::<PageEnvelope<R::Raw>>(body)?.data;

        let mut records: Vec<R> = page.records.into_iter().map(R::from_raw).collect();
        if records.len() as u64 > page.total {
            tracing::warn!(
                "Backend sent {} {} but reported a total of {}",
                records.len(),
                R::ENDPOINT,
                page.total
            );
            records.truncate(page.total as usize);
        }

        let window = PageWindow::new(page.current_page, page.last_page, page.total, query.page_size);
        Ok((records, window))
    }

    /// `POST /{endpoint}`. The store is not updated; callers re-fetch.
    pub async fn create(&self, draft: &R::Draft) -> Result<String, AppError> {
        let body = self
            .client
            .post_json(R::ENDPOINT, draft)
            .await
            .map_err(|e| write_failed("create", R::TYPE_NAME, e))?;
        Ok(success_message(&body, &format!("{} created successfully", R::TYPE_NAME)))
    }

    /// `PUT /{endpoint}/{id}`. The store is not updated; callers re-fetch.
    pub async fn update(&self, id: &str, draft: &R::Draft) -> Result<String, AppError> {
        let path = format!("{}/{}", R::ENDPOINT, id);
        let body = self
            .client
            .put_json(&path, draft)
            .await
            .map_err(|e| write_failed("update", R::TYPE_NAME, e))?;
        Ok(success_message(&body, &format!("{} updated successfully", R::TYPE_NAME)))
    }

    /// `POST /change-status` tagged with this resource's type name.
    pub async fn change_status(&self, id: &str, active: bool) -> Result<String, AppError> {
        let numeric_id: i64 = id
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("Invalid {} id: {}", R::TYPE_NAME, id)))?;

        let request = json!({
            "id": numeric_id,
            "status": if active { 1 } else { 0 },
            "type": R::TYPE_NAME,
        });

        let body = self
            .client
            .post_json(CHANGE_STATUS_PATH, &request)
            .await
            .map_err(|e| write_failed("change status of", R::TYPE_NAME, e))?;
        Ok(success_message(&body, "Status updated successfully"))
    }
}

/// Clears `is_loading` when a fetch future is dropped before it applies, unless a
/// newer fetch has taken over the flag.
struct LoadingGuard<'a, R: Resource> {
    store: &'a ResourceStore<R>,
    seq: u64,
}

impl<R: Resource> Drop for LoadingGuard<'_, R> {
    fn drop(&mut self) {
        let store = self.store;
        store.state.send_if_modified(|state| {
            if !state.is_loading || store.sequence.load(Ordering::SeqCst) != self.seq {
                return false;
            }
            state.is_loading = false;
            true
        });
    }
}

impl<R: Resource> Drop for ResourceStore<R> {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

fn write_failed(action: &str, type_name: &str, err: AppError) -> AppError {
    tracing::warn!("Failed to {} {}: {}", action, type_name, err);
    err
}

/// Backend `message` of a successful write, or `default`.
fn success_message(body: &Value, default: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}
