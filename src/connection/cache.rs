//! Lazy, single-flight connection cache.
//!
//! The cache is a three-state machine:
//!
//! ```text
//!            acquire()                 connect ok
//!   Absent ─────────────▶ Pending ─────────────────▶ Ready(handle)
//!      ▲                     │
//!      └─────────────────────┘
//!          connect failed
//! ```
//!
//! Only the caller that observes `Absent` under the write lock starts an
//! attempt. Everyone arriving while it is `Pending` awaits the same
//! [`Shared`] future and receives the same outcome. The attempt runs on
//! its own task, which performs the `Pending → Ready | Absent` transition
//! itself, so callers that give up early cannot cancel it.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::error::GatewayError;
use crate::store::{Connector, StoreHandle};

type Outcome = Result<StoreHandle, GatewayError>;
type Attempt = Shared<BoxFuture<'static, Outcome>>;

/// Observable lifecycle of the cached handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CacheState {
    /// No handle and no attempt in flight.
    Absent,
    /// A connection attempt is in flight.
    Pending,
    /// A live handle is cached.
    Ready,
}

enum Slot {
    Absent,
    Pending { generation: u64, attempt: Attempt },
    Ready(StoreHandle),
}

impl Slot {
    const fn state(&self) -> CacheState {
        match self {
            Self::Absent => CacheState::Absent,
            Self::Pending { .. } => CacheState::Pending,
            Self::Ready(_) => CacheState::Ready,
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Pending { generation, .. } => {
                f.debug_struct("Pending").field("generation", generation).finish()
            }
            Self::Ready(handle) => f.debug_tuple("Ready").field(handle).finish(),
        }
    }
}

#[derive(Debug)]
struct Inner {
    database_url: Option<String>,
    connector: Arc<dyn Connector>,
    slot: RwLock<Slot>,
    attempts: AtomicU64,
}

impl Inner {
    /// Resolves attempt `generation`. A no-op if the slot has already
    /// moved on to another attempt.
    async fn settle(&self, generation: u64, outcome: &Outcome) {
        let mut slot = self.slot.write().await;
        let current = matches!(&*slot, Slot::Pending { generation: g, .. } if *g == generation);
        if !current {
            return;
        }
        *slot = match outcome {
            Ok(handle) => {
                tracing::info!(generation, "store connection established");
                Slot::Ready(Arc::clone(handle))
            }
            Err(error) => {
                tracing::warn!(generation, %error, "store connection failed; cache reset");
                Slot::Absent
            }
        };
    }
}

/// Shared, lazily connected store handle.
///
/// Cheap to clone; every clone observes the same state.
#[derive(Debug, Clone)]
pub struct HandleCache {
    inner: Arc<Inner>,
}

impl HandleCache {
    /// Creates an empty cache. No connection is made until the first
    /// [`acquire`](Self::acquire).
    #[must_use]
    pub fn new(database_url: Option<String>, connector: Arc<dyn Connector>) -> Self {
        Self {
            inner: Arc::new(Inner {
                database_url,
                connector,
                slot: RwLock::new(Slot::Absent),
                attempts: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the live store handle, connecting first if necessary.
    ///
    /// Concurrent callers share a single in-flight attempt. Once a handle
    /// is cached, repeated calls return it without further work.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if no connection string is
    /// configured, or [`GatewayError::Connection`] if the attempt this call
    /// joined failed. After a failure the next call starts a new attempt.
    pub async fn acquire(&self) -> Result<StoreHandle, GatewayError> {
        // Fast path: shared read of a settled or in-flight slot.
        let joined = {
            let slot = self.inner.slot.read().await;
            match &*slot {
                Slot::Ready(handle) => return Ok(Arc::clone(handle)),
                Slot::Pending { attempt, .. } => Some(attempt.clone()),
                Slot::Absent => None,
            }
        };
        if let Some(attempt) = joined {
            return attempt.await;
        }

        // Slow path: re-check under the write lock before starting.
        let attempt = {
            let mut slot = self.inner.slot.write().await;
            let existing = match &*slot {
                Slot::Ready(handle) => return Ok(Arc::clone(handle)),
                Slot::Pending { attempt, .. } => Some(attempt.clone()),
                Slot::Absent => None,
            };
            match existing {
                Some(attempt) => attempt,
                None => {
                    let url = self.inner.database_url.clone().ok_or_else(|| {
                        GatewayError::Config("DATABASE_URL is not set".to_string())
                    })?;
                    let generation = self.inner.attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    let attempt = self.start_attempt(url, generation);
                    *slot = Slot::Pending {
                        generation,
                        attempt: attempt.clone(),
                    };
                    attempt
                }
            }
        };

        attempt.await
    }

    /// Returns the current lifecycle state.
    pub async fn state(&self) -> CacheState {
        self.inner.slot.read().await.state()
    }

    /// Returns how many connection attempts have been started.
    #[must_use]
    pub fn attempts_started(&self) -> u64 {
        self.inner.attempts.load(Ordering::SeqCst)
    }

    fn start_attempt(&self, url: String, generation: u64) -> Attempt {
        tracing::info!(generation, "starting store connection attempt");

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let outcome = inner.connector.connect(&url).await;
            inner.settle(generation, &outcome).await;
            outcome
        });

        let inner = Arc::clone(&self.inner);
        async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    let outcome = Err(GatewayError::Connection(format!(
                        "connection attempt aborted: {join_error}"
                    )));
                    inner.settle(generation, &outcome).await;
                    outcome
                }
            }
        }
        .boxed()
        .shared()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::store::MemoryStore;

    /// Connector that sleeps before answering and fails its first
    /// `failures` calls.
    #[derive(Debug)]
    struct ScriptedConnector {
        calls: AtomicUsize,
        failures: usize,
        delay: Duration,
    }

    impl ScriptedConnector {
        fn new(failures: usize, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                failures,
                delay,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Connector for ScriptedConnector {
        async fn connect(&self, _url: &str) -> Result<StoreHandle, GatewayError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if call < self.failures {
                return Err(GatewayError::Connection("connection refused".to_string()));
            }
            Ok(Arc::new(MemoryStore::new()))
        }
    }

    fn cache_with(connector: &Arc<ScriptedConnector>) -> HandleCache {
        let connector: Arc<dyn Connector> = Arc::clone(connector) as Arc<dyn Connector>;
        HandleCache::new(Some("memory://".to_string()), connector)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_acquires_share_one_attempt() {
        let connector = ScriptedConnector::new(0, Duration::from_millis(50));
        let cache = cache_with(&connector);

        let mut tasks = Vec::new();
        for _ in 0..32 {
            let cache = cache.clone();
            tasks.push(tokio::spawn(async move { cache.acquire().await }));
        }

        let mut handles = Vec::new();
        for task in tasks {
            let Ok(Ok(handle)) = task.await else {
                panic!("acquire failed");
            };
            handles.push(handle);
        }

        assert_eq!(connector.calls(), 1);
        assert_eq!(cache.attempts_started(), 1);
        let Some(first) = handles.first() else {
            panic!("no handles");
        };
        assert!(handles.iter().all(|h| Arc::ptr_eq(h, first)));
        assert_eq!(cache.state().await, CacheState::Ready);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_acquires_share_one_failure() {
        let connector = ScriptedConnector::new(1, Duration::from_millis(50));
        let cache = cache_with(&connector);

        let mut tasks = Vec::new();
        for _ in 0..16 {
            let cache = cache.clone();
            tasks.push(tokio::spawn(async move { cache.acquire().await }));
        }

        for task in tasks {
            let Ok(result) = task.await else {
                panic!("task panicked");
            };
            assert!(matches!(result, Err(GatewayError::Connection(_))));
        }
        assert_eq!(connector.calls(), 1);
        assert_eq!(cache.state().await, CacheState::Absent);
    }

    #[tokio::test]
    async fn ready_handle_is_reused() {
        let connector = ScriptedConnector::new(0, Duration::ZERO);
        let cache = cache_with(&connector);

        let Ok(first) = cache.acquire().await else {
            panic!("first acquire failed");
        };
        for _ in 0..5 {
            let Ok(again) = cache.acquire().await else {
                panic!("repeat acquire failed");
            };
            assert!(Arc::ptr_eq(&first, &again));
        }
        assert_eq!(connector.calls(), 1);
    }

    #[tokio::test]
    async fn failure_resets_and_next_call_retries() {
        let connector = ScriptedConnector::new(1, Duration::ZERO);
        let cache = cache_with(&connector);

        tokio_test::assert_err!(cache.acquire().await);
        assert_eq!(cache.state().await, CacheState::Absent);

        tokio_test::assert_ok!(cache.acquire().await);
        assert_eq!(connector.calls(), 2);
        assert_eq!(cache.attempts_started(), 2);
        assert_eq!(cache.state().await, CacheState::Ready);
    }

    #[tokio::test]
    async fn missing_url_is_a_config_error() {
        let connector = ScriptedConnector::new(0, Duration::ZERO);
        let cache = HandleCache::new(None, Arc::clone(&connector) as Arc<dyn Connector>);

        let result = cache.acquire().await;
        assert!(matches!(result, Err(GatewayError::Config(_))));
        assert_eq!(connector.calls(), 0);
        assert_eq!(cache.state().await, CacheState::Absent);
    }

    #[tokio::test]
    async fn abandoned_caller_does_not_cancel_attempt() {
        let connector = ScriptedConnector::new(0, Duration::from_millis(50));
        let cache = cache_with(&connector);

        let caller = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.acquire().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(cache.state().await, CacheState::Pending);
        caller.abort();

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(cache.state().await, CacheState::Ready);

        tokio_test::assert_ok!(cache.acquire().await);
        assert_eq!(connector.calls(), 1);
    }
}
