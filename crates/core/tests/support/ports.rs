//! Mock port implementations for testing

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use clavis_core::{ContextStore, TokenExchanger};
use clavis_domain::{BearerToken, ClavisError, Result as DomainResult};
use parking_lot::Mutex;

/// In-memory `ContextStore` that honours per-entry TTLs.
#[derive(Default)]
pub struct MockContextStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    stores: AtomicUsize,
}

impl MockContextStore {
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.lock().values().filter(|(_, expires_at)| *expires_at > now).count()
    }

    pub fn store_count(&self) -> usize {
        self.stores.load(Ordering::SeqCst)
    }
}

impl ContextStore for MockContextStore {
    fn lookup(&self, token: &BearerToken) -> Option<String> {
        let entries = self.entries.lock();
        entries
            .get(token.expose())
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(context, _)| context.clone())
    }

    fn store(&self, token: &BearerToken, context_id: String, ttl: Duration) {
        self.stores.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .insert(token.expose().to_string(), (context_id, Instant::now() + ttl));
    }
}

/// Scripted `TokenExchanger` answering from a token → outcome table.
#[derive(Default)]
pub struct MockTokenExchanger {
    outcomes: Mutex<HashMap<String, DomainResult<String>>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl MockTokenExchanger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspend every exchange for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_outcome(self, token: &str, outcome: DomainResult<String>) -> Self {
        self.outcomes.lock().insert(token.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenExchanger for MockTokenExchanger {
    async fn exchange(&self, _endpoint: &str, token: &BearerToken) -> DomainResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcomes.lock().get(token.expose()).cloned().unwrap_or_else(|| {
            Err(ClavisError::Unauthorized("could not exchange token: 401 Unauthorized".into()))
        })
    }
}
