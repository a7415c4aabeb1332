use crate::models::DashboardSummary;
use crate::notify::NotificationCenter;
use crate::upstream::UpstreamClient;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub summary: Arc<DashboardSummary>,
    pub upstream: Arc<UpstreamClient>,
    pub notices: Arc<Mutex<NotificationCenter>>,
    search_generation: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(summary: DashboardSummary, upstream: UpstreamClient) -> Self {
        Self {
            summary: Arc::new(summary),
            upstream: Arc::new(upstream),
            notices: Arc::new(Mutex::new(NotificationCenter::default())),
            search_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Take a ticket for a new search. Any earlier in-flight search becomes
    /// stale the moment this returns.
    pub fn begin_search(&self) -> u64 {
        self.search_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a ticket still belongs to the latest search.
    pub fn search_is_current(&self, ticket: u64) -> bool {
        self.search_generation.load(Ordering::SeqCst) == ticket
    }
}
