use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use super::sequence::Ticketed;
use crate::api::ApiClient;
use crate::models::{Vm, VmListResponse};

/// Server-supplied paging block; stored exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Status counts for the whole namespace, computed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub running: u64,
    pub stopped: u64,
    pub pending: u64,
    pub error: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VmListState {
    pub vms: Vec<Vm>,
    pub loading: bool,
    pub error: Option<String>,
    pub pagination: Pagination,
    pub stats: StatusCounts,
}

impl VmListState {
    fn initial(page_size: u32) -> Self {
        Self {
            vms: Vec::new(),
            loading: false,
            error: None,
            pagination: Pagination {
                page: 1,
                page_size,
                total_count: 0,
                has_next: false,
                has_previous: false,
            },
            stats: StatusCounts::default(),
        }
    }

    fn apply(&mut self, response: VmListResponse) {
        self.vms = response.vms;
        self.pagination = Pagination {
            page: response.page,
            page_size: response.page_size,
            total_count: response.total_count,
            has_next: response.has_next,
            has_previous: response.has_previous,
        };
        self.stats = StatusCounts {
            running: response.running_count,
            stopped: response.stopped_count,
            pending: response.pending_count,
            error: response.error_count,
        };
        self.loading = false;
        self.error = None;
    }
}

/// Paginated VM list for one namespace.
///
/// Each fetch replaces the rows, the paging block and the status counts
/// wholesale. The same newest-request-wins rule as
/// [`FetchHandle`](super::FetchHandle) applies.
#[derive(Clone)]
pub struct VmList {
    client: ApiClient,
    namespace: Arc<str>,
    page_size: Arc<AtomicU32>,
    state: Arc<Ticketed<VmListState>>,
}

impl VmList {
    /// A list that has not fetched anything yet.
    pub fn new(client: ApiClient, namespace: &str, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Self {
            client,
            namespace: Arc::from(namespace),
            page_size: Arc::new(AtomicU32::new(page_size)),
            state: Arc::new(Ticketed::new(VmListState::initial(page_size))),
        }
    }

    /// Build the list and load page 1.
    pub async fn mount(client: ApiClient, namespace: &str, page_size: u32) -> Self {
        let list = Self::new(client, namespace, page_size);
        list.fetch_vms(1).await;
        list
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The page size the next request will use.
    pub fn page_size(&self) -> u32 {
        self.page_size.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> VmListState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<VmListState> {
        self.state.subscribe()
    }

    /// Load `page` (1-based; 0 is treated as 1). Rows stay visible while
    /// loading. On failure the rows are cleared and the error recorded;
    /// paging and counts keep their last values.
    pub async fn fetch_vms(&self, page: u32) -> VmListState {
        let page = page.max(1);
        let page_size = self.page_size();
        let ticket = self.state.begin(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = self
            .client
            .list_vms(&self.namespace, page, page_size)
            .await;

        let settled = match result {
            Ok(response) => self.state.settle(ticket, |s| s.apply(response)),
            Err(err) => {
                tracing::warn!(namespace = %self.namespace, page, error = %err, "failed to fetch VMs");
                let message = err.message();
                self.state.settle(ticket, |s| {
                    s.vms.clear();
                    s.loading = false;
                    s.error = Some(message);
                })
            }
        };
        if !settled {
            tracing::debug!(ticket, "discarding superseded VM page");
        }
        self.snapshot()
    }

    /// Re-fetch the page the server last reported, which may differ from
    /// the page a caller last asked for.
    pub async fn refresh_vms(&self) -> VmListState {
        let page = self.state.snapshot().pagination.page;
        self.fetch_vms(page).await
    }

    /// Change the page size and go back to page 1.
    pub async fn set_page_size(&self, page_size: u32) -> VmListState {
        self.page_size.store(page_size.max(1), Ordering::SeqCst);
        self.fetch_vms(1).await
    }
}
