//! Screen state for list views, guarded against out-of-order responses.
//!
//! Every refetch is stamped with a monotonically increasing generation;
//! only the response matching the latest issued generation may update the
//! displayed state. Retiring the screen (navigating away) invalidates all
//! in-flight generations.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use staydesk_api::types::ListPage;
use staydesk_api::Error;

/// Proof that a refetch was issued; pass it back to [`ListScreen::apply`]
/// with the response it produced.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct RefreshToken(u64);

struct State<T> {
    page: Option<ListPage<T>>,
    retired: bool,
}

/// Holds one list view's displayed page.
pub struct ListScreen<T> {
    generation: AtomicU64,
    state: Mutex<State<T>>,
}

impl<T> Default for ListScreen<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListScreen<T> {
    pub fn new() -> Self {
        ListScreen {
            generation: AtomicU64::new(0),
            state: Mutex::new(State {
                page: None,
                retired: false,
            }),
        }
    }

    /// Marks the start of a refetch. Any response belonging to an earlier
    /// refetch becomes stale from this point on.
    pub fn begin_refresh(&self) -> RefreshToken {
        RefreshToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Installs a fetched page if its token is still the latest and the
    /// screen is still live. Returns whether the page was installed.
    pub fn apply(&self, token: RefreshToken, page: ListPage<T>) -> bool {
        let mut state = self.state.lock().expect("list screen lock poisoned");
        if state.retired || token.0 != self.generation.load(Ordering::SeqCst) {
            tracing::debug!("discarding stale list response (generation {})", token.0);
            return false;
        }
        state.page = Some(page);
        true
    }

    /// Retires the screen on navigation: nothing in flight may mutate it
    /// anymore.
    pub fn retire(&self) {
        let mut state = self.state.lock().expect("list screen lock poisoned");
        state.retired = true;
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Issues a refetch around `fetch` and installs the result when it is
    /// still current. `Ok(false)` means the response arrived stale and was
    /// discarded.
    pub async fn refresh<F>(&self, fetch: F) -> Result<bool, Error>
    where
        F: Future<Output = Result<ListPage<T>, Error>>,
    {
        let token = self.begin_refresh();
        let page = fetch.await?;
        Ok(self.apply(token, page))
    }

    /// The currently displayed page, if any fetch has completed.
    pub fn snapshot(&self) -> Option<ListPage<T>>
    where
        T: Clone,
    {
        self.state
            .lock()
            .expect("list screen lock poisoned")
            .page
            .clone()
    }
}
