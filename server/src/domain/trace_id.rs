//! Correlation identifier threaded through a request via task-local storage.
//!
//! The middleware opens a [`TraceId::scope`] around each request; anything
//! running inside it, error constructors included, can read the active
//! identifier through [`TraceId::current`] without parameter plumbing.
//!
//! Task-locals do not cross `tokio::spawn` boundaries. Work handed to another
//! task or a blocking thread must be wrapped in its own [`TraceId::scope`]
//! if the identifier should follow it.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Identifier correlating one request's log lines and error payloads.
///
/// # Examples
/// ```
/// use folio_server::domain::TraceId;
/// use uuid::Uuid;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = TraceId::from_uuid(Uuid::nil());
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Mint a fresh random identifier.
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Run `fut` with `id` installed as the active identifier.
    pub async fn scope<Fut>(id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(id, fut).await
    }

    /// The identifier installed by the nearest enclosing [`TraceId::scope`],
    /// or `None` outside of any scope.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Borrow the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Uuid>().map(Self)
    }
}
