//! Generic state container around a single remote fetch function.
//!
//! State lives in a `watch` channel so callers can either poll the accessors
//! or subscribe and react to every transition.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::watch;

pub type FetchFuture<T> = Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send + 'static>>;

type FetchFn<P, T> = Arc<dyn Fn(P) -> FetchFuture<T> + Send + Sync>;

/// How results of overlapping invocations are reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettlePolicy {
    /// Every invocation writes its outcome when it settles; the slowest wins.
    ///
    /// Under overlap `loading` turns false as soon as the first invocation
    /// settles, even while a slower one is still running.
    #[default]
    LastSettledWins,
    /// Only the most recently started invocation may write its outcome.
    LatestRequestWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceOptions {
    pub auto_fetch: bool,
    pub settle_policy: SettlePolicy,
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self {
            auto_fetch: true,
            settle_policy: SettlePolicy::default(),
        }
    }
}

impl ResourceOptions {
    pub fn manual() -> Self {
        Self {
            auto_fetch: false,
            ..Self::default()
        }
    }

    pub fn with_settle_policy(mut self, settle_policy: SettlePolicy) -> Self {
        self.settle_policy = settle_policy;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<P, T> {
    /// Last successful result.
    pub data: Option<T>,
    pub loading: bool,
    /// Message of the most recent failed invocation.
    pub error: Option<String>,
    /// Parameters used when no override is given.
    pub params: P,
    generation: u64,
}

impl<P, T> ResourceState<P, T> {
    fn idle(params: P) -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            params,
            generation: 0,
        }
    }
}

pub struct AsyncResource<P, T> {
    fetch: FetchFn<P, T>,
    state: Arc<watch::Sender<ResourceState<P, T>>>,
    policy: SettlePolicy,
}

impl<P, T> Clone for AsyncResource<P, T> {
    fn clone(&self) -> Self {
        Self {
            fetch: Arc::clone(&self.fetch),
            state: Arc::clone(&self.state),
            policy: self.policy,
        }
    }
}

impl<P, T> std::fmt::Debug for AsyncResource<P, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("AsyncResource")
            .field("loading", &state.loading)
            .field("has_data", &state.data.is_some())
            .field("error", &state.error)
            .field("policy", &self.policy)
            .finish()
    }
}

impl<P, T> AsyncResource<P, T>
where
    P: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    /// Bind `fetch` to `params`. With `auto_fetch` the first invocation is
    /// started immediately on the current Tokio runtime.
    pub fn new<F, Fut>(fetch: F, params: P, options: ResourceOptions) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        let fetch: FetchFn<P, T> =
            Arc::new(move |params: P| -> FetchFuture<T> { Box::pin(fetch(params)) });
        let (state, _) = watch::channel(ResourceState::idle(params));

        let resource = Self {
            fetch,
            state: Arc::new(state),
            policy: options.settle_policy,
        };
        if options.auto_fetch {
            resource.spawn_initial();
        }
        resource
    }

    /// Like [`AsyncResource::new`], with the store handle passed to every
    /// invocation of `fetch`.
    pub fn with_store<S, F, Fut>(store: Arc<S>, fetch: F, params: P, options: ResourceOptions) -> Self
    where
        S: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<S>, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Self::new(
            move |params| fetch(Arc::clone(&store), params),
            params,
            options,
        )
    }

    fn spawn_initial(&self) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                log::warn!("no Tokio runtime available, auto-fetch skipped; call refetch() to load");
                return;
            }
        };

        let params = self.params();
        let (in_flight, future) = self.begin(params);
        handle.spawn(async move {
            let outcome = future.await;
            in_flight.finish(outcome);
        });
    }

    fn begin(&self, params: P) -> (InFlight<P, T>, FetchFuture<T>) {
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.loading = true;
            state.error = None;
        });

        let in_flight = InFlight {
            resource: self.clone(),
            generation,
            settled: false,
        };
        (in_flight, (self.fetch)(params))
    }

    /// Invoke the fetch function with `params`, or the stored parameters when
    /// `None`. Failures are recorded in `error`, never returned.
    pub async fn execute(&self, params: Option<P>) {
        let params = params.unwrap_or_else(|| self.params());
        let (in_flight, future) = self.begin(params);
        let outcome = future.await;
        in_flight.finish(outcome);
    }

    /// Replace the stored parameters (when given) and execute with them.
    pub async fn refetch(&self, params: Option<P>) {
        if let Some(params) = params {
            self.state.send_modify(|state| state.params = params);
        }
        self.execute(None).await;
    }

    pub fn params(&self) -> P {
        self.state.borrow().params.clone()
    }
}

impl<P, T> AsyncResource<P, T> {
    /// Return to idle without invoking the fetch function. Under
    /// `LatestRequestWins` any invocation still in flight is discarded.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            state.generation += 1;
            state.data = None;
            state.error = None;
            state.loading = false;
        });
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<P, T>> {
        self.state.subscribe()
    }

    pub fn settle_policy(&self) -> SettlePolicy {
        self.policy
    }

    fn is_current(&self, state: &ResourceState<P, T>, generation: u64) -> bool {
        match self.policy {
            SettlePolicy::LastSettledWins => true,
            SettlePolicy::LatestRequestWins => state.generation == generation,
        }
    }

    fn settle(&self, generation: u64, outcome: anyhow::Result<T>) {
        self.state.send_modify(|state| {
            if !self.is_current(state, generation) {
                log::debug!("discarding stale result of request {}", generation);
                return;
            }
            match outcome {
                Ok(data) => state.data = Some(data),
                Err(err) => {
                    log::debug!("fetch failed: {:#}", err);
                    state.error = Some(format!("{:#}", err));
                }
            }
            state.loading = false;
        });
    }

    fn abandon(&self, generation: u64) {
        self.state.send_modify(|state| {
            if self.is_current(state, generation) {
                state.loading = false;
            }
        });
    }
}

impl<P, T: Clone> AsyncResource<P, T> {
    pub fn data(&self) -> Option<T> {
        self.state.borrow().data.clone()
    }
}

impl<P: Clone, T: Clone> AsyncResource<P, T> {
    pub fn snapshot(&self) -> ResourceState<P, T> {
        self.state.borrow().clone()
    }

    /// Wait until no invocation is in flight and return the state at that point.
    pub async fn settled(&self) -> ResourceState<P, T> {
        let mut receiver = self.state.subscribe();
        let settled = match receiver.wait_for(|state| !state.loading).await {
            Ok(state) => (*state).clone(),
            Err(_) => self.state.borrow().clone(),
        };
        settled
    }
}

/// Guard for one invocation; restores `loading` if the invocation is dropped
/// before it settles.
struct InFlight<P, T> {
    resource: AsyncResource<P, T>,
    generation: u64,
    settled: bool,
}

impl<P, T> InFlight<P, T> {
    fn finish(mut self, outcome: anyhow::Result<T>) {
        self.settled = true;
        self.resource.settle(self.generation, outcome);
    }
}

impl<P, T> Drop for InFlight<P, T> {
    fn drop(&mut self) {
        if !self.settled {
            self.resource.abandon(self.generation);
        }
    }
}
