use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use futures::{
    FutureExt, Stream,
    future::{BoxFuture, Shared},
};
use tracing::{debug, error, info, instrument};

use crate::services::common::Property;

use super::{PlayerError, PlayerRuntime, RuntimeReadiness};

type LoadFuture = Shared<BoxFuture<'static, Result<(), PlayerError>>>;

/// Loads the player runtime at most once per process.
///
/// One loader is created at startup and shared through `Arc` by every
/// lifecycle manager. Concurrent callers attach to the same in-flight load;
/// after a failure the next call fetches again. Once `Ready`, the runtime
/// stays loaded for the life of the process.
pub struct ScriptLoader<R: PlayerRuntime> {
    runtime: Arc<R>,
    readiness: Property<RuntimeReadiness>,
    in_flight: Mutex<Option<LoadFuture>>,
    fetch_attempts: AtomicUsize,
}

impl<R: PlayerRuntime> ScriptLoader<R> {
    /// Create a loader for `runtime`. Nothing is fetched until the first
    /// call to [`ensure_runtime_loaded`](Self::ensure_runtime_loaded).
    pub fn new(runtime: Arc<R>) -> Self {
        Self {
            runtime,
            readiness: Property::new(RuntimeReadiness::NotRequested),
            in_flight: Mutex::new(None),
            fetch_attempts: AtomicUsize::new(0),
        }
    }

    /// The wrapped runtime.
    pub fn runtime(&self) -> &Arc<R> {
        &self.runtime
    }

    /// Current runtime readiness.
    pub fn readiness(&self) -> RuntimeReadiness {
        self.readiness.get()
    }

    /// Stream of readiness changes, starting with the current value.
    pub fn readiness_monitored(&self) -> impl Stream<Item = RuntimeReadiness> + Send + use<R> {
        self.readiness.watch()
    }

    /// Number of times the runtime script was actually fetched.
    pub fn fetch_attempts(&self) -> usize {
        self.fetch_attempts.load(Ordering::SeqCst)
    }

    /// Resolves once the runtime is ready.
    ///
    /// Returns immediately when already `Ready`, joins the in-flight fetch
    /// when `Loading`, and starts a fetch otherwise.
    ///
    /// # Errors
    /// Returns `PlayerError::RuntimeLoad` if the fetch this call waited on failed
    #[instrument(skip(self))]
    pub async fn ensure_runtime_loaded(&self) -> Result<(), PlayerError> {
        let load = {
            let mut in_flight = self
                .in_flight
                .lock()
                .map_err(|_| PlayerError::RuntimeLoad("loader state poisoned".to_string()))?;

            match self.readiness.get() {
                RuntimeReadiness::Ready => return Ok(()),
                RuntimeReadiness::Loading => match in_flight.as_ref() {
                    Some(load) => {
                        debug!("Joining in-flight runtime load");
                        load.clone()
                    }
                    None => self.fetch_into(&mut in_flight),
                },
                _ if self.runtime.is_installed() => {
                    info!("Player runtime already present, skipping fetch");
                    self.readiness.set(RuntimeReadiness::Ready);
                    return Ok(());
                }
                _ => self.fetch_into(&mut in_flight),
            }
        };

        let result = load.clone().await;
        self.clear_in_flight(&load);
        result
    }

    fn fetch_into(&self, in_flight: &mut Option<LoadFuture>) -> LoadFuture {
        let load = self.start_fetch();
        *in_flight = Some(load.clone());
        load
    }

    fn start_fetch(&self) -> LoadFuture {
        let attempt = self.fetch_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        self.readiness.set(RuntimeReadiness::Loading);
        info!(attempt, "Fetching player runtime");

        let runtime = Arc::clone(&self.runtime);
        let readiness = self.readiness.clone();

        async move {
            let result = runtime.load().await;
            match &result {
                Ok(()) => {
                    info!("Player runtime ready");
                    readiness.set(RuntimeReadiness::Ready);
                }
                Err(e) => {
                    error!(error = %e, "Player runtime failed to load");
                    readiness.set(RuntimeReadiness::Failed);
                }
            }
            result
        }
        .boxed()
        .shared()
    }

    fn clear_in_flight(&self, finished: &LoadFuture) {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            if in_flight.as_ref().is_some_and(|load| load.ptr_eq(finished)) {
                *in_flight = None;
            }
        }
    }
}
