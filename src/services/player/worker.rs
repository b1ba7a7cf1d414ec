use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{broadcast, mpsc},
    time,
};
use tracing::{debug, error, info, trace, warn};

use crate::{config::ReadinessFallback, services::common::Property};

use super::{
    LifecycleOptions, LifecycleState, MediaReference, MountPoint, PlayerError, PlayerEvent,
    PlayerRuntime, RuntimeReadiness, RuntimeSignal, ScriptLoader, SignalSink,
};

/// Requests from the manager's public API.
pub(super) enum Command {
    Bind(MediaReference),
    Release,
    Shutdown,
}

/// Asynchronous completions, tagged with the bind generation that started
/// them where staleness matters.
enum Completion<H> {
    RuntimeLoaded(Result<(), PlayerError>),
    Created {
        creation: u64,
        generation: u64,
        media: MediaReference,
        result: Result<H, PlayerError>,
    },
    Signal {
        generation: u64,
        signal: RuntimeSignal,
    },
    ReadinessTimeout {
        generation: u64,
    },
    CreateTimeout {
        creation: u64,
        generation: u64,
    },
}

struct Creation {
    id: u64,
    media_id: String,
}

struct LivePlayer<H> {
    media: MediaReference,
    handle: H,
    ready: bool,
}

/// Single owner of the mount point and its player handle.
///
/// Commands and completions are handled one at a time, so every state
/// transition happens on this task. `generation` increases on each bind and
/// release; a completion carrying an older generation is stale. Creations are
/// numbered separately so one abandoned after `create_timeout` is also stale
/// when it finally completes.
pub(super) struct LifecycleWorker<R: PlayerRuntime> {
    loader: Arc<ScriptLoader<R>>,
    mount: Arc<MountPoint>,
    options: LifecycleOptions,
    state: Property<LifecycleState>,
    events_tx: broadcast::Sender<PlayerEvent>,
    completion_tx: mpsc::UnboundedSender<Completion<R::Handle>>,
    completion_rx: mpsc::UnboundedReceiver<Completion<R::Handle>>,

    generation: u64,
    /// Latest requested media not yet handed to the runtime.
    pending: Option<MediaReference>,
    awaiting_runtime: bool,
    /// At most one creation is in flight.
    creating: Option<Creation>,
    next_creation: u64,
    /// Signals that raced ahead of the creation they belong to.
    early_signals: Vec<RuntimeSignal>,
    live: Option<LivePlayer<R::Handle>>,
}

impl<R: PlayerRuntime> LifecycleWorker<R> {
    pub(super) fn new(
        loader: Arc<ScriptLoader<R>>,
        mount: Arc<MountPoint>,
        options: LifecycleOptions,
        state: Property<LifecycleState>,
        events_tx: broadcast::Sender<PlayerEvent>,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Self {
            loader,
            mount,
            options,
            state,
            events_tx,
            completion_tx,
            completion_rx,
            generation: 0,
            pending: None,
            awaiting_runtime: false,
            creating: None,
            next_creation: 0,
            early_signals: Vec::new(),
            live: None,
        }
    }

    pub(super) async fn run(mut self, mut command_rx: mpsc::UnboundedReceiver<Command>) {
        loop {
            tokio::select! {
                biased;

                command = command_rx.recv() => match command {
                    Some(Command::Bind(media)) => self.bind(media).await,
                    Some(Command::Release) => self.release().await,
                    Some(Command::Shutdown) | None => {
                        self.release().await;
                        break;
                    }
                },
                Some(completion) = self.completion_rx.recv() => {
                    self.complete(completion).await;
                }
            }
        }

        debug!(mount = %self.mount, "Lifecycle worker stopped");
    }

    async fn bind(&mut self, media: MediaReference) {
        self.generation += 1;
        debug!(
            mount = %self.mount,
            media_id = media.media_id(),
            generation = self.generation,
            "Binding media"
        );

        self.early_signals.clear();
        self.teardown_live().await;
        self.pending = Some(media);
        if self.creating.is_some() {
            // Superseded creation still has to be drained first.
            self.state.set(LifecycleState::Mounting);
        } else {
            self.state.set(LifecycleState::AwaitingRuntime);
        }
        self.request_runtime();
    }

    async fn release(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.early_signals.clear();

        if self.live.is_some() {
            info!(mount = %self.mount, "Releasing player");
        }
        self.teardown_live().await;
        self.state.set(LifecycleState::Idle);
    }

    async fn complete(&mut self, completion: Completion<R::Handle>) {
        match completion {
            Completion::RuntimeLoaded(result) => self.runtime_loaded(result),
            Completion::Created {
                creation,
                generation,
                media,
                result,
            } => self.created(creation, generation, media, result).await,
            Completion::Signal { generation, signal } => self.signal(generation, signal).await,
            Completion::ReadinessTimeout { generation } => {
                self.readiness_timeout(generation).await;
            }
            Completion::CreateTimeout {
                creation,
                generation,
            } => self.create_timeout(creation, generation),
        }
    }

    /// Makes sure the runtime is ready, then creates the pending player.
    ///
    /// At most one load and one creation are in flight; whichever finishes
    /// last picks up the latest pending media.
    fn request_runtime(&mut self) {
        if self.awaiting_runtime || self.creating.is_some() {
            return;
        }

        if self.loader.readiness() == RuntimeReadiness::Ready {
            self.start_create();
            return;
        }

        self.awaiting_runtime = true;
        let loader = Arc::clone(&self.loader);
        let completion_tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let result = loader.ensure_runtime_loaded().await;
            let _ = completion_tx.send(Completion::RuntimeLoaded(result));
        });
    }

    fn runtime_loaded(&mut self, result: Result<(), PlayerError>) {
        self.awaiting_runtime = false;

        let Some(media) = self.pending.as_ref() else {
            trace!(mount = %self.mount, "Runtime loaded with nothing pending");
            return;
        };

        match result {
            Ok(()) => self.start_create(),
            Err(e) => {
                let media_id = media.media_id().to_string();
                self.pending = None;
                self.fail(&media_id, &e);
            }
        }
    }

    fn start_create(&mut self) {
        if self.creating.is_some() {
            return;
        }
        let Some(media) = self.pending.take() else {
            return;
        };

        let creation = self.next_creation;
        self.next_creation += 1;
        self.creating = Some(Creation {
            id: creation,
            media_id: media.media_id().to_string(),
        });
        self.state.set(LifecycleState::Mounting);

        let generation = self.generation;
        self.arm_create_timeout(creation, generation);
        let runtime = Arc::clone(self.loader.runtime());
        let mount = Arc::clone(&self.mount);
        let completion_tx = self.completion_tx.clone();
        let signals = self.signal_sink(generation);

        debug!(
            mount = %mount,
            media_id = media.media_id(),
            generation,
            creation,
            "Creating player"
        );

        tokio::spawn(async move {
            let result = runtime.create(&mount, &media, signals).await;
            let completion = Completion::Created {
                creation,
                generation,
                media,
                result,
            };

            // Worker is gone; nobody else will dispose this handle.
            if let Err(mpsc::error::SendError(Completion::Created {
                result: Ok(handle), ..
            })) = completion_tx.send(completion)
            {
                let _ = runtime.dispose(handle).await;
            }
        });
    }

    fn signal_sink(&self, generation: u64) -> SignalSink {
        let completion_tx = self.completion_tx.clone();
        SignalSink::new(move |signal| {
            let _ = completion_tx.send(Completion::Signal { generation, signal });
        })
    }

    async fn created(
        &mut self,
        creation: u64,
        generation: u64,
        media: MediaReference,
        result: Result<R::Handle, PlayerError>,
    ) {
        let abandoned = !self.is_creating(creation);
        if !abandoned {
            self.creating = None;
        }

        if abandoned || generation != self.generation {
            debug!(
                mount = %self.mount,
                media_id = media.media_id(),
                generation,
                current = self.generation,
                abandoned,
                "Discarding stale player creation"
            );
            if let Ok(handle) = result {
                dispose_with_timeout(
                    self.loader.runtime().as_ref(),
                    self.options.teardown_timeout,
                    handle,
                    &media,
                )
                .await;
            }
            if self.pending.is_some() {
                self.request_runtime();
            }
            return;
        }

        match result {
            Ok(handle) => {
                info!(mount = %self.mount, media_id = media.media_id(), "Player mounted");
                self.live = Some(LivePlayer {
                    media,
                    handle,
                    ready: false,
                });
                self.arm_readiness_timeout(generation);

                for signal in std::mem::take(&mut self.early_signals) {
                    self.signal(generation, signal).await;
                }
            }
            Err(e) => {
                self.early_signals.clear();
                self.fail(media.media_id(), &e);
            }
        }
    }

    async fn signal(&mut self, generation: u64, signal: RuntimeSignal) {
        if generation != self.generation {
            trace!(generation, current = self.generation, ?signal, "Dropping stale signal");
            return;
        }

        let Some(live) = self.live.as_mut() else {
            if self.creating.is_some() {
                self.early_signals.push(signal);
            }
            return;
        };

        trace!(media_id = live.media.media_id(), ?signal, "Runtime signal");

        match signal {
            RuntimeSignal::Ready => {
                if !live.ready {
                    live.ready = true;
                    let media_id = live.media.media_id().to_string();
                    self.state.set(LifecycleState::Ready);
                    self.emit(PlayerEvent::Ready {
                        media_id,
                        forced: false,
                    });
                }
            }
            RuntimeSignal::Playback(state) => {
                let media_id = live.media.media_id().to_string();
                self.emit(PlayerEvent::PlaybackStateChanged { media_id, state });
            }
            RuntimeSignal::Error(reason) => {
                let media_id = live.media.media_id().to_string();
                self.teardown_live().await;
                self.fail(&media_id, &PlayerError::Playback { media_id: media_id.clone(), reason });
            }
        }
    }

    fn arm_readiness_timeout(&self, generation: u64) {
        let completion_tx = self.completion_tx.clone();
        let timeout = self.options.readiness_timeout;

        tokio::spawn(async move {
            time::sleep(timeout).await;
            let _ = completion_tx.send(Completion::ReadinessTimeout { generation });
        });
    }

    fn arm_create_timeout(&self, creation: u64, generation: u64) {
        let completion_tx = self.completion_tx.clone();
        let timeout = self.options.create_timeout;

        tokio::spawn(async move {
            time::sleep(timeout).await;
            let _ = completion_tx.send(Completion::CreateTimeout {
                creation,
                generation,
            });
        });
    }

    /// Gives up on a creation that never completed.
    ///
    /// Its handle, should one still arrive, is disposed as stale. The latest
    /// pending media is created next; without one the bind that started this
    /// creation fails if it is still current.
    fn create_timeout(&mut self, creation: u64, generation: u64) {
        if !self.is_creating(creation) {
            return;
        }
        let Some(Creation { media_id, .. }) = self.creating.take() else {
            return;
        };

        let waited = self.options.create_timeout;
        warn!(
            mount = %self.mount,
            media_id = %media_id,
            creation,
            ?waited,
            "Player creation timed out, abandoning it"
        );
        self.early_signals.clear();

        if self.pending.is_some() {
            self.request_runtime();
        } else if generation == self.generation {
            self.fail(&media_id, &PlayerError::CreationTimeout {
                media_id: media_id.clone(),
                waited,
            });
        }
    }

    fn is_creating(&self, creation: u64) -> bool {
        self.creating.as_ref().is_some_and(|c| c.id == creation)
    }

    async fn readiness_timeout(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        let Some(live) = self.live.as_mut() else {
            return;
        };
        if live.ready {
            return;
        }

        let media_id = live.media.media_id().to_string();
        let waited = self.options.readiness_timeout;

        match self.options.readiness_fallback {
            ReadinessFallback::Ready => {
                warn!(media_id = %media_id, ?waited, "No readiness signal, assuming player is ready");
                live.ready = true;
                self.state.set(LifecycleState::Ready);
                self.emit(PlayerEvent::Ready {
                    media_id,
                    forced: true,
                });
            }
            ReadinessFallback::Error => {
                self.teardown_live().await;
                self.fail(&media_id, &PlayerError::ReadinessTimeout {
                    media_id: media_id.clone(),
                    waited,
                });
            }
        }
    }

    async fn teardown_live(&mut self) {
        if let Some(live) = self.live.take() {
            dispose_with_timeout(
                self.loader.runtime().as_ref(),
                self.options.teardown_timeout,
                live.handle,
                &live.media,
            )
            .await;
        }
    }

    fn fail(&self, media_id: &str, error: &PlayerError) {
        error!(mount = %self.mount, media_id, error = %error, "Player failed");
        self.state.set(LifecycleState::Error);
        self.emit(PlayerEvent::Error {
            media_id: media_id.to_string(),
            reason: error.to_string(),
        });
    }

    fn emit(&self, event: PlayerEvent) {
        let _ = self.events_tx.send(event);
    }
}

/// Disposes a handle, giving up after `timeout` so a hung runtime cannot
/// block the next mount.
async fn dispose_with_timeout<R: PlayerRuntime>(
    runtime: &R,
    timeout: Duration,
    handle: R::Handle,
    media: &MediaReference,
) {
    match time::timeout(timeout, runtime.dispose(handle)).await {
        Ok(Ok(())) => debug!(media_id = media.media_id(), "Player disposed"),
        Ok(Err(e)) => warn!(media_id = media.media_id(), error = %e, "Player disposal failed"),
        Err(_) => warn!(
            media_id = media.media_id(),
            ?timeout,
            "Player disposal timed out, continuing"
        ),
    }
}
