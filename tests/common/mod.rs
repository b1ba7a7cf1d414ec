//! Scriptable player runtime shared by the integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use showreel::config::PlayerConfig;
use showreel::services::player::{
    LifecycleOptions, MediaReference, MountPoint, PlayerError, PlayerEvent,
    PlayerLifecycleManager, PlayerRuntime, RuntimeSignal, ScriptLoader, SignalSink,
};
use tokio::{sync::broadcast, time};

/// Media id the fake runtime refuses to create.
pub const BAD_ID: &str = "bad-id";

pub const APP_ID: &str = "1310364790";

/// Handle to one fake player instance.
#[derive(Debug)]
pub struct FakeHandle {
    id: u64,
    media_id: String,
}

/// In-memory runtime with controllable latency and failures.
///
/// Created players report `Ready` from inside `create` unless
/// [`without_auto_ready`](Self::without_auto_ready) is used, so the
/// readiness signal races ahead of the creation completing.
pub struct FakeRuntime {
    script_url: String,
    installed: AtomicBool,
    load_delay: Duration,
    load_failures: AtomicUsize,
    loads: AtomicUsize,
    create_delay: Duration,
    create_delays: HashMap<String, Duration>,
    auto_ready: bool,
    next_handle: AtomicU64,
    live: Mutex<HashMap<u64, String>>,
    max_live: AtomicUsize,
    created: Mutex<Vec<String>>,
    disposed: Mutex<Vec<String>>,
    sinks: Mutex<HashMap<String, SignalSink>>,
}

impl Default for FakeRuntime {
    fn default() -> Self {
        Self {
            script_url: String::new(),
            installed: AtomicBool::new(false),
            load_delay: Duration::from_millis(50),
            load_failures: AtomicUsize::new(0),
            loads: AtomicUsize::new(0),
            create_delay: Duration::from_millis(20),
            create_delays: HashMap::new(),
            auto_ready: true,
            next_handle: AtomicU64::new(1),
            live: Mutex::new(HashMap::new()),
            max_live: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
            disposed: Mutex::new(Vec::new()),
            sinks: Mutex::new(HashMap::new()),
        }
    }
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runtime fetching the script configured in `config`.
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            script_url: config.runtime_url.clone(),
            ..Self::default()
        }
    }

    pub fn script_url(&self) -> &str {
        &self.script_url
    }

    pub fn preinstalled(self) -> Self {
        self.installed.store(true, Ordering::SeqCst);
        self
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    /// The next `count` loads fail.
    pub fn failing_loads(self, count: usize) -> Self {
        self.load_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn with_create_delay(mut self, media_id: &str, delay: Duration) -> Self {
        self.create_delays.insert(media_id.to_string(), delay);
        self
    }

    pub fn without_auto_ready(mut self) -> Self {
        self.auto_ready = false;
        self
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap().len()
    }

    pub fn live_media(&self) -> Vec<String> {
        self.live.lock().unwrap().values().cloned().collect()
    }

    pub fn max_live(&self) -> usize {
        self.max_live.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    pub fn disposed(&self) -> Vec<String> {
        self.disposed.lock().unwrap().clone()
    }

    /// Reports `signal` from the most recent player created for `media_id`.
    pub fn emit(&self, media_id: &str, signal: RuntimeSignal) {
        let sink = self.sinks.lock().unwrap().get(media_id).cloned();
        if let Some(sink) = sink {
            sink.emit(signal);
        }
    }
}

#[async_trait]
impl PlayerRuntime for FakeRuntime {
    type Handle = FakeHandle;

    fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    async fn load(&self) -> Result<(), PlayerError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        time::sleep(self.load_delay).await;

        let failing = self
            .load_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(PlayerError::RuntimeLoad("script request failed".to_string()));
        }

        self.installed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn create(
        &self,
        _mount: &MountPoint,
        media: &MediaReference,
        signals: SignalSink,
    ) -> Result<FakeHandle, PlayerError> {
        let delay = self
            .create_delays
            .get(media.media_id())
            .copied()
            .unwrap_or(self.create_delay);
        time::sleep(delay).await;

        if media.media_id() == BAD_ID {
            return Err(PlayerError::HandleCreation {
                media_id: media.media_id().to_string(),
                reason: "invalid fileID".to_string(),
            });
        }

        let id = self.next_handle.fetch_add(1, Ordering::SeqCst);
        {
            let mut live = self.live.lock().unwrap();
            live.insert(id, media.media_id().to_string());
            self.max_live.fetch_max(live.len(), Ordering::SeqCst);
        }
        self.created.lock().unwrap().push(media.media_id().to_string());
        self.sinks
            .lock()
            .unwrap()
            .insert(media.media_id().to_string(), signals.clone());

        if self.auto_ready {
            signals.emit(RuntimeSignal::Ready);
        }

        Ok(FakeHandle {
            id,
            media_id: media.media_id().to_string(),
        })
    }

    async fn dispose(&self, handle: FakeHandle) -> Result<(), PlayerError> {
        self.live.lock().unwrap().remove(&handle.id);
        self.disposed.lock().unwrap().push(handle.media_id);
        Ok(())
    }
}

pub fn media(id: &str) -> MediaReference {
    MediaReference::new(id, APP_ID)
}

/// Loader and manager over `runtime`, returning the runtime for inspection.
pub fn manager_with(
    runtime: FakeRuntime,
    options: LifecycleOptions,
) -> (Arc<FakeRuntime>, Arc<ScriptLoader<FakeRuntime>>, PlayerLifecycleManager) {
    let runtime = Arc::new(runtime);
    let loader = Arc::new(ScriptLoader::new(Arc::clone(&runtime)));
    let manager =
        PlayerLifecycleManager::new(Arc::clone(&loader), MountPoint::new("player-container-id"), options);
    (runtime, loader, manager)
}

/// Waits for the next `Ready` or `Error` event about `media_id`.
pub async fn outcome_for(events: &mut broadcast::Receiver<PlayerEvent>, media_id: &str) -> PlayerEvent {
    time::timeout(Duration::from_secs(60), async {
        loop {
            match events.recv().await.unwrap() {
                event @ (PlayerEvent::Ready { .. } | PlayerEvent::Error { .. })
                    if event_media(&event) == media_id =>
                {
                    return event;
                }
                _ => {}
            }
        }
    })
    .await
    .unwrap()
}

pub fn event_media(event: &PlayerEvent) -> &str {
    match event {
        PlayerEvent::Ready { media_id, .. }
        | PlayerEvent::Error { media_id, .. }
        | PlayerEvent::PlaybackStateChanged { media_id, .. } => media_id,
    }
}

/// Every event already queued on `events`.
pub fn drain(events: &mut broadcast::Receiver<PlayerEvent>) -> Vec<PlayerEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}
