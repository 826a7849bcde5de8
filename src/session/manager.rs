use super::config::SessionConfig;
use super::messages::OutboundMessage;
use super::router::EventRouter;
use super::SessionEvent;
use crate::bus::EventBus;
use crate::error::ConnectionError;
use crate::model::{Session, SessionStatus};
use crate::store::SessionStore;
use base64::Engine;
use futures::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{error, info, warn};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the persistent channel for one (session, participant) pair.
///
/// Lifecycle: `Disconnected → Connecting → Connected`. An unexpected
/// close moves the session to `Reconnecting`, which schedules exactly
/// one retry after the configured delay. [`SessionManager::disconnect`]
/// is the only terminal transition: it cancels the pending reconnect
/// and heartbeat timers, closes the channel, and leaves the session in
/// `Disconnected`.
///
/// Cheap to clone; clones share one connection.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

struct Inner {
    config: SessionConfig,
    store: Arc<SessionStore>,
    bus: EventBus<SessionEvent>,
    router: EventRouter,
    status: Mutex<SessionStatus>,
    explicit_disconnect: AtomicBool,
    outbound: Mutex<Option<mpsc::UnboundedSender<OutboundMessage>>>,
    // Cancellable handles for all pending work, so disconnect() can
    // deterministically stop it.
    reconnect_task: Mutex<Option<JoinHandle<()>>>,
    heartbeat_task: Mutex<Option<JoinHandle<()>>>,
    io_task: Mutex<Option<JoinHandle<()>>>,
}

impl SessionManager {
    pub fn new(
        config: SessionConfig,
        store: Arc<SessionStore>,
        bus: EventBus<SessionEvent>,
    ) -> Self {
        let router = EventRouter::new(Arc::clone(&store), bus.clone());
        Self {
            inner: Arc::new(Inner {
                config,
                store,
                bus,
                router,
                status: Mutex::new(SessionStatus::Disconnected),
                explicit_disconnect: AtomicBool::new(false),
                outbound: Mutex::new(None),
                reconnect_task: Mutex::new(None),
                heartbeat_task: Mutex::new(None),
                io_task: Mutex::new(None),
            }),
        }
    }

    pub fn status(&self) -> SessionStatus {
        *lock(&self.inner.status)
    }

    /// Open the session channel.
    ///
    /// A failed open is treated like an unexpected close: it schedules
    /// the single delayed retry instead of returning an error.
    pub async fn connect(&self) {
        {
            let mut status = lock(&self.inner.status);
            if matches!(
                *status,
                SessionStatus::Connecting | SessionStatus::Connected
            ) {
                warn!("Session already connecting or connected");
                return;
            }
            *status = SessionStatus::Connecting;
        }
        self.inner.explicit_disconnect.store(false, Ordering::SeqCst);
        self.publish_session(SessionStatus::Connecting);

        let url = self.inner.config.channel_url();
        info!("Connecting session channel: {}", url);

        let stream = match connect_async(&url).await {
            Ok((stream, _)) => stream,
            Err(e) => {
                let error = ConnectionError::Open(e);
                warn!("{}", error);
                self.inner
                    .bus
                    .publish(&SessionEvent::Error(error.to_string()));
                self.handle_close();
                return;
            }
        };

        // disconnect() may have been called while the handshake was in
        // flight; honor it before going live.
        if self.inner.explicit_disconnect.load(Ordering::SeqCst) {
            *lock(&self.inner.status) = SessionStatus::Disconnected;
            return;
        }

        let (mut ws_tx, mut ws_rx) = stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<OutboundMessage>();
        *lock(&self.inner.outbound) = Some(outbound_tx);

        self.publish_session(SessionStatus::Connected);
        self.inner.store.set_connected(true);
        self.inner.bus.publish(&SessionEvent::Connected);
        info!("Session channel connected");

        // Heartbeat timer; the interval's immediate first tick is skipped.
        let manager = self.clone();
        let heartbeat = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(manager.inner.config.heartbeat_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                manager.send(OutboundMessage::Ping);
            }
        });
        if let Some(old) = lock(&self.inner.heartbeat_task).replace(heartbeat) {
            old.abort();
        }

        // Channel I/O: drain outbound messages and route inbound frames.
        let manager = self.clone();
        let io = tokio::spawn(async move {
            loop {
                tokio::select! {
                    outbound = outbound_rx.recv() => {
                        match outbound {
                            Some(message) => {
                                let text = match serde_json::to_string(&message) {
                                    Ok(text) => text,
                                    Err(e) => {
                                        error!("Failed to serialize outbound message: {}", e);
                                        continue;
                                    }
                                };
                                if let Err(e) = ws_tx.send(Message::Text(text)).await {
                                    warn!("Failed to send on session channel: {}", e);
                                    break;
                                }
                            }
                            // disconnect() dropped the sender; close politely.
                            None => {
                                let _ = ws_tx.close().await;
                                break;
                            }
                        }
                    }
                    inbound = ws_rx.next() => {
                        match inbound {
                            Some(Ok(Message::Text(text))) => manager.inner.router.dispatch(&text),
                            Some(Ok(Message::Close(_))) | None => break,
                            // Other frame kinds are not part of the protocol.
                            Some(Ok(_)) => {}
                            Some(Err(e)) => {
                                let error = ConnectionError::Open(e);
                                warn!("Session channel error: {}", error);
                                manager.inner.bus.publish(&SessionEvent::Error(error.to_string()));
                                break;
                            }
                        }
                    }
                }
            }
            manager.handle_close();
        });
        if let Some(old) = lock(&self.inner.io_task).replace(io) {
            old.abort();
        }
    }

    /// Tear the session down for good.
    ///
    /// Cancels any pending reconnect and the heartbeat, closes the
    /// channel if open, and leaves the session `Disconnected`. No
    /// reconnect fires afterwards, even if one was already scheduled.
    pub async fn disconnect(&self) {
        info!("Disconnecting session");
        self.inner.explicit_disconnect.store(true, Ordering::SeqCst);

        if let Some(task) = lock(&self.inner.reconnect_task).take() {
            task.abort();
        }
        if let Some(task) = lock(&self.inner.heartbeat_task).take() {
            task.abort();
        }
        // Dropping the sender makes the I/O task close the channel and exit.
        *lock(&self.inner.outbound) = None;

        let io = lock(&self.inner.io_task).take();
        if let Some(task) = io {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    error!("Session I/O task panicked: {}", e);
                }
            }
        }

        self.inner.store.set_connected(false);
        self.inner.store.set_session(None);
        *lock(&self.inner.status) = SessionStatus::Disconnected;
        self.inner.bus.publish(&SessionEvent::Disconnected);
    }

    /// Send one opaque audio chunk.
    ///
    /// Silently dropped when the channel is not open; callers that need
    /// delivery must check [`SessionManager::status`] first.
    pub fn send_audio(&self, chunk: &[u8]) {
        let data = base64::engine::general_purpose::STANDARD.encode(chunk);
        self.send(OutboundMessage::Audio { data });
    }

    /// Ask the backend to switch this participant's subtitle language.
    ///
    /// Silently dropped when the channel is not open.
    pub fn change_language(&self, language: &str) {
        self.send(OutboundMessage::LanguageChange {
            language: language.to_string(),
        });
    }

    fn send(&self, message: OutboundMessage) {
        if let Some(tx) = lock(&self.inner.outbound).as_ref() {
            let _ = tx.send(message);
        }
    }

    /// Shared teardown after the channel closed, from either side.
    fn handle_close(&self) {
        *lock(&self.inner.outbound) = None;
        if let Some(task) = lock(&self.inner.heartbeat_task).take() {
            task.abort();
        }
        self.inner.store.set_connected(false);

        // Explicit disconnect owns the terminal transition.
        if self.inner.explicit_disconnect.load(Ordering::SeqCst) {
            return;
        }

        self.publish_session(SessionStatus::Reconnecting);
        self.inner.bus.publish(&SessionEvent::Disconnected);
        info!(
            "{}, reconnecting in {:?}",
            ConnectionError::Closed,
            self.inner.config.reconnect_delay
        );

        let manager = self.clone();
        let delay = self.inner.config.reconnect_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            info!("Attempting to reconnect");
            manager.connect().await;
        });
        if let Some(old) = lock(&self.inner.reconnect_task).replace(handle) {
            old.abort();
        }
    }

    /// Mirror the current lifecycle state into the store's session record.
    fn publish_session(&self, status: SessionStatus) {
        *lock(&self.inner.status) = status;
        self.inner.store.set_session(Some(Session {
            id: self.inner.config.session_id.clone(),
            status,
            participant_id: self.inner.config.participant_id.clone(),
            preferred_language: self.inner.config.preferred_language.clone(),
        }));
    }
}
