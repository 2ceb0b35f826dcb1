use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::state::SearchOutcome;

/// What: Channel endpoints connecting background producers to the event loop.
///
/// Details:
/// - Terminal events come from the reader thread; search outcomes from
///   spawned search tasks.
pub struct Channels {
    /// Terminal events sender (held by the reader thread).
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    /// Terminal events receiver.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Search outcome sender (cloned into each search task).
    pub search_tx: mpsc::UnboundedSender<SearchOutcome>,
    /// Search outcome receiver.
    pub search_rx: mpsc::UnboundedReceiver<SearchOutcome>,
}

impl Channels {
    /// Create all channels.
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (search_tx, search_rx) = mpsc::unbounded_channel();
        Self {
            event_tx,
            event_rx,
            search_tx,
            search_rx,
        }
    }
}

impl Channels {
    /// What: Drop terminal events that are already queued.
    ///
    /// Inputs: None
    ///
    /// Output: Number of events dropped.
    ///
    /// Details:
    /// - Keys typed before or during an operation must not act as new
    ///   triggers once the UI is back.
    pub fn discard_queued_events(&mut self) -> usize {
        let mut dropped = 0;
        while self.event_rx.try_recv().is_ok() {
            dropped += 1;
        }
        dropped
    }
}

impl Default for Channels {
    fn default() -> Self {
        Self::new()
    }
}

/// What: Read and drop input that is already buffered by the terminal layer.
///
/// Inputs:
/// - `poll`: Non-blocking readiness check
/// - `read`: Reads one event
///
/// Output: Number of events dropped.
///
/// Details:
/// - Stops at the first poll or read error.
pub fn discard_buffered_input<P, R>(mut poll: P, mut read: R) -> usize
where
    P: FnMut() -> std::io::Result<bool>,
    R: FnMut() -> std::io::Result<CEvent>,
{
    let mut dropped = 0;
    while matches!(poll(), Ok(true)) {
        if read().is_err() {
            break;
        }
        dropped += 1;
    }
    dropped
}

/// Flags shared with the reader thread.
#[derive(Default)]
struct ReaderFlags {
    /// Exit the thread.
    cancelled: AtomicBool,
    /// Stop reading terminal input.
    paused: AtomicBool,
    /// Set by the thread while it is paused and not touching stdin.
    parked: AtomicBool,
}

/// Handle to the terminal event reader thread.
pub struct EventReader {
    /// Shared control flags.
    flags: Arc<ReaderFlags>,
}

/// Interval at which the reader checks its flags.
const READER_POLL: Duration = Duration::from_millis(50);

/// Upper bound on how long `pause` waits for the thread to park.
const PARK_TIMEOUT: Duration = Duration::from_secs(1);

impl EventReader {
    /// What: Stop the thread from reading input and wait until it is parked.
    ///
    /// Inputs: None
    ///
    /// Output: None
    ///
    /// Details:
    /// - After this returns, keystrokes reach whoever reads stdin next (a
    ///   child on a pty or the acknowledgement prompt).
    pub fn pause(&self) {
        self.flags.paused.store(true, Ordering::SeqCst);
        let started = Instant::now();
        while !self.flags.parked.load(Ordering::SeqCst) {
            if started.elapsed() > PARK_TIMEOUT {
                tracing::warn!("[Runtime] event reader did not park in time");
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    /// Let the thread read input again.
    pub fn resume(&self) {
        self.flags.paused.store(false, Ordering::SeqCst);
    }

    /// Ask the thread to exit.
    pub fn cancel(&self) {
        self.flags.cancelled.store(true, Ordering::SeqCst);
    }
}

/// What: Spawn the thread that forwards terminal events to `event_tx`.
///
/// Inputs:
/// - `event_tx`: Channel sender for terminal events
///
/// Output: Handle used to pause, resume and cancel the thread.
///
/// Details:
/// - Polls with a short timeout so flag changes are noticed promptly.
/// - The paused flag is re-checked after `poll` reports input, so a pending
///   event is left unread once a pause has been requested.
pub fn spawn_event_thread(event_tx: mpsc::UnboundedSender<CEvent>) -> EventReader {
    let flags = Arc::new(ReaderFlags::default());
    let thread_flags = Arc::clone(&flags);
    std::thread::spawn(move || {
        let flags = thread_flags;
        loop {
            if flags.cancelled.load(Ordering::SeqCst) {
                break;
            }
            if flags.paused.load(Ordering::SeqCst) {
                flags.parked.store(true, Ordering::SeqCst);
                std::thread::sleep(READER_POLL);
                continue;
            }
            flags.parked.store(false, Ordering::SeqCst);
            match crossterm::event::poll(READER_POLL) {
                Ok(true) => {
                    if flags.paused.load(Ordering::SeqCst) {
                        continue;
                    }
                    match crossterm::event::read() {
                        Ok(ev) => {
                            if event_tx.send(ev).is_err() {
                                break;
                            }
                        }
                        Err(e) => tracing::debug!("[Runtime] event read error: {e}"),
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::debug!("[Runtime] event poll error: {e}");
                    std::thread::sleep(READER_POLL);
                }
            }
        }
        tracing::debug!("[Runtime] event reader exited");
    });
    EventReader { flags }
}
