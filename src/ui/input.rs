//! Background key listener feeding the command queue.
//!
//! The listener thread only translates key events; the controller is owned
//! by the UI loop, which drains the queue between emissions.

use super::keymap::{map_key, InputEvent};
use crate::engine::config::TimingConfig;
use crate::engine::error::{Result, SprError};
use crossterm::event::{self, Event};
use log::{debug, error};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// FIFO of input events, drained by the UI loop.
pub struct CommandQueue {
    receiver: Receiver<InputEvent>,
    shutdown: Arc<AtomicBool>,
    listener: Option<JoinHandle<()>>,
}

impl CommandQueue {
    /// Starts the crossterm listener thread.
    pub fn spawn(timing: TimingConfig) -> Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);

        let listener = thread::Builder::new()
            .name("spr-input".to_string())
            .spawn(move || listen(sender, flag, timing))?;

        Ok(Self {
            receiver,
            shutdown,
            listener: Some(listener),
        })
    }

    /// A queue fed by the caller instead of the terminal.
    pub fn from_receiver(receiver: Receiver<InputEvent>) -> Self {
        Self {
            receiver,
            shutdown: Arc::new(AtomicBool::new(false)),
            listener: None,
        }
    }

    /// Waits up to `timeout` for the next event. `Ok(None)` on timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<InputEvent>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                Err(SprError::Terminal("input listener stopped".to_string()))
            }
        }
    }
}

impl Drop for CommandQueue {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(listener) = self.listener.take() {
            let _ = listener.join();
        }
    }
}

fn listen(sender: Sender<InputEvent>, shutdown: Arc<AtomicBool>, timing: TimingConfig) {
    while !shutdown.load(Ordering::SeqCst) {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                error!("Polling terminal events failed: {}", e);
                return;
            }
        }

        match event::read() {
            Ok(Event::Key(key)) => {
                if let Some(input) = map_key(key, &timing) {
                    if sender.send(input).is_err() {
                        return;
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!("Reading terminal event failed: {}", e);
                return;
            }
        }
    }
    debug!("Input listener stopped");
}
