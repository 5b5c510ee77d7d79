//! Sources of recognized text
//!
//! Speech recognition happens outside this crate; a source only hands over
//! text that was already recognized, one utterance at a time.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Utterances buffered between the reader thread and the session
const QUEUE_DEPTH: usize = 8;

pub trait InputSource {
    /// Wait up to `timeout` for one utterance; `None` means nothing was heard
    fn listen_once(&mut self, timeout: Duration) -> Option<String>;

    /// True once no further utterances can arrive
    fn is_closed(&self) -> bool {
        false
    }

    /// Stop background capture. Sources without any have nothing to do.
    fn stop(&mut self) {}
}

/// Lines read on a background thread, one line per utterance
///
/// Lines travel through a bounded queue, so the session handles one
/// utterance to completion before the next is taken.
pub struct LineSource {
    receiver: Option<Receiver<String>>,
    stopped: Arc<AtomicBool>,
    closed: bool,
}

impl LineSource {
    pub fn new<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (sender, receiver) = mpsc::sync_channel(QUEUE_DEPTH);
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stopped);

        thread::spawn(move || read_lines(reader, sender, flag));

        Self {
            receiver: Some(receiver),
            stopped,
            closed: false,
        }
    }

    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

fn read_lines<R: BufRead>(reader: R, sender: SyncSender<String>, stopped: Arc<AtomicBool>) {
    for line in reader.lines() {
        if stopped.load(Ordering::Relaxed) {
            break;
        }
        match line {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if sender.send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!("Input read failed: {}", e);
                break;
            }
        }
    }
    tracing::debug!("Input reader finished");
}

impl InputSource for LineSource {
    fn listen_once(&mut self, timeout: Duration) -> Option<String> {
        let receiver = self.receiver.as_ref()?;
        match receiver.recv_timeout(timeout) {
            Ok(text) => Some(text),
            Err(RecvTimeoutError::Timeout) => {
                tracing::debug!("No speech detected");
                None
            }
            Err(RecvTimeoutError::Disconnected) => {
                self.closed = true;
                None
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.closed || self.receiver.is_none()
    }

    /// The reader thread is not joined: it may be blocked in a read, and
    /// exits on its next line once the flag is set and the queue is gone.
    fn stop(&mut self) {
        self.stopped.store(true, Ordering::Relaxed);
        self.receiver = None;
        tracing::info!("Stopped listening");
    }
}

/// A fixed list of utterances, delivered in order
#[derive(Debug, Default)]
pub struct ScriptedSource {
    utterances: VecDeque<String>,
}

impl ScriptedSource {
    pub fn new<I, S>(utterances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            utterances: utterances.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for ScriptedSource {
    fn listen_once(&mut self, _timeout: Duration) -> Option<String> {
        self.utterances.pop_front()
    }

    fn is_closed(&self) -> bool {
        self.utterances.is_empty()
    }

    fn stop(&mut self) {
        self.utterances.clear();
    }
}
