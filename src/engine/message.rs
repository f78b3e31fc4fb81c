//! Bouquet messages.
//!
//! A message is requested once per bouquet assembly. Providers run on a
//! worker thread; the frame loop polls the result without blocking and falls
//! back to a default message if the provider fails.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub meaning: String,
}

impl Message {
    /// Used when the provider cannot deliver.
    pub fn fallback(flower_count: usize, varieties: &str) -> Self {
        Message {
            text: "Every flower here was planted thinking of you.".into(),
            meaning: describe(flower_count, varieties),
        }
    }
}

fn describe(flower_count: usize, varieties: &str) -> String {
    let noun = if flower_count == 1 { "flower" } else { "flowers" };
    format!("A bouquet of {flower_count} {noun} in shades of {varieties}, made with love for you.")
}

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("message provider unavailable: {0}")]
    Unavailable(String),
    #[error("message worker disconnected")]
    Disconnected,
}

/// Anything that can write a message for a finished bouquet.
pub trait MessageProvider: Send + Sync {
    fn generate(&self, flower_count: usize, varieties: &str) -> Result<Message, MessageError>;
}

const CANNED: [&str; 5] = [
    "Every flower is a heartbeat of mine for you. Happy Valentine's Day!",
    "Your love makes my world bloom every day. I love you endlessly.",
    "Like these flowers, my love for you keeps growing. Always yours.",
    "You are my favourite garden and my sun every morning.",
    "Not all the flowers in the world compare to you. I adore you.",
];

/// Picks one of a handful of canned lines after a short pause.
#[derive(Debug, Clone)]
pub struct CannedMessages {
    delay: Duration,
}

impl CannedMessages {
    pub fn new(delay: Duration) -> Self {
        CannedMessages { delay }
    }
}

impl MessageProvider for CannedMessages {
    fn generate(&self, flower_count: usize, varieties: &str) -> Result<Message, MessageError> {
        thread::sleep(self.delay);
        let text = CANNED
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| MessageError::Unavailable("no canned messages".into()))?;
        Ok(Message {
            text: (*text).to_string(),
            meaning: describe(flower_count, varieties),
        })
    }
}

/// What the garden asks a provider for when a bouquet is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageQuery {
    pub flower_count: usize,
    /// Distinct variety names in planting order, comma separated.
    pub varieties: String,
    /// Garden epoch the query was issued in; stale answers are dropped.
    pub epoch: u64,
}

/// A message being generated on a worker thread.
pub struct MessageRequest {
    query: MessageQuery,
    rx: Receiver<Result<Message, MessageError>>,
}

impl MessageRequest {
    pub fn spawn(provider: Arc<dyn MessageProvider>, query: MessageQuery) -> Self {
        let (tx, rx) = mpsc::channel();
        let count = query.flower_count;
        let varieties = query.varieties.clone();
        thread::spawn(move || {
            // The receiver may be gone after a reset.
            let _ = tx.send(provider.generate(count, &varieties));
        });
        MessageRequest { query, rx }
    }

    pub fn epoch(&self) -> u64 {
        self.query.epoch
    }

    /// Non-blocking check. Returns `None` while the provider is still
    /// working; failures resolve to the fallback message.
    pub fn poll(&self) -> Option<Message> {
        let outcome = match self.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(MessageError::Disconnected),
        };
        Some(outcome.unwrap_or_else(|e| {
            log::warn!("message generation failed ({e}), using fallback");
            Message::fallback(self.query.flower_count, &self.query.varieties)
        }))
    }
}
