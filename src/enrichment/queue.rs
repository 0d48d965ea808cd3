use std::sync::Arc;

use tokio::{
    runtime::Handle,
    sync::{
        mpsc,
        Notify,
    },
};

use super::types::QueueEvent;
use crate::{
    llm::WordEnricher,
    store::SharedStore,
};

/// Drains the store's pending queue into the active set, at most
/// `concurrency_limit` enrichment calls in flight. Admission is FIFO;
/// completion order is whatever the external calls make of it.
///
/// The controller is event driven: `on_state_change` re-runs the admission
/// loop and is safe to invoke redundantly. It must be called after anything
/// that grows the pending queue or raises the concurrency limit (`enqueue`
/// does it itself; settings changes are on the caller).
#[derive(Clone)]
pub struct EnrichmentQueue {
    store: SharedStore,
    enricher: Arc<dyn WordEnricher>,
    runtime: Handle,
    events: mpsc::UnboundedSender<QueueEvent>,
    idle: Arc<Notify>,
}

impl EnrichmentQueue {
    pub fn new(
        store: SharedStore,
        enricher: Arc<dyn WordEnricher>,
        runtime: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<QueueEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let queue = Self { store, enricher, runtime, events, idle: Arc::new(Notify::new()) };
        (queue, receiver)
    }

    /// Append word strings to the pending queue and re-evaluate admission.
    /// No dedup: duplicates are enriched independently.
    pub fn enqueue(&self, words: Vec<String>) {
        if words.is_empty() {
            return;
        }
        {
            let mut store = self.store.lock().unwrap();
            store.enqueue_words(words);
        }
        self.on_state_change();
    }

    /// Admission loop: while a slot is free and work is pending, move the
    /// pending head into the active set and dispatch its enrichment task.
    /// Admission happens under one lock acquisition, so a word is never in
    /// both queues at once and the ceiling is never overshot.
    pub fn on_state_change(&self) {
        let admitted = {
            let mut store = self.store.lock().unwrap();
            let limit = store.settings.concurrency_limit.max(1);
            let mut admitted = Vec::new();
            while store.active_queue.len() < limit {
                match store.move_to_active() {
                    Some(word) => admitted.push(word),
                    None => break,
                }
            }
            admitted
        };

        for word in admitted {
            self.spawn_enrichment(word);
        }
    }

    fn spawn_enrichment(&self, word: String) {
        let queue = self.clone();
        self.runtime.spawn(async move {
            let _ = queue.events.send(QueueEvent::Started(word.clone()));

            // Frees the slot on every exit path and re-runs admission.
            let _slot = SlotGuard { queue: queue.clone(), word: word.clone() };

            match queue.enricher.generate_word_data(&word).await {
                Ok(generated) => {
                    let entry = generated.into_word();
                    let word_id = entry.id.clone();
                    queue.store.lock().unwrap().add_word(entry);
                    let _ = queue.events.send(QueueEvent::Completed { word, word_id });
                }
                Err(e) => {
                    log::warn!("Enrichment failed for {:?}: {}", word, e);
                    let _ = queue.events.send(QueueEvent::Failed { word, error: e.to_string() });
                }
            }
        });
    }

    pub fn is_idle(&self) -> bool {
        let store = self.store.lock().unwrap();
        store.processing_queue.is_empty() && store.active_queue.is_empty()
    }

    /// Resolve once both the pending queue and the active set are empty.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            if self.is_idle() {
                return;
            }
            notified.await;
        }
    }
}

struct SlotGuard {
    queue: EnrichmentQueue,
    word: String,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        {
            let mut store = self.queue.store.lock().unwrap();
            store.complete_processing(&self.word);
        }
        self.queue.idle.notify_waiters();
        self.queue.on_state_change();
    }
}
