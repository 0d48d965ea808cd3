/// Progress reports from the enrichment queue, one channel message per
/// lifecycle step of an admitted word.
#[derive(Debug, Clone)]
pub enum QueueEvent {
    /// The word was admitted into the active set and its request dispatched.
    Started(String),
    /// Enrichment succeeded and the new vocabulary entry was stored.
    Completed { word: String, word_id: String },
    /// Enrichment failed; the word was dropped from the pipeline.
    Failed { word: String, error: String },
}

impl QueueEvent {
    pub fn word(&self) -> &str {
        match self {
            QueueEvent::Started(word) => word,
            QueueEvent::Completed { word, .. } => word,
            QueueEvent::Failed { word, .. } => word,
        }
    }
}
