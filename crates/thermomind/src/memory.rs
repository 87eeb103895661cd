//! Fixed-capacity ring store of (emotion, empathy) samples with trend stats.

use serde::{Deserialize, Serialize};

use crate::emotion::EmotionVector;

/// Default ring capacity.
pub const DEFAULT_MEMORY_SIZE: usize = 32;

/// One recorded sample: an emotion snapshot plus the empathy score observed
/// alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub emotion: EmotionVector,
    pub empathy: f32,
}

/// Aggregate view over the live buffer contents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RecallStats {
    pub mean_valence: f32,
    pub mean_arousal: f32,
    pub mean_tension: f32,
    pub mean_coherence: f32,
    pub mean_empathy: f32,
    /// Mean empathy of the newer half minus the older half; 0 below four
    /// entries.
    pub empathy_trend: f32,
    /// Number of live entries, capped at capacity.
    pub entries: usize,
}

/// Index-based ring buffer: grows to capacity, then overwrites the slot at
/// a rotating pointer. Entries are replaced in place, never removed, and
/// this is not a wall-clock window.
#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    entries: Vec<MemoryEntry>,
    capacity: usize,
    pointer: usize,
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_SIZE)
    }
}

impl MemoryBuffer {
    /// A `capacity` of zero is bumped to one so a store always lands
    /// somewhere.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            pointer: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record one sample, overwriting the oldest slot once full.
    pub fn store(&mut self, emotion: EmotionVector, empathy: f32) {
        let entry = MemoryEntry { emotion, empathy };
        if self.entries.len() < self.capacity {
            self.entries.push(entry);
        } else {
            self.entries[self.pointer] = entry;
            self.pointer = (self.pointer + 1) % self.capacity;
        }
    }

    /// Component means over the live entries plus the empathy trend.
    ///
    /// All zeros when empty. The trend splits the buffer content at
    /// `count / 2` in storage order and needs at least four entries.
    pub fn recall(&self) -> RecallStats {
        let count = self.entries.len();
        if count == 0 {
            return RecallStats::default();
        }
        let inv = 1.0 / count as f32;
        let mut stats = RecallStats {
            entries: count,
            ..RecallStats::default()
        };
        for entry in &self.entries {
            stats.mean_valence += entry.emotion.valence * inv;
            stats.mean_arousal += entry.emotion.arousal * inv;
            stats.mean_tension += entry.emotion.tension * inv;
            stats.mean_coherence += entry.emotion.coherence * inv;
            stats.mean_empathy += entry.empathy * inv;
        }
        if count >= 4 {
            let half = count / 2;
            let mean = |slice: &[MemoryEntry]| {
                slice.iter().map(|e| e.empathy).sum::<f32>() / slice.len() as f32
            };
            stats.empathy_trend = mean(&self.entries[half..]) - mean(&self.entries[..half]);
        }
        stats
    }
}
