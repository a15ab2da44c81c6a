use crate::math::stats::StatsHelper;
use crate::prelude::WINDOW_LEN;

/// Fixed-capacity ring of the most recently accepted readings.
///
/// Pushing into a full window overwrites the oldest slot; nothing is ever
/// shifted or reallocated.
#[derive(Debug, Clone, Default)]
pub struct ReadingWindow {
    slots: [i32; WINDOW_LEN],
    head: usize,
    len: usize,
}

impl ReadingWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reading: i32) {
        let tail = (self.head + self.len) % WINDOW_LEN;
        self.slots[tail] = reading;
        if self.len < WINDOW_LEN {
            self.len += 1;
        } else {
            self.head = (self.head + 1) % WINDOW_LEN;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == WINDOW_LEN
    }

    /// Readings from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        (0..self.len).map(move |offset| self.slots[(self.head + offset) % WINDOW_LEN])
    }

    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }

    /// Rolling median, available only once the window is full.
    pub fn median(&self) -> Option<i32> {
        if !self.is_full() {
            return None;
        }
        let mut ordered = [0i32; WINDOW_LEN];
        for (slot, reading) in ordered.iter_mut().zip(self.iter()) {
            *slot = reading;
        }
        Some(StatsHelper::median_of_last_three(&ordered))
    }

    pub fn reset(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}
