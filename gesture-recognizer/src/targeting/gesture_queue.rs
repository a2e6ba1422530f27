//! Gesture Queue
//!
//! Fixed-depth ring of upcoming target gestures. Slot 0 is the gesture the
//! player is expected to draw next. Advancing moves the logical head instead
//! of shifting slots, so every slot keeps its draw and only the tail is
//! refilled.
//!
//! Each draw is stamped with a monotonically increasing sequence number,
//! which identifies a slot's content even when the same template is drawn
//! more than once.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crate::{Error, Result};

/// Default number of upcoming gestures
pub const DEFAULT_DEPTH: usize = 3;

/// Display scale of slot 0
pub const FULL_SCALE: f64 = 1.0;

/// Display scale of every slot behind slot 0
pub const REDUCED_SCALE: f64 = 0.7;

/// Display emphasis derived from a slot's logical position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleTag {
    Full,
    Reduced,
}

impl ScaleTag {
    fn for_position(position: usize) -> Self {
        if position == 0 {
            ScaleTag::Full
        } else {
            ScaleTag::Reduced
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            ScaleTag::Full => FULL_SCALE,
            ScaleTag::Reduced => REDUCED_SCALE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueSlot {
    /// Index into the template library
    template: usize,
    /// Draw number of this assignment
    sequence: u64,
}

/// Read view of one logical slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotView {
    /// Logical position, 0 = front
    pub position: usize,
    pub template: usize,
    pub sequence: u64,
    pub scale: ScaleTag,
}

/// Ring buffer of upcoming gestures
#[derive(Debug, Clone)]
pub struct GestureQueue<R: Rng = StdRng> {
    slots: Vec<QueueSlot>,
    /// Physical index of logical slot 0
    head: usize,
    template_count: usize,
    next_sequence: u64,
    rng: R,
}

impl GestureQueue<StdRng> {
    /// Queue drawing from a seeded generator, for reproducible runs
    pub fn seeded(depth: usize, template_count: usize, seed: u64) -> Result<Self> {
        Self::new(depth, template_count, StdRng::seed_from_u64(seed))
    }

    /// Queue drawing from an OS-seeded generator
    pub fn from_entropy(depth: usize, template_count: usize) -> Result<Self> {
        Self::new(depth, template_count, StdRng::from_entropy())
    }
}

impl<R: Rng> GestureQueue<R> {
    /// Create a queue of `depth` slots over `template_count` templates.
    ///
    /// The queue starts filled.
    pub fn new(depth: usize, template_count: usize, rng: R) -> Result<Self> {
        if depth == 0 {
            return Err(Error::Config("gesture queue depth must be at least 1".to_string()));
        }
        if template_count == 0 {
            return Err(Error::NoTemplates);
        }

        let mut queue = Self {
            slots: vec![
                QueueSlot {
                    template: 0,
                    sequence: 0,
                };
                depth
            ],
            head: 0,
            template_count,
            next_sequence: 0,
            rng,
        };
        queue.reset();
        Ok(queue)
    }

    /// Refill every slot, front to back, with fresh draws
    pub fn reset(&mut self) {
        for position in 0..self.slots.len() {
            let physical = self.physical(position);
            self.slots[physical] = self.draw();
        }
        debug!(depth = self.slots.len(), "Gesture queue reset");
    }

    /// Drop slot 0 and move every other slot forward by one.
    ///
    /// The last logical slot receives a fresh draw.
    pub fn advance(&mut self) {
        // The old front becomes the new back
        let evicted = self.head;
        self.slots[evicted] = self.draw();
        self.head = (self.head + 1) % self.slots.len();

        debug!(
            expected = self.slots[self.head].template,
            sequence = self.slots[self.head].sequence,
            "Gesture queue advanced"
        );
    }

    /// Template index at slot 0
    pub fn expected(&self) -> Option<usize> {
        self.slot(0).map(|s| s.template)
    }

    pub fn slot(&self, position: usize) -> Option<SlotView> {
        if position >= self.slots.len() {
            return None;
        }
        let slot = self.slots[self.physical(position)];
        Some(SlotView {
            position,
            template: slot.template,
            sequence: slot.sequence,
            scale: ScaleTag::for_position(position),
        })
    }

    /// Slots front to back
    pub fn slots(&self) -> impl Iterator<Item = SlotView> + '_ {
        (0..self.slots.len()).filter_map(move |position| self.slot(position))
    }

    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    pub fn template_count(&self) -> usize {
        self.template_count
    }

    fn physical(&self, position: usize) -> usize {
        (self.head + position) % self.slots.len()
    }

    fn draw(&mut self) -> QueueSlot {
        let slot = QueueSlot {
            template: self.rng.gen_range(0..self.template_count),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        slot
    }
}
