//! Fixed-step slide animation bookkeeping.
//!
//! A screen that wants to animate fills the sequencer when the gesture
//! lands, then consumes one step per drawn frame. Frame pacing comes from
//! the render loop itself; the sequencer only remembers how far along the
//! slide is.

/// Queue of pending animation progress values, in percent of the full
/// travel. Consumed back to front, so a three-step slide plays 66, 33, 0:
/// the sprite starts displaced and settles onto its final position.
pub struct AnimationSequencer<const MAX: usize = 8> {
    queue: heapless::Vec<u8, MAX>,
}

impl<const MAX: usize> AnimationSequencer<MAX> {
    pub const fn new() -> Self {
        Self {
            queue: heapless::Vec::new(),
        }
    }

    /// Queues a slide of `steps` frames. Any steps beyond the queue
    /// capacity are dropped from the start of the slide, which shortens
    /// the travel but still ends on the resting frame.
    pub fn begin(&mut self, steps: u8) {
        self.queue.clear();
        for i in 0..steps {
            let progress = (u16::from(i) * 100 / u16::from(steps)) as u8;
            if self.queue.push(progress).is_err() {
                break;
            }
        }
    }

    /// Takes the next progress value, or `None` once the slide is done.
    pub fn next_progress(&mut self) -> Option<u8> {
        self.queue.pop()
    }

    pub fn is_active(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn cancel(&mut self) {
        self.queue.clear();
    }
}

impl<const MAX: usize> Default for AnimationSequencer<MAX> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_step_slide_plays_descending_and_ends_at_rest() {
        let mut seq: AnimationSequencer = AnimationSequencer::new();
        seq.begin(3);

        assert!(seq.is_active());
        assert_eq!(seq.next_progress(), Some(66));
        assert_eq!(seq.next_progress(), Some(33));
        assert_eq!(seq.next_progress(), Some(0));
        assert_eq!(seq.next_progress(), None);
        assert!(!seq.is_active());
    }

    #[test]
    fn new_gesture_replaces_a_running_slide() {
        let mut seq: AnimationSequencer = AnimationSequencer::new();
        seq.begin(3);
        let _ = seq.next_progress();

        seq.begin(2);
        assert_eq!(seq.next_progress(), Some(50));
        assert_eq!(seq.next_progress(), Some(0));
        assert_eq!(seq.next_progress(), None);
    }

    #[test]
    fn oversized_slide_is_truncated_but_still_settles() {
        let mut seq: AnimationSequencer<4> = AnimationSequencer::new();
        seq.begin(10);

        let mut last = None;
        while let Some(p) = seq.next_progress() {
            last = Some(p);
        }
        assert_eq!(last, Some(0));
    }

    #[test]
    fn cancel_empties_the_queue() {
        let mut seq: AnimationSequencer = AnimationSequencer::new();
        seq.begin(3);
        seq.cancel();
        assert!(!seq.is_active());
        assert_eq!(seq.next_progress(), None);
    }
}
