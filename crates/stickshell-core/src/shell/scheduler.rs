impl<P, S, const N: usize> Shell<P, S, N>
where
    P: Platform,
    S: Screen<P>,
{
    /// One cooperative scheduler pass: if a redraw is pending, clear the
    /// flag, draw whichever screen is active at that moment, then run the
    /// platform's memory-reclamation pass. Returns whether a frame was
    /// drawn.
    ///
    /// The caller loops over this with a short bounded sleep in between;
    /// at most one draw happens per pass, and a navigation racing in while
    /// drawing is picked up on the next pass, never mid-draw. A draw that
    /// reports a pending animation step re-marks the flag so the very next
    /// pass produces the following frame.
    pub fn service_frame(&mut self, platform: &mut P) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;

        let outcome = self.current_mut().on_draw(platform);
        platform.reclaim();

        if outcome == DrawOutcome::AnimationPending {
            self.dirty = true;
        }
        true
    }
}
