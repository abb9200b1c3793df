impl<P, S, const N: usize> Shell<P, S, N>
where
    P: Platform,
    S: Screen<P>,
{
    /// Appends a screen and makes it active. A full stack drops the
    /// navigation rather than the screens below it.
    pub fn push(&mut self, screen: S) {
        if self.stack.push(screen).is_err() {
            debug!("nav: stack full at depth {}, push dropped", N);
            return;
        }
        self.invalidate();
    }

    /// Removes the active screen. The bottom element is the launcher and is
    /// never popped; at depth one this is a no-op.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }

        let _ = self.stack.pop();
        self.invalidate();
        true
    }

    pub fn current(&self) -> &S {
        let Some(top) = self.stack.last() else {
            unreachable!("stack is never empty while the shell runs");
        };
        top
    }

    pub fn current_mut(&mut self) -> &mut S {
        let Some(top) = self.stack.last_mut() else {
            unreachable!("stack is never empty while the shell runs");
        };
        top
    }

    /// Delivers the universal back gesture (a short power-key press) to the
    /// active screen; unhandled means "leave this screen".
    pub fn handle_back(&mut self) -> BackOutcome {
        let response = self.current_mut().on_back_pressed();
        let handled = response == BackResponse::Handled;

        let popped = if handled {
            // Handled back gestures usually mutate the screen (the launcher
            // resets its cursor), so a redraw is due either way.
            self.invalidate();
            false
        } else {
            self.pop()
        };

        let restart_requested = match self.config.back_restart {
            BackRestartPolicy::Never => false,
            BackRestartPolicy::AfterEveryBack => true,
            BackRestartPolicy::WhenRootReached => popped && self.stack.len() == 1,
        };

        BackOutcome {
            handled,
            popped,
            restart_requested,
        }
    }
}
