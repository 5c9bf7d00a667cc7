/*
 * Debounced show/hide logic for the blocking wait indicator, driven by the
 * dispatcher's task signals. A `Starting` signal schedules a show after a
 * fixed delay rather than showing immediately, so near-instant calls never
 * flash a spinner; an `Ending` signal cancels any pending show and
 * dismisses a shown indicator. Only the most recently scheduled show is
 * kept (single-slot debounce, not a queue).
 *
 * The controller is a pure state machine over an injected clock: the shell
 * calls `poll` from its event loop with the current instant and renders or
 * dismisses based on the returned transitions. Attaching the indicator to a
 * window that can no longer host it is the shell's problem; the machine
 * itself is total.
 */
use std::time::{Duration, Instant};

pub const SPINNER_SHOW_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Hidden,
    PendingShow,
    Shown,
}

#[derive(Debug)]
pub struct ProgressController {
    state: IndicatorState,
    show_at: Option<Instant>,
}

impl ProgressController {
    pub fn new() -> Self {
        ProgressController {
            state: IndicatorState::Hidden,
            show_at: None,
        }
    }

    pub fn state(&self) -> IndicatorState {
        self.state
    }

    /*
     * Reacts to a `Starting` signal. From Hidden this schedules a show
     * after the delay; from PendingShow it replaces the pending deadline
     * (the single slot); a Shown indicator stays shown.
     */
    pub fn on_task_starting(&mut self, now: Instant) {
        match self.state {
            IndicatorState::Hidden | IndicatorState::PendingShow => {
                self.state = IndicatorState::PendingShow;
                self.show_at = Some(now + SPINNER_SHOW_DELAY);
            }
            IndicatorState::Shown => {}
        }
    }

    /// Reacts to an `Ending` signal. Returns true when a visible indicator
    /// must be dismissed; a pending show is silently cancelled.
    pub fn on_task_ending(&mut self) -> bool {
        let was_shown = self.state == IndicatorState::Shown;
        self.state = IndicatorState::Hidden;
        self.show_at = None;
        was_shown
    }

    /// Advances the machine to `now`. Returns true exactly when the shell
    /// must render the indicator (the pending delay has elapsed).
    pub fn poll(&mut self, now: Instant) -> bool {
        match (self.state, self.show_at) {
            (IndicatorState::PendingShow, Some(deadline)) if now >= deadline => {
                self.state = IndicatorState::Shown;
                self.show_at = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for ProgressController {
    fn default() -> Self {
        ProgressController::new()
    }
}
