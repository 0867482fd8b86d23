//! Scroll-trigger controller for infinite scrolling.
//!
//! Models the sentinel-observer pattern as a pure state machine: the view
//! layer reports sentinel visibility transitions and this controller
//! decides when exactly one fetch should fire per threshold crossing.
//! Each rebind gets a fresh [`Generation`]; reports from a disconnected
//! generation (a sentinel that no longer exists) are ignored.

/// How far ahead of the viewport the sentinel counts as near-visible, in
/// CSS pixels. 800px is a tuning heuristic: roughly one page of cards,
/// so the fetch lands before the user reaches the end.
pub const PREFETCH_MARGIN_PX: u32 = 800;

/// Identifies one observer binding. Stale generations are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Where the sentinel currently sits relative to the pre-trigger zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelVisibility {
    /// Inside the viewport or within [`PREFETCH_MARGIN_PX`] of it.
    NearVisible,
    /// Beyond the pre-trigger zone.
    Hidden,
}

/// What the caller should do after a visibility report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Trigger `load_more` on the listing.
    Fetch,
    None,
}

/// Gatekeeper between sentinel visibility and `load_more`.
#[derive(Debug)]
pub struct ScrollTrigger {
    current: Option<Generation>,
    next_generation: u64,
    /// Set once the sentinel enters the zone; cleared when it leaves.
    /// Prevents repeat fires while the sentinel stays near-visible.
    armed_fired: bool,
    in_flight: bool,
    has_more: bool,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollTrigger {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: None,
            next_generation: 0,
            armed_fired: false,
            has_more: true,
            in_flight: false,
        }
    }

    /// Bind to a fresh sentinel, disconnecting the previous binding.
    ///
    /// Called whenever the list resets (e.g. a category switch recreates
    /// the sentinel). Reports carrying an older generation are ignored
    /// from this point on.
    pub fn rebind(&mut self) -> Generation {
        self.next_generation += 1;
        let generation = Generation(self.next_generation);
        self.current = Some(generation);
        self.armed_fired = false;
        generation
    }

    /// Drop all bindings. Used on view unmount; any in-flight fetch result
    /// is simply ignored by its stale listing ticket.
    pub fn disconnect(&mut self) {
        self.current = None;
    }

    /// Report a sentinel visibility transition.
    ///
    /// Fires at most once per crossing into the near-visible zone, and
    /// only while the listing has more pages and no fetch is running.
    pub fn observe(&mut self, generation: Generation, visibility: SentinelVisibility) -> Action {
        if self.current != Some(generation) {
            return Action::None;
        }

        match visibility {
            SentinelVisibility::Hidden => {
                // Leaving the zone re-arms the trigger.
                self.armed_fired = false;
                Action::None
            }
            SentinelVisibility::NearVisible => {
                if self.armed_fired || self.in_flight || !self.has_more {
                    return Action::None;
                }
                self.armed_fired = true;
                Action::Fetch
            }
        }
    }

    /// Mirror the listing's in-flight flag.
    pub const fn set_in_flight(&mut self, in_flight: bool) {
        self.in_flight = in_flight;
    }

    /// Mirror the listing's `has_more` flag.
    pub const fn set_has_more(&mut self, has_more: bool) {
        self.has_more = has_more;
    }
}
