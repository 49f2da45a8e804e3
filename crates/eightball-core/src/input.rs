//! Typed input queue between the UI layer and the game core.
//!
//! The browser translates raw DOM events into these messages and pushes
//! them in; the core drains the queue exactly once per tick, which keeps
//! input timing decoupled from simulation timing.

/// A control message from the UI layer, already projected into table
/// coordinates where relevant.
#[derive(Debug, Clone, Copy)]
pub enum ControlEvent {
    /// Pointer moved; aim toward this point on the table plane.
    AimAt { x: f32, y: f32 },
    /// Begin lining up a shot (space pressed / first click).
    BeginAim,
    /// Adjust shot power by a signed step (arrow keys send +/-5).
    PowerDelta(i8),
    /// Release the shot with the current aim and power.
    Commit,
    /// Start a fresh match.
    Reset,
    /// A custom event from the surrounding UI (chest pull, menu buttons).
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Queue of pending control events. JS writes, Rust drains each frame.
pub struct ControlQueue {
    events: Vec<ControlEvent>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: ControlEvent) {
        self.events.push(event);
    }

    /// Drain all pending events, clearing the queue.
    pub fn drain(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for ControlQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = ControlQueue::new();
        q.push(ControlEvent::AimAt { x: 0.5, y: -0.2 });
        q.push(ControlEvent::PowerDelta(5));
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn custom_event_payload() {
        let mut q = ControlQueue::new();
        q.push(ControlEvent::Custom { kind: 2, a: 1.0, b: 0.0, c: 0.0 });
        match q.drain()[0] {
            ControlEvent::Custom { kind, a, .. } => {
                assert_eq!(kind, 2);
                assert_eq!(a, 1.0);
            }
            _ => panic!("expected Custom event"),
        }
    }
}
