#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A raw pointer event projected onto the panel's drag axis.
///
/// `position` is the coordinate along the axis (container-relative logical
/// pixels), `timestamp_ms` the host's monotonic uptime for the event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub position: f32,
    pub timestamp_ms: u64,
    pub phase: PointerPhase,
}

impl PointerSample {
    pub fn new(phase: PointerPhase, position: f32, timestamp_ms: u64) -> Self {
        Self {
            position,
            timestamp_ms,
            phase,
        }
    }

    pub fn down(position: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Down, position, timestamp_ms)
    }

    pub fn moved(position: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Move, position, timestamp_ms)
    }

    pub fn up(position: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Up, position, timestamp_ms)
    }

    pub fn cancel(position: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Cancel, position, timestamp_ms)
    }
}
