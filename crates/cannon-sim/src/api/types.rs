/// Identifier stored in a physics body's user data. Reported in contact pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// One occupancy of a projectile slot.
///
/// The generation is bumped every time the slot is emptied, so an id kept
/// across frames stops resolving once its projectile has expired, even if
/// the slot index is handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileId {
    pub index: usize,
    pub generation: u32,
}

/// Outcome of a single simulation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The frame ran to completion and was presented.
    Presented,
    /// A close event was drained; nothing was stepped or drawn.
    Closed,
}
