use arrayvec::ArrayVec;

use crate::PieceKind;

/// Number of pieces previewed ahead of the falling one.
pub const UPCOMING_LEN: usize = 3;

/// Fixed-length lookahead of the pieces that will fall next.
///
/// The head is dealt when the current piece locks and a fresh kind is pushed
/// at the tail, so the queue always holds [`UPCOMING_LEN`] kinds once filled.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceKind, UpcomingQueue};
///
/// let mut queue = UpcomingQueue::new();
/// queue.reset([PieceKind::I, PieceKind::O, PieceKind::T]);
///
/// assert_eq!(queue.advance(PieceKind::S), Some(PieceKind::I));
/// assert_eq!(queue.as_slice(), [PieceKind::O, PieceKind::T, PieceKind::S]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpcomingQueue {
    kinds: ArrayVec<PieceKind, UPCOMING_LEN>,
}

impl UpcomingQueue {
    /// Creates an empty queue; nothing is previewed before a game starts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole queue.
    pub fn reset(&mut self, kinds: [PieceKind; UPCOMING_LEN]) {
        self.kinds = ArrayVec::from(kinds);
    }

    /// Removes and returns the head, appending `tail` at the back.
    ///
    /// Returns `None` (and queues `tail`) if the queue was empty.
    pub fn advance(&mut self, tail: PieceKind) -> Option<PieceKind> {
        let head = (!self.kinds.is_empty()).then(|| self.kinds.remove(0));
        self.kinds.push(tail);
        head
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PieceKind] {
        &self.kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_queue_is_empty() {
        let queue = UpcomingQueue::new();
        assert!(queue.as_slice().is_empty());
    }

    #[test]
    fn test_advance_is_fifo() {
        let mut queue = UpcomingQueue::new();
        queue.reset([PieceKind::J, PieceKind::L, PieceKind::Z]);

        assert_eq!(queue.advance(PieceKind::O), Some(PieceKind::J));
        assert_eq!(queue.advance(PieceKind::I), Some(PieceKind::L));
        assert_eq!(
            queue.as_slice(),
            [PieceKind::Z, PieceKind::O, PieceKind::I]
        );
    }

    #[test]
    fn test_advance_on_empty_queue() {
        let mut queue = UpcomingQueue::new();
        assert_eq!(queue.advance(PieceKind::T), None);
        assert_eq!(queue.as_slice(), [PieceKind::T]);
    }
}
