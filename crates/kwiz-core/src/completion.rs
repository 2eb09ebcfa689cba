//! Detects the end of a game.

use crate::board::Board;

/// Reports completion once per game.
///
/// A board is complete when the pool and the on-deck slot are empty and every
/// placed landmark is confirmed. The detector latches after the first report,
/// so observing the same terminal board again returns nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionDetector {
    final_score: Option<u32>,
}

impl CompletionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the final score the first time `board` is seen complete.
    pub fn observe(&mut self, board: &Board, score: u32) -> Option<u32> {
        if self.final_score.is_some() || !board.is_solved() {
            return None;
        }
        self.final_score = Some(score);
        Some(score)
    }

    pub fn has_fired(&self) -> bool {
        self.final_score.is_some()
    }

    /// The score reported on completion, if it happened.
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Card, Placement};
    use kwiz_events::Landmark;

    fn confirmed(id: u32, date: &str) -> Card {
        Card::new(Landmark::new(id, date), Placement::PlacedConfirmed)
    }

    #[test]
    fn test_fires_once_on_terminal_board() {
        let board = Board::from_parts(
            None,
            vec![confirmed(1, "2010"), confirmed(2, "2020")],
            vec![],
        )
        .unwrap();
        let mut detector = CompletionDetector::new();

        assert_eq!(detector.observe(&board, 6), Some(6));
        assert_eq!(detector.observe(&board, 6), None);
        assert_eq!(detector.observe(&board, 9), None);
        assert!(detector.has_fired());
        assert_eq!(detector.final_score(), Some(6));
    }

    #[test]
    fn test_not_complete_with_pool_left() {
        let board = Board::from_parts(
            None,
            vec![confirmed(1, "2010")],
            vec![Card::new(Landmark::new(2, "2020"), Placement::Unplaced)],
        )
        .unwrap();
        let mut detector = CompletionDetector::new();

        assert_eq!(detector.observe(&board, 3), None);
        assert!(!detector.has_fired());
    }

    #[test]
    fn test_not_complete_with_on_deck_or_unconfirmed() {
        let mut detector = CompletionDetector::new();

        let on_deck = Board::from_parts(
            Some(Card::new(Landmark::new(2, "2020"), Placement::OnDeck)),
            vec![confirmed(1, "2010")],
            vec![],
        )
        .unwrap();
        assert_eq!(detector.observe(&on_deck, 0), None);

        let unconfirmed = Board::from_parts(
            None,
            vec![
                confirmed(1, "2010"),
                Card::new(Landmark::new(2, "2020"), Placement::PlacedUnconfirmed),
            ],
            vec![],
        )
        .unwrap();
        assert_eq!(detector.observe(&unconfirmed, 0), None);
    }
}
