use crate::UnsupportedLineClearError;

/// Score values for line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Returns the points awarded for clearing `lines` rows with one piece.
///
/// Clearing more than four rows at once has no score defined and is
/// reported as an error instead of being guessed.
///
/// # Example
///
/// ```
/// use blockfall_engine::line_clear_score;
///
/// assert_eq!(line_clear_score(2).unwrap(), 300);
/// assert!(line_clear_score(5).is_err());
/// ```
pub fn line_clear_score(lines: usize) -> Result<usize, UnsupportedLineClearError> {
    SCORE_TABLE
        .get(lines)
        .copied()
        .ok_or(UnsupportedLineClearError { lines })
}

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: Points earned from line clears
/// - **Pieces**: Pieces dealt so far, counting the one currently falling
/// - **Line clear distribution**: Count of single, double, triple, quad line clears
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4).unwrap();
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.pieces(), 2);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; SCORE_TABLE.len()],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates the statistics of a fresh game: no score, first piece in play.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            pieces: 1,
            total_cleared_lines: 0,
            line_cleared_counter: [0; SCORE_TABLE.len()],
        }
    }

    /// Returns the current score (sum of all line clear points).
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the number of pieces dealt, including the falling one.
    #[must_use]
    pub const fn pieces(&self) -> usize {
        self.pieces
    }

    /// Returns the total number of lines cleared across all line clears.
    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of line clears by count.
    ///
    /// `[0]` counts locks that cleared nothing, `[4]` counts four-line clears.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece locks and returns the points awarded.
    ///
    /// Nothing is recorded when `cleared_lines` has no defined score.
    pub fn complete_piece_drop(
        &mut self,
        cleared_lines: usize,
    ) -> Result<usize, UnsupportedLineClearError> {
        let points = line_clear_score(cleared_lines)?;
        self.pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.line_cleared_counter[cleared_lines] += 1;
        self.score += points;
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        let scores: Vec<_> = (0..=4).map(|n| line_clear_score(n).unwrap()).collect();
        assert_eq!(scores, [0, 100, 300, 500, 800]);
    }

    #[test]
    fn test_more_than_four_lines_is_unsupported() {
        let err = line_clear_score(5).unwrap_err();
        assert_eq!(err, UnsupportedLineClearError { lines: 5 });
        assert_eq!(
            err.to_string(),
            "clearing 5 lines at once has no defined score"
        );
    }

    #[test]
    fn test_complete_piece_drop_accumulates() {
        let mut stats = GameStats::new();
        assert_eq!(stats.pieces(), 1);

        assert_eq!(stats.complete_piece_drop(0), Ok(0));
        assert_eq!(stats.complete_piece_drop(1), Ok(100));
        assert_eq!(stats.complete_piece_drop(3), Ok(500));

        assert_eq!(stats.score(), 600);
        assert_eq!(stats.pieces(), 4);
        assert_eq!(stats.total_cleared_lines(), 4);
        assert_eq!(stats.line_cleared_counter(), &[1, 1, 0, 1, 0]);
    }

    #[test]
    fn test_unsupported_clear_leaves_stats_untouched() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(2).unwrap();
        let before = stats.clone();

        assert!(stats.complete_piece_drop(6).is_err());
        assert_eq!(stats, before);
    }
}
