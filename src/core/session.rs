//! Session bookkeeping: score, difficulty and whether play is live.

use bevy::prelude::*;

use super::events::ScoreChanged;

/// Difficulty picked on the title screen, applied when a session starts.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedDifficulty(pub u32);

impl Default for SelectedDifficulty {
    fn default() -> Self {
        Self(1)
    }
}

/// The running game session.
///
/// Score only moves through [`GameSession::add_score`], which refuses
/// positive awards once the session has ended so that enemies destroyed
/// during the game-over frame do not count.
#[derive(Resource, Debug, Default)]
pub struct GameSession {
    score: u32,
    difficulty: u32,
    active: bool,
}

impl GameSession {
    /// Begin a fresh session at the given difficulty level (minimum 1).
    pub fn start(&mut self, difficulty: u32) {
        self.score = 0;
        self.difficulty = difficulty.max(1);
        self.active = true;
    }

    /// Add points, returning the new score if the change was accepted.
    pub fn add_score(&mut self, points: i64) -> Option<u32> {
        if !self.active && points > 0 {
            return None;
        }

        self.score = (self.score as i64 + points).clamp(0, u32::MAX as i64) as u32;
        Some(self.score)
    }

    /// End the session. Returns true only for the call that ended it.
    pub fn end(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }

    /// Return to the pre-game state.
    pub fn reset(&mut self) {
        self.score = 0;
        self.active = false;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty.max(1)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Award points and announce the new score.
pub fn award_points(
    session: &mut GameSession,
    points: u32,
    score_events: &mut EventWriter<ScoreChanged>,
) {
    if let Some(score) = session.add_score(points as i64) {
        score_events.send(ScoreChanged { score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_resets_score_and_activates() {
        let mut session = GameSession::default();
        session.start(2);
        session.add_score(40);
        session.start(0);

        assert_eq!(session.score(), 0);
        assert_eq!(session.difficulty(), 1);
        assert!(session.is_active());
    }

    #[test]
    fn positive_score_ignored_after_game_over() {
        let mut session = GameSession::default();
        session.start(1);
        assert_eq!(session.add_score(10), Some(10));

        assert!(session.end());
        assert_eq!(session.add_score(10), None);
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn penalties_still_apply_when_inactive_and_never_go_negative() {
        let mut session = GameSession::default();
        session.start(1);
        session.add_score(5);
        session.end();

        assert_eq!(session.add_score(-20), Some(0));
        assert_eq!(session.add_score(-1), Some(0));
    }

    #[test]
    fn zero_award_is_still_announced() {
        let mut session = GameSession::default();
        session.start(1);
        session.add_score(30);

        assert_eq!(session.add_score(0), Some(30));
    }

    #[test]
    fn end_is_idempotent() {
        let mut session = GameSession::default();
        session.start(1);
        assert!(session.end());
        assert!(!session.end());
    }

    #[test]
    fn reset_returns_to_title_state() {
        let mut session = GameSession::default();
        session.start(3);
        session.add_score(120);
        session.reset();

        assert_eq!(session.score(), 0);
        assert!(!session.is_active());
    }
}
