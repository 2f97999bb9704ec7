use std::fmt::Debug;

/// A two-player, zero-sum, perfect-information game position.
///
/// This is everything the UCT search needs from a game. `Clone` must be a
/// deep copy: the search clones the root once per iteration and mutates the
/// copy freely.
pub trait GameState: Clone {
    type Move: Copy + Eq + Debug;
    type Player: Copy + Eq + Debug;

    /// The player who made the most recent move. At the start of a game this
    /// is the player who moves second.
    fn player_just_moved(&self) -> Self::Player;

    /// Legal moves from this position, empty iff the game is over.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Plays `mv` for the player to move.
    fn apply_move(&mut self, mv: Self::Move) -> crate::Result<()>;

    /// Score of a finished game from `viewpoint`'s side, in `[0, 1]`.
    ///
    /// # Panics
    /// Implementations panic when called on a position that is not over.
    fn result(&self, viewpoint: Self::Player) -> f64;
}
