//! All game entity types: pure data, no logic.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in logical screen pixels.
///
/// Every entity in the game (player, bullets, enemies) is one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn centerx(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Strict overlap test: rectangles that only share an edge do not
    /// intersect, and a rectangle with no area intersects nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Something that happened during a frame that the driver may want to
/// react to (sound effects).  Cleared at the start of every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A bullet was fired, by the player or by an enemy.
    Shot,
    /// An enemy was destroyed or the player was hit.
    Explosion,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Rect,
    /// Bullets fired by the player, travelling upward.
    pub bullets: Vec<Rect>,
    /// Bullets fired by enemies, travelling downward.
    pub enemy_bullets: Vec<Rect>,
    pub enemies: Vec<Rect>,
    pub score: u32,
    pub status: GameStatus,
    /// Frames since the last enemy spawned.
    pub spawn_counter: u32,
    /// Total frames simulated since the last (re)start.
    pub frame: u64,
    /// Events produced by the most recent tick.
    pub events: Vec<GameEvent>,
}
