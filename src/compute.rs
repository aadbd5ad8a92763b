//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::consts::*;
use crate::entities::{GameEvent, GameState, GameStatus, Rect};

/// Held-key snapshot for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Tally across rounds, kept while the terminal is in raw mode and logged
/// once it is restored so log lines never land on the game screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub rounds_lost: u32,
    pub best_score: u32,
}

impl Session {
    /// Fold in the state produced by one tick.
    pub fn record(&mut self, state: &GameState) {
        if state.status == GameStatus::GameOver {
            self.rounds_lost += 1;
            self.best_score = self.best_score.max(state.score);
        }
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Player rectangle at its starting spot: centred, near the bottom edge.
pub fn initial_player() -> Rect {
    Rect::new(
        SCREEN_WIDTH / 2 - PLAYER_WIDTH / 2,
        SCREEN_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
        PLAYER_WIDTH,
        PLAYER_HEIGHT,
    )
}

pub fn init_state() -> GameState {
    GameState {
        player: initial_player(),
        bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        spawn_counter: 0,
        frame: 0,
        events: Vec::new(),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState) -> GameState {
    let x = (state.player.x - PLAYER_SPEED).max(0);
    GameState {
        player: Rect { x, ..state.player },
        ..state.clone()
    }
}

pub fn move_player_right(state: &GameState) -> GameState {
    let x = (state.player.x + PLAYER_SPEED).min(SCREEN_WIDTH - PLAYER_WIDTH);
    GameState {
        player: Rect { x, ..state.player },
        ..state.clone()
    }
}

/// Fire a bullet from the player's nose, capped at `MAX_PLAYER_BULLETS`.
pub fn player_shoot(state: &GameState) -> GameState {
    if state.bullets.len() >= MAX_PLAYER_BULLETS {
        return state.clone();
    }
    let bullet = Rect::new(
        state.player.centerx() - BULLET_WIDTH / 2,
        state.player.y - BULLET_HEIGHT,
        BULLET_WIDTH,
        BULLET_HEIGHT,
    );
    let mut next = state.clone();
    next.bullets.push(bullet);
    next.events.push(GameEvent::Shot);
    next
}

/// Leave `GameOver` and start a fresh round.  Ignored while still playing.
pub fn restart(state: &GameState) -> GameState {
    if state.status != GameStatus::GameOver {
        return state.clone();
    }
    init_state()
}

// ── Per-frame tick (RNG is injected) ──────────────────────────────────────

/// Spawn one enemy at the top edge at a uniformly random column.
pub fn spawn_enemy(enemies: &mut Vec<Rect>, rng: &mut impl Rng) {
    let x = rng.gen_range(0..=SCREEN_WIDTH - ENEMY_WIDTH);
    enemies.push(Rect::new(x, 0, ENEMY_WIDTH, ENEMY_HEIGHT));
}

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Does nothing but clear the event list once the game is over.
pub fn tick(state: &GameState, input: &TickInput, rng: &mut impl Rng) -> GameState {
    let mut s = GameState {
        events: Vec::new(),
        ..state.clone()
    };
    if s.status != GameStatus::Playing {
        return s;
    }
    s.frame += 1;

    // ── 1. Player input ──────────────────────────────────────────────────────
    if input.left {
        s = move_player_left(&s);
    }
    if input.right {
        s = move_player_right(&s);
    }
    if input.fire {
        s = player_shoot(&s);
    }

    // ── 2. Spawn timer ───────────────────────────────────────────────────────
    s.spawn_counter += 1;
    if s.spawn_counter >= ENEMY_SPAWN_RATE {
        spawn_enemy(&mut s.enemies, rng);
        s.spawn_counter = 0;
    }

    // ── 3. Move bullets, dropping those that leave the screen ────────────────
    s.bullets = s
        .bullets
        .iter()
        .map(|b| Rect { y: b.y - BULLET_SPEED, ..*b })
        .filter(|b| b.y >= 0)
        .collect();
    s.enemy_bullets = s
        .enemy_bullets
        .iter()
        .map(|b| Rect { y: b.y + ENEMY_BULLET_SPEED, ..*b })
        .filter(|b| b.y <= SCREEN_HEIGHT)
        .collect();

    // ── 4. Move enemies; survivors roll to return fire ───────────────────────
    s.enemies = s
        .enemies
        .iter()
        .map(|e| Rect { y: e.y + ENEMY_SPEED, ..*e })
        .filter(|e| e.y <= SCREEN_HEIGHT)
        .collect();
    for enemy in &s.enemies {
        if rng.gen::<f64>() < ENEMY_SHOOT_CHANCE {
            s.enemy_bullets.push(Rect::new(
                enemy.centerx() - ENEMY_BULLET_WIDTH / 2,
                enemy.bottom(),
                ENEMY_BULLET_WIDTH,
                ENEMY_BULLET_HEIGHT,
            ));
            s.events.push(GameEvent::Shot);
        }
    }

    // ── 5. Collisions ────────────────────────────────────────────────────────
    resolve_collisions(&s)
}

/// Run the three collision passes against the current positions.
///
/// 1. Each player bullet destroys at most one enemy (the first it overlaps).
/// 2. An enemy bullet touching the player is consumed and ends the game.
/// 3. An enemy touching the player ends the game; the enemy stays.
pub fn resolve_collisions(state: &GameState) -> GameState {
    let mut s = state.clone();

    // ── Player bullets ↔ enemies ─────────────────────────────────────────────
    let mut enemies = state.enemies.clone();
    let mut bullets = Vec::with_capacity(state.bullets.len());
    for bullet in &state.bullets {
        match enemies.iter().position(|e| bullet.intersects(e)) {
            Some(hit) => {
                enemies.remove(hit);
                s.score += SCORE_PER_ENEMY;
                s.events.push(GameEvent::Explosion);
            }
            None => bullets.push(*bullet),
        }
    }
    s.bullets = bullets;
    s.enemies = enemies;

    // ── Enemy bullets ↔ player ───────────────────────────────────────────────
    let mut enemy_bullets = Vec::with_capacity(state.enemy_bullets.len());
    for bullet in &state.enemy_bullets {
        if bullet.intersects(&s.player) {
            s.status = GameStatus::GameOver;
            s.events.push(GameEvent::Explosion);
        } else {
            enemy_bullets.push(*bullet);
        }
    }
    s.enemy_bullets = enemy_bullets;

    // ── Enemies ↔ player ─────────────────────────────────────────────────────
    for enemy in &s.enemies {
        if enemy.intersects(&s.player) {
            s.status = GameStatus::GameOver;
            s.events.push(GameEvent::Explosion);
        }
    }

    s
}
