//! Sprites and sounds, loaded once at start-up.
//!
//! Every asset load independently falls back to a synthesized stand-in
//! (solid-colour sprite, silent sound) when its file is missing or
//! unreadable.  The failure is logged and play continues.  Callers get an
//! [`Asset`] either way and draw or play it without checking which.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use thiserror::Error;

use crate::consts::{ENEMY_HEIGHT, ENEMY_WIDTH, PLAYER_HEIGHT, PLAYER_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Directory the asset files are resolved from, fixed at build time.
pub const ASSET_DIR: &str = match option_env!("SPACESHOOT_ASSET_DIR") {
    Some(dir) => dir,
    None => "assets",
};

pub const PLAYER_FILE: &str = "spaceship.png";
pub const ENEMY_FILE: &str = "enemy.png";
pub const BACKGROUND_FILE: &str = "space_background.jpg";
pub const SHOOT_FILE: &str = "shoot.wav";
pub const EXPLOSION_FILE: &str = "explosion.wav";

pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
pub const BLACK: Rgb = [0, 0, 0];
pub const RED: Rgb = [255, 0, 0];
pub const GREEN: Rgb = [0, 255, 0];

/// Errors that can occur when loading an asset file.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode image '{}': {source}", .path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Not a RIFF/WAVE file: {}", .0.display())]
    InvalidSound(PathBuf),
}

fn ensure_exists(path: &Path) -> Result<(), AssetError> {
    if path.exists() {
        Ok(())
    } else {
        Err(AssetError::NotFound(path.to_path_buf()))
    }
}

// ── Loaded-or-fallback wrapper ───────────────────────────────────────────────

/// A usable asset, remembering whether it came from disk.
#[derive(Clone, Debug, PartialEq)]
pub enum Asset<T> {
    Loaded(T),
    Fallback(T),
}

impl<T> Asset<T> {
    /// Take a load result, substituting `fallback()` on error.
    pub fn or_fallback(name: &str, result: Result<T, AssetError>, fallback: impl FnOnce() -> T) -> Self {
        match result {
            Ok(value) => {
                log::info!("Loaded {}", name);
                Asset::Loaded(value)
            }
            Err(e) => {
                log::warn!("Error loading {}: {} (using fallback)", name, e);
                Asset::Fallback(fallback())
            }
        }
    }

    pub fn get(&self) -> &T {
        match self {
            Asset::Loaded(value) | Asset::Fallback(value) => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Asset::Fallback(_))
    }
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// RGB pixels scaled to an entity's logical size.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Rgb>,
}

impl Sprite {
    /// A sprite filled with one colour.
    pub fn solid(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    /// Load an image file and scale it to `width`×`height`.
    pub fn from_file(path: &Path, width: u32, height: u32) -> Result<Self, AssetError> {
        ensure_exists(path)?;
        log::debug!("Loading image from: {:?}", path);

        let img = image::open(path).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let rgb = img.resize_exact(width, height, FilterType::Triangle).to_rgb8();
        let pixels = rgb.pixels().map(|p| p.0).collect();

        Ok(Self { width, height, pixels })
    }

    /// Colour at sprite-local `(x, y)`, clamped to the sprite's bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Rgb {
        if self.pixels.is_empty() {
            return BLACK;
        }
        let x = x.clamp(0, self.width as i32 - 1) as u32;
        let y = y.clamp(0, self.height as i32 - 1) as u32;
        self.pixels[(y * self.width + x) as usize]
    }
}

// ── Sounds ────────────────────────────────────────────────────────────────────

/// A trigger-on-event sound effect.
///
/// The terminal has no mixer, so a loaded sound rings the terminal bell;
/// the fallback is silent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sound {
    audible: bool,
}

impl Sound {
    pub fn silent() -> Self {
        Self { audible: false }
    }

    /// Load a sound file, accepting only RIFF/WAVE data.
    pub fn from_file(path: &Path) -> Result<Self, AssetError> {
        ensure_exists(path)?;
        let bytes = fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return Err(AssetError::InvalidSound(path.to_path_buf()));
        }
        Ok(Self { audible: true })
    }

    /// Queue the sound on `out`; flushed with the next frame.
    pub fn play<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        if self.audible {
            out.write_all(b"\x07")?;
        }
        Ok(())
    }
}

// ── Asset set ─────────────────────────────────────────────────────────────────

/// Every asset the game uses.
#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Asset<Sprite>,
    pub enemy: Asset<Sprite>,
    pub background: Asset<Sprite>,
    pub shoot: Asset<Sound>,
    pub explosion: Asset<Sound>,
}

impl Assets {
    /// Load every asset from `base`, falling back individually.
    pub fn load(base: &Path) -> Self {
        let (pw, ph) = (PLAYER_WIDTH as u32, PLAYER_HEIGHT as u32);
        let (ew, eh) = (ENEMY_WIDTH as u32, ENEMY_HEIGHT as u32);
        let (sw, sh) = (SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);

        let assets = Self {
            player: Asset::or_fallback(
                PLAYER_FILE,
                Sprite::from_file(&base.join(PLAYER_FILE), pw, ph),
                || Sprite::solid(pw, ph, GREEN),
            ),
            enemy: Asset::or_fallback(
                ENEMY_FILE,
                Sprite::from_file(&base.join(ENEMY_FILE), ew, eh),
                || Sprite::solid(ew, eh, RED),
            ),
            background: Asset::or_fallback(
                BACKGROUND_FILE,
                Sprite::from_file(&base.join(BACKGROUND_FILE), sw, sh),
                || Sprite::solid(sw, sh, BLACK),
            ),
            shoot: Asset::or_fallback(
                SHOOT_FILE,
                Sound::from_file(&base.join(SHOOT_FILE)),
                Sound::silent,
            ),
            explosion: Asset::or_fallback(
                EXPLOSION_FILE,
                Sound::from_file(&base.join(EXPLOSION_FILE)),
                Sound::silent,
            ),
        };
        let fallbacks = assets.fallback_count();
        if fallbacks > 0 {
            log::warn!("{} of 5 assets replaced by fallbacks", fallbacks);
        }
        assets
    }

    /// How many assets are running on their stand-in.
    pub fn fallback_count(&self) -> usize {
        [
            self.player.is_fallback(),
            self.enemy.is_fallback(),
            self.background.is_fallback(),
            self.shoot.is_fallback(),
            self.explosion.is_fallback(),
        ]
        .iter()
        .filter(|&&f| f)
        .count()
    }
}
