use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use spaceship_shooter::assets::{Assets, ASSET_DIR};
use spaceship_shooter::compute::{init_state, restart, tick, Session};
use spaceship_shooter::consts::FRAME;
use spaceship_shooter::display;
use spaceship_shooter::entities::{GameEvent, GameState, GameStatus};
use spaceship_shooter::input::{command_for, Command, KeyTracker};

// ── Sound triggers ────────────────────────────────────────────────────────────

fn play_events<W: Write>(
    out: &mut W,
    assets: &Assets,
    events: &[GameEvent],
) -> std::io::Result<()> {
    for event in events {
        match event {
            GameEvent::Shot => assets.shoot.get().play(out)?,
            GameEvent::Explosion => assets.explosion.get().play(out)?,
        }
    }
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit key or the input stream closes.
///
/// Each cycle drains pending input, then either shows the game-over overlay
/// (honouring only restart) or steps the simulation once, then sleeps out
/// the rest of the 1/60 s frame.  A slow frame just delays the next one.
fn game_loop<W: Write>(
    out: &mut W,
    assets: &Assets,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut state: GameState = init_state();
    let mut keys = KeyTracker::new();
    let mut frame: u64 = 0;
    let mut last_frame: Option<display::Frame> = None;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut restart_pressed = false;
        loop {
            match rx.try_recv() {
                Ok(Event::Key(key)) => {
                    keys.record(&key, frame);
                    match command_for(&key) {
                        Some(Command::Quit) => return Ok(()),
                        Some(Command::Restart) => restart_pressed = true,
                        None => {}
                    }
                }
                Ok(Event::Resize(..)) => {
                    out.queue(terminal::Clear(terminal::ClearType::All))?;
                    last_frame = None;
                }
                Ok(_) => {}
                Err(mpsc::TryRecvError::Empty) => break,
                // Reader thread gone: the terminal closed under us.
                Err(mpsc::TryRecvError::Disconnected) => return Ok(()),
            }
        }

        if state.status == GameStatus::GameOver {
            if restart_pressed {
                state = restart(&state);
                keys.clear();
            }
        } else {
            let input = keys.tick_input(frame);
            state = tick(&state, &input, &mut rng);
            play_events(out, assets, &state.events)?;
            session.record(&state);
        }

        last_frame = Some(display::render(
            out,
            &state,
            assets,
            terminal::size()?,
            last_frame.as_ref(),
        )?);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    log::info!("Spaceship Shooter starting, assets from {:?}", ASSET_DIR);
    let assets = Assets::load(Path::new(ASSET_DIR));

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle("Spaceship Shooter"))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Terminals without the kitty protocol fall back to press-only events.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut session = Session::default();
    let result = game_loop(&mut out, &assets, &rx, &mut session);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::debug!("Keyboard enhancement: {}", keyboard_enhanced);
    log::info!(
        "Rounds lost: {}, best score: {}",
        session.rounds_lost,
        session.best_score
    );
    if let Err(e) = &result {
        log::error!("Terminal error: {}", e);
    }
    log::info!("Spaceship Shooter exiting");
    result
}
