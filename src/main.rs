mod audio;
mod audio_api;
mod kit;
mod middle;
mod sequencer;
mod shared;
mod tui;

use std::path::PathBuf;
use std::time::Instant;

use crossterm::terminal;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use audio::AudioSystem;
use kit::persistence;
use middle::Middle;
use shared::InputEvent;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // auto drops when out of scope

    let project_dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let pads = persistence::load_kit_or_default(&project_dir);
    let mut middle = Middle::with_kit(pads);

    // Nothing touches the sound device until the first interaction; the
    // system brings itself up lazily (and stays silent-but-alive if there is
    // no usable output).
    let mut audio = AudioSystem::new();

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let tick_rate = std::time::Duration::from_millis(16); // ~60fps
    let mut last_tick = Instant::now();
    let mut tui_state = tui::mode::TuiState::default();

    loop {
        let ds = middle.display_state();
        tui_state.playing = ds.playing;
        tui_state.write_mode = ds.write_mode;

        term.draw(|frame| {
            tui::view::render(frame, frame.area(), &ds);
        })?;

        let events = tui::input::poll_input(tick_rate, &mut tui_state)?;
        for event in events {
            if event == InputEvent::Quit {
                // save the kit before quitting
                if let Err(e) = persistence::save_kit(&project_dir, &middle.pads) {
                    log::warn!("could not save kit: {e:#}");
                }
                drop(term);
                return Ok(());
            }
            // every interaction counts as the unlock gesture; after the
            // first success this is a cheap no-op
            audio.ensure_ready();
            for cmd in middle.handle_input(event) {
                audio.send(cmd);
            }
        }

        let elapsed = last_tick.elapsed().as_secs_f64();
        last_tick = Instant::now();
        for cmd in middle.tick(elapsed) {
            audio.send(cmd);
        }
    }
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
