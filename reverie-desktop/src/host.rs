use std::io::BufRead;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use anyhow::Result;
use reverie_core::config::PlaybackConfig;
use reverie_core::input::{HostInput, InputBindings, InputDispatcher, Key};
use reverie_core::{CharacterRoster, DialogueDocument, PlaybackEngine, PlaybackEvent, PlaybackState, Presenter};

use crate::terminal::TerminalPresenter;

const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Input(HostInput),
    GoToScene(usize),
    GoToLine(usize, usize),
    History,
    Quit,
    Unknown(String),
}

pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Command::Input(HostInput::Key(Key::Return));
    }
    if trimmed.eq_ignore_ascii_case("skip") || trimmed.eq_ignore_ascii_case("esc") {
        return Command::Input(HostInput::Key(Key::Escape));
    }
    if trimmed.eq_ignore_ascii_case("exit") || trimmed == ":quit" {
        return Command::Quit;
    }
    if trimmed == ":log" {
        return Command::History;
    }
    let mut parts = trimmed.split_whitespace();
    let head = parts.next().unwrap_or_default();
    let args: Vec<usize> = parts.filter_map(|p| p.parse().ok()).collect();
    match (head, args.as_slice()) {
        (":scene", [scene]) => Command::GoToScene(*scene),
        (":line", [scene, line]) => Command::GoToLine(*scene, *line),
        _ => match trimmed.chars().collect::<Vec<_>>().as_slice() {
            [c] => Command::Input(HostInput::Key(Key::Char(*c))),
            _ => Command::Unknown(trimmed.to_string()),
        },
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

pub fn run(
    document: Arc<DialogueDocument>,
    roster: CharacterRoster,
    playback: PlaybackConfig,
    bindings: InputBindings,
) -> Result<()> {
    let presenter = TerminalPresenter::stdout().with_roster(roster);
    let mut engine = PlaybackEngine::new(presenter).with_config(playback.clone());
    engine.subscribe(|event| match event {
        PlaybackEvent::SceneChanged { scene } => log::info!("Entering scene {}", scene),
        PlaybackEvent::DialogueEnded => log::info!("Dialogue finished"),
        _ => {}
    });
    let dispatcher = InputDispatcher::new(bindings);
    let input = spawn_stdin_reader();

    if playback.play_on_start {
        thread::sleep(playback.start_delay());
    } else {
        println!("Press Enter to begin '{}'.", document.title);
        if input.recv().is_err() {
            return Ok(());
        }
    }
    engine.start(document)?;

    while engine.state() != PlaybackState::Ended {
        match input.recv_timeout(FRAME) {
            Ok(raw) => {
                if !handle(&mut engine, &dispatcher, parse_command(&raw)) {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log::info!("stdin closed, leaving dialogue");
                engine.stop();
                break;
            }
        }
        engine.update();
    }
    Ok(())
}

/// Applies one command; `false` means the user asked to quit, in which
/// case the session has already been stopped.
fn handle<P: Presenter>(engine: &mut PlaybackEngine<P>, dispatcher: &InputDispatcher, command: Command) -> bool {
    match command {
        Command::Input(input) => {
            if dispatcher.dispatch(engine, input).is_none() {
                println!("invalid");
            }
        }
        Command::GoToScene(scene) => {
            if let Err(e) = engine.go_to_scene(scene) {
                println!("{}", e);
            }
        }
        Command::GoToLine(scene, line) => {
            if let Err(e) = engine.go_to_line(scene, line) {
                println!("{}", e);
            }
        }
        Command::History => {
            for entry in engine.history() {
                println!("  {} {}: {}", entry.cursor, entry.speaker, entry.text);
            }
        }
        Command::Quit => {
            engine.stop();
            return false;
        }
        Command::Unknown(raw) => {
            log::debug!("unknown command {:?}", raw);
            println!("invalid");
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use reverie_core::presenter::{PresenterCommand, RecordingPresenter};
    use reverie_core::{Line, Scene};

    #[test]
    fn parses_terminal_commands() {
        assert_eq!(parse_command(""), Command::Input(HostInput::Key(Key::Return)));
        assert_eq!(parse_command("skip"), Command::Input(HostInput::Key(Key::Escape)));
        assert_eq!(parse_command(":scene 2"), Command::GoToScene(2));
        assert_eq!(parse_command(":line 1 3"), Command::GoToLine(1, 3));
        assert_eq!(parse_command(":log"), Command::History);
        assert_eq!(parse_command("exit"), Command::Quit);
        assert_eq!(parse_command("q"), Command::Input(HostInput::Key(Key::Char('q'))));
        assert_eq!(parse_command(":line x"), Command::Unknown(":line x".into()));
    }

    #[test]
    fn quit_closes_a_session_without_skip() {
        let doc = DialogueDocument::new("locked")
            .with_skip(false)
            .with_scene(Scene::new("a").with_line(Line::new("A", "no way out")));
        let mut engine = PlaybackEngine::new(RecordingPresenter::new());
        engine.start(doc).unwrap();
        let dispatcher = InputDispatcher::default();

        assert!(handle(&mut engine, &dispatcher, parse_command("skip")));
        assert!(engine.is_playing());

        assert!(!handle(&mut engine, &dispatcher, parse_command("exit")));
        assert_eq!(engine.state(), PlaybackState::Ended);
        assert!(engine.presenter().commands.contains(&PresenterCommand::HidePanel));
    }
}
