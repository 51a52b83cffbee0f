mod effects;
mod logging;
mod render;

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use snagger_core::{update, AppState, Msg};

fn main() {
    logging::initialize(logging::destination_from_env());

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = effects::EffectRunner::new(msg_tx.clone());

    spawn_stdin_reader(msg_tx.clone());

    // A target passed on the command line submits immediately.
    if let Some(target) = std::env::args().nth(1) {
        let _ = msg_tx.send(Msg::InputChanged(target));
        let _ = msg_tx.send(Msg::Submitted);
    }

    render::print_banner();

    let mut state = AppState::new();
    while let Ok(msg) = msg_rx.recv() {
        let quit = matches!(msg, Msg::CloseRequested);
        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.enqueue(effects);
        if state.consume_dirty() {
            render::render(&state.view());
        }
        if quit {
            break;
        }
    }
}

fn spawn_stdin_reader(msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for msg in parse_command(line.trim()) {
                if msg_tx.send(msg).is_err() {
                    return;
                }
            }
        }
        let _ = msg_tx.send(Msg::CloseRequested);
    });
}

/// Lines are commands: a number chooses a variant, `restart`/`quit` are
/// verbs, anything else is a target submission.
fn parse_command(line: &str) -> Vec<Msg> {
    if line.is_empty() {
        return Vec::new();
    }
    match line {
        "quit" | "q" | "exit" => vec![Msg::CloseRequested],
        "restart" | "r" => vec![Msg::RestartClicked],
        _ => match line.parse::<usize>() {
            Ok(number) if number >= 1 => vec![Msg::VariantChosen(number - 1)],
            _ => vec![Msg::InputChanged(line.to_string()), Msg::Submitted],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::parse_command;
    use snagger_core::Msg;

    #[test]
    fn numbers_choose_variants_one_based() {
        assert_eq!(parse_command("1"), vec![Msg::VariantChosen(0)]);
        assert_eq!(parse_command("3"), vec![Msg::VariantChosen(2)]);
    }

    #[test]
    fn verbs_map_to_control_messages() {
        assert_eq!(parse_command("quit"), vec![Msg::CloseRequested]);
        assert_eq!(parse_command("restart"), vec![Msg::RestartClicked]);
    }

    #[test]
    fn other_lines_submit_as_targets() {
        assert_eq!(
            parse_command("https://youtu.be/abc"),
            vec![
                Msg::InputChanged("https://youtu.be/abc".to_string()),
                Msg::Submitted,
            ]
        );
    }

    #[test]
    fn blank_lines_do_nothing() {
        assert!(parse_command("").is_empty());
    }
}
