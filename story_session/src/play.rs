//! The interactive loop: read a line, apply it, redraw.

use serde_json::json;
use std::io::{BufRead, Write};
use story_graph::StoryGraph;
use tracing::{info, info_span};

use crate::error::SessionError;
use crate::input::Command;
use crate::render::Renderer;
use crate::session::Session;
use crate::view::SessionView;

/// How each screen is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Rendered text for a person at a terminal.
    Text,
    /// One JSON `SessionView` per line.
    Json,
}

/// Run a session over `graph` until input ends or the reader quits.
///
/// In JSON mode every input line except `quit` gets exactly one output line:
/// a view, or a `{"error": ...}` / `{"help": ...}` object.
///
/// Returns the finished session's final view.
pub fn run<R, W>(
    graph: &StoryGraph,
    renderer: &mut Renderer,
    mode: OutputMode,
    input: R,
    mut output: W,
) -> Result<SessionView, SessionError>
where
    R: BufRead,
    W: Write,
{
    let mut session = Session::new(graph);
    let span = info_span!("session", id = %session.id());
    let _guard = span.enter();

    if mode == OutputMode::Text {
        writeln!(output, "{}", renderer.header(graph.meta()))?;
    }

    let mut view = SessionView::of(&session);
    draw(&view, renderer, mode, &mut output)?;

    for line in input.lines() {
        let line = line?;

        match Command::parse(&line, &view) {
            Command::Act(action) => {
                let transition = session.apply(&action);
                if !transition.changed() && mode == OutputMode::Text {
                    writeln!(output, "?")?;
                }
                view = SessionView::of(&session);
                draw(&view, renderer, mode, &mut output)?;
            }
            Command::ToggleTrail => {
                renderer.toggle_trail();
                draw(&view, renderer, mode, &mut output)?;
            }
            Command::Help => match mode {
                OutputMode::Text => write!(output, "{}", renderer.help())?,
                OutputMode::Json => reply(&mut output, &json!({ "help": renderer.help() }))?,
            },
            Command::Redraw => draw(&view, renderer, mode, &mut output)?,
            Command::Unknown(text) => match mode {
                OutputMode::Text => writeln!(output, "? {text}")?,
                OutputMode::Json => reply(
                    &mut output,
                    &json!({ "error": "unknown_input", "input": text }),
                )?,
            },
            Command::Quit => break,
        }
    }

    info!(chapter = session.chapter(), node = %session.current_id(), "session ended");
    Ok(view)
}

fn reply<W: Write>(output: &mut W, value: &serde_json::Value) -> Result<(), SessionError> {
    serde_json::to_writer(&mut *output, value)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn draw<W: Write>(
    view: &SessionView,
    renderer: &Renderer,
    mode: OutputMode,
    output: &mut W,
) -> Result<(), SessionError> {
    match mode {
        OutputMode::Text => {
            writeln!(output, "{}", renderer.render(view))?;
            write!(output, "> ")?;
        }
        OutputMode::Json => {
            serde_json::to_writer(&mut *output, view)?;
            writeln!(output)?;
        }
    }
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Labels;
    use story_graph::{Choice, Mood, StoryMeta, StoryNode};

    fn graph() -> StoryGraph {
        StoryGraph::new(
            "door",
            vec![
                StoryNode::new("door", "Door", "A red door.", "Rain.")
                    .with_choice(Choice::new("open", "Open it", Mood::Wonder, "room")),
                StoryNode::new("room", "Room", "Lamplight.", "A clock ticks."),
            ],
        )
        .unwrap()
    }

    fn play(mode: OutputMode, script: &str) -> (SessionView, String) {
        let graph = graph();
        let mut renderer = Renderer::new(Labels::default(), false, true);
        let mut out = Vec::new();
        let view = run(&graph, &mut renderer, mode, script.as_bytes(), &mut out).unwrap();
        (view, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_walk_to_ending() {
        let (view, out) = play(OutputMode::Text, "1\n");

        assert_eq!(view.node.id.as_str(), "room");
        assert!(view.is_terminal);
        assert!(out.contains("कथा का उजाला"));
    }

    #[test]
    fn test_back_and_restart() {
        let (view, _) = play(OutputMode::Text, "open\nb\n");
        assert_eq!(view.node.id.as_str(), "door");
        assert_eq!(view.chapter, 1);

        let (view, _) = play(OutputMode::Text, "1\nr\n");
        assert_eq!(view.node.id.as_str(), "door");
        assert_eq!(view.trail.len(), 1);
    }

    #[test]
    fn test_quit_stops_reading() {
        let (view, _) = play(OutputMode::Text, "q\n1\n");
        assert_eq!(view.node.id.as_str(), "door");
    }

    #[test]
    fn test_unknown_input_keeps_state() {
        let (view, out) = play(OutputMode::Text, "7\nwander about\n");
        assert_eq!(view.chapter, 1);
        assert!(out.contains("? 7"));
        assert!(out.contains("? wander about"));
    }

    #[test]
    fn test_json_mode_answers_every_line() {
        let (view, out) = play(OutputMode::Json, "7\nwander about\nhelp\n");
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1]["error"], "unknown_input");
        assert_eq!(lines[1]["input"], "7");
        assert_eq!(lines[2]["input"], "wander about");
        assert!(lines[3]["help"].is_string());
        assert_eq!(view.chapter, 1);
    }

    #[test]
    fn test_text_mode_prints_story_heading() {
        let graph = graph().with_meta(StoryMeta {
            title: Some("The Red Door".to_string()),
            ..Default::default()
        });
        let mut renderer = Renderer::new(Labels::default(), false, true);
        let mut out = Vec::new();
        run(&graph, &mut renderer, OutputMode::Text, "q\n".as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("The Red Door\n"));
        assert!(!text.contains("तरुण और नीली रोशनी"));
    }

    #[test]
    fn test_json_mode_writes_one_view_per_screen() {
        let (_, out) = play(OutputMode::Json, "1\nb\n");
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["node"]["id"], "room");
        assert_eq!(second["chapter"], 2);
        assert_eq!(second["trail"][1]["choice_label"], "Open it");
    }
}
