//! Reader input for the terminal front end.

use story_graph::ChoiceId;

use crate::action::Action;
use crate::view::SessionView;

/// A parsed line of reader input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A story action for the session.
    Act(Action),
    ToggleTrail,
    Help,
    Quit,
    /// Blank line; redraw.
    Redraw,
    /// Input that matched nothing, kept for the error message.
    Unknown(String),
}

impl Command {
    /// Parse one line against the screen currently shown.
    ///
    /// Precedence, first match wins:
    /// 1. the exact ID of one of the current choices, so a choice may be
    ///    named `back` or `2`
    /// 2. a keyword (`b`, `r`, `t`, `h`, `q` and their long forms)
    /// 3. a number, picking a choice by position
    /// 4. any other single word, taken as a choice ID for the session to
    ///    accept or ignore
    pub fn parse(line: &str, view: &SessionView) -> Self {
        let input = line.trim();

        if input.is_empty() {
            return Command::Redraw;
        }

        if let Some(choice) = view.choices.iter().find(|c| c.id.as_str() == input) {
            return Command::Act(Action::Choose(choice.id.clone()));
        }

        match input.to_lowercase().as_str() {
            "b" | "back" | "पीछे" => return Command::Act(Action::Back),
            "r" | "restart" | "फिर" => return Command::Act(Action::Restart),
            "t" | "trail" => return Command::ToggleTrail,
            "h" | "help" | "?" => return Command::Help,
            "q" | "quit" | "exit" => return Command::Quit,
            _ => {}
        }

        if let Ok(number) = input.parse::<usize>() {
            return match view.choice_by_number(number) {
                Some(choice) => Command::Act(Action::Choose(choice.id.clone())),
                None => Command::Unknown(input.to_string()),
            };
        }

        if input.split_whitespace().count() == 1 {
            return Command::Act(Action::Choose(ChoiceId::new(input)));
        }

        Command::Unknown(input.to_string())
    }
}
