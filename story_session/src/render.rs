//! Terminal rendering of a [`SessionView`].

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use story_graph::{Mood, StoryMeta};

use crate::view::SessionView;

/// Interface text around the story content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub chapter: String,
    pub back: String,
    pub reflection: String,
    pub choice_heading: String,
    pub ending_heading: String,
    pub ending_text: String,
    pub restart: String,
    pub trail_heading: String,
    pub moment: String,
    pub you_chose: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            chapter: "अध्याय".to_string(),
            back: "पिछली झलक देखें".to_string(),
            reflection: "अनुभूति".to_string(),
            choice_heading: "आगे की राह".to_string(),
            ending_heading: "कथा का उजाला".to_string(),
            ending_text: "यात्रा यहाँ ठहरती है, लेकिन कहानी अब आपके भीतर चल रही है। \
                बन्द करें आँखें और महसूस करें कि कौन-सी रोशनी आपने जगाई है।"
                .to_string(),
            restart: "कहानी दोबारा सुनें".to_string(),
            trail_heading: "आपकी यात्रा".to_string(),
            moment: "क्षण".to_string(),
            you_chose: "आपने चुना".to_string(),
        }
    }
}

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const AMBER: &str = "\x1b[33m";

fn mood_color(mood: Mood) -> &'static str {
    match mood {
        Mood::Hope => "\x1b[32m",
        Mood::Wonder => "\x1b[36m",
        Mood::Mystery => "\x1b[34m",
        Mood::Danger => "\x1b[31m",
    }
}

/// Lays out a view as plain or ANSI-coloured text.
#[derive(Debug, Clone)]
pub struct Renderer {
    labels: Labels,
    color: bool,
    show_trail: bool,
}

impl Renderer {
    pub fn new(labels: Labels, color: bool, show_trail: bool) -> Self {
        Self {
            labels,
            color,
            show_trail,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(Labels::default(), true, true)
    }

    pub fn toggle_trail(&mut self) {
        self.show_trail = !self.show_trail;
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Story heading, printed once when a session begins. Only the parts
    /// the story file provides are shown.
    pub fn header(&self, meta: &StoryMeta) -> String {
        let mut out = String::new();
        if let Some(subtitle) = &meta.subtitle {
            out.push_str(&self.paint(DIM, subtitle));
            out.push('\n');
        }
        if let Some(title) = &meta.title {
            out.push_str(&self.paint(BOLD, title));
            out.push('\n');
        }
        if let Some(blurb) = &meta.blurb {
            out.push_str(blurb);
            out.push('\n');
        }
        out
    }

    /// Full screen for one view.
    pub fn render(&self, view: &SessionView) -> String {
        let mut out = String::new();
        let _ = self.write_screen(&mut out, view);
        out
    }

    fn write_screen(&self, out: &mut String, view: &SessionView) -> std::fmt::Result {
        let l = &self.labels;

        writeln!(out, "{}", self.paint(BOLD, &view.node.title))?;
        write!(out, "{}", self.paint(DIM, &format!("{} {}", l.chapter, view.chapter)))?;
        if view.can_go_back {
            write!(out, "    [b] {}", l.back)?;
        }
        writeln!(out)?;
        writeln!(out)?;

        writeln!(out, "{}", view.node.scene)?;
        writeln!(out, "{}", self.paint(DIM, &view.node.ambiance))?;

        if let Some(reflection) = &view.node.reflection {
            writeln!(out)?;
            writeln!(out, "  {}", self.paint(AMBER, &format!("┃ {}", l.reflection)))?;
            writeln!(out, "  {}", self.paint(AMBER, &format!("┃ {}", reflection)))?;
        }
        writeln!(out)?;

        if view.is_terminal {
            writeln!(out, "{}", self.paint(BOLD, &l.ending_heading))?;
            writeln!(out, "{}", l.ending_text)?;
            writeln!(out, "[r] {}", l.restart)?;
        } else {
            for choice in &view.choices {
                let tag = self.paint(DIM, &format!("{} · {}", l.choice_heading, choice.mood));
                writeln!(
                    out,
                    "  [{}] {}  {}",
                    choice.number,
                    self.paint(mood_color(choice.mood), &choice.text),
                    tag
                )?;
            }
        }

        if self.show_trail {
            writeln!(out)?;
            writeln!(out, "{}", self.paint(DIM, &l.trail_heading))?;
            for entry in &view.trail {
                write!(out, "  {} {}: {}", l.moment, entry.moment, entry.title)?;
                if let Some(label) = &entry.choice_label {
                    write!(out, "  ({}: {})", l.you_chose, label)?;
                }
                writeln!(out)?;
            }
        }

        Ok(())
    }

    /// Key reference for the interactive loop.
    pub fn help(&self) -> String {
        format!(
            "1..n  choose\nb     {}\nr     {}\nt     {}\nq     quit\n",
            self.labels.back, self.labels.restart, self.labels.trail_heading
        )
    }
}
