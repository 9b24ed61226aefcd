//! Line-oriented terminal front end.
//!
//! Every line typed is a text-changed event, except `:`-prefixed commands:
//! `:N` picks the N-th listed place, `:clear` resets the display and
//! `:exit`/`:quit` leave.

use std::{cell::RefCell, fmt::Display, io::Write, rc::Rc};

use chrono::Local;
use tracing::warn;
use weather_core::{Observable, SearchAndWeatherController, WeatherSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    Pick(usize),
    Clear,
    Exit,
    Help,
    Unknown(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(cmd) = line.strip_prefix(':') else {
        return Command::Text(line.to_string());
    };

    match cmd.trim() {
        "clear" => Command::Clear,
        "exit" | "quit" | "q" => Command::Exit,
        "help" | "?" => Command::Help,
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => Command::Pick(n),
            _ => Command::Unknown(line.to_string()),
        },
    }
}

const HELP: &str = "Type a place name to search. \
:N picks a listed place, :clear resets, :exit quits.";

pub struct TerminalView<W: Write> {
    out: Rc<RefCell<W>>,
    candidates: Vec<String>,
}

impl<W: Write + 'static> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out: Rc::new(RefCell::new(out)), candidates: Vec::new() }
    }

    /// Binds the five display regions to the controller's observables.
    pub fn bind<S: WeatherSource>(&self, controller: &mut SearchAndWeatherController<S>) {
        let snapshot = controller.snapshot_mut();
        for slot in [
            &mut snapshot.weather,
            &mut snapshot.forecast,
            &mut snapshot.uv,
            &mut snapshot.hourly,
            &mut snapshot.historical,
        ] {
            self.bind_region(slot);
        }
    }

    fn bind_region(&self, slot: &mut Observable<String>) {
        let out = Rc::clone(&self.out);
        slot.bind(move |text: &String| {
            let mut out = out.borrow_mut();
            if let Err(e) = writeln!(out, "{}\n", text.trim_end()).and_then(|_| out.flush()) {
                warn!(error = %e, "failed to render region");
            }
        });
    }

    pub fn banner(&self) -> std::io::Result<()> {
        self.write_line(&format!("Weather App\n{HELP}"))
    }

    pub fn help(&self) -> std::io::Result<()> {
        self.write_line(HELP)
    }

    /// Lists the candidates, or hides the list when there are none.
    pub fn show_places(&mut self, labels: Vec<String>) -> std::io::Result<()> {
        self.candidates = labels;
        if self.candidates.is_empty() {
            return Ok(());
        }

        let mut out = self.out.borrow_mut();
        writeln!(out, "Matching places:")?;
        for (i, label) in self.candidates.iter().enumerate() {
            writeln!(out, "  :{}  {}", i + 1, label)?;
        }
        out.flush()
    }

    pub fn hide_places(&mut self) {
        self.candidates.clear();
    }

    /// Resolves a 1-based pick against the visible list.
    pub fn candidate(&self, n: usize) -> Option<&str> {
        n.checked_sub(1).and_then(|i| self.candidates.get(i)).map(String::as_str)
    }

    pub fn show_updated(&self) -> std::io::Result<()> {
        self.write_line(&format!("Updated at {}", Local::now().format("%H:%M:%S")))
    }

    pub fn show_error(&self, err: &dyn Display) -> std::io::Result<()> {
        self.write_line(&format!("Error: {err}"))
    }

    /// Blanks the screen and hides the candidate list.
    pub fn clear(&mut self) -> std::io::Result<()> {
        self.candidates.clear();
        {
            let mut out = self.out.borrow_mut();
            write!(out, "\x1B[2J\x1B[H")?;
        }
        self.banner()
    }

    fn write_line(&self, text: &str) -> std::io::Result<()> {
        let mut out = self.out.borrow_mut();
        writeln!(out, "{text}")?;
        out.flush()
    }
}

#[cfg(test)]
impl TerminalView<Vec<u8>> {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.out.borrow()).into_owned()
    }
}
