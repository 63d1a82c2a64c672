//! Import progress reporting
//!
//! `import_files` drives a `Ui` with the batch phase, an info line, and one
//! call per processed file. `UiApp` draws a full-screen view with ratatui,
//! `ConsoleUi` prints `[n/N] pct% file: OUTCOME` lines, `SilentUi` discards
//! everything.

mod components;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::Terminal;
use std::fmt;
use std::io::{self, Stdout};
use std::time::Duration;

use crate::writer::{ImportOutcome, ImportReport};
use components::ImportView;

/// Stages of an import run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Scanning,
    Importing,
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Scanning => write!(f, "Collecting thrall files"),
            Phase::Importing => write!(f, "Importing thralls"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Running count of per-file outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub succeeded: u64,
    pub invalid: u64,
    pub failed: u64,
}

impl Tally {
    pub fn from_reports(reports: &[ImportReport]) -> Self {
        let mut tally = Self::default();
        for report in reports {
            tally.record(&report.outcome);
        }
        tally
    }

    pub fn record(&mut self, outcome: &ImportOutcome) {
        match outcome {
            ImportOutcome::Success { .. } => self.succeeded += 1,
            ImportOutcome::InvalidClass(_) => self.invalid += 1,
            ImportOutcome::Error(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.succeeded + self.invalid + self.failed
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} stored, {} invalid class, {} errors",
            self.succeeded, self.invalid, self.failed
        )
    }
}

/// Whole-number percentage of `done` out of `total` (0 when there is nothing to do)
pub fn percent(done: u64, total: u64) -> u64 {
    if total == 0 {
        0
    } else {
        done * 100 / total
    }
}

/// `[2/4]  50% cook.txt: SUCCESS`
pub fn progress_line(report: &ImportReport, done: u64, total: u64) -> String {
    format!("[{}/{}] {:>3}% {}", done, total, percent(done, total), report)
}

/// Receiver for import progress
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_info(&mut self, info: impl Into<String>);
    /// Called after each file; `done` includes this file
    fn file_done(&mut self, report: &ImportReport, done: u64, total: u64);
}

/// Full-screen import view. The terminal is restored when this is dropped.
pub struct UiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    view: ImportView,
}

impl UiApp {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        Ok(Self {
            terminal,
            view: ImportView::new(),
        })
    }

    fn redraw(&mut self) {
        let view = &self.view;
        let drawn = self.terminal.draw(|frame| {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Length(1),
                    Constraint::Min(3),
                ])
                .split(frame.area());
            view.render(frame, rows[0], rows[1], rows[2]);
        });
        if let Err(e) = drawn {
            log::debug!("Failed to draw import view: {}", e);
        }
    }

    /// Show the final tally and wait for a key before leaving the screen
    pub fn finish(mut self) -> Result<Tally> {
        self.view.phase = Phase::Complete;
        self.view.info = format!("{} (press any key to exit)", self.view.tally);
        self.view
            .push_line("Processing Complete".to_string(), Style::default().fg(Color::Green));
        self.redraw();

        loop {
            if event::poll(Duration::from_millis(100))? {
                if let CrosstermEvent::Key(_) = event::read()? {
                    break;
                }
            }
        }

        Ok(self.view.tally)
    }
}

impl Ui for UiApp {
    fn set_phase(&mut self, phase: Phase) {
        self.view.phase = phase;
        self.redraw();
    }

    fn set_info(&mut self, info: impl Into<String>) {
        self.view.info = info.into();
        self.redraw();
    }

    fn file_done(&mut self, report: &ImportReport, done: u64, total: u64) {
        self.view.record(report, done, total);
        self.redraw();
    }
}

impl Drop for UiApp {
    fn drop(&mut self) {
        terminal::disable_raw_mode().ok();
        self.terminal.backend_mut().execute(LeaveAlternateScreen).ok();
        self.terminal.show_cursor().ok();
    }
}

/// Line-oriented UI writing to stdout
#[derive(Default)]
pub struct ConsoleUi;

impl ConsoleUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        log::debug!("Phase: {}", phase);
    }

    fn set_info(&mut self, info: impl Into<String>) {
        println!("{}", info.into());
    }

    fn file_done(&mut self, report: &ImportReport, done: u64, total: u64) {
        println!("{}", progress_line(report, done, total));
    }
}

/// Silent UI implementation for testing and non-interactive use
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_info(&mut self, _info: impl Into<String>) {}
    fn file_done(&mut self, _report: &ImportReport, _done: u64, _total: u64) {}
}
