//! Widgets for the full-screen import view

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph};
use ratatui::Frame;
use std::collections::VecDeque;

use super::{percent, Phase, Tally};
use crate::writer::{ImportOutcome, ImportReport};

/// Activity lines kept on screen
const MAX_ACTIVITY: usize = 100;

/// Everything the import screen shows
pub struct ImportView {
    pub phase: Phase,
    pub info: String,
    pub tally: Tally,
    pub done: u64,
    pub total: u64,
    activity: VecDeque<(String, Style)>,
}

impl ImportView {
    pub fn new() -> Self {
        Self {
            phase: Phase::Scanning,
            info: String::new(),
            tally: Tally::default(),
            done: 0,
            total: 0,
            activity: VecDeque::with_capacity(MAX_ACTIVITY),
        }
    }

    pub fn record(&mut self, report: &ImportReport, done: u64, total: u64) {
        self.tally.record(&report.outcome);
        self.done = done;
        self.total = total;
        self.push_line(report.to_string(), outcome_style(&report.outcome));
    }

    pub fn push_line(&mut self, text: String, style: Style) {
        if self.activity.len() == MAX_ACTIVITY {
            self.activity.pop_front();
        }
        self.activity.push_back((text, style));
    }

    pub fn render(&self, frame: &mut Frame, header: Rect, gauge: Rect, activity: Rect) {
        self.render_header(frame, header);
        self.render_gauge(frame, gauge);
        self.render_activity(frame, activity);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let accent = match self.phase {
            Phase::Complete => Color::Green,
            _ => Color::Yellow,
        };
        let bold = Style::default().fg(accent).add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(Span::styled(format!(" {}", self.phase), bold)),
            Line::from(Span::styled(
                format!(" {}", self.info),
                Style::default().fg(Color::Gray),
            )),
            Line::from(vec![
                Span::styled(format!(" {} stored", self.tally.succeeded), Style::default().fg(Color::Green)),
                Span::raw("  "),
                Span::styled(format!("{} invalid class", self.tally.invalid), Style::default().fg(Color::Yellow)),
                Span::raw("  "),
                Span::styled(format!("{} errors", self.tally.failed), Style::default().fg(Color::Red)),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Thrall Data Importer ")
            .border_style(Style::default().fg(Color::Rgb(0x8b, 0x5a, 0x2b)));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_gauge(&self, frame: &mut Frame, area: Rect) {
        let ratio = if self.total == 0 {
            0.0
        } else {
            (self.done as f64 / self.total as f64).min(1.0)
        };

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::LEFT | Borders::RIGHT))
            .gauge_style(Style::default().fg(Color::Rgb(0xe0, 0xc0, 0x97)).bg(Color::DarkGray))
            .ratio(ratio)
            .label(format!(
                "{}/{} file(s) ({}%)",
                self.done,
                self.total,
                percent(self.done, self.total)
            ));
        frame.render_widget(gauge, area);
    }

    fn render_activity(&self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let skip = self.activity.len().saturating_sub(visible);

        let items: Vec<ListItem> = self
            .activity
            .iter()
            .skip(skip)
            .map(|(text, style)| ListItem::new(Span::styled(format!(" {}", text), *style)))
            .collect();

        let block = Block::default().borders(Borders::ALL).title(" Files ");
        frame.render_widget(List::new(items).block(block), area);
    }
}

fn outcome_style(outcome: &ImportOutcome) -> Style {
    match outcome {
        ImportOutcome::Success { .. } => Style::default().fg(Color::White),
        ImportOutcome::InvalidClass(_) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ImportOutcome::Error(_) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}
