pub mod widgets;

use crate::tweet::TimeseriesReport;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use std::time::Duration;
use widgets::frequency::FrequencyBars;
use widgets::sentiment::SentimentChart;
use widgets::tweets::TweetList;
use widgets::DashboardWidget;

/// Terminal view over one [`TimeseriesReport`]: sentiment chart on top,
/// word and hashtag bars side by side, tweet list at the bottom.
pub struct Dashboard {
    widgets: Vec<Box<dyn DashboardWidget>>,
    focused: usize,
}

impl Dashboard {
    pub fn new(report: TimeseriesReport) -> Self {
        let widgets: Vec<Box<dyn DashboardWidget>> = vec![
            Box::new(SentimentChart::new(&report.keyword, &report.rows)),
            Box::new(FrequencyBars::new("Top words", report.words, Color::Green)),
            Box::new(FrequencyBars::new("Top hashtags", report.hashtags, Color::Magenta)),
            Box::new(TweetList::new(report.rows)),
        ];
        Self {
            widgets,
            // The tweet list is the only scrollable widget.
            focused: 3,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.widgets.len();
    }

    pub fn focused_title(&self) -> &str {
        self.widgets[self.focused].title()
    }

    /// Returns `false` when the dashboard should close.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Tab => self.focus_next(),
            KeyCode::Up | KeyCode::Char('k') => self.widgets[self.focused].scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.widgets[self.focused].scroll_down(),
            _ => {}
        }
        true
    }

    fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Percentage(30),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let areas = [rows[0], middle[0], middle[1], rows[2]];
        for (idx, (widget, area)) in self.widgets.iter().zip(areas).enumerate() {
            widget.render(frame, area, idx == self.focused);
        }

        let help = Line::from(vec![
            Span::styled(
                format!(" {} ", self.focused_title()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                "| Tab focus | ↑/↓ scroll | q quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(help), rows[3]);
    }
}

/// Take over the terminal until the user quits.
pub fn run(report: TimeseriesReport) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, Dashboard::new(report));
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, mut dashboard: Dashboard) -> Result<()> {
    loop {
        terminal.draw(|frame| dashboard.render(frame))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !dashboard.handle_key(key.code) {
                    return Ok(());
                }
            }
        }
    }
}
