use super::{framed, DashboardWidget};
use crate::tweet::TimeseriesRow;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

/// Scrollable list of collected tweets with their smoothed sentiment.
pub struct TweetList {
    title: String,
    rows: Vec<TimeseriesRow>,
    selected_index: usize,
}

impl TweetList {
    pub fn new(rows: Vec<TimeseriesRow>) -> Self {
        Self {
            title: format!("Tweets ({})", rows.len()),
            rows,
            selected_index: 0,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }
}

fn sentiment_color(value: f64) -> Color {
    // Bands follow the usual compound-score reading.
    if value >= 0.05 {
        Color::Green
    } else if value <= -0.05 {
        Color::Red
    } else {
        Color::Gray
    }
}

impl DashboardWidget for TweetList {
    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self, frame: &mut Frame, area: Rect, selected: bool) {
        let block = framed(&self.title, selected);

        if self.rows.iter().all(|r| r.text.is_empty()) {
            let empty = Paragraph::new("No tweets matched this keyword")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Room for the timestamp and score prefix plus borders.
        let text_width = (area.width as usize).saturating_sub(28).max(10);

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let style = if idx == self.selected_index {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let text = row.text.replace('\n', " ");
                let first_line = textwrap::wrap(&text, text_width)
                    .into_iter()
                    .next()
                    .map(|l| l.into_owned())
                    .unwrap_or_default();

                ListItem::new(Line::from(vec![
                    Span::styled(
                        row.time.format("%m-%d %H:%M ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("{:+.2} ", row.sentiment),
                        Style::default().fg(sentiment_color(row.sentiment)),
                    ),
                    Span::styled(first_line, style),
                ]))
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(self.selected_index));

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn scroll_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    fn scroll_down(&mut self) {
        if self.selected_index + 1 < self.rows.len() {
            self.selected_index += 1;
        }
    }
}
