use super::{framed, DashboardWidget};
use crate::tweet::FrequencyTable;
use ratatui::{
    layout::{Alignment, Direction, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};

/// Horizontal bar chart for a word or hashtag frequency table.
pub struct FrequencyBars {
    title: String,
    table: FrequencyTable,
    color: Color,
}

impl FrequencyBars {
    pub fn new(title: impl Into<String>, table: FrequencyTable, color: Color) -> Self {
        Self {
            title: title.into(),
            table,
            color,
        }
    }
}

impl DashboardWidget for FrequencyBars {
    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self, frame: &mut Frame, area: Rect, selected: bool) {
        let block = framed(&self.title, selected);

        if self.table.is_empty() {
            let empty = Paragraph::new("Nothing to count")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let bars: Vec<Bar> = self
            .table
            .iter()
            .map(|(label, count)| {
                Bar::default()
                    .value(count as u64)
                    .label(Line::from(label.to_string()))
                    .style(Style::default().fg(self.color))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .data(BarGroup::default().bars(&bars));

        frame.render_widget(chart, area);
    }
}
