use super::{framed, DashboardWidget};
use crate::tweet::TimeseriesRow;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

/// Line chart of smoothed sentiment over time.
pub struct SentimentChart {
    title: String,
    points: Vec<(f64, f64)>,
    x_labels: [String; 2],
}

impl SentimentChart {
    pub fn new(keyword: &str, rows: &[TimeseriesRow]) -> Self {
        Self {
            title: format!("Sentiment: {}", keyword),
            points: chart_points(rows),
            x_labels: time_labels(rows),
        }
    }
}

/// Hours since the first row on x, sentiment on y.
fn chart_points(rows: &[TimeseriesRow]) -> Vec<(f64, f64)> {
    let Some(first) = rows.iter().map(|r| r.time).min() else {
        return Vec::new();
    };
    rows.iter()
        .map(|r| {
            let hours = (r.time - first).num_seconds() as f64 / 3600.0;
            (hours, r.sentiment)
        })
        .collect()
}

fn time_labels(rows: &[TimeseriesRow]) -> [String; 2] {
    let fmt = |t: chrono::DateTime<chrono::Utc>| t.format("%m-%d %H:%M").to_string();
    let first = rows.iter().map(|r| r.time).min();
    let last = rows.iter().map(|r| r.time).max();
    match (first, last) {
        (Some(a), Some(b)) => [fmt(a), fmt(b)],
        _ => [String::new(), String::new()],
    }
}

impl DashboardWidget for SentimentChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self, frame: &mut Frame, area: Rect, selected: bool) {
        let block = framed(&self.title, selected);

        if self.points.is_empty() {
            let empty = Paragraph::new("No tweets")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let x_max = self
            .points
            .iter()
            .map(|(x, _)| *x)
            .fold(0.0_f64, f64::max)
            .max(1.0);

        let dataset = Dataset::default()
            .name("rolling sentiment")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&self.points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .title("time (UTC)")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, x_max])
                    .labels(
                        self.x_labels
                            .iter()
                            .map(|l| Span::raw(l.as_str()))
                            .collect::<Vec<_>>(),
                    ),
            )
            .y_axis(
                Axis::default()
                    .title("sentiment")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([-1.0, 1.0])
                    .labels(vec![Span::raw("-1"), Span::raw("0"), Span::raw("1")]),
            );

        frame.render_widget(chart, area);
    }
}
