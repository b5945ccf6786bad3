pub mod frequency;
pub mod sentiment;
pub mod tweets;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

pub trait DashboardWidget {
    fn title(&self) -> &str;

    fn render(&self, frame: &mut Frame, area: Rect, selected: bool);

    fn scroll_up(&mut self) {}

    fn scroll_down(&mut self) {}
}

pub(crate) fn framed(title: &str, selected: bool) -> Block<'_> {
    let border_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", title))
}
