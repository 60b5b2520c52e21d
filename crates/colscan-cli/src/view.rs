//! Terminal bar-chart viewer for an analysis report
//!
//! Two stacked charts share one horizontal scroll position: the scaled
//! residual on top and the uniformity score below, one bar per column.

use std::cell::Cell;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Text,
    widgets::{Bar, BarChart, Block, Paragraph, Widget},
};

use crate::report::Report;

const BAR_WIDTH: u16 = 5;
const BAR_GAP: u16 = 1;
/// Bar heights are integers; values are stored in hundredths.
const VALUE_SCALE: f64 = 100.0;

pub(crate) fn run(report: &Report<'_>) -> anyhow::Result<()> {
    let mut app = ViewerApp::new(report);
    ratatui::run(|terminal| app.run(terminal))?;
    Ok(())
}

struct ViewerApp<'a> {
    report: &'a Report<'a>,
    offset: usize,
    /// Bars that fit on screen, updated on every draw.
    visible: Cell<usize>,
    should_exit: bool,
}

impl<'a> ViewerApp<'a> {
    fn new(report: &'a Report<'a>) -> Self {
        Self {
            report,
            offset: 0,
            visible: Cell::new(1),
            should_exit: false,
        }
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.should_exit {
            terminal.draw(|f| self.draw(f))?;
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn column_count(&self) -> usize {
        self.report.columns.len()
    }

    fn max_offset(&self) -> usize {
        self.column_count().saturating_sub(self.visible.get())
    }

    fn draw(&self, frame: &mut Frame) {
        let [header_area, residual_area, uniformity_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        // borders take two cells
        let inner_width = usize::from(residual_area.width.saturating_sub(2));
        let per_bar = usize::from(BAR_WIDTH + BAR_GAP);
        self.visible.set((inner_width / per_bar).max(1));

        let offset = self.offset.min(self.max_offset());
        let end = (offset + self.visible.get()).min(self.column_count());
        let shown = &self.report.columns[offset..end];

        let header = Paragraph::new(format!(
            "{} ({}) | {} rows | columns {}-{} of {}",
            self.report.source,
            self.report.encoding,
            self.report.row_count,
            offset,
            end.saturating_sub(1),
            self.column_count(),
        ));
        frame.render_widget(header, header_area);

        let residual_chart = SignalChart {
            title: "Residual",
            color: Color::Blue,
            bars: shown
                .iter()
                .map(|c| (c.index, c.scaled_residual))
                .collect(),
            max: self.report.summary.residual.max.unwrap_or(0.0),
        };
        let uniformity_chart = SignalChart {
            title: "Uniformity",
            color: Color::Green,
            bars: shown
                .iter()
                .map(|c| (c.index, c.uniformity_score))
                .collect(),
            max: self.report.summary.uniformity.max.unwrap_or(0.0),
        };
        frame.render_widget(residual_chart, residual_area);
        frame.render_widget(uniformity_chart, uniformity_area);

        let help_text = Text::from("←/→: Scroll | Home/End: Jump | q/Esc: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(help_text, help_area);
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        let offset = self.offset.min(self.max_offset());
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Left => self.offset = offset.saturating_sub(1),
            KeyCode::Right => self.offset = (offset + 1).min(self.max_offset()),
            KeyCode::Home => self.offset = 0,
            KeyCode::End => self.offset = self.max_offset(),
            _ => {}
        }
    }
}

struct SignalChart<'a> {
    title: &'a str,
    color: Color,
    bars: Vec<(usize, f64)>,
    /// Largest value over all columns, so scrolling keeps a fixed scale.
    max: f64,
}

impl Widget for SignalChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered().title(self.title);
        let chart = BarChart::new(
            self.bars
                .iter()
                .map(|&(index, value)| {
                    Bar::with_label(index.to_string(), bar_height(value))
                        .text_value(format!("{value:.2}"))
                })
                .collect::<Vec<_>>(),
        )
        .block(block)
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .bar_style(Style::default().fg(self.color))
        .max(bar_height(self.max).max(1));

        Widget::render(chart, area, buf);
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_height(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        (value * VALUE_SCALE).round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_height() {
        assert_eq!(bar_height(0.0), 0);
        assert_eq!(bar_height(0.98), 98);
        assert_eq!(bar_height(12.345), 1235);
        assert_eq!(bar_height(-1.0), 0);
        assert_eq!(bar_height(f64::NAN), 0);
    }
}
