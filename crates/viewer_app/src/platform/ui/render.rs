use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use viewer_core::{AppViewModel, LoadStatus};

use super::constants::*;
use super::layout::{return_button_area, split_screen, PageLayout, Viewport};

/// Areas the event loop needs for hit-testing after a frame is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameAreas {
    pub page: Rect,
    pub return_button: Option<Rect>,
}

pub fn render(
    frame: &mut Frame,
    view: &AppViewModel,
    layout: &PageLayout,
    viewport: &Viewport,
) -> FrameAreas {
    let [top_bar, page, status_bar] = split_screen(frame.area());

    frame.render_widget(Paragraph::new(top_bar_line(view)), top_bar);
    frame.render_widget(
        Paragraph::new(layout.visible_lines(viewport.scroll, page.height as usize)),
        page,
    );
    frame.render_widget(Paragraph::new(status_line(view, layout, viewport)), status_bar);

    let return_button = view.return_visible.then(|| {
        let area = return_button_area(page);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(RETURN_BUTTON_LABEL)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL))
                .style(Style::default().fg(COLOR_QUOTE).add_modifier(Modifier::BOLD)),
            area,
        );
        area
    });

    FrameAreas {
        page,
        return_button,
    }
}

fn top_bar_line(view: &AppViewModel) -> Line<'static> {
    let bar = Style::default().bg(COLOR_BAR);
    let main = if view.show_directory_input || view.title.is_empty() {
        Span::styled(format!(" Snapshot directory: {}█", view.directory_input), bar)
    } else {
        Span::styled(
            format!(" {}", view.title),
            bar.add_modifier(Modifier::BOLD),
        )
    };
    let toggle_style = if view.change_input_enabled {
        bar
    } else {
        bar.add_modifier(Modifier::DIM)
    };
    Line::from(vec![main, Span::styled("  [Tab] change input ", toggle_style)]).style(bar)
}

fn status_line(view: &AppViewModel, layout: &PageLayout, viewport: &Viewport) -> Line<'static> {
    let load = match &view.load {
        LoadStatus::Idle => "Type a snapshot directory and press Enter".to_string(),
        LoadStatus::Loading { dir } => format!("Loading {}", dir.display()),
        LoadStatus::Ready => format!(
            "{} messages | {} images | jumps {}",
            view.messages.len(),
            view.image_count,
            view.jump_stack.len()
        ),
        LoadStatus::Failed { reason } => format!("Load failed: {reason}"),
    };
    let position = layout
        .card_at_row(viewport.scroll)
        .map(|card| format!(" | at #{}", card.id))
        .unwrap_or_default();
    Line::from(Span::styled(
        format!(" {load}{position} | Enter quote  b back  Esc quit"),
        Style::default().fg(COLOR_MUTED),
    ))
}
