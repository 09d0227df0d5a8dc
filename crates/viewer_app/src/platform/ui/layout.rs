//! Page geometry: message cards stacked top to bottom, measured in rows.

use std::collections::HashMap;

use chrono::{Local, TimeZone};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use viewer_core::{Gender, Message, MessageId};
use viewer_engine::Converter;

use super::constants::*;

/// Splits the terminal into top bar, page and status bar.
pub fn split_screen(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(TOP_BAR_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(area)
}

/// The floating return control, anchored to the page's bottom-right corner.
pub fn return_button_area(page: Rect) -> Rect {
    let width = RETURN_BUTTON_WIDTH.min(page.width);
    let height = RETURN_BUTTON_HEIGHT.min(page.height);
    let x = page.right().saturating_sub(width + RETURN_BUTTON_MARGIN).max(page.x);
    let y = page.bottom().saturating_sub(height + RETURN_BUTTON_MARGIN).max(page.y);
    Rect::new(x, y, width, height)
}

#[derive(Debug, Clone)]
pub struct CardLayout {
    pub id: MessageId,
    pub top: usize,
    pub lines: Vec<Line<'static>>,
    /// Row of the quote line, relative to `top`.
    pub quote_row: Option<usize>,
    /// Where the quote line leads; `None` when the quote is not navigable.
    pub quote_target: Option<MessageId>,
}

impl CardLayout {
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn bottom(&self) -> usize {
        self.top + self.height()
    }

    /// Quote target when `row` (page coordinates) is this card's quote line.
    pub fn quote_at(&self, row: usize) -> Option<MessageId> {
        let quote_row = self.quote_row?;
        if row == self.top + quote_row {
            self.quote_target
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    cards: Vec<CardLayout>,
    index: HashMap<MessageId, usize>,
    total_height: usize,
    width: u16,
}

impl PageLayout {
    pub fn build(
        messages: &[Message],
        original_poster: Option<&str>,
        width: u16,
        converter: &dyn Converter,
    ) -> Self {
        let mut cards = Vec::with_capacity(messages.len());
        let mut index = HashMap::with_capacity(messages.len());
        let mut top = 0;
        for message in messages.iter().filter(|m| !m.is_suppressed()) {
            let card = build_card(message, original_poster, width, top, converter);
            top = card.bottom();
            index.insert(card.id, cards.len());
            cards.push(card);
        }
        Self {
            cards,
            index,
            total_height: top,
            width,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn total_height(&self) -> usize {
        self.total_height
    }

    pub fn cards(&self) -> &[CardLayout] {
        &self.cards
    }

    pub fn card(&self, id: MessageId) -> Option<&CardLayout> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    /// Card covering page row `row`.
    pub fn card_at_row(&self, row: usize) -> Option<&CardLayout> {
        let after = self.cards.partition_point(|card| card.top <= row);
        let card = self.cards.get(after.checked_sub(1)?)?;
        (row < card.bottom()).then_some(card)
    }

    /// Cards overlapping the rows `[start, end)`.
    pub fn cards_between(&self, start: usize, end: usize) -> impl Iterator<Item = &CardLayout> {
        let first = self.cards.partition_point(|card| card.bottom() <= start);
        self.cards[first..]
            .iter()
            .take_while(move |card| card.top < end)
    }

    /// The rows `[start, start + height)` of the page as display lines.
    pub fn visible_lines(&self, start: usize, height: usize) -> Vec<Line<'static>> {
        let end = start + height;
        let mut lines = Vec::with_capacity(height);
        for card in self.cards_between(start, end) {
            let from = start.saturating_sub(card.top);
            let to = (end - card.top).min(card.height());
            lines.extend(card.lines[from..to].iter().cloned());
        }
        lines
    }
}

/// Scroll position of the page, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub scroll: usize,
    pub height: usize,
}

impl Viewport {
    pub fn max_scroll(&self, total_height: usize) -> usize {
        total_height.saturating_sub(self.height)
    }

    pub fn scroll_to(&mut self, row: usize, total_height: usize) {
        self.scroll = row.min(self.max_scroll(total_height));
    }

    pub fn scroll_by(&mut self, delta: isize, total_height: usize) {
        let target = self.scroll.saturating_add_signed(delta);
        self.scroll_to(target, total_height);
    }

    pub fn clamp(&mut self, total_height: usize) {
        self.scroll_to(self.scroll, total_height);
    }

    /// Scrolled to the end, with one row of slack.
    pub fn is_at_bottom(&self, total_height: usize) -> bool {
        self.scroll + self.height + 1 >= total_height
    }

    pub fn contains_row(&self, row: usize) -> bool {
        row >= self.scroll && row < self.scroll + self.height
    }
}

fn build_card(
    message: &Message,
    original_poster: Option<&str>,
    width: u16,
    top: usize,
    converter: &dyn Converter,
) -> CardLayout {
    let mut lines = vec![header_line(message, original_poster)];
    let indent = " ".repeat(CARD_INDENT);

    let mut quote_row = None;
    let quote_target = message.quote_target();
    if let Some(quote) = message.quote.as_deref() {
        quote_row = Some(lines.len());
        let line = match quote_target {
            Some(target) => Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(
                    format!("Go to quote (#{target})"),
                    Style::default()
                        .fg(COLOR_QUOTE)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]),
            None => Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(
                    format!("Quote (#{})", quote.msg_num),
                    Style::default().fg(COLOR_MUTED),
                ),
            ]),
        };
        lines.push(line);
    }

    let body_width = (width as usize).saturating_sub(CARD_INDENT).max(1);
    let text = converter.to_text(&message.msg);
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(Line::default());
            continue;
        }
        for wrapped in textwrap::wrap(paragraph, body_width) {
            lines.push(Line::from(format!("{indent}{wrapped}")));
        }
    }

    lines.push(Line::from(Span::styled(
        format!(
            "{indent}▲ {}   ▼ {}",
            message.like_count, message.dislike_count
        ),
        Style::default().fg(COLOR_MUTED),
    )));
    lines.push(Line::default());

    CardLayout {
        id: message.msg_num,
        top,
        lines,
        quote_row,
        quote_target,
    }
}

fn header_line(message: &Message, original_poster: Option<&str>) -> Line<'static> {
    let is_op = original_poster.is_some_and(|op| message.is_by(op));
    let num_style = if is_op {
        Style::default()
            .fg(COLOR_MSG_NUM_OP)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_MSG_NUM)
    };
    let name_color = if message.user.is_admin() {
        COLOR_ADMIN
    } else {
        match message.user_gender {
            Gender::Male => COLOR_MALE,
            Gender::Female => COLOR_FEMALE,
            Gender::Unknown => COLOR_MUTED,
        }
    };

    Line::from(vec![
        Span::styled(format!("#{}", message.msg_num), num_style),
        Span::raw(" "),
        Span::styled(message.user_nickname.clone(), Style::default().fg(name_color)),
        Span::raw(" "),
        Span::styled(
            format_reply_time(message.reply_time),
            Style::default().fg(COLOR_MUTED),
        ),
    ])
}

pub fn format_reply_time(seconds: i64) -> String {
    Local
        .timestamp_opt(seconds, 0)
        .single()
        .map(|time| time.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use viewer_core::QuoteRef;
    use viewer_engine::Html2TextConverter;

    fn message(n: u64, body: &str) -> Message {
        Message {
            msg_num: MessageId(n),
            msg: body.to_string(),
            status: 1,
            ..Message::default()
        }
    }

    fn quoting(n: u64, target: u64, target_status: u8) -> Message {
        Message {
            quote: Some(Box::new(QuoteRef {
                msg_num: MessageId(target),
                status: target_status,
            })),
            ..message(n, "<p>reply</p>")
        }
    }

    #[test]
    fn cards_stack_without_gaps_and_skip_suppressed() {
        let mut hidden = message(2, "<p>hidden</p>");
        hidden.status = 3;
        let messages = vec![message(1, "<p>a</p>"), hidden, quoting(3, 1, 1)];
        let layout = PageLayout::build(&messages, None, 40, &Html2TextConverter);

        let ids: Vec<_> = layout.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![MessageId(1), MessageId(3)]);
        assert!(layout.card(MessageId(2)).is_none());
        let first = layout.card(MessageId(1)).unwrap();
        let third = layout.card(MessageId(3)).unwrap();
        assert_eq!(first.top, 0);
        assert_eq!(third.top, first.bottom());
        assert_eq!(layout.total_height(), third.bottom());
    }

    #[test]
    fn quote_line_is_clickable_only_for_visible_targets() {
        let messages = vec![message(1, "<p>a</p>"), quoting(2, 1, 1), quoting(3, 1, 2)];
        let layout = PageLayout::build(&messages, None, 40, &Html2TextConverter);

        let linked = layout.card(MessageId(2)).unwrap();
        assert_eq!(linked.quote_row, Some(1));
        assert_eq!(linked.quote_at(linked.top + 1), Some(MessageId(1)));
        assert_eq!(linked.quote_at(linked.top), None);

        let plain = layout.card(MessageId(3)).unwrap();
        assert_eq!(plain.quote_row, Some(1));
        assert_eq!(plain.quote_at(plain.top + 1), None);
    }

    #[test]
    fn long_bodies_wrap_to_width() {
        let body = format!("<p>{}</p>", "word ".repeat(40));
        let narrow = PageLayout::build(&[message(1, &body)], None, 20, &Html2TextConverter);
        let wide = PageLayout::build(&[message(1, &body)], None, 200, &Html2TextConverter);
        assert!(narrow.total_height() > wide.total_height());
        assert_eq!(narrow.width(), 20);
    }

    #[test]
    fn row_lookup_and_visible_slice() {
        let messages: Vec<_> = (1..=5).map(|n| message(n, "<p>x</p>")).collect();
        let layout = PageLayout::build(&messages, None, 40, &Html2TextConverter);
        let third = layout.card(MessageId(3)).unwrap();

        assert_eq!(layout.card_at_row(third.top).map(|c| c.id), Some(MessageId(3)));
        assert_eq!(
            layout.card_at_row(third.bottom() - 1).map(|c| c.id),
            Some(MessageId(3))
        );
        assert!(layout.card_at_row(layout.total_height()).is_none());

        let lines = layout.visible_lines(third.top, 4);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], third.lines[0]);
    }

    #[test]
    fn viewport_clamps_and_detects_bottom() {
        let mut viewport = Viewport {
            scroll: 0,
            height: 10,
        };
        viewport.scroll_to(500, 100);
        assert_eq!(viewport.scroll, 90);
        assert!(viewport.is_at_bottom(100));

        viewport.scroll_by(-2, 100);
        assert_eq!(viewport.scroll, 88);
        assert!(!viewport.is_at_bottom(100));
        viewport.scroll_by(1, 100);
        assert!(viewport.is_at_bottom(100));

        viewport.scroll_by(-1000, 100);
        assert_eq!(viewport.scroll, 0);
    }

    #[test]
    fn short_pages_are_always_at_bottom() {
        let viewport = Viewport {
            scroll: 0,
            height: 30,
        };
        assert!(viewport.is_at_bottom(12));
        assert_eq!(viewport.max_scroll(12), 0);
    }

    #[test]
    fn return_button_sits_inside_the_page() {
        let page = Rect::new(0, 1, 80, 22);
        let button = return_button_area(page);
        assert_eq!(button.right(), 80 - RETURN_BUTTON_MARGIN);
        assert_eq!(button.bottom(), 23 - RETURN_BUTTON_MARGIN);
        assert_eq!(button.width, RETURN_BUTTON_WIDTH);
    }
}
