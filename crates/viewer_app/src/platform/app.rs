use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};
use ratatui::Terminal;
use viewer_core::{update, AppState, AppViewModel, MessageId, Msg, ReturnProbe};
use viewer_engine::Html2TextConverter;
use viewer_logging::{viewer_debug, viewer_info};

use super::effects::{EffectRunner, PageEffect};
use super::logging;
use super::observer::IntersectionObserver;
use super::ui;
use super::ui::layout::{PageLayout, Viewport};
use super::ui::render::FrameAreas;
use crate::config::ViewerConfig;

type Backend = CrosstermBackend<Stdout>;

pub fn run_app(config: ViewerConfig) -> Result<()> {
    logging::initialize(config.log_destination, config.log_level);
    viewer_info!("Starting snapshot viewer");

    let mut terminal = setup_terminal()?;
    let result = App::new(config, EffectRunner::new()).run(&mut terminal);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

struct App {
    config: ViewerConfig,
    state: AppState,
    view: AppViewModel,
    layout: PageLayout,
    viewport: Viewport,
    observer: IntersectionObserver,
    effects: EffectRunner,
    areas: FrameAreas,
    needs_draw: bool,
    quit: bool,
}

impl App {
    fn new(config: ViewerConfig, effects: EffectRunner) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            config,
            state,
            view,
            layout: PageLayout::default(),
            viewport: Viewport::default(),
            observer: IntersectionObserver::new(),
            effects,
            areas: FrameAreas::default(),
            needs_draw: true,
            quit: false,
        }
    }

    fn run(&mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        while !self.quit {
            self.process_pending_messages();
            let size = terminal.size()?;
            self.fit_to_area(Rect::new(0, 0, size.width, size.height));
            self.sync_visibility();

            if self.needs_draw {
                let (view, layout, viewport) = (&self.view, &self.layout, &self.viewport);
                let mut areas = self.areas;
                terminal.draw(|frame| areas = ui::render::render(frame, view, layout, viewport))?;
                self.areas = areas;
                self.needs_draw = false;
            }

            if event::poll(self.config.tick_interval)? {
                self.handle_event(event::read()?);
            }
        }
        viewer_info!("Snapshot viewer exiting");
        Ok(())
    }

    fn process_pending_messages(&mut self) {
        for msg in self.effects.poll() {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        if was_dirty {
            self.refresh_view();
        }

        for effect in self.effects.enqueue(effects) {
            self.apply_page_effect(effect);
        }
    }

    fn refresh_view(&mut self) {
        let view = self.state.view();
        let messages_changed = !Arc::ptr_eq(&view.messages, &self.view.messages);
        self.view = view;
        if messages_changed {
            self.rebuild_layout();
        }
        self.needs_draw = true;
    }

    fn rebuild_layout(&mut self) {
        self.layout = PageLayout::build(
            &self.view.messages,
            self.view.original_poster.as_deref(),
            self.areas.page.width,
            &Html2TextConverter,
        );
        self.viewport.clamp(self.layout.total_height());
        viewer_debug!(
            "Layout rebuilt: cards={} rows={} width={}",
            self.layout.cards().len(),
            self.layout.total_height(),
            self.layout.width()
        );
    }

    fn apply_page_effect(&mut self, effect: PageEffect) {
        match effect {
            PageEffect::Disconnect => self.observer.disconnect(),
            PageEffect::Observe(ids) => self.observer.observe(ids),
            PageEffect::ClearAnchor => self.viewport.scroll = 0,
            PageEffect::NavigateTo(anchor) => match self.layout.card(anchor) {
                Some(card) => self
                    .viewport
                    .scroll_to(card.top, self.layout.total_height()),
                None => viewer_debug!("No rendered message for anchor #{}", anchor),
            },
        }
        self.needs_draw = true;
    }

    /// Feeds visibility changes since the last check to the core.
    fn sync_visibility(&mut self) {
        if !self.observer.is_observing() {
            return;
        }
        let records = self.observer.take_records(&self.layout, &self.viewport);
        if !records.is_empty() {
            self.dispatch_msg(Msg::VisibilityChanged(records));
        }
    }

    fn fit_to_area(&mut self, area: Rect) {
        let [_, page, _] = ui::layout::split_screen(area);
        if page == self.areas.page {
            return;
        }
        let width_changed = page.width != self.areas.page.width;
        self.areas.page = page;
        self.viewport.height = page.height as usize;
        if width_changed {
            self.rebuild_layout();
        }
        self.viewport.clamp(self.layout.total_height());
        self.needs_draw = true;
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(..) => self.needs_draw = true,
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }
        if self.view.show_directory_input && self.handle_input_key(key) {
            return;
        }

        let step = self.config.scroll_step as isize;
        let page = self.viewport.height.max(1) as isize;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
            KeyCode::Tab => self.dispatch_msg(Msg::ToggleDirectoryInput),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-step),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(step),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_by(isize::MIN),
            KeyCode::End | KeyCode::Char('G') => self.scroll_by(isize::MAX),
            KeyCode::Enter => {
                if let Some((from, to)) = self.quote_in_view() {
                    self.dispatch_msg(Msg::QuoteClicked { from, to });
                }
            }
            KeyCode::Char('b') | KeyCode::Backspace => self.return_to_last_jump(),
            _ => {}
        }
    }

    /// Keys consumed by the directory input while it is shown.
    fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        let mut text = self.state.directory_input().to_string();
        match key.code {
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Enter => {
                self.dispatch_msg(Msg::DirectorySubmitted);
                return true;
            }
            _ => return false,
        }
        self.dispatch_msg(Msg::DirectoryInputChanged(text));
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let step = self.config.scroll_step as isize;
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-step),
            MouseEventKind::ScrollDown => self.scroll_by(step),
            MouseEventKind::Down(MouseButton::Left) => {
                self.click(Position::new(mouse.column, mouse.row))
            }
            _ => {}
        }
    }

    fn click(&mut self, at: Position) {
        if self
            .areas
            .return_button
            .is_some_and(|button| button.contains(at))
        {
            self.return_to_last_jump();
            return;
        }
        if !self.areas.page.contains(at) {
            return;
        }
        let row = self.viewport.scroll + usize::from(at.y - self.areas.page.y);
        let quote = self
            .layout
            .card_at_row(row)
            .and_then(|card| card.quote_at(row).map(|to| (card.id, to)));
        if let Some((from, to)) = quote {
            self.dispatch_msg(Msg::QuoteClicked { from, to });
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        self.viewport.scroll_by(delta, self.layout.total_height());
        self.needs_draw = true;
    }

    fn return_to_last_jump(&mut self) {
        if self.view.return_visible {
            let probe = self.return_probe();
            self.dispatch_msg(Msg::ReturnClicked(probe));
        }
    }

    fn return_probe(&self) -> ReturnProbe {
        let top_aligned = self.view.anchor.filter(|anchor| {
            self.layout
                .card(*anchor)
                .is_some_and(|card| card.top == self.viewport.scroll)
        });
        ReturnProbe {
            top_aligned,
            at_bottom: self.viewport.is_at_bottom(self.layout.total_height()),
        }
    }

    /// First card in view whose quote line is on screen and navigable.
    fn quote_in_view(&self) -> Option<(MessageId, MessageId)> {
        let end = self.viewport.scroll + self.viewport.height;
        self.layout
            .cards_between(self.viewport.scroll, end)
            .find_map(|card| {
                let row = card.top + card.quote_row?;
                let to = card.quote_target?;
                self.viewport.contains_row(row).then_some((card.id, to))
            })
    }
}
