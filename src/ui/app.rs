use std::cmp::min;
use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::controller::{Trigger, ViewController};
use crate::derive::Summary;
use crate::render::{format_currency, group_thousands, CardView};
use crate::store::RecordStore;

use super::board::CardBoard;
use super::helpers::{key_hints, stat_lines, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Headline stats row: bordered value plus label.
const STATS_HEIGHT: u16 = 4;
const SUMMARY_HEIGHT: u16 = 4;
const LEADERS_HEIGHT: u16 = 3;
/// Height allocation per game card, borders included.
const GAME_CARD_HEIGHT: u16 = 6;

/// Input modes. Searching captures printable keys for the query instead of
/// treating them as shortcuts.
enum Mode {
    Normal,
    Searching(SearchState),
}

/// State for an active inline search.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state for the dashboard.
pub struct App {
    store: RecordStore,
    board: CardBoard,
    view: Trigger,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Take ownership of the loaded records and render the "all games" view.
    pub fn new(store: RecordStore) -> Result<Self> {
        let mut app = Self {
            store,
            board: CardBoard::default(),
            view: Trigger::ShowAll,
            mode: Mode::Normal,
            status: None,
        };
        let shown = app.show(Trigger::ShowAll)?;
        app.set_status(format!("Loaded {}.", games_label(shown)), StatusKind::Info);
        Ok(app)
    }

    /// Process a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);
        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
        };
        Ok(exit)
    }

    /// Ctrl+U wipes the search query while keeping the search bar open.
    pub(crate) fn handle_ctrl_u(&mut self) -> Result<()> {
        let Mode::Searching(state) = &mut self.mode else {
            return Ok(());
        };
        state.query.clear();
        self.show(Trigger::Search(String::new()))?;
        Ok(())
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => *exit = true,
            KeyCode::Char('a') | KeyCode::Char('A') => self.switch_view(Trigger::ShowAll)?,
            KeyCode::Char('u') | KeyCode::Char('U') => self.switch_view(Trigger::ShowUnfunded)?,
            KeyCode::Char('f') | KeyCode::Char('F') => self.switch_view(Trigger::ShowFunded)?,
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.clear_status();
                self.show(Trigger::Search(String::new()))?;
                return Ok(Mode::Searching(SearchState {
                    query: String::new(),
                }));
            }
            KeyCode::Esc => {
                if self.view == Trigger::ShowAll {
                    self.clear_status();
                } else {
                    self.switch_view(Trigger::ShowAll)?;
                }
            }
            KeyCode::Up => self.board.move_selection(-1),
            KeyCode::Down => self.board.move_selection(1),
            KeyCode::PageUp => self.board.move_selection(-5),
            KeyCode::PageDown => self.board.move_selection(5),
            KeyCode::Home => self.board.select_first(),
            KeyCode::End => self.board.select_last(),
            KeyCode::Enter => self.open_selected(),
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.switch_view(Trigger::ShowAll)?;
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => {
                let shown = self.board.cards.len();
                self.set_status(
                    format!("Search \"{}\": {}.", state.query, games_label(shown)),
                    StatusKind::Info,
                );
                return Ok(Mode::Normal);
            }
            KeyCode::Backspace => {
                if state.query.pop().is_some() {
                    self.show(Trigger::Search(state.query.clone()))?;
                }
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                state.query.push(ch);
                self.show(Trigger::Search(state.query.clone()))?;
            }
            KeyCode::Up => self.board.move_selection(-1),
            KeyCode::Down => self.board.move_selection(1),
            KeyCode::PageUp => self.board.move_selection(-5),
            KeyCode::PageDown => self.board.move_selection(5),
            KeyCode::Home => self.board.select_first(),
            KeyCode::End => self.board.select_last(),
            _ => {}
        }
        Ok(Mode::Searching(state))
    }

    /// Run one trigger through the controller onto the board.
    fn show(&mut self, trigger: Trigger) -> Result<usize> {
        let shown = ViewController::new(&self.store)
            .dispatch(&trigger, &mut self.board)
            .with_context(|| format!("failed to render {trigger}"))?;
        self.board.ensure_in_bounds();
        self.view = trigger;
        Ok(shown)
    }

    fn switch_view(&mut self, trigger: Trigger) -> Result<()> {
        let label = trigger.to_string();
        let shown = self.show(trigger)?;
        self.set_status(format!("{label}: {}.", games_label(shown)), StatusKind::Info);
        Ok(())
    }

    fn open_selected(&mut self) {
        let Some(card) = self.board.current_card() else {
            self.set_status("No game selected.", StatusKind::Error);
            return;
        };
        let link = card.image_ref.trim().to_string();
        let name = card.name.clone();
        if link.is_empty() {
            self.set_status(
                format!("{name} does not have an artwork link."),
                StatusKind::Error,
            );
            return;
        }

        match open_link(&link).with_context(|| format!("failed to open {link}")) {
            Ok(()) => {
                info!(game = %name, link = %link, "opened artwork");
                self.set_status(format!("Opened artwork for {name}."), StatusKind::Info);
            }
            Err(err) => {
                warn!(game = %name, error = %format!("{err:#}"), "could not open artwork");
                self.set_status(
                    format!("Failed to open artwork: {}", surface_error(&err)),
                    StatusKind::Error,
                );
            }
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(STATS_HEIGHT),
                Constraint::Length(SUMMARY_HEIGHT),
                Constraint::Length(LEADERS_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        // Stats always describe the whole collection, not the current view.
        let summary = Summary::compute(self.store.records());
        self.draw_stats(frame, chunks[0], &summary);
        self.draw_summary(frame, chunks[1], &summary);
        self.draw_leaders(frame, chunks[2], &summary);
        self.draw_cards(frame, chunks[3]);
        self.draw_footer(frame, chunks[4]);

        if let Mode::Searching(state) = &self.mode {
            self.draw_search_bar(frame, chunks[3], state);
        }
    }

    fn draw_stats(&self, frame: &mut Frame, area: Rect, summary: &Summary<'_>) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(area);

        let stats = [
            (
                summary
                    .total_backers
                    .map(group_thousands)
                    .unwrap_or_else(|| "n/a".to_string()),
                "Individual Contributions",
            ),
            (format_currency(summary.total_pledged), "Total Raised"),
            (summary.game_count.to_string(), "Games"),
        ];
        for ((value, label), column) in stats.into_iter().zip(columns.iter()) {
            let paragraph = Paragraph::new(stat_lines(value, label))
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, *column);
        }
    }

    fn draw_summary(&self, frame: &mut Frame, area: Rect, summary: &Summary<'_>) {
        let paragraph = Paragraph::new(summary.sentence())
            .block(Block::default().borders(Borders::ALL).title("Our Mission"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_leaders(&self, frame: &mut Frame, area: Rect, summary: &Summary<'_>) {
        let Some((first, second)) = summary.top_two else {
            let paragraph = Paragraph::new(Span::styled(
                "Not enough games to rank.",
                Style::default().fg(Color::DarkGray),
            ))
            .block(Block::default().borders(Borders::ALL).title("Top Funded"));
            frame.render_widget(paragraph, area);
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        for ((title, game), column) in [("Top Funded Game", first), ("Runner Up", second)]
            .into_iter()
            .zip(columns.iter())
        {
            let line = Line::from(vec![
                Span::styled(
                    game.name().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", format_currency(game.pledged())),
                    Style::default().fg(Color::Gray),
                ),
            ]);
            let paragraph =
                Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(paragraph, *column);
        }
    }

    fn draw_cards(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(format!(
            "{} ({})",
            self.view,
            games_label(self.board.cards.len())
        ));
        frame.render_widget(block.clone(), area);
        let mut inner = block.inner(area);

        if matches!(self.mode, Mode::Searching(_)) {
            // Leave room for the search bar drawn over the top of the list.
            let reserved = min(3, inner.height);
            inner.y += reserved;
            inner.height -= reserved;
        }

        if self.board.cards.is_empty() {
            let paragraph = Paragraph::new(Span::styled(
                "No games match this view.",
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(paragraph, inner);
            return;
        }

        self.render_game_cards(frame, inner, &self.board.cards, self.board.selected);
    }

    fn render_game_cards(&self, frame: &mut Frame, area: Rect, cards: &[CardView], selected: usize) {
        if cards.is_empty() || area.height == 0 {
            return;
        }

        let card_height = GAME_CARD_HEIGHT as usize;
        let capacity = ((area.height as usize) / card_height).max(1);
        let len = cards.len();
        let mut start = if selected >= capacity {
            selected + 1 - capacity
        } else {
            0
        };
        if start + capacity > len {
            start = len.saturating_sub(capacity);
        }
        let end = min(start + capacity, len);
        let visible_len = end.saturating_sub(start);
        if visible_len == 0 {
            return;
        }

        let constraints: Vec<Constraint> = (0..visible_len)
            .map(|_| Constraint::Length(GAME_CARD_HEIGHT))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (idx, chunk) in rows.iter().enumerate() {
            if chunk.height == 0 {
                continue;
            }
            let card_index = start + idx;
            if card_index >= len {
                break;
            }

            let card = &cards[card_index];
            let is_selected = card_index == selected;
            let mut block = Block::default().borders(Borders::ALL);
            let mut paragraph_style = Style::default();
            if is_selected {
                block = block.style(Style::default().fg(Color::Yellow));
                paragraph_style = Style::default().fg(Color::Yellow);
            }

            let title = if is_selected {
                format!("▶ {}", card.name)
            } else {
                card.name.clone()
            };
            let (badge, badge_color) = if card.funded {
                ("  Funded", Color::Green)
            } else {
                ("  Needs funding", Color::Magenta)
            };

            let mut lines = vec![
                Line::from(vec![
                    Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(badge, Style::default().fg(badge_color)),
                ]),
                Line::from(Span::styled(
                    card.description.clone(),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(vec![
                    Span::styled("Pledged: ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(card.pledged_label.clone()),
                    Span::styled("   Backers: ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(card.backers_label.clone()),
                ]),
            ];
            if !card.image_ref.trim().is_empty() {
                lines.push(Line::from(Span::styled(
                    card.image_ref.trim().to_string(),
                    Style::default().fg(Color::Cyan),
                )));
            }

            let paragraph = Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Left)
                .style(paragraph_style);
            frame.render_widget(paragraph, *chunk);
        }
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        frame.set_cursor_position((search_cursor_x(inner, &state.query), inner.y));
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match self.mode {
            Mode::Searching(_) => key_hints(&[
                ("Type", "Filter by name"),
                ("↑↓", "Navigate"),
                ("Ctrl+U", "Clear"),
                ("Enter", "Keep Results"),
                ("Esc", "Cancel"),
            ]),
            Mode::Normal => key_hints(&[
                ("a", "All"),
                ("u", "Unfunded"),
                ("f", "Funded"),
                ("/", "Search"),
                ("↑↓", "Navigate"),
                ("Enter", "Open Artwork"),
                ("q", "Quit"),
            ]),
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Column of the search cursor, kept inside the bar however long the query.
fn search_cursor_x(inner: Rect, query: &str) -> u16 {
    let typed = "Search: ".len() + query.chars().count();
    let offset = u16::try_from(typed).unwrap_or(u16::MAX);
    inner
        .x
        .saturating_add(offset)
        .min(inner.right().saturating_sub(1))
        .max(inner.x)
}

fn games_label(count: usize) -> String {
    if count == 1 {
        "1 game".to_string()
    } else {
        format!("{count} games")
    }
}
