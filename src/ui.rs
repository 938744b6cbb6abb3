//! Terminal UI rendering with ratatui

use blockfall::board::{Cell, COLS, ROWS};
use blockfall::settings::Settings;
use blockfall::tetromino::TetrominoType;
use blockfall::{Game, GameState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const EMPTY: &str = "  ";

/// Total width needed: board(22) + next/stats(16)
const GAME_WIDTH: u16 = 38;
/// Total height needed: board(20) + 2 for borders
const GAME_HEIGHT: u16 = ROWS as u16 + 2;

/// Render the game screen
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // Create main layout: board | next + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(COLS as u16 * 2 + 2),
            Constraint::Length(16),
        ])
        .split(game_area);

    render_board(frame, main_layout[0], game, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Next piece
            Constraint::Min(6),    // Stats
        ])
        .split(main_layout[1]);

    let (block_char, _) = settings.visual.block_chars();
    render_next(frame, right_layout[0], game.next_piece(), block_char);
    render_stats(frame, right_layout[1], game);

    // Overlays
    match game.game_state() {
        GameState::Paused => render_overlay(frame, area, "PAUSED", "Press P to resume"),
        GameState::GameOver => render_overlay(frame, area, "GAME OVER", "Press R to restart"),
        GameState::Playing => {}
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the next piece box
fn render_next(frame: &mut Frame, area: Rect, next: Option<TetrominoType>, block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(kind) = next {
        render_mini_piece(frame, inner, kind, block_char);
    }
}

/// Render a small piece preview in its spawn orientation
fn render_mini_piece(frame: &mut Frame, area: Rect, kind: TetrominoType, block_char: &str) {
    if area.height < 1 || area.width < 4 {
        return;
    }

    let color = kind.color();
    let shape = kind.shape(0);

    // Skip the grid's empty rows so every preview sits at the top
    let mut lines: Vec<Line> = Vec::new();
    for row in 0..shape.size() {
        if !(0..shape.size()).any(|col| shape.is_filled(row, col)) {
            continue;
        }
        let spans: Vec<Span> = (0..shape.size())
            .map(|col| {
                if shape.is_filled(row, col) {
                    Span::styled(block_char, Style::default().fg(color))
                } else {
                    Span::raw(EMPTY)
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let (block_char, ghost_char) = settings.visual.block_chars();

    let block = Block::default()
        .title(" BLOCKFALL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let piece = game.active_piece();
    let piece_cells: Vec<(i32, i32)> = piece.map(|p| p.cells().collect()).unwrap_or_default();
    let ghost_cells: Vec<(i32, i32)> = if settings.visual.show_ghost {
        game.ghost().map(|g| g.cells().collect()).unwrap_or_default()
    } else {
        Vec::new()
    };
    let piece_color = piece.map(|p| p.kind.color()).unwrap_or(Color::White);

    let mut lines: Vec<Line> = Vec::new();
    for (row, cells) in game.board().rows().enumerate() {
        let spans: Vec<Span> = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let pos = (row as i32, col as i32);
                if piece_cells.contains(&pos) {
                    Span::styled(block_char, Style::default().fg(piece_color))
                } else if ghost_cells.contains(&pos) {
                    Span::styled(ghost_char, Style::default().fg(piece_color).dim())
                } else {
                    match cell {
                        Cell::Filled(color) => Span::styled(block_char, Style::default().fg(*color)),
                        Cell::Empty => Span::raw(EMPTY),
                    }
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = game.state();
    let lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", state.score),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LEVEL", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", state.level),
            Style::default().fg(Color::Cyan),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", state.lines),
            Style::default().fg(Color::Green),
        )),
    ];

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 24u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
