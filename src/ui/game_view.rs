use crate::game::{Board, Cell, GameOutcome, GameState, Player, Position, HEIGHT, WIDTH};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    message: Option<&str>,
    last_drop: Option<Position>,
    awaiting_resume: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(11),    // Board
            Constraint::Length(3),  // Message
            Constraint::Length(3),  // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, chunks[0]);
    render_board(frame, game_state, selected_column, last_drop, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);

    if awaiting_resume {
        render_resume_prompt(frame, chunks[1]);
    }
}

fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, game_state: &GameState, area: Rect) {
    let (status, color) = match game_state.outcome() {
        Some(outcome @ GameOutcome::Winner(player)) => (outcome.message(), player_color(player)),
        Some(outcome @ GameOutcome::Draw) => (outcome.message(), Color::Cyan),
        None => {
            let player = game_state.current_player();
            (format!("Current Player: {}", player.name()), player_color(player))
        }
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    last_drop: Option<Position>,
    area: Rect,
) {
    let board: &Board = game_state.board();
    let winning_run = match game_state.outcome() {
        Some(GameOutcome::Winner(player)) => board.winning_run(player),
        _ => None,
    };
    // Hover highlight takes the colour of the player about to move
    let hover = Style::default()
        .fg(player_color(game_state.current_player()))
        .add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..WIDTH {
        let label = format!(" {} ", col + 1);
        if col == selected_column && !game_state.is_terminal() {
            col_line.push(Span::styled(label, hover.add_modifier(Modifier::UNDERLINED)));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    // Top border
    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(WIDTH * 3 + 1))));

    for row in 0..HEIGHT {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..WIDTH {
            let (symbol, mut style) = match board.get(row, col) {
                Cell::Empty => (" . ", Style::default().fg(Color::DarkGray)),
                Cell::One => (" ● ", Style::default().fg(player_color(Player::One))),
                Cell::Two => (" ● ", Style::default().fg(player_color(Player::Two))),
            };
            let pos = Position::new(row, col);
            if winning_run.is_some_and(|run| run.contains(&pos)) {
                style = style.add_modifier(Modifier::REVERSED);
            } else if last_drop == Some(pos) {
                style = style.add_modifier(Modifier::BOLD);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    // Bottom border
    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(WIDTH * 3 + 1))));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..WIDTH {
        if col == selected_column && !game_state.is_terminal() {
            indicator_line.push(Span::styled(" ▲ ", hover));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let text = message.unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("←/→: Move  |  Enter or 1-7: Drop  |  N: New game  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

/// Modal asking whether to continue the saved game.
fn render_resume_prompt(frame: &mut Frame, area: Rect) {
    let width = area.width.min(40);
    let height = area.height.min(5);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let text = vec![
        Line::from("An unfinished game was found."),
        Line::from(vec![
            Span::styled("R", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(": Resume   "),
            Span::styled("N", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(": New game"),
        ]),
    ];

    let prompt = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Saved game"),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(prompt, popup);
}
