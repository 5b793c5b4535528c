use crate::config::UiConfig;
use crate::game::{Player, Position, WIDTH};
use crate::session::{ColumnOutcome, GameObserver, Session};
use crate::store::GridStore;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Duration;

/// Collects session notifications for the status line.
#[derive(Debug, Default)]
pub struct StatusFeed {
    message: Option<String>,
    last_drop: Option<Position>,
}

impl StatusFeed {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn last_drop(&self) -> Option<Position> {
        self.last_drop
    }
}

impl GameObserver for StatusFeed {
    fn on_piece_dropped(&mut self, row: usize, column: usize, _player: Player) {
        self.last_drop = Some(Position::new(row, column));
    }

    fn on_game_ended(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }

    fn on_notice(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }
}

pub struct App<S> {
    session: Session<S, StatusFeed>,
    selected_column: usize,
    initial_column: usize,
    poll_interval: Duration,
    should_quit: bool,
}

impl<S: GridStore> App<S> {
    pub fn new(session: Session<S, StatusFeed>, config: &UiConfig) -> Self {
        let initial_column = config.initial_column.min(WIDTH - 1);
        App {
            session,
            selected_column: initial_column,
            initial_column,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            should_quit: false,
        }
    }

    pub fn session(&self) -> &Session<S, StatusFeed> {
        &self.session
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.poll_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.session.is_awaiting_resume() {
            self.handle_prompt_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < WIDTH {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = (c as usize) - ('1' as usize);
                if column < WIDTH {
                    self.selected_column = column;
                    self.drop_piece();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('n') => {
                self.start_new_game();
            }
            _ => {}
        }
    }

    /// Keys accepted while the resume prompt is open.
    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') | KeyCode::Enter => {
                self.session.resume_game();
                self.session.observer_mut().message = None;
            }
            KeyCode::Char('n') => self.start_new_game(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn start_new_game(&mut self) {
        self.session.start_new_game();
        self.selected_column = self.initial_column;
        let feed = self.session.observer_mut();
        feed.last_drop = None;
        feed.message = Some("New game started!".to_string());
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        if self.session.state().is_terminal() {
            self.session.observer_mut().message =
                Some("Game over! Press 'n' for a new game.".to_string());
            return;
        }

        // The feed carries the end-of-game message; a full column changes nothing
        if self.session.choose_column(self.selected_column).outcome == ColumnOutcome::Ongoing {
            self.session.observer_mut().message = None;
        }
    }

    /// Render the UI
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let feed = self.session.observer();
        let state = self.session.pending().unwrap_or(self.session.state());
        super::game_view::render(
            frame,
            state,
            self.selected_column,
            feed.message(),
            feed.last_drop(),
            self.session.is_awaiting_resume(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Cell, GameStatus};
    use crate::session::RECOVERED_NOTICE;
    use crate::store::MemoryStore;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(store: MemoryStore) -> App<MemoryStore> {
        let session = Session::open(store, StatusFeed::default());
        App::new(session, &UiConfig::default())
    }

    fn screen(app: &App<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 26)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn saved_game() -> MemoryStore {
        let mut board = Board::new();
        board.drop_piece(3, Player::One).unwrap();
        MemoryStore::with_contents(serde_json::to_string(&board).unwrap())
    }

    #[test]
    fn test_column_selection_stays_on_board() {
        let mut app = app_with(MemoryStore::new());
        assert_eq!(app.selected_column(), 3);

        for _ in 0..10 {
            app.handle_key(key(KeyCode::Left));
        }
        assert_eq!(app.selected_column(), 0);

        for _ in 0..10 {
            app.handle_key(key(KeyCode::Right));
        }
        assert_eq!(app.selected_column(), WIDTH - 1);

        // '8' and '9' are off the board
        app.handle_key(key(KeyCode::Char('9')));
        assert_eq!(app.selected_column(), WIDTH - 1);
        assert!(app.session().state().board().is_empty());
    }

    #[test]
    fn test_enter_and_digits_drop_pieces() {
        let mut app = app_with(MemoryStore::new());
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('1')));

        let board = app.session().state().board();
        assert_eq!(board.get(5, 3), Cell::One);
        assert_eq!(board.get(5, 0), Cell::Two);
        assert_eq!(app.selected_column(), 0);
        assert_eq!(
            app.session().observer().last_drop(),
            Some(Position::new(5, 0))
        );
    }

    #[test]
    fn test_win_message_and_restart() {
        let mut app = app_with(MemoryStore::new());
        for c in ['1', '7', '2', '7', '3', '7', '4'] {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.session().state().status(), GameStatus::Won(Player::One));
        assert_eq!(app.session().observer().message(), Some("Player 1 won!"));
        assert!(screen(&app).contains("Player 1 won!"));

        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(
            app.session().observer().message(),
            Some("Game over! Press 'n' for a new game.")
        );

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.session().state().status(), GameStatus::Empty);
        assert_eq!(app.selected_column(), 3);
        assert_eq!(app.session().observer().last_drop(), None);
    }

    #[test]
    fn test_resume_prompt_blocks_moves_until_answered() {
        let mut app = app_with(saved_game());
        assert!(app.session().is_awaiting_resume());
        assert!(screen(&app).contains("Resume"));

        // Drops are not accepted behind the prompt
        app.handle_key(key(KeyCode::Char('5')));
        assert!(app.session().state().board().is_empty());

        app.handle_key(key(KeyCode::Char('r')));
        assert!(!app.session().is_awaiting_resume());
        assert_eq!(app.session().state().current_player(), Player::Two);
        assert_eq!(app.session().state().board().get(5, 3), Cell::One);
    }

    #[test]
    fn test_new_game_from_prompt() {
        let mut app = app_with(saved_game());
        app.handle_key(key(KeyCode::Char('n')));
        assert!(!app.session().is_awaiting_resume());
        assert!(app.session().state().board().is_empty());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_recovered_notice_is_shown() {
        let app = app_with(MemoryStore::with_contents("{ broken"));
        assert_eq!(app.session().observer().message(), Some(RECOVERED_NOTICE));
        assert!(screen(&app).contains("starting a new game"));
    }

    #[test]
    fn test_quit() {
        let mut app = app_with(MemoryStore::new());
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }
}
