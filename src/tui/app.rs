use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io;
use crate::io::storage::{FileStorage, Storage};
use crate::io::workspace::Workspace;
use crate::model::{Notification, Project, Task, TaskStatus};
use crate::ops::auth::{Guard, Route, guard};
use crate::ops::debounce::Debouncer;
use crate::ops::filter::{ProjectFilter, filter_projects};
use crate::ops::kanban::BoardLayout;
use crate::ops::notifications::NotificationFilter;
use crate::ops::search::{SearchOptions, SearchResult, search};
use crate::util::unicode::LineEditor;

use super::input;
use super::render;
use super::theme::Theme;

/// How often the event loop wakes up to resolve timers
const TICK: Duration = Duration::from_millis(50);

pub type AppWorkspace = Workspace<Box<dyn Storage>>;

/// Which screen is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Projects,
    Board,
    Notifications,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the project list search
    Search,
    /// Typing the title of a new card
    AddCard,
    /// Command palette open
    Palette,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: LineEditor,
    pub password: LineEditor,
    pub focus: LoginField,
}

impl LoginForm {
    pub fn focused_mut(&mut self) -> &mut LineEditor {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}

/// Project list state
#[derive(Debug, Clone, Default)]
pub struct ProjectsView {
    pub cursor: usize,
    pub filter: ProjectFilter,
    pub search: LineEditor,
}

/// Kanban board state for one project
#[derive(Debug, Clone)]
pub struct BoardView {
    pub project_id: String,
    pub layout: BoardLayout,
    /// Focused column index
    pub column: usize,
    /// Selected card within the focused column
    pub row: usize,
}

impl BoardView {
    pub fn new(project: &Project) -> Self {
        BoardView {
            project_id: project.id.clone(),
            layout: BoardLayout::from_tasks(&project.tasks),
            column: 0,
            row: 0,
        }
    }

    pub fn status(&self) -> TaskStatus {
        TaskStatus::ALL[self.column.min(TaskStatus::ALL.len() - 1)]
    }

    pub fn selected_task_id(&self) -> Option<&str> {
        self.layout
            .column(self.status())
            .get(self.row)
            .map(String::as_str)
    }

    /// Focus the card with `task_id`, wherever it is.
    pub fn select(&mut self, task_id: &str) {
        if let Some((status, row)) = self.layout.position(task_id) {
            self.column = status.index();
            self.row = row;
        }
    }

    pub fn clamp(&mut self) {
        let len = self.layout.column(self.status()).len();
        self.row = self.row.min(len.saturating_sub(1));
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationsView {
    pub cursor: usize,
    pub unread_only: bool,
}

/// Command palette: debounced search over projects, tasks and people
#[derive(Debug, Clone)]
pub struct Palette {
    pub input: LineEditor,
    pub debounce: Debouncer<String>,
    pub results: Vec<SearchResult>,
    pub selected: usize,
}

/// Main application state
pub struct App {
    pub ws: AppWorkspace,
    pub screen: Screen,
    pub mode: Mode,
    pub theme: Theme,
    pub should_quit: bool,
    /// One-shot message for the status row
    pub message: Option<String>,
    pub login: LoginForm,
    pub projects: ProjectsView,
    pub board: Option<BoardView>,
    pub notifications: NotificationsView,
    pub palette: Option<Palette>,
    /// Title of the card being added
    pub new_card: LineEditor,
}

impl App {
    pub fn new(ws: AppWorkspace) -> Self {
        let theme = Theme::from_config(&ws.config().ui);
        let mut app = App {
            ws,
            screen: Screen::Login,
            mode: Mode::Navigate,
            theme,
            should_quit: false,
            message: None,
            login: LoginForm::default(),
            projects: ProjectsView::default(),
            board: None,
            notifications: NotificationsView::default(),
            palette: None,
            new_card: LineEditor::new(),
        };
        app.apply_guard();
        app
    }

    /// The route the current screen corresponds to
    pub fn route(&self) -> Route {
        match self.screen {
            Screen::Login => Route::Login,
            Screen::Projects => Route::Projects,
            Screen::Board => match &self.board {
                Some(board) => Route::Project(board.project_id.clone()),
                None => Route::Projects,
            },
            Screen::Notifications => Route::Notifications,
        }
    }

    /// Let the route guard move us off screens we may not see.
    pub fn apply_guard(&mut self) {
        match guard(&self.route(), &self.ws.auth) {
            Guard::Redirect(Route::Login) => {
                self.screen = Screen::Login;
                self.mode = Mode::Navigate;
                self.palette = None;
            }
            Guard::Redirect(_) => self.screen = Screen::Projects,
            Guard::Render | Guard::Loading => {}
        }
    }

    /// Resolve timers that are due: the pending login and the palette search.
    pub fn tick(&mut self, now: Instant) {
        if let Some(result) = self.ws.poll_login(now) {
            match result {
                Ok(user) => {
                    self.login = LoginForm::default();
                    self.message = Some(format!("Welcome, {}", user.name));
                }
                Err(e) => {
                    debug!("login failed: {}", e);
                    self.login.password.clear();
                    self.login.focus = LoginField::Password;
                }
            }
        }

        let options = SearchOptions {
            max_results: self.ws.config().search.max_results,
            ..Default::default()
        };
        if let Some(palette) = &mut self.palette
            && let Some(query) = palette.debounce.poll(now)
        {
            palette.results = search(&self.ws.store, &query, &options);
            palette.selected = 0;
        }

        self.apply_guard();
    }

    /// Write dirty collections, reporting failures on the status row.
    pub fn persist(&mut self) {
        if let Err(e) = self.ws.save() {
            warn!("save failed: {}", e);
            self.message = Some(format!("save failed: {}", e));
        }
    }

    pub fn visible_projects(&self) -> Vec<&Project> {
        filter_projects(self.ws.store.projects(), &self.projects.filter)
    }

    pub fn visible_notifications(&self) -> Vec<&Notification> {
        let filter = NotificationFilter {
            read: self.notifications.unread_only.then_some(false),
            ..Default::default()
        };
        self.ws.notifications.filter(&filter)
    }

    pub fn open_board(&mut self, project_id: &str) {
        if let Some(project) = self.ws.store.project(project_id) {
            self.board = Some(BoardView::new(project));
            self.screen = Screen::Board;
        }
    }

    /// The project shown on the board, if it still exists
    pub fn board_project(&self) -> Option<&Project> {
        let board = self.board.as_ref()?;
        self.ws.store.project(&board.project_id)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let board = self.board.as_ref()?;
        let task_id = board.selected_task_id()?;
        self.ws.store.task(&board.project_id, task_id)
    }

    /// Re-sync the board layout after the store changed.
    pub fn refresh_board(&mut self) {
        let Some(board) = &mut self.board else {
            return;
        };
        match self.ws.store.project(&board.project_id) {
            Some(project) => {
                board.layout.reconcile(&project.tasks);
                board.clamp();
            }
            None => {
                self.board = None;
                self.screen = Screen::Projects;
            }
        }
    }

    pub fn open_palette(&mut self) {
        let delay = Duration::from_millis(self.ws.config().search.debounce_ms);
        self.palette = Some(Palette {
            input: LineEditor::new(),
            debounce: Debouncer::new(delay),
            results: Vec::new(),
            selected: 0,
        });
        self.mode = Mode::Palette;
    }

    pub fn close_palette(&mut self) {
        self.palette = None;
        self.mode = Mode::Navigate;
    }

    /// Jump to the selected palette result.
    pub fn palette_accept(&mut self) {
        let Some(result) = self
            .palette
            .as_ref()
            .and_then(|p| p.results.get(p.selected))
            .cloned()
        else {
            return;
        };
        self.close_palette();
        match (result.project_id.as_deref(), result.task_id.as_deref()) {
            (Some(project_id), task_id) => {
                self.open_board(project_id);
                if let (Some(board), Some(task_id)) = (&mut self.board, task_id) {
                    board.select(task_id);
                }
            }
            (None, _) => {
                self.message = Some(format!("{}: {}", result.title, result.subtitle));
            }
        }
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.ws.logout() {
            warn!("could not clear session: {}", e);
        }
        self.board = None;
        self.apply_guard();
    }

    pub fn into_workspace(self) -> AppWorkspace {
        self.ws
    }
}

/// Open the workspace in `data_dir` and run the terminal UI until quit.
pub fn run(data_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = config_io::data_dir(data_dir.map(Path::new))?;
    let config = config_io::read_config(&dir)?;
    let storage: Box<dyn Storage> = Box::new(FileStorage::new(dir));
    let mut app = App::new(Workspace::init(storage, config)?);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.into_workspace().dispose()?;
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key, Instant::now());
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStorage;
    use crate::model::Config;
    use crate::ops::auth::{DEMO_EMAIL, DEMO_PASSWORD};

    fn workspace() -> AppWorkspace {
        let mut config = Config::default();
        config.auth.login_delay_ms = 0;
        let storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
        Workspace::init(storage, config).unwrap()
    }

    fn signed_in() -> App {
        let mut ws = workspace();
        ws.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        App::new(ws)
    }

    #[test]
    fn anonymous_user_lands_on_login() {
        let mut app = App::new(workspace());
        assert_eq!(app.screen, Screen::Login);
        app.screen = Screen::Projects;
        app.apply_guard();
        assert_eq!(app.screen, Screen::Login);
    }

    #[test]
    fn restored_session_skips_login() {
        let app = signed_in();
        assert_eq!(app.screen, Screen::Projects);
    }

    #[test]
    fn tick_resolves_pending_login() {
        let mut app = App::new(workspace());
        let now = Instant::now();
        app.ws.auth.begin_login(DEMO_EMAIL, DEMO_PASSWORD, now).unwrap();
        app.tick(now);
        assert_eq!(app.screen, Screen::Projects);
        assert_eq!(app.message.as_deref(), Some("Welcome, Demo User"));
    }

    #[test]
    fn palette_search_waits_for_debounce() {
        let mut app = signed_in();
        app.open_palette();
        let start = Instant::now();
        if let Some(p) = &mut app.palette {
            p.input = LineEditor::with_text("onboarding");
            p.debounce.schedule("onboarding".to_string(), start);
        }
        app.tick(start);
        assert!(app.palette.as_ref().unwrap().results.is_empty());
        app.tick(start + Duration::from_millis(150));
        let results = &app.palette.as_ref().unwrap().results;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "t-006");
    }

    #[test]
    fn palette_accept_opens_board_on_task() {
        let mut app = signed_in();
        app.open_palette();
        let start = Instant::now();
        if let Some(p) = &mut app.palette {
            p.debounce.schedule("onboarding".to_string(), start);
        }
        app.tick(start + Duration::from_secs(1));
        app.palette_accept();
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.screen, Screen::Board);
        let board = app.board.as_ref().unwrap();
        assert_eq!(board.project_id, "p-002");
        assert_eq!(board.selected_task_id(), Some("t-006"));
    }

    #[test]
    fn logout_returns_to_login() {
        let mut app = signed_in();
        app.open_board("p-001");
        app.logout();
        assert_eq!(app.screen, Screen::Login);
        assert!(app.board.is_none());
    }

    #[test]
    fn deleted_project_closes_board() {
        let mut app = signed_in();
        app.open_board("p-003");
        app.ws.store.delete_project("p-003");
        app.refresh_board();
        assert!(app.board.is_none());
        assert_eq!(app.screen, Screen::Projects);
    }
}
