use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "deck", about = concat!("taskdeck v", env!("CARGO_PKG_VERSION"), " - projects, boards and notifications in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in (demo@taskdeck.dev / demo1234)
    Login(LoginArgs),
    /// Sign out and forget the session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List projects
    Projects(ProjectsArgs),
    /// Create, show, edit or remove a project
    Project(ProjectCmd),
    /// Manage the tasks of a project
    Task(TaskCmd),
    /// Show a project's kanban board
    Board(BoardArgs),
    /// Move a task to another board column
    Mv(MvArgs),
    /// Search projects, tasks and team members
    Search(SearchArgs),
    /// List notifications
    Notifications(NotificationsArgs),
    /// Change notifications
    Notify(NotifyCmd),
    /// List team members
    Team,
    /// Show dashboard statistics
    Stats,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LoginArgs {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ProjectsArgs {
    /// Filter by status (active, on-hold, completed, archived)
    #[arg(long)]
    pub status: Option<String>,
    /// Case-insensitive match on name or description
    #[arg(long)]
    pub search: Option<String>,
    /// Sort by name, progress, updated or due
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort order: asc or desc
    #[arg(long)]
    pub order: Option<String>,
}

#[derive(Args)]
pub struct ProjectCmd {
    #[command(subcommand)]
    pub action: ProjectAction,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project
    Add(ProjectAddArgs),
    /// Show a project with its tasks
    Show(ProjectIdArg),
    /// Change project fields
    Set(ProjectSetArgs),
    /// Delete a project
    Rm(ProjectIdArg),
}

#[derive(Args)]
pub struct ProjectIdArg {
    /// Project ID
    pub id: String,
}

#[derive(Args)]
pub struct ProjectAddArgs {
    /// Project name
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Due date, YYYY-MM-DD (default: 30 days from today)
    #[arg(long)]
    pub due: Option<String>,
    /// Owner member ID (default: first team member)
    #[arg(long)]
    pub owner: Option<String>,
    /// Member ID (repeatable)
    #[arg(long)]
    pub member: Vec<String>,
    /// Initial status (default: active)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct ProjectSetArgs {
    /// Project ID
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// Percent complete, clamped to 0-100
    #[arg(long, allow_hyphen_values = true)]
    pub progress: Option<i64>,
    /// Due date, YYYY-MM-DD
    #[arg(long)]
    pub due: Option<String>,
    /// Owner member ID
    #[arg(long)]
    pub owner: Option<String>,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TaskCmd {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add(TaskAddArgs),
    /// Change task fields
    Set(TaskSetArgs),
    /// Flip a task between done and todo
    Toggle(TaskRef),
    /// Delete a task
    Rm(TaskRef),
    /// List a project's tasks
    List(TaskListArgs),
}

#[derive(Args)]
pub struct TaskRef {
    /// Project ID
    pub project: String,
    /// Task ID
    pub task: String,
}

#[derive(Args)]
pub struct TaskAddArgs {
    /// Project ID
    pub project: String,
    /// Task title
    pub title: String,
    /// Status (todo, in-progress, in-review, done)
    #[arg(long)]
    pub status: Option<String>,
    /// Priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<String>,
    /// Assignee member ID
    #[arg(long)]
    pub assign: Option<String>,
    /// Due date, YYYY-MM-DD
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct TaskSetArgs {
    /// Project ID
    pub project: String,
    /// Task ID
    pub task: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// Mark done (true) or reopen (false)
    #[arg(long)]
    pub done: Option<bool>,
    /// Priority, or "none" to clear
    #[arg(long)]
    pub priority: Option<String>,
    /// Assignee member ID, or "none" to clear
    #[arg(long)]
    pub assign: Option<String>,
    /// Due date YYYY-MM-DD, or "none" to clear
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct TaskListArgs {
    /// Project ID
    pub project: String,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    /// Assignee member ID
    #[arg(long)]
    pub assign: Option<String>,
    /// Case-insensitive match on the title
    #[arg(long)]
    pub search: Option<String>,
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BoardArgs {
    /// Project ID
    pub project: String,
}

#[derive(Args)]
pub struct MvArgs {
    /// Project ID
    pub project: String,
    /// Task ID
    pub task: String,
    /// Target column (todo, in-progress, in-review, done)
    pub status: String,
    /// Position in the target column (0-indexed, default: end)
    #[arg(long)]
    pub position: Option<usize>,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for
    pub query: String,
    /// Restrict to project, task or member (repeatable)
    #[arg(long)]
    pub kind: Vec<String>,
    /// Maximum number of results (default from config.toml)
    #[arg(long)]
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct NotificationsArgs {
    /// Only unread notifications
    #[arg(long)]
    pub unread: bool,
    /// Filter by type (info, success, warning, error)
    #[arg(long)]
    pub kind: Option<String>,
    /// Case-insensitive match on title or message
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct NotifyCmd {
    #[command(subcommand)]
    pub action: NotifyAction,
}

#[derive(Subcommand)]
pub enum NotifyAction {
    /// Mark a notification read
    Read(NotificationIdArg),
    /// Mark a notification unread
    Unread(NotificationIdArg),
    /// Mark every notification read
    ReadAll,
    /// Delete a notification
    Rm(NotificationIdArg),
    /// Delete every read notification
    ClearRead,
    /// Add a notification
    Add(NotifyAddArgs),
}

#[derive(Args)]
pub struct NotificationIdArg {
    /// Notification ID
    pub id: String,
}

#[derive(Args)]
pub struct NotifyAddArgs {
    pub title: String,
    pub message: String,
    /// Type (info, success, warning, error)
    #[arg(long, default_value = "info")]
    pub kind: String,
    /// Link target
    #[arg(long)]
    pub href: Option<String>,
}
