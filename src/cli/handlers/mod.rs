use std::error::Error;
use std::path::Path;
use std::str::FromStr;

use chrono::{Local, NaiveDate, TimeDelta};
use serde::Serialize;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::storage::FileStorage;
use crate::io::workspace::Workspace;
use crate::model::{
    NewProject, NewTask, NotificationKind, ProjectPatch, ProjectStatus, TaskPatch, TaskStatus,
};
use crate::ops::auth::{Guard, Route, guard};
use crate::ops::filter::{ProjectFilter, TaskFilter, filter_projects, filter_tasks};
use crate::ops::kanban::{BoardLayout, MoveOutcome, move_card};
use crate::ops::notifications::NotificationFilter;
use crate::ops::search::{ResultKind, SearchOptions, search};
use crate::ops::stats::project_stats;

type CmdResult = Result<(), Box<dyn Error>>;
type Ws = Workspace<FileStorage>;

const NOT_LOGGED_IN: &str = "not logged in (run `deck login`)";

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Open the workspace, run one command against it, then save.
pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let Some(command) = cli.command else {
        return Err("no command given (try `deck --help`)".into());
    };

    let mut ws = open_workspace(cli.data_dir.as_deref())?;
    run_command(command, &mut ws, json)?;
    ws.dispose()?;
    Ok(())
}

/// Resolve the data directory, read its config and load the workspace.
pub fn open_workspace(data_dir: Option<&str>) -> Result<Ws, Box<dyn Error>> {
    let dir = config_io::data_dir(data_dir.map(Path::new))?;
    let config = config_io::read_config(&dir)?;
    Ok(Workspace::init(FileStorage::new(dir), config)?)
}

fn run_command(command: Commands, ws: &mut Ws, json: bool) -> CmdResult {
    match command {
        // Session
        Commands::Login(args) => cmd_login(ws, args, json),
        Commands::Logout => cmd_logout(ws),
        Commands::Whoami => cmd_whoami(ws, json),

        // Projects and tasks
        Commands::Projects(args) => cmd_projects(ws, args, json),
        Commands::Project(cmd) => match cmd.action {
            ProjectAction::Add(args) => cmd_project_add(ws, args, json),
            ProjectAction::Show(args) => cmd_project_show(ws, args, json),
            ProjectAction::Set(args) => cmd_project_set(ws, args, json),
            ProjectAction::Rm(args) => cmd_project_rm(ws, args),
        },
        Commands::Task(cmd) => match cmd.action {
            TaskAction::Add(args) => cmd_task_add(ws, args, json),
            TaskAction::Set(args) => cmd_task_set(ws, args, json),
            TaskAction::Toggle(args) => cmd_task_toggle(ws, args, json),
            TaskAction::Rm(args) => cmd_task_rm(ws, args),
            TaskAction::List(args) => cmd_task_list(ws, args, json),
        },

        // Board
        Commands::Board(args) => cmd_board(ws, args, json),
        Commands::Mv(args) => cmd_mv(ws, args, json),

        // Everything else
        Commands::Search(args) => cmd_search(ws, args, json),
        Commands::Notifications(args) => cmd_notifications(ws, args, json),
        Commands::Notify(cmd) => cmd_notify(ws, cmd.action, json),
        Commands::Team => cmd_team(ws, json),
        Commands::Stats => cmd_stats(ws, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fail unless the route guard lets `route` render.
fn require(ws: &Ws, route: Route) -> CmdResult {
    match guard(&route, &ws.auth) {
        Guard::Render => Ok(()),
        Guard::Redirect(Route::Login) => Err(NOT_LOGGED_IN.into()),
        other => Err(format!("cannot open {:?}: {:?}", route, other).into()),
    }
}

fn parse_arg<T: FromStr<Err = String>>(s: &str) -> Result<T, Box<dyn Error>> {
    Ok(s.parse::<T>()?)
}

fn parse_opt<T: FromStr<Err = String>>(s: Option<&str>) -> Result<Option<T>, Box<dyn Error>> {
    s.map(parse_arg::<T>).transpose()
}

fn parse_date(s: &str) -> Result<NaiveDate, Box<dyn Error>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}' (expected YYYY-MM-DD)", s).into())
}

/// `"none"` clears a field; anything else is parsed.
fn parse_clearable<T>(
    s: Option<&str>,
    parse: impl Fn(&str) -> Result<T, Box<dyn Error>>,
) -> Result<Option<Option<T>>, Box<dyn Error>> {
    match s {
        None => Ok(None),
        Some("none") => Ok(Some(None)),
        Some(v) => Ok(Some(Some(parse(v)?))),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

fn cmd_login(ws: &mut Ws, args: LoginArgs, json: bool) -> CmdResult {
    let user = ws.login(&args.email, &args.password)?;
    if json {
        print_json(&user)
    } else {
        println!("logged in as {} <{}>", user.name, user.email);
        Ok(())
    }
}

fn cmd_logout(ws: &mut Ws) -> CmdResult {
    ws.logout()?;
    println!("logged out");
    Ok(())
}

fn cmd_whoami(ws: &mut Ws, json: bool) -> CmdResult {
    let user = ws.user().ok_or(NOT_LOGGED_IN)?;
    if json {
        print_json(user)
    } else {
        println!("{} <{}>", user.name, user.email);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

fn cmd_projects(ws: &mut Ws, args: ProjectsArgs, json: bool) -> CmdResult {
    require(ws, Route::Projects)?;
    let filter = ProjectFilter {
        status: parse_opt(args.status.as_deref())?,
        search: args.search,
        sort_by: parse_opt(args.sort.as_deref())?,
        sort_order: parse_opt(args.order.as_deref())?.unwrap_or_default(),
    };
    let projects = filter_projects(ws.store.projects(), &filter);
    if json {
        let out: Vec<_> = projects.iter().map(|p| project_to_json(p)).collect();
        return print_json(&out);
    }
    for project in projects {
        println!("{}", format_project_line(project));
    }
    Ok(())
}

fn cmd_project_add(ws: &mut Ws, args: ProjectAddArgs, json: bool) -> CmdResult {
    require(ws, Route::Projects)?;
    let due_date = match args.due.as_deref() {
        Some(d) => parse_date(d)?,
        None => today() + TimeDelta::days(30),
    };
    let owner_id = match args.owner {
        Some(id) => id,
        None => ws
            .store
            .team()
            .first()
            .map(|m| m.id.clone())
            .ok_or("no team members to own the project")?,
    };
    let mut input = NewProject::new(args.name, owner_id, due_date);
    input.description = args.description;
    input.member_ids = args.member;
    if let Some(status) = parse_opt::<ProjectStatus>(args.status.as_deref())? {
        input.status = status;
    }

    let project = ws.store.create_project(input)?;
    if json {
        print_json(&project_to_json(project))
    } else {
        println!("{}", project.id);
        Ok(())
    }
}

fn cmd_project_show(ws: &mut Ws, args: ProjectIdArg, json: bool) -> CmdResult {
    require(ws, Route::Project(args.id.clone()))?;
    let project = ws
        .store
        .project(&args.id)
        .ok_or_else(|| format!("project not found: {}", args.id))?;
    if json {
        return print_json(project);
    }
    print_lines(&format_project_detail(project, ws.store.team()));
    Ok(())
}

fn cmd_project_set(ws: &mut Ws, args: ProjectSetArgs, json: bool) -> CmdResult {
    require(ws, Route::Project(args.id.clone()))?;
    let patch = ProjectPatch {
        name: args.name,
        description: args.description,
        status: parse_opt(args.status.as_deref())?,
        progress: args.progress,
        due_date: args.due.as_deref().map(parse_date).transpose()?,
        owner_id: args.owner,
        member_ids: None,
    };
    if patch.is_empty() {
        return Err("nothing to change (see `deck project set --help`)".into());
    }
    let project = ws.store.update_project(&args.id, patch)?;
    if json {
        print_json(&project_to_json(project))
    } else {
        println!("{}", format_project_line(project));
        Ok(())
    }
}

fn cmd_project_rm(ws: &mut Ws, args: ProjectIdArg) -> CmdResult {
    require(ws, Route::Project(args.id.clone()))?;
    if !ws.store.delete_project(&args.id) {
        return Err(format!("project not found: {}", args.id).into());
    }
    println!("deleted {}", args.id);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

fn cmd_task_add(ws: &mut Ws, args: TaskAddArgs, json: bool) -> CmdResult {
    require(ws, Route::Project(args.project.clone()))?;
    let mut input = NewTask::new(args.title);
    if let Some(status) = parse_opt(args.status.as_deref())? {
        input.status = status;
    }
    input.priority = parse_opt(args.priority.as_deref())?;
    input.assigned_to = args.assign;
    input.due_date = args.due.as_deref().map(parse_date).transpose()?;

    let task = ws.store.add_task(&args.project, input)?;
    if json {
        print_json(task)
    } else {
        println!("{}", task.id);
        Ok(())
    }
}

fn cmd_task_set(ws: &mut Ws, args: TaskSetArgs, json: bool) -> CmdResult {
    require(ws, Route::Project(args.project.clone()))?;
    let patch = TaskPatch {
        title: args.title,
        status: parse_opt(args.status.as_deref())?,
        completed: args.done,
        priority: parse_clearable(args.priority.as_deref(), parse_arg)?,
        assigned_to: parse_clearable(args.assign.as_deref(), |s| Ok(s.to_string()))?,
        due_date: parse_clearable(args.due.as_deref(), parse_date)?,
    };
    if patch == TaskPatch::default() {
        return Err("nothing to change (see `deck task set --help`)".into());
    }
    let task = ws.store.update_task(&args.project, &args.task, patch)?.clone();
    if json {
        print_json(&task)
    } else {
        println!("{}", format_task_line(&task, ws.store.team()));
        Ok(())
    }
}

fn cmd_task_toggle(ws: &mut Ws, args: TaskRef, json: bool) -> CmdResult {
    require(ws, Route::Project(args.project.clone()))?;
    let task = ws.store.toggle_task(&args.project, &args.task)?.clone();
    if json {
        print_json(&task)
    } else {
        println!("{}", format_task_line(&task, ws.store.team()));
        Ok(())
    }
}

fn cmd_task_rm(ws: &mut Ws, args: TaskRef) -> CmdResult {
    require(ws, Route::Project(args.project.clone()))?;
    let task = ws.store.delete_task(&args.project, &args.task)?;
    println!("deleted {}", task.id);
    Ok(())
}

fn cmd_task_list(ws: &mut Ws, args: TaskListArgs, json: bool) -> CmdResult {
    require(ws, Route::Project(args.project.clone()))?;
    let project = ws
        .store
        .project(&args.project)
        .ok_or_else(|| format!("project not found: {}", args.project))?;
    let filter = TaskFilter {
        status: parse_opt(args.status.as_deref())?,
        priority: parse_opt(args.priority.as_deref())?,
        assignee: args.assign,
        search: args.search,
    };
    let tasks = filter_tasks(&project.tasks, &filter);
    if json {
        return print_json(&tasks);
    }
    for task in tasks {
        println!("{}", format_task_line(task, ws.store.team()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

fn cmd_board(ws: &mut Ws, args: BoardArgs, json: bool) -> CmdResult {
    require(ws, Route::Project(args.project.clone()))?;
    let project = ws
        .store
        .project(&args.project)
        .ok_or_else(|| format!("project not found: {}", args.project))?;
    if json {
        return print_json(&board_to_json(project));
    }
    print_lines(&format_board(project, ws.store.team()));
    Ok(())
}

fn cmd_mv(ws: &mut Ws, args: MvArgs, json: bool) -> CmdResult {
    require(ws, Route::Project(args.project.clone()))?;
    let to: TaskStatus = parse_arg(&args.status)?;
    let mut layout = match ws.store.project(&args.project) {
        Some(project) => BoardLayout::from_tasks(&project.tasks),
        None => BoardLayout::default(),
    };
    let index = args.position.unwrap_or(usize::MAX);
    let outcome = move_card(
        &mut ws.store,
        &mut layout,
        &args.project,
        &args.task,
        to,
        index,
    )?;
    let task = ws.store.find_task(&args.project, &args.task)?;
    if json {
        return print_json(task);
    }
    match outcome {
        MoveOutcome::StatusChanged { from, to } => {
            println!("{}: {} -> {}", task.id, from, to)
        }
        MoveOutcome::Reordered => println!("{}: already in {}", task.id, to),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

fn cmd_search(ws: &mut Ws, args: SearchArgs, json: bool) -> CmdResult {
    require(ws, Route::Search)?;
    let kinds = args
        .kind
        .iter()
        .map(|k| parse_arg::<ResultKind>(k))
        .collect::<Result<Vec<_>, _>>()?;
    let options = SearchOptions {
        max_results: args.limit.unwrap_or(ws.config().search.max_results),
        kinds,
    };
    let results = search(&ws.store, &args.query, &options);
    if json {
        return print_json(&results);
    }
    if results.is_empty() {
        println!("no results for '{}'", args.query.trim());
        return Ok(());
    }
    print_lines(&format_search_results(&results));
    Ok(())
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

fn cmd_notifications(ws: &mut Ws, args: NotificationsArgs, json: bool) -> CmdResult {
    require(ws, Route::Notifications)?;
    let filter = NotificationFilter {
        kind: parse_opt(args.kind.as_deref())?,
        read: if args.unread { Some(false) } else { None },
        search: args.search,
    };
    let items = ws.notifications.filter(&filter);
    if json {
        return print_json(&items);
    }
    for n in items {
        println!("{}", format_notification_line(n));
    }
    Ok(())
}

fn cmd_notify(ws: &mut Ws, action: NotifyAction, json: bool) -> CmdResult {
    require(ws, Route::Notifications)?;
    let not_found = |id: &str| -> Box<dyn Error> { format!("notification not found: {}", id).into() };
    match action {
        NotifyAction::Read(args) => {
            if !ws.notifications.mark_read(&args.id) {
                return Err(not_found(&args.id));
            }
        }
        NotifyAction::Unread(args) => {
            if !ws.notifications.mark_unread(&args.id) {
                return Err(not_found(&args.id));
            }
        }
        NotifyAction::Rm(args) => {
            if !ws.notifications.delete(&args.id) {
                return Err(not_found(&args.id));
            }
        }
        NotifyAction::ReadAll => {
            let changed = ws.notifications.mark_all_read();
            return report_count(changed, "marked read", json);
        }
        NotifyAction::ClearRead => {
            let changed = ws.notifications.delete_all_read();
            return report_count(changed, "deleted", json);
        }
        NotifyAction::Add(args) => {
            let kind: NotificationKind = parse_arg(&args.kind)?;
            let n = ws
                .notifications
                .add(kind, &args.title, &args.message, args.href)?;
            if json {
                return print_json(n);
            }
            println!("{}", n.id);
        }
    }
    Ok(())
}

fn report_count(changed: usize, verb: &str, json: bool) -> CmdResult {
    if json {
        return print_json(&CountJson { changed });
    }
    println!("{} {}", verb, changed);
    Ok(())
}

// ---------------------------------------------------------------------------
// Team and stats
// ---------------------------------------------------------------------------

fn cmd_team(ws: &mut Ws, json: bool) -> CmdResult {
    require(ws, Route::Team)?;
    if json {
        return print_json(ws.store.team());
    }
    for member in ws.store.team() {
        println!("{}", format_member_line(member));
    }
    Ok(())
}

fn cmd_stats(ws: &mut Ws, json: bool) -> CmdResult {
    require(ws, Route::Dashboard)?;
    let stats = project_stats(ws.store.projects(), today());
    if json {
        return print_json(&stats);
    }
    print_lines(&format_stats(&stats));
    Ok(())
}
