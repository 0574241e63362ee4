use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tasklist_cli::cli::{Cli, Command, collect_config_overrides};
use tasklist_cli::render;
use tasklist_core::config::{
    Config, Palette, load_config_with_fallback, merge_overrides, palette_for_theme,
};
use tasklist_core::error::AppError;
use tasklist_core::model::Task;
use tasklist_core::notify::{DeniedNotifications, NotificationService, notification_service};
use tasklist_core::repository::TaskRepository;
use tasklist_core::storage::FileStore;

const LOG_ENV_VAR: &str = "TASKLIST_LOG";
const DEFAULT_LOG_LEVEL: &str = "warn";

type Session = TaskRepository<FileStore, Box<dyn NotificationService>>;

fn init_logging(config: &Config) {
    let level = config.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
    let env = env_logger::Env::new().filter_or(LOG_ENV_VAR, level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn load_config() -> Config {
    let loaded = load_config_with_fallback();
    if let Some(err) = loaded.error {
        eprintln!("WARNING: ignoring configuration: {}", err);
    }
    loaded.config
}

fn open_session(notifications: Box<dyn NotificationService>) -> Result<Session, AppError> {
    let store = FileStore::from_env()?;
    Ok(TaskRepository::open(store, notifications))
}

fn print_task(task: &Task, json: bool, verb: &str) {
    if json {
        println!("{}", render::task_json(task));
    } else {
        println!("{verb} task: {} ({})", task.text, task.id);
    }
}

fn report_unsaved(session: &Session) {
    match session.persistence_error() {
        Some(err) => eprintln!("WARNING: changes are not saved yet: {}", err),
        None => log::debug!("saved {} tasks", session.list().len()),
    }
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::validation(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::validation("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn expand_alias(args: Vec<String>, config: &Config) -> Result<Vec<String>, AppError> {
    let Some(expansion) = args.first().and_then(|first| config.aliases.get(first)) else {
        return Ok(args);
    };

    let mut expanded = split_command_line(expansion)?;
    expanded.extend(args.into_iter().skip(1));
    Ok(expanded)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_command(cli: Cli, session: &mut Session, palette: &Palette) -> Result<(), AppError> {
    match cli.command {
        Command::Add { text, priority } => {
            let task = session.add(text.as_deref().unwrap_or(""), priority.unwrap_or_default())?;
            print_task(&task, cli.json, "Added");
            report_unsaved(session);
        }
        Command::Toggle { id } => {
            let task = session.toggle_complete(&id)?;
            let verb = if task.completed { "Completed" } else { "Reopened" };
            print_task(&task, cli.json, verb);
            report_unsaved(session);
        }
        Command::Edit { id, new_text } => {
            let task = session.edit_text(&id, &new_text)?;
            print_task(&task, cli.json, "Updated");
            report_unsaved(session);
        }
        Command::Delete { id } => {
            let task = session.delete(&id)?;
            print_task(&task, cli.json, "Deleted");
            report_unsaved(session);
        }
        Command::Show { id } => {
            let task = session.get(&id)?;
            if cli.json {
                println!("{}", render::task_json(task));
            } else {
                println!("{}", render::task_detail(task));
            }
        }
        Command::List => {
            if cli.json {
                println!("{}", render::tasks_json(session.list()));
            } else if session.list().is_empty() {
                println!("No tasks yet");
            } else {
                println!("{}", render::task_table(session.list(), palette));
            }
        }
        Command::Home => {
            let stats = session.stats();
            if cli.json {
                println!("{}", render::stats_json(&stats));
            } else {
                println!("{}", render::home_summary(&stats));
            }
        }
        Command::Stats => {
            let stats = session.stats();
            if cli.json {
                println!("{}", render::stats_json(&stats));
            } else {
                println!("{}", render::profile_summary(&stats, palette));
            }
        }
    }

    Ok(())
}

fn command_palette(cli: &Cli, config: &Config) -> Result<Palette, AppError> {
    let overrides = collect_config_overrides(&cli.config_override).map_err(AppError::validation)?;
    let merged = merge_overrides(config, &overrides);
    Ok(palette_for_theme(merged.theme.as_deref()))
}

fn run_interactive(config: &Config) -> Result<(), AppError> {
    let mut session = open_session(notification_service(config))?;
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line).and_then(|args| expand_alias(args, config)) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }
        log::debug!("running {}", args.join(" "));

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("tasklist".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        let result = command_palette(&cli, config)
            .and_then(|palette| run_command(cli, &mut session, &palette));
        if let Err(err) = result {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn run_once(cli: Cli, config: &Config) -> Result<(), AppError> {
    // Reminders need a live session to fire; one-shot commands go without.
    let mut session = open_session(Box::new(DeniedNotifications))?;
    let palette = command_palette(&cli, config)?;
    log::debug!("running {:?}", cli.command);
    run_command(cli, &mut session, &palette)
}

fn main() {
    let config = load_config();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        init_logging(&config);
        if let Err(err) = run_interactive(&config) {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if !err.use_stderr() {
                let _ = err.print();
                return;
            }
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let config = match collect_config_overrides(&cli.config_override) {
        Ok(overrides) => merge_overrides(&config, &overrides),
        Err(message) => {
            eprintln!("ERROR: {}", AppError::validation(message));
            std::process::exit(1);
        }
    };
    init_logging(&config);

    if let Err(err) = run_once(cli, &config) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{expand_alias, split_command_line};
    use tasklist_core::config::Config;

    #[test]
    fn split_command_line_honours_quotes() {
        let args = split_command_line(r#"edit abc "Buy \"oat\" milk""#).unwrap();
        assert_eq!(args, vec!["edit", "abc", "Buy \"oat\" milk"]);
    }

    #[test]
    fn split_command_line_rejects_unterminated_quote() {
        let err = split_command_line("add \"oops").unwrap_err();
        assert_eq!(err.code(), "validation_error");
    }

    #[test]
    fn expand_alias_replaces_first_word() {
        let config = Config {
            aliases: [("ls".to_string(), "list --json".to_string())]
                .into_iter()
                .collect(),
            ..Config::default()
        };

        let expanded = expand_alias(vec!["ls".to_string()], &config).unwrap();
        assert_eq!(expanded, vec!["list", "--json"]);

        let untouched = expand_alias(vec!["stats".to_string()], &config).unwrap();
        assert_eq!(untouched, vec!["stats"]);
    }
}
