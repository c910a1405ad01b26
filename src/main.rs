use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use gtd::calendar::{self, Outcome};
use gtd::picker::{self, Selection};
use gtd::{bookmarks, external, notes, Config, RofiPicker, TerminalPicker};
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

type CmdResult = Result<(), Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(name = "gtd")]
#[command(author, version, about = "GTD utilities: inbox, next actions, bookmarks and a recurring calendar")]
struct Args {
    /// Notes root (default: $GTD_ROOT, the config file, or ~/GTD)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List browser bookmarks, or open the one given
    Bookmarks {
        /// A listed line (`section/name: url`) to open
        query: Option<String>,
    },
    /// Search through note files
    Find {
        query: Option<String>,
    },
    /// List the inbox, open a listed note, or capture a new item
    In {
        item: Option<String>,
    },
    /// List next actions, or open a listed one
    Actions {
        item: Option<String>,
    },
    /// List dated todos; inside rofi, selecting one completes it
    Calendar {
        #[command(subcommand)]
        command: Option<CalendarCommand>,
    },
    /// Generate shell completions
    Completion {
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum CalendarCommand {
    /// Number of tasks due today or overdue
    Today,
    /// Complete a calendar note, advancing it if it recurs
    Done {
        /// File name inside the calendar directory
        file: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("GTD_LOG", "warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();

    if let Command::Completion { shell } = args.command {
        generate(shell, &mut Args::command(), "gtd", &mut io::stdout());
        return;
    }

    let config = Config::load(args.root);
    if let Err(e) = dispatch(args.command, &config) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn dispatch(command: Command, config: &Config) -> CmdResult {
    match command {
        Command::Bookmarks { query } => cmd_bookmarks(config, query),
        Command::Find { query } => cmd_find(config, query),
        Command::In { item } => cmd_in(config, item),
        Command::Actions { item } => cmd_actions(config, item),
        Command::Calendar { command } => cmd_calendar(config, command),
        Command::Completion { .. } => Ok(()),
    }
}

fn cmd_bookmarks(config: &Config, query: Option<String>) -> CmdResult {
    match query {
        None => {
            let mut out = io::stdout().lock();
            for bookmark in bookmarks::load(&config.bookmarks_file)? {
                writeln!(out, "{}", bookmark)?;
            }
            Ok(())
        }
        Some(line) => Ok(external::open(&config.opener, bookmarks::url_of(&line))?),
    }
}

fn cmd_find(config: &Config, query: Option<String>) -> CmdResult {
    let Some(query) = query else {
        return Ok(());
    };
    let output = external::search(&config.search_tool, &query, &config.notes_root)?;
    print!("{}", output);
    Ok(())
}

fn print_listing(listing: &[notes::Listing]) -> CmdResult {
    let mut out = io::stdout().lock();
    for line in listing {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn cmd_in(config: &Config, item: Option<String>) -> CmdResult {
    let Some(item) = item else {
        return print_listing(&notes::list(&config.inbox_dir, true)?);
    };

    if let Some(path) = notes::resolve_listing(&config.inbox_dir, &item) {
        return Ok(external::open(&config.opener, &path.to_string_lossy())?);
    }

    let path = notes::capture(&config.inbox_dir, &item)?;
    eprintln!("{} {}", "Captured".green(), path.display());
    Ok(())
}

fn cmd_actions(config: &Config, item: Option<String>) -> CmdResult {
    let Some(item) = item else {
        return print_listing(&notes::list(&config.next_actions_dir, false)?);
    };

    match notes::resolve_listing(&config.next_actions_dir, &item) {
        Some(path) => Ok(external::open(&config.opener, &path.to_string_lossy())?),
        None => Err(format!("not a listed next action: {:?}", item).into()),
    }
}

fn cmd_calendar(config: &Config, command: Option<CalendarCommand>) -> CmdResult {
    let dir = &config.calendar_dir;

    let outcome = match command {
        Some(CalendarCommand::Today) => {
            let entries = calendar::scan(dir)?;
            println!("{}", calendar::due_count(&entries, Local::now().date_naive()));
            return Ok(());
        }
        Some(CalendarCommand::Done { file }) => calendar::run(&mut Selection(file), dir)?,
        None if picker::in_rofi() => calendar::run(&mut RofiPicker::from_env(io::stdout().lock()), dir)?,
        None => calendar::run(&mut TerminalPicker::new(io::stdout().lock()), dir)?,
    };

    match outcome {
        Outcome::Listed(count) => log::debug!("Listed {} calendar entries", count),
        Outcome::Unchanged { token } => log::debug!("{} does not recur", token),
        Outcome::Advanced { token, to, .. } if !picker::in_rofi() => {
            eprintln!("{} {} to {}", "Moved".green(), token, calendar::format_date(to));
        }
        Outcome::Advanced { .. } => {}
    }
    Ok(())
}
