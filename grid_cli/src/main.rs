//! # Gridboard CLI Application
//!
//! Line-oriented front end for the layout engine. Reads one command per line
//! from stdin (interactive) or a script file, applies it to a layout session
//! and prints the resulting grid as a table or JSON.
//!
//! ```text
//! $ grid_cli --shape 3
//! > drag-panel 0 0 50 1000
//! > add-row 0 after
//! > show
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use grid_core::{
    CommandOutcome, ContainerMetrics, ContentHandle, DividerTarget, Grid, GridError, GridResult,
    LayoutCommand, LayoutSession, PanelId, PointerPosition, PressOutcome,
};

/// Environment variable holding the log filter
const LOG_ENV: &str = "GRIDBOARD_LOG";

/// Filter used when `GRIDBOARD_LOG` is unset or invalid
const DEFAULT_LOG_FILTER: &str = "info";

const HELP: &str = "\
Layout commands:
  add-row <anchor> <before|after>
  remove-row <row>
  add-panel <row> <before|after>
  insert-panel <row> <panel> <before|after>
  remove-panel <row> <panel>
  reset
Session commands:
  show
  drag-row <row> <delta_px> <container_px>
  drag-panel <row> <panel> <delta_px> <container_px>
  set <row> <panel> <handle>
  clear <row> <panel>
  help
  quit";

#[derive(Parser, Debug)]
#[command(name = "grid_cli", version, about = "Edit a presentation grid from the terminal")]
struct Args {
    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print the grid as JSON after each command
    #[arg(long)]
    json: bool,

    /// Initial panel count for each row, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = vec![2usize, 2])]
    shape: Vec<usize>,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
enum Verb {
    Layout(LayoutCommand),
    Show,
    Drag {
        target: DividerTarget,
        delta_px: f64,
        container_px: f64,
    },
    Set {
        row: usize,
        panel: usize,
        handle: String,
    },
    Clear {
        row: usize,
        panel: usize,
    },
    Help,
    Quit,
}

/// JSON line printed in `--json` mode.
#[derive(Serialize)]
struct Report<'a> {
    input: &'a str,
    outcome: &'a str,
    grid: &'a Grid,
}

fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_logging() {
    let directives = std::env::var(LOG_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let grid = match Grid::with_shape(&args.shape) {
        Ok(grid) => grid,
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };
    let mut session = LayoutSession::with_grid(grid);

    let (reader, interactive): (Box<dyn BufRead>, bool) = match &args.script {
        Some(path) => match File::open(path) {
            Ok(file) => (Box::new(BufReader::new(file)), false),
            Err(e) => {
                eprintln!("Error: cannot open '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => (Box::new(io::stdin().lock()), true),
    };

    if interactive {
        println!("Gridboard CLI - type 'help' for commands");
        print_grid(&session, "start", "show", args.json);
    }
    info!(shape = ?args.shape, interactive, "session started");

    let mut failures = 0usize;
    let mut lines = reader.lines();
    loop {
        if interactive {
            print!("> ");
            if io::stdout().flush().is_err() {
                break;
            }
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Error: failed to read input: {}", e);
                return ExitCode::FAILURE;
            }
            None => break,
        };

        let verb = match parse_line(&line) {
            Ok(Some(verb)) => verb,
            Ok(None) => continue,
            Err(e) => {
                failures += 1;
                if !report(&e) {
                    return ExitCode::FAILURE;
                }
                continue;
            }
        };

        match run(&mut session, &verb) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Print(outcome)) => print_grid(&session, line.trim(), outcome, args.json),
            Ok(Flow::Help) => println!("{}", HELP),
            Err(e) => {
                failures += 1;
                if !report(&e) {
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    // Scripts report bad lines through the exit code; interactive use does not.
    if failures > 0 && !interactive {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Print `e` to stderr. Returns whether the session can carry on.
fn report(e: &GridError) -> bool {
    eprintln!("Error [{}]: {}", e.error_code(), e);
    e.is_recoverable()
}

enum Flow {
    Print(&'static str),
    Help,
    Quit,
}

/// Parse one line. Blank lines and `#` comments give `Ok(None)`.
fn parse_line(line: &str) -> GridResult<Option<Verb>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let words: Vec<&str> = trimmed.split_whitespace().collect();
    let verb = match words[0].to_ascii_lowercase().as_str() {
        "show" => Verb::Show,
        "help" | "?" => Verb::Help,
        "quit" | "exit" => Verb::Quit,
        "drag-row" => {
            expect_words(trimmed, &words, 4)?;
            Verb::Drag {
                target: DividerTarget::Row {
                    row: parse_num(trimmed, "row", words[1])?,
                },
                delta_px: parse_num(trimmed, "delta_px", words[2])?,
                container_px: parse_num(trimmed, "container_px", words[3])?,
            }
        }
        "drag-panel" => {
            expect_words(trimmed, &words, 5)?;
            Verb::Drag {
                target: DividerTarget::Panel {
                    row: parse_num(trimmed, "row", words[1])?,
                    panel: parse_num(trimmed, "panel", words[2])?,
                },
                delta_px: parse_num(trimmed, "delta_px", words[3])?,
                container_px: parse_num(trimmed, "container_px", words[4])?,
            }
        }
        "set" => {
            if words.len() < 4 {
                return Err(GridError::invalid_command(trimmed, "usage: set <row> <panel> <handle>"));
            }
            // The handle is everything after the indices, spaces included.
            let handle = trimmed
                .splitn(4, char::is_whitespace)
                .nth(3)
                .map(str::trim)
                .unwrap_or_default()
                .to_string();
            Verb::Set {
                row: parse_num(trimmed, "row", words[1])?,
                panel: parse_num(trimmed, "panel", words[2])?,
                handle,
            }
        }
        "clear" => {
            expect_words(trimmed, &words, 3)?;
            Verb::Clear {
                row: parse_num(trimmed, "row", words[1])?,
                panel: parse_num(trimmed, "panel", words[2])?,
            }
        }
        _ => Verb::Layout(trimmed.parse()?),
    };
    Ok(Some(verb))
}

fn expect_words(input: &str, words: &[&str], count: usize) -> GridResult<()> {
    if words.len() != count {
        return Err(GridError::invalid_command(
            input,
            format!("expected {} argument(s), got {}", count - 1, words.len() - 1),
        ));
    }
    Ok(())
}

fn parse_num<T: std::str::FromStr>(input: &str, name: &str, word: &str) -> GridResult<T> {
    word.parse()
        .map_err(|_| GridError::invalid_command(input, format!("{} is not a valid number: '{}'", name, word)))
}

fn run(session: &mut LayoutSession, verb: &Verb) -> GridResult<Flow> {
    let flow = match verb {
        Verb::Layout(command) => Flow::Print(match session.apply(*command) {
            CommandOutcome::Applied => "applied",
            CommandOutcome::Unchanged => "unchanged",
            CommandOutcome::BlockedByDrag => "blocked",
        }),
        Verb::Show => Flow::Print("show"),
        Verb::Drag {
            target,
            delta_px,
            container_px,
        } => Flow::Print(simulate_drag(session, *target, *delta_px, *container_px)),
        Verb::Set { row, panel, handle } => {
            let id = panel_id(session.grid(), *row, *panel)?;
            session.set_content(id, ContentHandle::new(handle.as_str()))?;
            Flow::Print("applied")
        }
        Verb::Clear { row, panel } => {
            let id = panel_id(session.grid(), *row, *panel)?;
            let previous = session.clear_content(id)?;
            Flow::Print(if previous.is_some() { "applied" } else { "unchanged" })
        }
        Verb::Help => Flow::Help,
        Verb::Quit => Flow::Quit,
    };
    Ok(flow)
}

fn panel_id(grid: &Grid, row: usize, panel: usize) -> GridResult<PanelId> {
    grid.panel(row, panel).map(|p| p.id()).ok_or_else(|| {
        GridError::invalid_command(
            format!("{} {}", row, panel),
            format!("no panel {} in row {}", panel, row),
        )
    })
}

/// Press on the divider, move by `delta_px` along its axis, release.
fn simulate_drag(
    session: &mut LayoutSession,
    target: DividerTarget,
    delta_px: f64,
    container_px: f64,
) -> &'static str {
    session.set_container_metrics(ContainerMetrics::new(container_px, container_px));
    match session.press(target, PointerPosition::new(0.0, 0.0)) {
        PressOutcome::Started => {}
        PressOutcome::AlreadyDragging => return "blocked",
        PressOutcome::NoSuchDivider => return "unchanged",
    }
    let changed = session.pointer_moved(PointerPosition::new(delta_px, delta_px));
    session.release();
    debug!(?target, delta_px, container_px, changed, "simulated drag");
    if changed {
        "applied"
    } else {
        "unchanged"
    }
}

fn print_grid(session: &LayoutSession, input: &str, outcome: &str, json: bool) {
    if json {
        let report = Report {
            input,
            outcome,
            grid: session.grid(),
        };
        match serde_json::to_string(&report) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("Error: failed to serialize grid: {}", e),
        }
    } else {
        if outcome != "show" {
            println!("[{}] {}", outcome, input);
        }
        print!("{}", render_grid(session.grid()));
    }
}

/// Render the grid as a plain-text table, one line per row.
fn render_grid(grid: &Grid) -> String {
    let mut out = String::new();
    for (index, row) in grid.rows().iter().enumerate() {
        out.push_str(&format!("row {} {:>6.2}% |", index, row.height()));
        for panel in row.panels() {
            let content = panel
                .content()
                .map(|c| c.as_str().to_string())
                .unwrap_or_else(|| "empty".to_string());
            out.push_str(&format!(" {} {:>6.2}% [{}] |", panel.id(), panel.width(), content));
        }
        out.push('\n');
    }
    out
}
