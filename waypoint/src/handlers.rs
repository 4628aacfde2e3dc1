use clap::ArgMatches;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use waypoint_core::console::{self, parse_node};
use waypoint_core::report::{ReportData, ReportFormat, render_report};
use waypoint_core::{CanvasBounds, Position, Session, SessionConfig};

const SHELL_PROMPT: &str = "wpt> ";

/// Installs the stderr log subscriber. `RUST_LOG` picks the level (default: warn).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn session_config(args: &ArgMatches) -> SessionConfig {
    let max = args.get_one::<i32>("grid-max").copied().unwrap_or(10);
    SessionConfig::default().with_bounds(CanvasBounds::new(0, max))
}

/// The classic example: Node 1 (0,0), Node 2 (1,1), Node 3 (2,2) with
/// 1–2 = 2, 2–3 = 3 and a direct 1–3 = 10.
pub fn demo_session(config: SessionConfig) -> Result<Session, String> {
    let mut session = Session::new(config);
    let map_err = |e: waypoint_core::GraphError| e.to_string();

    let a = session.add_node(Position::new(0, 0)).map_err(map_err)?;
    let b = session.add_node(Position::new(1, 1)).map_err(map_err)?;
    let c = session.add_node(Position::new(2, 2)).map_err(map_err)?;
    session.add_edge(&a, &b, 2).map_err(map_err)?;
    session.add_edge(&b, &c, 3).map_err(map_err)?;
    session.add_edge(&a, &c, 10).map_err(map_err)?;
    Ok(session)
}

/// Builds the report for a path query on `session`.
pub fn path_report(
    session: &mut Session,
    from: &str,
    to: &str,
    trace: bool,
    format: ReportFormat,
) -> Result<String, String> {
    let (source, target) = (parse_node(from), parse_node(to));

    let (result, steps) = if trace {
        let trace = session
            .trace_path(&source, &target)
            .map_err(|e| e.to_string())?;
        (trace.result, Some(trace.steps))
    } else {
        let result = session
            .find_path(&source, &target)
            .map_err(|e| e.to_string())?;
        (result, None)
    };

    let data = ReportData {
        source,
        target,
        result,
        stats: session.stats(),
        steps,
    };
    render_report(&data, format).map_err(|e| format!("Failed to render report: {}", e))
}

/// Splits `script` on `;` and runs each command in order.
///
/// Stops at the first failing command and reports which one it was.
pub fn run_script(session: &mut Session, script: &str) -> Result<Vec<String>, String> {
    let mut output = Vec::new();
    for (idx, line) in script.split(';').map(str::trim).enumerate() {
        if line.is_empty() {
            continue;
        }
        debug!("Running command {}: {}", idx + 1, line);
        let lines = console::execute(session, line)
            .map_err(|e| format!("Command {} (`{}`) failed: {}", idx + 1, line, e))?;
        output.extend(lines);
    }
    Ok(output)
}

/// Colours a console line by its leading marker.
pub fn style_line(line: &str) -> String {
    if line.starts_with('✓') {
        line.green().to_string()
    } else if line.starts_with('✗') {
        line.red().to_string()
    } else if line.ends_with(':') && !line.starts_with(' ') {
        line.bright_blue().bold().to_string()
    } else {
        line.to_string()
    }
}

/// Reads commands from `input` until EOF, `exit` or `quit`.
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    write!(output, "{}", SHELL_PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed == "exit" || trimmed == "quit" {
            break;
        }

        match console::execute(session, trimmed) {
            Ok(lines) => {
                for l in lines {
                    writeln!(output, "{}", style_line(&l))?;
                }
            }
            Err(e) => writeln!(output, "{} {}", "✗".red().bold(), e)?,
        }

        write!(output, "{}", SHELL_PROMPT)?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

pub fn handle_shell(args: &ArgMatches) {
    init_logging();

    let mut session = Session::new(session_config(args));
    println!("Type 'help' for available commands, 'exit' or 'quit' to exit.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(e) = run_shell(&mut session, stdin.lock(), &mut stdout) {
        eprintln!("✗ Shell error: {}", e);
        std::process::exit(1);
    }
}

pub fn handle_demo(args: &ArgMatches, sub_matches: &ArgMatches) {
    init_logging();

    let from = sub_matches.get_one::<String>("from").map(String::as_str).unwrap_or("1");
    let to = sub_matches.get_one::<String>("to").map(String::as_str).unwrap_or("3");
    let trace = sub_matches.get_flag("trace");
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);

    let report = demo_session(session_config(args))
        .and_then(|mut session| path_report(&mut session, from, to, trace, format));

    match report {
        Ok(report) => print!("{}", report),
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

pub fn handle_run(args: &ArgMatches, sub_matches: &ArgMatches) {
    init_logging();

    let script = sub_matches
        .get_many::<String>("COMMANDS")
        .map(|parts| parts.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default();

    let mut session = Session::new(session_config(args));
    match run_script(&mut session, &script) {
        Ok(lines) => {
            for line in lines {
                println!("{}", style_line(&line));
            }
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

pub fn handle_ui(args: &ArgMatches) {
    // No log subscriber here: output would land on the alternate screen
    if let Err(e) = waypoint_tui::run(session_config(args)) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
