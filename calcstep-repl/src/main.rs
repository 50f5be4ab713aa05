mod error;

use calcstep_compute::{
    options::{DiffOptions, RuleSet},
    symbolic::differentiate_with,
};
use calcstep_parser::normalize;
use clap::{Parser, ValueEnum};
use error::Error;
use log::{debug, info};
use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};
use std::io::{self, BufRead, IsTerminal};

const HELP: &str = "\
:var NAME                   differentiate with respect to NAME
:rules literal|corrected    pick the rule table
:steps on|off               show or hide the steps
:help                       show this message";

/// Settings that apply to every expression differentiated in a session.
#[derive(Debug, Clone, PartialEq)]
struct Session {
    /// The variable of differentiation.
    var: String,

    /// Options passed to the engine.
    options: DiffOptions,

    /// Whether to print the steps before the derivative.
    show_steps: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            var: "x".to_string(),
            options: DiffOptions::default(),
            show_steps: true,
        }
    }
}

/// Differentiates expressions one step at a time.
///
/// With EXPR, differentiates it and exits. Otherwise reads one expression per line.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Differentiate with respect to this variable.
    #[arg(long, default_value = "x")]
    var: String,

    /// Use the corrected rule table.
    #[arg(long)]
    corrected: bool,

    /// Word introducing substitutions in chain rule steps.
    #[arg(long, default_value = "where")]
    connector: String,

    /// Print only the derivative.
    #[arg(long)]
    no_steps: bool,

    /// Log level.
    #[arg(long, value_enum, default_value = "error")]
    log: LogLevel,

    /// The expression to differentiate.
    expr: Option<String>,
}

impl Args {
    /// Builds the session these arguments describe.
    fn session(&self) -> Session {
        let rules = if self.corrected { RuleSet::Corrected } else { RuleSet::Literal };
        Session {
            var: self.var.clone(),
            options: DiffOptions {
                rules,
                connector: self.connector.clone(),
                ..DiffOptions::default()
            },
            show_steps: !self.no_steps,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Applies a REPL command, such as `:var t`, to the session.
fn command(line: &str, session: &mut Session) -> Result<(), Error> {
    let mut words = line.split_whitespace();
    let name = words.next().unwrap_or(":");
    let arg = words.next();

    match (name, arg) {
        (":var", Some(var)) => session.var = var.to_string(),
        (":rules", Some("literal")) => session.options.rules = RuleSet::Literal,
        (":rules", Some("corrected")) => session.options.rules = RuleSet::Corrected,
        (":steps", Some("on")) => session.show_steps = true,
        (":steps", Some("off")) => session.show_steps = false,
        (":help", None) => println!("{}", HELP),
        _ => return Err(Error::Usage(format!("unknown command `{}`, try `:help`", line.trim()))),
    }

    debug!("session is now {:?}", session);
    Ok(())
}

/// Differentiates the given input, printing the steps and the result, or the errors.
fn run(input: &str, session: &Session) {
    match differentiate_with(input, &session.var, &session.options) {
        Ok(result) => {
            if session.show_steps {
                for (i, step) in result.steps.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, step);
                }
            }
            println!("{}", result.text);
        },
        // spans refer to the normalized input
        Err(errs) => Error::from(errs).report_to_stderr(&normalize(input)),
    }
}

/// Reads one line in the interactive mode and handles it.
fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
    let input = rl.readline(&format!("d/d{}> ", session.var))?;
    if input.trim().is_empty() {
        return Ok(());
    }

    rl.add_history_entry(&input)?;

    if input.trim_start().starts_with(':') {
        if let Err(err) = command(&input, session) {
            err.report_to_stderr(&input);
        }
    } else {
        run(&input, session);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    let mut session = args.session();

    if CombinedLogger::init(vec![TermLogger::new(
        args.log.into(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )])
    .is_err()
    {
        eprintln!("failed to initialize logging");
    }
    info!("differentiating with respect to `{}` using the {:?} rules", session.var, session.options.rules);

    if let Some(expr) = &args.expr {
        run(expr, &session);
    } else if !io::stdin().is_terminal() {
        // one expression per line
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim().is_empty() => (),
                Ok(line) => run(&line, &session),
                Err(err) => {
                    eprintln!("{}", err);
                    break;
                },
            }
        }
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            },
        };

        loop {
            if let Err(err) = process_line(&mut rl, &mut session) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("calcstep-repl").chain(list.iter().copied()))
    }

    #[test]
    fn defaults() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.session(), Session::default());
        assert_eq!(LevelFilter::from(parsed.log), LevelFilter::Error);
        assert_eq!(parsed.expr, None);
    }

    #[test]
    fn flags() {
        let parsed = args(&["--var", "t", "--corrected", "--connector", "где", "--no-steps", "--log", "debug", "sin(t)"]).unwrap();
        let session = parsed.session();
        assert_eq!(session.var, "t");
        assert_eq!(session.options.rules, RuleSet::Corrected);
        assert_eq!(session.options.connector, "где");
        assert!(!session.show_steps);
        assert_eq!(LevelFilter::from(parsed.log), LevelFilter::Debug);
        assert_eq!(parsed.expr.as_deref(), Some("sin(t)"));
    }

    #[test]
    fn bad_flags() {
        assert!(args(&["--var"]).is_err());
        assert!(args(&["--log", "loud"]).is_err());
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["x", "y"]).is_err());
    }

    #[test]
    fn commands() {
        let mut session = Session::default();
        command(":var t", &mut session).unwrap();
        command(":rules corrected", &mut session).unwrap();
        command(":steps off", &mut session).unwrap();
        assert_eq!(session.var, "t");
        assert_eq!(session.options.rules, RuleSet::Corrected);
        assert!(!session.show_steps);

        assert!(command(":rules strict", &mut session).is_err());
        assert!(command(":frobnicate", &mut session).is_err());
    }

    #[test]
    fn unnormalized_input() {
        let session = Session::default();
        let result = differentiate_with(" 3 × ln(x) ", &session.var, &session.options).unwrap();
        assert_eq!(result.input, "3*log(x)");
        assert_eq!(result.text, "3 * (1/(x))");
    }
}
