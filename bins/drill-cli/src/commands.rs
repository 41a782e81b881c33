// CLI commands for practicing against the Drill API
use anyhow::{bail, Context, Result};
use drill_common::evaluator::OutputSource;
use drill_common::questions;
use drill_common::starter;
use drill_common::types::{Language, Question, SubmissionResult, Verdict};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::ProxyClient;
use crate::session::{Phase, Session};

/// Parse a language identifier, listing the valid ones on failure
pub fn parse_language(name: &str) -> Result<Language> {
    match Language::from_str(name) {
        Some(language) => Ok(language),
        None => {
            let valid: Vec<String> = Language::all().map(|l| l.to_string()).collect();
            bail!(
                "Unknown language '{}'. Valid options: {}",
                name,
                valid.join(", ")
            )
        }
    }
}

fn question_at(index: Option<usize>) -> Result<(usize, &'static Question)> {
    match index {
        Some(i) => match questions::get(i) {
            Some(q) => Ok((i, q)),
            None => bail!(
                "No question with index {} (bank has {} questions)",
                i,
                questions::all().len()
            ),
        },
        None => Ok(questions::pick_random()),
    }
}

pub fn format_question(index: usize, question: &Question) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📘 [{}] {}", index, question.title);
    let _ = writeln!(out, "{}", question.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "Sample Input:");
    let _ = writeln!(out, "{}", question.input);
    let _ = writeln!(out);
    let _ = writeln!(out, "Expected Output:");
    let _ = writeln!(out, "{}", question.output);
    out
}

/// Output panel: selected text, where it came from, and the verdict
pub fn format_result(session: &Session) -> String {
    let mut out = String::new();

    let heading = match session.output_source() {
        Some(OutputSource::CompileOutput) => "Output (compiler diagnostics)",
        Some(OutputSource::Stderr) => "Output (stderr)",
        _ => "Output",
    };
    let _ = writeln!(out, "{}", heading);
    let _ = writeln!(out, "{}", session.output());

    if let Some(status) = session.judge_status() {
        let _ = writeln!(out, "Judge status: {}", status);
    }
    if session.verdict() != Verdict::Unset {
        let _ = writeln!(out, "{}", session.verdict());
    }
    out
}

/// List every question in the bank
pub fn list_questions() {
    for (index, question) in questions::all().iter().enumerate() {
        println!("{:>3}  {}", index, question.title);
    }
}

/// Show a question with its starter code
pub fn show_question(language: &str, index: Option<usize>) -> Result<()> {
    let language = parse_language(language)?;
    let (index, question) = question_at(index)?;

    print!("{}", format_question(index, question));
    println!();
    println!("Starter code ({}):", language.label());
    print!("{}", starter::render(language, question));
    Ok(())
}

/// Print only the starter code. Unknown languages print nothing.
pub fn print_starter(language: &str, index: Option<usize>) -> Result<()> {
    let (_, question) = question_at(index)?;
    print!("{}", starter::generate(language, question));
    Ok(())
}

/// Submit a source file against one question and print the verdict
pub async fn run_file(
    server_url: &str,
    language: &str,
    file: &Path,
    index: usize,
    stdin: Option<&str>,
) -> Result<()> {
    let language = parse_language(language)?;
    let code = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let (index, _) = question_at(Some(index))?;
    let mut session = Session::with_question(index, language)
        .context("question index out of range")?;
    session.set_code(code);
    if let Some(stdin) = stdin {
        session.set_stdin(stdin);
    }

    println!("🚀 Running {} against \"{}\"...", file.display(), session.question().title);
    let client = ProxyClient::new(server_url);
    session.run(&client).await;

    println!();
    print!("{}", format_result(&session));
    Ok(())
}

/// One line of input in an interactive session
#[derive(Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Next,
    Goto(usize),
    Lang(String),
    Load(PathBuf),
    Stdin(String),
    Show,
    Code,
    Run,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match (name, arg) {
            ("", _) => SessionCommand::Empty,
            ("next", "") => SessionCommand::Next,
            ("goto", n) => match n.parse() {
                Ok(index) => SessionCommand::Goto(index),
                Err(_) => SessionCommand::Invalid("usage: goto <index>".to_string()),
            },
            ("lang", "") => SessionCommand::Invalid("usage: lang <python|c|cpp|java|js>".to_string()),
            ("lang", id) => SessionCommand::Lang(id.to_string()),
            ("load", "") => SessionCommand::Invalid("usage: load <path>".to_string()),
            ("load", path) => SessionCommand::Load(PathBuf::from(path)),
            // `\n` in the argument stands for a line break
            ("stdin", text) => SessionCommand::Stdin(text.replace("\\n", "\n")),
            ("show", "") => SessionCommand::Show,
            ("code", "") => SessionCommand::Code,
            ("run", "") => SessionCommand::Run,
            ("help", _) => SessionCommand::Help,
            ("quit", _) | ("exit", _) => SessionCommand::Quit,
            _ => SessionCommand::Invalid(format!("unknown command '{}', try 'help'", line)),
        }
    }
}

const SESSION_HELP: &str = "\
Commands:
  next              pick another random question
  goto <index>      jump to a question by index
  lang <id>         switch language (python, c, cpp, java, js)
  load <path>       replace the code with a file's contents
  stdin <text>      set stdin (write \\n for a line break)
  show              show the current question
  code              print the current code
  run               submit the code
  help              show this help
  quit              leave the session

Switching question or language resets code, stdin and the last result.";

type Completion = (u64, Result<SubmissionResult>);

/// Interactive practice session.
///
/// Runs are submitted in the background, so commands keep working while a
/// run is in flight; changing question or language makes its answer stale.
pub async fn interactive(server_url: &str, language: &str) -> Result<()> {
    let language = parse_language(language)?;
    let client = ProxyClient::new(server_url);
    let mut session = Session::new(language);

    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", SESSION_HELP);
    println!();
    print_current(&session);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                let command = SessionCommand::parse(&line);
                if command == SessionCommand::Quit {
                    break;
                }
                apply_command(&mut session, command, &client, &tx).await;
            }
            Some(completion) = rx.recv() => {
                if apply_completion(&mut session, completion) {
                    println!();
                    print!("{}", format_result(&session));
                }
            }
        }
    }

    println!("👋 Bye");
    Ok(())
}

/// Submit the current code in the background; the outcome arrives on `tx`
/// tagged with the run's generation.
fn spawn_run(
    session: &mut Session,
    client: &ProxyClient,
    tx: &mpsc::UnboundedSender<Completion>,
) -> JoinHandle<()> {
    let pending = session.begin_run();
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = client.execute(&pending.request).await;
        // Receiver only goes away when the session ends
        let _ = tx.send((pending.generation, outcome));
    })
}

/// Apply a finished background run. False when the run was outdated.
fn apply_completion(session: &mut Session, (generation, outcome): Completion) -> bool {
    match outcome {
        Ok(result) => session.on_result(generation, &result),
        Err(e) => session.on_error(generation, &format!("{:#}", e)),
    }
}

fn print_current(session: &Session) {
    print!("{}", format_question(session.question_index(), session.question()));
    println!();
    println!("Language: {}", session.language().label());
    println!("Code:");
    print!("{}", session.code());
}

async fn apply_command(
    session: &mut Session,
    command: SessionCommand,
    client: &ProxyClient,
    tx: &mpsc::UnboundedSender<Completion>,
) {
    match command {
        SessionCommand::Next => {
            session.pick_random();
            print_current(session);
        }
        SessionCommand::Goto(index) => {
            if session.select_question(index) {
                print_current(session);
            } else {
                eprintln!("✗ No question with index {}", index);
            }
        }
        SessionCommand::Lang(id) => match parse_language(&id) {
            Ok(language) => {
                session.set_language(language);
                print_current(session);
            }
            Err(e) => eprintln!("✗ {}", e),
        },
        SessionCommand::Load(path) => match tokio::fs::read_to_string(&path).await {
            Ok(code) => {
                session.set_code(code);
                println!("✓ Loaded {}", path.display());
            }
            Err(e) => eprintln!("✗ Failed to read {}: {}", path.display(), e),
        },
        SessionCommand::Stdin(text) => {
            session.set_stdin(text);
            println!("✓ stdin updated");
        }
        SessionCommand::Show => print_current(session),
        SessionCommand::Code => print!("{}", session.code()),
        SessionCommand::Run => {
            if session.phase() == Phase::Running {
                println!("⚠ Previous run still pending; its result will be ignored");
            }
            spawn_run(session, client, tx);
            println!("⏳ Running...");
        }
        SessionCommand::Help => println!("{}", SESSION_HELP),
        SessionCommand::Invalid(message) => eprintln!("✗ {}", message),
        SessionCommand::Empty | SessionCommand::Quit => {}
    }
}
