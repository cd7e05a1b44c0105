//! The `roster session` command.
//!
//! Reads one command per line and applies it to a single live roster.
//! Failed commands print an error notice and the session carries on.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use roster_core::error::RosterError;
use roster_core::input::{PerformanceForm, RegistrationForm};
use roster_core::notice::{self, Notice};
use roster_core::store::RosterStore;
use roster_report::html::{format_average, write_html_report};

use crate::SourceArgs;

pub fn execute(script: Option<PathBuf>, source: SourceArgs) -> Result<()> {
    let (store, config) = super::load_store(&source)?;
    let mut session = Session::new(store, config.notice_duration_ms);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open script: {}", path.display()))?;
            session.run(BufReader::new(file), &mut out)
        }
        None => session.run(io::stdin().lock(), &mut out),
    }
}

#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

// Registration and score fields default to empty so that missing values
// are reported by roster validation rather than by the argument parser.
#[derive(Subcommand, Debug)]
enum SessionCommand {
    Register {
        #[arg(long, default_value = "")]
        id: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        gender: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        age: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        form: String,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
    View {
        #[arg(long)]
        id: String,
    },
    Performance {
        #[arg(long)]
        id: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        form: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        math: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        english: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        science: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        social: String,
    },
    History {
        #[arg(long)]
        id: String,
    },
    Average {
        #[arg(long)]
        id: String,
    },
    List,
    Render {
        #[arg(long)]
        output: PathBuf,
    },
    Help,
    #[command(alias = "exit")]
    Quit,
}

const HELP: &str = "\
Commands:
  register --id ID --name NAME --gender GENDER --age AGE --form FORM
  delete --id ID
  view --id ID
  performance --id ID --form FORM --math N --english N --science N --social N
  history --id ID
  average --id ID
  list
  render --output FILE
  help
  quit";

enum Flow {
    Continue,
    Quit,
}

/// A live roster plus the notices raised against it.
pub struct Session {
    store: RosterStore,
    notices: Vec<Notice>,
    display_ms: u64,
}

impl Session {
    pub fn new(store: RosterStore, display_ms: u64) -> Self {
        Self {
            store,
            notices: Vec::new(),
            display_ms,
        }
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    /// Process every line of `input` until it ends or `quit` is read.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read session input")?;
            if let Flow::Quit = self.handle_line(&line, out)? {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let Some(tokens) = shlex::split(line) else {
            self.report(out, Notice::error("unterminated quote or escape (try `help`)"))?;
            return Ok(Flow::Continue);
        };

        match SessionLine::try_parse_from(tokens) {
            Ok(parsed) => self.dispatch(parsed.command, out),
            Err(e) => {
                let rendered = e.to_string();
                let first = rendered.lines().next().unwrap_or_default();
                let msg = first.strip_prefix("error: ").unwrap_or(first);
                self.report(out, Notice::error(format!("{msg} (try `help`)")))?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> Result<Flow> {
        match command {
            SessionCommand::Register {
                id,
                name,
                gender,
                age,
                form,
            } => {
                let entry = RegistrationForm {
                    name,
                    id,
                    gender,
                    age,
                    form,
                };
                let result = entry
                    .parse()
                    .map_err(RosterError::from)
                    .and_then(|new| self.store.register_student(new).map(|_| ()));
                self.report_result(out, result.map(|_| Notice::success(notice::REGISTERED)))?;
            }
            SessionCommand::Delete { id } => {
                let result = self.store.delete_student(&id);
                self.report_result(out, result.map(|_| Notice::success(notice::DELETED)))?;
            }
            SessionCommand::View { id } => match self.store.student_detail(&id) {
                Ok(d) => {
                    writeln!(out, "Student Details:")?;
                    writeln!(out, "  Name: {}", d.name)?;
                    writeln!(out, "  ID: {}", d.id)?;
                    writeln!(out, "  Age: {}", d.age)?;
                    writeln!(out, "  Gender: {}", d.gender)?;
                    writeln!(out, "  Current Form: {}", d.form)?;
                    writeln!(out, "  Total Performance Records: {}", d.record_count)?;
                }
                Err(e) => self.report(out, Notice::from(&e))?,
            },
            SessionCommand::Performance {
                id,
                form,
                math,
                english,
                science,
                social,
            } => {
                let entry = PerformanceForm {
                    form,
                    math,
                    english,
                    science,
                    social,
                };
                // unknown students are reported before bad scores
                let result = self
                    .store
                    .find_student(&id)
                    .map(|_| ())
                    .and_then(|_| entry.parse_raw().map_err(RosterError::from))
                    .and_then(|(form, scores)| self.store.submit_performance(&id, form, scores));
                self.report_result(out, result.map(Notice::from))?;
            }
            SessionCommand::History { id } => match self.store.find_student(&id) {
                Ok(student) => {
                    writeln!(out, "Student: {} ({})", student.name(), student.id())?;
                    writeln!(out, "Current Form: {}", student.form())?;
                    if student.performance().is_empty() {
                        writeln!(out, "  No performance records yet")?;
                    }
                    for record in student.performance() {
                        let scores: Vec<String> = record
                            .scores
                            .iter()
                            .map(|(subject, score)| format!("{subject} {score}"))
                            .collect();
                        writeln!(
                            out,
                            "  {}: {} | average {}%",
                            record.form,
                            scores.join(", "),
                            record.average()
                        )?;
                    }
                }
                Err(e) => self.report(out, Notice::from(&e))?,
            },
            SessionCommand::Average { id } => match self.store.compute_average(&id) {
                Ok(avg) => writeln!(out, "{id}: {}", format_average(avg))?,
                Err(e) => self.report(out, Notice::from(&e))?,
            },
            SessionCommand::List => {
                writeln!(out, "{}", super::list::roster_table(&self.store))?;
            }
            SessionCommand::Render { output } => {
                let now = Utc::now();
                let active: Vec<Notice> = self
                    .notices
                    .iter()
                    .filter(|n| !n.is_expired_at(now, self.display_ms))
                    .cloned()
                    .collect();
                match write_html_report(&self.store, &active, &output) {
                    Ok(()) => self.report(
                        out,
                        Notice::success(format!("Wrote {}", output.display())),
                    )?,
                    Err(e) => self.report(out, Notice::error(format!("{e:#}")))?,
                }
            }
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn report_result<W: Write>(
        &mut self,
        out: &mut W,
        result: Result<Notice, RosterError>,
    ) -> Result<()> {
        let notice = result.unwrap_or_else(|e| Notice::from(&e));
        self.report(out, notice)
    }

    fn report<W: Write>(&mut self, out: &mut W, notice: Notice) -> Result<()> {
        writeln!(out, "{notice}")?;
        let now = Utc::now();
        let display_ms = self.display_ms;
        self.notices.retain(|n| !n.is_expired_at(now, display_ms));
        self.notices.push(notice);
        Ok(())
    }
}
