//! Interactive expense session
//!
//! A line-oriented shell over one in-memory [`ExpenseStore`]. Each input
//! line is split with shell quoting rules and parsed by clap, so
//! `add "Dinner out" 42.10 2024-03-02` works as expected. Nothing recorded
//! here outlives the session.

use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use crate::config::Settings;
use crate::display::{
    format_added_message, format_expense_register, format_rejection_message, DisplayStyle,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_expenses_csv, export_session_json, ExportFormat};
use crate::models::DATE_FORMAT;
use crate::reports::MonthLabeler;
use crate::services::{ExpenseStore, StoreEvent};

/// One parsed session line
#[derive(Parser, Debug)]
#[command(name = "session", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

/// Commands available inside a session
#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Record an expense
    Add {
        /// What the money was spent on
        name: String,
        /// Amount, e.g. "4.50" (negative for refunds)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Date (YYYY-MM-DD), defaults to today
        date: Option<String>,
    },
    /// List expenses in the order they were added
    #[command(alias = "ls")]
    List,
    /// Show expenses grouped by month with subtotals
    #[command(alias = "report")]
    Months,
    /// Show the running total
    Total,
    /// Export the session to CSV or JSON
    Export {
        /// Output format (csv or json)
        format: ExportFormat,
        /// Output file; prints to the terminal when omitted
        path: Option<PathBuf>,
    },
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Whether the session keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive session owning one expense store
#[derive(Debug)]
pub struct Session {
    store: ExpenseStore,
    labeler: MonthLabeler,
    style: DisplayStyle,
    today: NaiveDate,
}

impl Session {
    /// Start an empty session using the given settings
    pub fn new(settings: &Settings) -> ExpenseResult<Self> {
        let mut store = ExpenseStore::new();
        store.subscribe(|event| match event {
            StoreEvent::ExpenseAdded { total, count, .. } => {
                info!(count = *count, total = %total, "running total updated");
            }
        });

        Ok(Self {
            store,
            labeler: settings.labeler()?,
            style: DisplayStyle::from(settings),
            today: Local::now().date_naive(),
        })
    }

    /// Override the date used when `add` is given no date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// The session's store
    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    /// Read commands until end of input or `quit`
    ///
    /// A line that is not valid UTF-8 is reported and skipped.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        output: &mut W,
        prompt: bool,
    ) -> ExpenseResult<()> {
        writeln!(output, "Expense Manager - type 'help' for commands")?;

        let mut buf = Vec::new();
        loop {
            if prompt {
                write!(output, "> ")?;
                output.flush()?;
            }

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim_end_matches(&['\n', '\r'][..]),
                Err(e) => {
                    debug!(error = %e, "skipping undecodable line");
                    writeln!(output, "Input error: line is not valid UTF-8")?;
                    continue;
                }
            };
            if self.execute(line, output)? == Flow::Quit {
                break;
            }
        }

        debug!(count = self.store.len(), "session ended");
        Ok(())
    }

    /// Execute a single input line
    pub fn execute<W: Write>(&mut self, line: &str, output: &mut W) -> ExpenseResult<Flow> {
        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(output, "Parse error: {}", e)?;
                return Ok(Flow::Continue);
            }
        };
        if words.is_empty() {
            return Ok(Flow::Continue);
        }

        let parsed = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                write!(output, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        match parsed.command {
            SessionCommand::Add { name, amount, date } => {
                let date = date.unwrap_or_else(|| self.today.format(DATE_FORMAT).to_string());
                match self.store.add(&name, &amount, &date) {
                    Ok(expense) => {
                        writeln!(output, "{}", format_added_message(expense, &self.style))?;
                    }
                    Err(err) => {
                        debug!(field = %err.field(), "expense rejected");
                        writeln!(output, "{}", format_rejection_message(&err))?;
                    }
                }
            }
            SessionCommand::List => {
                write!(
                    output,
                    "{}",
                    format_expense_register(self.store.list(), &self.style)
                )?;
            }
            SessionCommand::Months => {
                let report = self.store.group_by_month(&self.labeler);
                write!(output, "{}", report.format_terminal(&self.style))?;
            }
            SessionCommand::Total => {
                writeln!(output, "Total: {}", self.style.amount(self.store.total()))?;
            }
            SessionCommand::Export { format, path } => {
                if let Err(err) = self.export(format, path, output) {
                    writeln!(output, "{}", err)?;
                }
            }
            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn export<W: Write>(
        &self,
        format: ExportFormat,
        path: Option<PathBuf>,
        output: &mut W,
    ) -> ExpenseResult<()> {
        let expenses = self.store.list();

        match path {
            Some(path) => {
                let file = File::create(&path).map_err(|e| {
                    ExpenseError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;
                match format {
                    ExportFormat::Csv => export_expenses_csv(expenses, &self.labeler, file)?,
                    ExportFormat::Json => export_session_json(expenses, &self.labeler, file)?,
                }
                info!(path = %path.display(), %format, count = expenses.len(), "session exported");
                writeln!(
                    output,
                    "Exported {} expenses to {}",
                    expenses.len(),
                    path.display()
                )?;
            }
            None => match format {
                ExportFormat::Csv => export_expenses_csv(expenses, &self.labeler, &mut *output)?,
                ExportFormat::Json => export_session_json(expenses, &self.labeler, &mut *output)?,
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new(&Settings::default())
            .unwrap()
            .with_today(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap())
    }

    fn exec(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        session.execute(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_and_confirm() {
        let mut s = session();
        let out = exec(&mut s, r#"add "Dinner out" 42.1 2024-03-02"#);
        assert_eq!(out, "Expense added: Dinner out - $42.10\n");
        assert_eq!(s.store().len(), 1);
    }

    #[test]
    fn test_add_defaults_to_today() {
        let mut s = session();
        exec(&mut s, "add Coffee 4.50");
        assert_eq!(
            s.store().list()[0].date(),
            NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
        );
    }

    #[test]
    fn test_negative_amount_is_not_a_flag() {
        let mut s = session();
        exec(&mut s, "add Refund -20 2024-03-02");
        assert_eq!(s.store().total(), Amount::from_cents(-2000));
    }

    #[test]
    fn test_rejected_add() {
        let mut s = session();
        let out = exec(&mut s, "add Coffee abc 2024-03-02");
        assert_eq!(
            out,
            "Please enter a valid name, amount, and date (invalid amount: 'abc')\n"
        );
        assert!(s.store().is_empty());

        let out = exec(&mut s, "add '  ' 4 2024-03-02");
        assert!(out.contains("expense name must not be empty"));
        assert!(s.store().is_empty());
    }

    #[test]
    fn test_months_and_total() {
        let mut s = session();
        exec(&mut s, "add Coffee 4.50 2024-03-01");
        exec(&mut s, "add Lunch 12.00 2024-03-15");
        exec(&mut s, "add Rent 900.00 2024-04-02");

        let months = exec(&mut s, "months");
        assert!(months.starts_with("March 2024\nTotal: $16.50\n"));
        assert!(months.contains("April 2024\nTotal: $900.00\n"));

        assert_eq!(exec(&mut s, "total"), "Total: $916.50\n");
    }

    #[test]
    fn test_list() {
        let mut s = session();
        assert_eq!(exec(&mut s, "list"), "No expenses recorded.\n");
        exec(&mut s, "add Coffee 4.50 2024-03-01");
        assert!(exec(&mut s, "ls").contains("Coffee"));
    }

    #[test]
    fn test_unknown_command_and_bad_quotes() {
        let mut s = session();
        assert!(exec(&mut s, "frobnicate").contains("error"));
        assert!(exec(&mut s, "add \"unterminated").starts_with("Parse error"));
        assert_eq!(exec(&mut s, "   "), "");
    }

    #[test]
    fn test_quit() {
        let mut s = session();
        let mut out = Vec::new();
        assert_eq!(s.execute("quit", &mut out).unwrap(), Flow::Quit);
        assert_eq!(s.execute("exit", &mut out).unwrap(), Flow::Quit);
    }

    #[test]
    fn test_run_reads_until_quit() {
        let mut s = session();
        let input = "add Coffee 4.50 2024-03-01\nquit\nadd Lunch 12 2024-03-15\n";
        let mut out = Vec::new();

        s.run(input.as_bytes(), &mut out, false).unwrap();

        assert_eq!(s.store().len(), 1);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Expense added: Coffee - $4.50"));
    }

    #[test]
    fn test_run_skips_undecodable_line() {
        let mut s = session();
        let input: &[u8] =
            b"add Coffee 4.50 2024-03-01\nadd Caf\xe9 3 2024-03-02\nadd Lunch 12 2024-03-15\ntotal\n";
        let mut out = Vec::new();

        s.run(input, &mut out, false).unwrap();

        assert_eq!(s.store().len(), 2);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Input error: line is not valid UTF-8"));
        assert!(out.contains("Total: $16.50"));
    }

    #[test]
    fn test_run_handles_crlf_and_missing_final_newline() {
        let mut s = session();
        let mut out = Vec::new();

        let input = "add Coffee 4.50 2024-03-01\r\nadd Lunch 12 2024-03-15";
        s.run(input.as_bytes(), &mut out, false).unwrap();

        assert_eq!(s.store().len(), 2);
        assert_eq!(s.store().list()[0].date().to_string(), "2024-03-01");
    }

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.csv");
        let mut s = session();
        exec(&mut s, "add Coffee 4.50 2024-03-01");

        let out = exec(&mut s, &format!("export csv '{}'", path.display()));

        assert!(out.starts_with("Exported 1 expenses to "));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Coffee,2024-03-01,4.50,March 2024"));
    }

    #[test]
    fn test_export_failure_keeps_session_alive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("session.csv");
        let mut s = session();

        let out = exec(&mut s, &format!("export csv '{}'", path.display()));

        assert!(out.starts_with("Export error: Failed to create"));
        assert_eq!(exec(&mut s, "total"), "Total: $0.00\n");
    }

    #[test]
    fn test_export_to_terminal() {
        let mut s = session();
        exec(&mut s, "add Coffee 4.50 2024-03-01");
        let out = exec(&mut s, "export json");
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["months"][0]["label"], "March 2024");
    }
}
