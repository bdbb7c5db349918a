//! Interactive command loop
//!
//! Reads one-letter commands from any `BufRead` and writes results to any
//! `Write`, so sessions can be scripted in tests. Errors from the ledger are
//! printed and the loop carries on; only I/O failures on the terminal itself
//! end the session.

use ledger_core::{ImportReport, Ledger};
use settlement::{NettingEngine, SettlementStatus};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Shell command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Add a transaction
    Add,
    /// Print balances
    Balances,
    /// List commands
    Commands,
    /// Import a file
    Import,
    /// Print transactions
    Print,
    /// Settle up
    Settle,
    /// Save to the export path
    Save,
    /// Leave the shell
    Quit,
}

impl Command {
    /// Every command with its key and help text
    pub const ALL: [(Command, char, &'static str); 8] = [
        (Command::Add, 'a', "add a transaction"),
        (Command::Balances, 'b', "print balances"),
        (Command::Commands, 'c', "list commands"),
        (Command::Import, 'i', "import transactions from a file"),
        (Command::Print, 'p', "print all transactions"),
        (Command::Settle, 's', "settle and print the resulting transactions"),
        (Command::Save, 'v', "save transactions to file"),
        (Command::Quit, 'q', "quit"),
    ];

    /// Parse a trimmed input line
    pub fn parse(input: &str) -> Option<Self> {
        let mut chars = input.chars();
        let key = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::ALL
            .iter()
            .find(|(_, k, _)| *k == key.to_ascii_lowercase())
            .map(|(cmd, _, _)| *cmd)
    }
}

/// Interactive ledger session
#[derive(Debug)]
pub struct Shell<R, W> {
    ledger: Ledger,
    engine: NettingEngine,
    export_path: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a session over an existing ledger
    pub fn new(
        ledger: Ledger,
        engine: NettingEngine,
        export_path: impl Into<PathBuf>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            ledger,
            engine,
            export_path: export_path.into(),
            input,
            output,
        }
    }

    /// Current ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Consume the shell, returning its ledger
    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    /// Run until `q` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Type 'c' for a list of commands.")?;

        while let Some(line) = self.prompt("> ")? {
            if line.is_empty() {
                continue;
            }

            let Some(command) = Command::parse(&line) else {
                writeln!(
                    self.output,
                    "Unknown command '{}'. Type 'c' for a list of commands.",
                    line
                )?;
                continue;
            };

            tracing::debug!(?command, "Dispatching command");
            match command {
                Command::Add => self.add()?,
                Command::Balances => self.print_balances()?,
                Command::Commands => self.print_commands()?,
                Command::Import => self.import_prompt()?,
                Command::Print => self.print_transactions()?,
                Command::Settle => self.settle()?,
                Command::Save => self.save()?,
                Command::Quit => break,
            }
        }

        Ok(())
    }

    /// Import a ledger file and report the outcome
    pub fn import(&mut self, path: &Path) -> io::Result<()> {
        match self.ledger.import_file(path) {
            Ok(report) => write_import_report(&mut self.output, path, &report),
            Err(e) => writeln!(self.output, "Could not import {}: {}", path.display(), e),
        }
    }

    fn add(&mut self) -> io::Result<()> {
        let Some(payer) = self.prompt("Payer: ")? else {
            return Ok(());
        };
        let Some(recipient) = self.prompt("Recipient: ")? else {
            return Ok(());
        };

        let amount = loop {
            let Some(raw) = self.prompt("Amount: ")? else {
                return Ok(());
            };
            match raw.parse::<f64>() {
                Ok(amount) if amount.is_finite() && amount > 0.0 => break amount,
                _ => writeln!(self.output, "Amount must be a positive number.")?,
            }
        };

        let Some(comment) = self.prompt("Comment (optional): ")? else {
            return Ok(());
        };

        match self
            .ledger
            .add_transaction(&payer, &recipient, amount, &comment)
        {
            Ok(_) => writeln!(self.output, "Transaction added."),
            Err(e) => writeln!(self.output, "{}", e),
        }
    }

    fn print_commands(&mut self) -> io::Result<()> {
        writeln!(self.output, "Commands:")?;
        for (_, key, help) in Command::ALL {
            writeln!(self.output, "  {}  {}", key, help)?;
        }
        Ok(())
    }

    fn print_transactions(&mut self) -> io::Result<()> {
        if self.ledger.is_empty() {
            return writeln!(self.output, "No transactions to print.");
        }

        for tx in self.ledger.transactions() {
            writeln!(self.output, "{}", self.ledger.display(tx))?;
        }
        Ok(())
    }

    fn print_balances(&mut self) -> io::Result<()> {
        if self.ledger.participant_count() == 0 {
            return writeln!(self.output, "No participants yet.");
        }

        let balances = self.ledger.calculate_balances();
        for (id, name) in self.ledger.registry().iter() {
            let balance = balances.get(id).unwrap_or_default();
            writeln!(self.output, "{}\t{:+.2}", name, balance)?;
        }
        Ok(())
    }

    fn settle(&mut self) -> io::Result<()> {
        let plan = self.engine.settle(&self.ledger);

        match plan.status {
            SettlementStatus::NothingToSettle => writeln!(self.output, "Nothing to settle."),
            SettlementStatus::AlreadySettled => {
                writeln!(self.output, "All balances are already settled.")
            }
            SettlementStatus::Settled => {
                writeln!(self.output, "Settlement transactions:")?;
                for transfer in &plan.transfers {
                    writeln!(self.output, "{}", self.ledger.display(transfer))?;
                }
                writeln!(
                    self.output,
                    "{} transaction(s) settle {} participants, {:.2} in total.",
                    plan.len(),
                    plan.participant_count,
                    plan.total_settled()
                )
            }
        }
    }

    fn save(&mut self) -> io::Result<()> {
        match self.ledger.export_file(&self.export_path) {
            Ok(()) => writeln!(
                self.output,
                "Saved {} transactions to {}.",
                self.ledger.len(),
                self.export_path.display()
            ),
            Err(e) => writeln!(
                self.output,
                "Could not save to {}: {}",
                self.export_path.display(),
                e
            ),
        }
    }

    fn import_prompt(&mut self) -> io::Result<()> {
        match self.prompt("File: ")? {
            Some(path) if !path.is_empty() => self.import(Path::new(&path)),
            _ => Ok(()),
        }
    }

    /// Print `label` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Summarise an import for the user
pub fn write_import_report<W: Write>(
    out: &mut W,
    path: &Path,
    report: &ImportReport,
) -> io::Result<()> {
    writeln!(
        out,
        "Imported {} transactions from {}.",
        report.imported,
        path.display()
    )?;
    for error in &report.errors {
        writeln!(out, "  skipped {}", error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Ledger, String) {
        run_with_path(script, "unused.tsv")
    }

    fn run_with_path(script: &str, export_path: impl Into<PathBuf>) -> (Ledger, String) {
        let mut output = Vec::new();
        let mut shell = Shell::new(
            Ledger::new(),
            NettingEngine::default(),
            export_path,
            Cursor::new(script.as_bytes().to_vec()),
            &mut output,
        );
        shell.run().unwrap();
        let ledger = shell.into_ledger();
        (ledger, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("a"), Some(Command::Add));
        assert_eq!(Command::parse("S"), Some(Command::Settle));
        assert_eq!(Command::parse("v"), Some(Command::Save));
        assert_eq!(Command::parse("add"), None);
        assert_eq!(Command::parse("x"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_add_and_settle() {
        let (ledger, out) = run("a\nRobert\nMike\n33.28\nFor pizza\ns\nq\n");

        assert_eq!(ledger.len(), 1);
        assert!(out.contains("Transaction added."));
        assert!(out.contains("Settlement transactions:"));
        assert!(out.contains("Payer: Mike\tRecipient: Robert\tAmount: 33.28"));
        assert!(out.contains("1 transaction(s) settle 2 participants, 33.28 in total."));
    }

    #[test]
    fn test_amount_reprompted_until_positive() {
        let (ledger, out) = run("a\nAlice\nBob\n-5\nzero\n0\n12.5\n\nq\n");

        assert_eq!(out.matches("Amount must be a positive number.").count(), 3);
        assert_eq!(ledger.transactions()[0].amount, 12.5);
        assert_eq!(ledger.transactions()[0].comment, None);
    }

    #[test]
    fn test_self_transaction_reported() {
        let (ledger, out) = run("a\nAlice\nAlice\n10\n\nq\n");

        assert!(ledger.is_empty());
        assert!(out.contains("payer and recipient are both 'Alice'"));
    }

    #[test]
    fn test_empty_ledger_messages() {
        let (_, out) = run("p\ns\nb\n");

        assert!(out.contains("No transactions to print."));
        assert!(out.contains("Nothing to settle."));
        assert!(out.contains("No participants yet."));
    }

    #[test]
    fn test_already_settled_message() {
        let (_, out) = run("a\nA\nB\n5\n\na\nB\nA\n5\n\ns\nq\n");
        assert!(out.contains("All balances are already settled."));
    }

    #[test]
    fn test_balances_and_listing() {
        let (_, out) = run("a\nRobert\nMike\n33.28\nFor pizza\nb\np\nc\nq\n");

        assert!(out.contains("Robert\t+33.28"));
        assert!(out.contains("Mike\t-33.28"));
        assert!(out.contains("\tComment: For pizza"));
        assert!(out.contains("  s  settle and print the resulting transactions"));
    }

    #[test]
    fn test_unknown_command_keeps_going() {
        let (_, out) = run("x\np\n");
        assert!(out.contains("Unknown command 'x'"));
        assert!(out.contains("No transactions to print."));
    }

    #[test]
    fn test_end_of_input_mid_add() {
        let (ledger, _) = run("a\nAlice\n");
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_save_then_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.tsv");

        let (_, out) = run_with_path("a\nAlice\nBob\n12.40\nlunch\nv\nq\n", &path);
        assert!(out.contains("Saved 1 transactions to"));

        let script = format!("i\n{}\np\nq\n", path.display());
        let (ledger, out) = run(&script);
        assert!(out.contains("Imported 1 transactions from"));
        assert!(out.contains("Payer: Alice\tRecipient: Bob\tAmount: 12.40"));
        assert_eq!(ledger.transactions()[0].comment.as_deref(), Some("lunch"));
    }

    #[test]
    fn test_import_missing_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!("i\n{}\nq\n", dir.path().join("nope.tsv").display());

        let (ledger, out) = run(&script);
        assert!(out.contains("Could not import"));
        assert!(ledger.is_empty());
    }
}
