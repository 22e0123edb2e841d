//! Interactive console menu.
//!
//! Reads choices line by line from any `BufRead` and writes to any `Write`,
//! so the same loop drives a terminal and the tests.

use std::io::{self, BufRead, Write};

use fxconv_types::{
    AppError, Clock, ConversionError, CurrencyCode, ErrorKind, HistoryEntry, RateFetcher,
};

use super::input::{parse_amount, parse_currency};
use crate::{ConversionService, HistoryService};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Fixed shortcuts offered as menu options 1 to 6.
const PRESETS: [(&str, &str, &str); 6] = [
    ("BRL", "USD", "Real → Dollar"),
    ("USD", "BRL", "Dollar → Real"),
    ("BRL", "ARS", "Real → Argentine peso"),
    ("USD", "COP", "Dollar → Colombian peso"),
    ("BRL", "CLP", "Real → Chilean peso"),
    ("USD", "BOB", "Dollar → Boliviano"),
];

/// Menu-driven front end over the conversion service.
pub struct ConsoleUi<F: RateFetcher, C: Clock, R: BufRead, W: Write> {
    service: ConversionService<F, C>,
    history: HistoryService,
    input: R,
    output: W,
}

impl<F: RateFetcher, C: Clock, R: BufRead, W: Write> ConsoleUi<F, C, R, W> {
    pub fn new(service: ConversionService<F, C>, input: R, output: W) -> Self {
        Self {
            service,
            history: HistoryService::new(),
            input,
            output,
        }
    }

    pub fn service(&self) -> &ConversionService<F, C> {
        &self.service
    }

    pub fn history(&self) -> &HistoryService {
        &self.history
    }

    /// Runs the menu until the user exits or input reaches EOF.
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "╔════════════════════════════════════════╗")?;
        writeln!(self.output, "║           CURRENCY CONVERTER           ║")?;
        writeln!(self.output, "╚════════════════════════════════════════╝")?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.read_line()? else {
                break;
            };
            writeln!(self.output)?;

            match choice.as_str() {
                "1" | "2" | "3" | "4" | "5" | "6" => {
                    let index = choice.parse::<usize>().unwrap_or(1) - 1;
                    let (from, to, _) = PRESETS[index];
                    self.convert_pair(from, to).await?;
                }
                "7" => self.custom_conversion().await?,
                "8" => self.list_currencies()?,
                "9" => self.show_history()?,
                "10" => {
                    self.service.clear_cache();
                    writeln!(self.output, "🗑️  Rate cache cleared.")?;
                }
                "0" => break,
                _ => writeln!(self.output, "❌ Invalid option. Choose a number from 0 to 10.")?,
            }
            writeln!(self.output)?;
        }

        writeln!(self.output, "👋 Thanks for using the currency converter!")?;
        self.output.flush()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "┌────────────────────────────────────────┐")?;
        writeln!(self.output, "│            CONVERSION MENU             │")?;
        writeln!(self.output, "├────────────────────────────────────────┤")?;
        for (i, (from, to, label)) in PRESETS.iter().enumerate() {
            writeln!(self.output, "  {}. {} → {} ({})", i + 1, from, to, label)?;
        }
        writeln!(self.output, "  7. 🔧 Custom conversion")?;
        writeln!(self.output, "  8. 📋 List supported currencies")?;
        writeln!(self.output, "  9. 🕘 Conversion history")?;
        writeln!(self.output, " 10. 🗑️  Clear rate cache")?;
        writeln!(self.output, "  0. 🚪 Exit")?;
        writeln!(self.output, "└────────────────────────────────────────┘")?;
        write!(self.output, "Choose an option: ")?;
        self.output.flush()
    }

    /// Next trimmed line, or `None` at EOF.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        self.read_line()
    }

    async fn convert_pair(&mut self, from: &str, to: &str) -> io::Result<()> {
        writeln!(self.output, "💱 Conversion: {} → {}", from, to)?;
        let Some(input) = self.prompt("Enter the amount to convert: ")? else {
            return Ok(());
        };

        let amount = match parse_amount(&input) {
            Ok(amount) => amount,
            Err(_) => {
                writeln!(
                    self.output,
                    "❌ Invalid amount. Enter a positive number using '.' or ',' as decimal separator."
                )?;
                return Ok(());
            }
        };

        writeln!(self.output, "⏳ Looking up exchange rate...")?;
        match self.service.convert_detailed(amount, from, to).await {
            Ok(result) => {
                writeln!(self.output, "{}", RULE)?;
                writeln!(
                    self.output,
                    "✅ Rate: 1 {} = {:.6} {}",
                    result.from_currency, result.rate, result.to_currency
                )?;
                writeln!(
                    self.output,
                    "💰 Result: {:.2} {} = {:.2} {}",
                    result.original_amount,
                    result.from_currency,
                    result.converted_amount,
                    result.to_currency
                )?;
                writeln!(self.output, "{}", RULE)?;
                self.history.record(HistoryEntry::from_result(&result));
            }
            Err(err) => self.report_error(&err)?,
        }
        Ok(())
    }

    fn report_error(&mut self, err: &ConversionError) -> io::Result<()> {
        tracing::warn!("Conversion failed: {}", err);
        match err.kind() {
            ErrorKind::InvalidInput => writeln!(self.output, "❌ Invalid input: {}", err),
            ErrorKind::Unavailable => writeln!(
                self.output,
                "⚠️  Exchange rate service temporarily unavailable. Please try again in a moment."
            ),
        }
    }

    async fn custom_conversion(&mut self) -> io::Result<()> {
        writeln!(self.output, "🔧 CUSTOM CONVERSION")?;
        writeln!(
            self.output,
            "Available currencies: {}",
            CurrencyCode::codes().join(", ")
        )?;

        let Some(from) = self.prompt("Origin currency: ")? else {
            return Ok(());
        };
        let from = match parse_currency(&from) {
            Ok(code) => code,
            Err(err) => return self.report_invalid_currency("origin", &err),
        };

        let Some(to) = self.prompt("Destination currency: ")? else {
            return Ok(());
        };
        let to = match parse_currency(&to) {
            Ok(code) => code,
            Err(err) => return self.report_invalid_currency("destination", &err),
        };

        if from == to {
            writeln!(
                self.output,
                "❌ Origin and destination currencies must be different."
            )?;
            return Ok(());
        }

        self.convert_pair(from.code(), to.code()).await
    }

    fn report_invalid_currency(&mut self, which: &str, err: &AppError) -> io::Result<()> {
        let code = match err {
            AppError::InvalidCurrency { code, .. } => code.as_str(),
            _ => "",
        };
        writeln!(self.output, "❌ Invalid {} currency: {}", which, code)
    }

    fn list_currencies(&mut self) -> io::Result<()> {
        writeln!(self.output, "📋 SUPPORTED CURRENCIES:")?;
        writeln!(self.output, "{}", RULE)?;
        for currency in CurrencyCode::all() {
            writeln!(
                self.output,
                "  • {} ({}) - {}",
                currency.code(),
                currency.symbol(),
                currency.description()
            )?;
        }
        writeln!(self.output, "{}", RULE)
    }

    fn show_history(&mut self) -> io::Result<()> {
        let entries = self.history.list();
        if entries.is_empty() {
            return writeln!(self.output, "🕘 No conversions yet.");
        }
        writeln!(self.output, "🕘 LAST {} CONVERSIONS:", entries.len())?;
        for entry in entries {
            writeln!(self.output, "  {}", entry)?;
        }
        Ok(())
    }
}
