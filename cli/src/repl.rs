//! Interactive prompt: the terminal stand-in for the converter widget.
//!
//! Each line is one user action. A full line (`100 usd eur`) fills the whole
//! form, a bare amount keeps the current currencies, `swap` exchanges them.
//! Every action that changes the form triggers a conversion.

use std::io::{self, BufRead, Write};

use fxconv_core::currency::parse_supported;
use fxconv_core::{convert_form, ConversionForm, ConverterState, InputError, RatesClient, Transport};
use tracing::error;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Convert {
        amount: String,
        from: Option<(String, String)>,
    },
    Swap,
    Help,
    Quit,
}

pub fn parse_action(line: &str) -> Action {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => Action::Help,
        [word] if word.eq_ignore_ascii_case("quit") || word.eq_ignore_ascii_case("exit") => Action::Quit,
        [word] if word.eq_ignore_ascii_case("swap") => Action::Swap,
        [word] if word.eq_ignore_ascii_case("help") => Action::Help,
        [amount] => Action::Convert {
            amount: amount.to_string(),
            from: None,
        },
        [amount, from, to] | [amount, from, "to", to] => Action::Convert {
            amount: amount.to_string(),
            from: Some((from.to_string(), to.to_string())),
        },
        _ => Action::Help,
    }
}

const HELP: &str = "Enter `<amount> <from> <to>` (e.g. `100 usd eur`), a bare amount, `swap`, or `quit`.";

pub struct Session<T> {
    pub state: ConverterState,
    pub client: RatesClient,
    pub transport: T,
    pub form: ConversionForm,
}

impl<T: Transport> Session<T> {
    pub fn new(state: ConverterState, client: RatesClient, transport: T) -> Self {
        Self {
            state,
            client,
            transport,
            form: ConversionForm::default(),
        }
    }

    /// Apply one action, writing what the widget would display. Returns
    /// `false` once the user asked to quit.
    pub fn handle<W: Write>(&mut self, action: Action, out: &mut W) -> io::Result<bool> {
        match action {
            Action::Quit => return Ok(false),
            Action::Help => writeln!(out, "{HELP}")?,
            Action::Swap => {
                self.form.swap();
                writeln!(out, "Now converting {} -> {}", self.form.from, self.form.to)?;
                self.convert(out)?;
            }
            Action::Convert { amount, from } => {
                if let Some((from, to)) = from {
                    match (parse_supported(&from), parse_supported(&to)) {
                        (Ok(from), Ok(to)) => {
                            self.form.from = from;
                            self.form.to = to;
                        }
                        (Err(e), _) | (_, Err(e)) => {
                            writeln!(out, "Error: {}", InputError::from(e))?;
                            return Ok(true);
                        }
                    }
                }
                self.form.amount = amount;
                self.convert(out)?;
            }
        }
        Ok(true)
    }

    fn convert<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Converting...")?;
        match convert_form(&mut self.state, &self.client, &mut self.transport, &self.form) {
            Ok(conversion) => {
                writeln!(out, "  {conversion}")?;
                writeln!(out, "  {} ({})", conversion.rate_line(), conversion.derivation)?;
                if let Some(updated) = conversion.updated_line() {
                    writeln!(out, "  {updated}")?;
                }
            }
            Err(e) => {
                error!(error = %e, "Conversion failed");
                writeln!(out, "Error: {}", e.user_message())?;
            }
        }
        Ok(())
    }
}

/// Read actions from `input` until EOF or `quit`.
pub fn run<T: Transport, R: BufRead, W: Write>(session: &mut Session<T>, input: R, out: &mut W) -> io::Result<()> {
    writeln!(out, "{HELP}")?;
    write!(out, "> ")?;
    out.flush()?;
    for line in input.lines() {
        if !session.handle(parse_action(&line?), out)? {
            break;
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}
