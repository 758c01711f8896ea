use crate::counter::parse_keywords;
use crate::error::{Result, WordFreqError};
use crate::ui::OutputMode;
use console::{style, Term};
use std::io::{self, BufRead, Write};

pub const THEME_PROMPT: &str = "Enter the name of the theme: ";
pub const FISCAL_YEAR_PROMPT: &str = "Enter the fiscal year: ";
pub const KEYWORDS_PROMPT: &str = "Enter keywords separated by comma: ";

/// Line-oriented prompts for values missing from the configuration.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    styled: bool,
}

impl Prompter<io::StdinLock<'static>, Term> {
    /// Prompts on the terminal; JSON mode keeps stdout for JSON lines only.
    pub fn stdio(mode: OutputMode) -> Self {
        let output = prompt_terminal(mode);
        Self {
            input: io::stdin().lock(),
            styled: output.features().colors_supported(),
            output,
        }
    }
}

fn prompt_terminal(mode: OutputMode) -> Term {
    match mode {
        OutputMode::Json => Term::stderr(),
        OutputMode::Human | OutputMode::Plain => Term::stdout(),
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            styled: false,
        }
    }

    pub fn ask(&mut self, label: &str) -> Result<String> {
        if self.styled {
            write!(self.output, "{}", style(label).bold())?;
        } else {
            write!(self.output, "{}", label)?;
        }
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(WordFreqError::Prompt {
                message: format!("input closed before answering '{}'", label.trim_end()),
            });
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn ask_theme(&mut self) -> Result<String> {
        self.ask(THEME_PROMPT)
    }

    pub fn ask_fiscal_year(&mut self) -> Result<String> {
        self.ask(FISCAL_YEAR_PROMPT)
    }

    pub fn ask_keywords(&mut self) -> Result<Vec<String>> {
        Ok(parse_keywords(&self.ask(KEYWORDS_PROMPT)?))
    }
}
