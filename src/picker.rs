//! Interactive picker adapters
//!
//! The calendar runs as a rofi script: rofi starts the program once to get
//! the list, then again with the chosen line's info token in the
//! environment. Outside rofi the list is printed as plain text.

use std::io::{self, Write};

/// An external selector that lists lines and reports back a chosen token
pub trait Picker {
    /// True while nothing has been selected yet
    fn is_first_open(&self) -> bool;

    /// Token attached to the chosen line, if any
    fn selected_token(&self) -> Option<String>;

    /// Offer one line, remembering `token` for a later selection
    fn emit(&mut self, line: &str, token: &str) -> io::Result<()>;
}

/// rofi script mode, driven by `ROFI_RETV` and `ROFI_INFO`
pub struct RofiPicker<W: Write> {
    retv: Option<String>,
    info: Option<String>,
    out: W,
}

impl<W: Write> RofiPicker<W> {
    pub fn new(retv: Option<String>, info: Option<String>, out: W) -> Self {
        Self { retv, info, out }
    }

    /// Read the rofi state from the process environment
    pub fn from_env(out: W) -> Self {
        Self::new(
            std::env::var("ROFI_RETV").ok(),
            std::env::var("ROFI_INFO").ok(),
            out,
        )
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Picker for RofiPicker<W> {
    fn is_first_open(&self) -> bool {
        self.retv.as_deref() == Some("0")
    }

    fn selected_token(&self) -> Option<String> {
        self.info.clone().filter(|info| !info.is_empty())
    }

    fn emit(&mut self, line: &str, token: &str) -> io::Result<()> {
        writeln!(self.out, "{}\0info\x1f{}", line, token)
    }
}

/// Whether the process was started by rofi
pub fn in_rofi() -> bool {
    std::env::var_os("ROFI_RETV").is_some()
}

/// Plain terminal listing; never has a selection
pub struct TerminalPicker<W: Write> {
    out: W,
}

impl<W: Write> TerminalPicker<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Picker for TerminalPicker<W> {
    fn is_first_open(&self) -> bool {
        true
    }

    fn selected_token(&self) -> Option<String> {
        None
    }

    fn emit(&mut self, line: &str, _token: &str) -> io::Result<()> {
        writeln!(self.out, "{}", line)
    }
}

/// A picker whose selection is fixed up front, for `calendar done <file>`
pub struct Selection(pub String);

impl Picker for Selection {
    fn is_first_open(&self) -> bool {
        false
    }

    fn selected_token(&self) -> Option<String> {
        Some(self.0.clone())
    }

    fn emit(&mut self, _line: &str, _token: &str) -> io::Result<()> {
        Ok(())
    }
}
