//! Plugin output and process termination.
//!
//! [`PluginExit`] is the only place the process exits. Everything before it
//! returns values, so the rendered bytes can be checked without spawning a
//! process.

use crate::perfdata::PerfdataList;
use crate::types::{ExitLevel, TranslatedStatus};
use std::fmt;
use std::io::{self, Write};

/// Final plugin output together with its exit level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginExit {
    pub level: ExitLevel,

    /// Output text, `<LEVEL> - <message>`
    pub text: String,

    /// Rendered perfdata trailer; absent on fatal errors
    pub trailer: Option<String>,
}

impl PluginExit {
    /// Output of a translated probe with its perfdata trailer
    pub fn from_status(status: TranslatedStatus, perfdata: &PerfdataList) -> Self {
        Self {
            level: status.level,
            text: status.output,
            trailer: Some(perfdata.format()),
        }
    }

    /// `UNKNOWN - <error>` for errors raised before a probe was translated
    pub fn fatal(err: impl fmt::Display) -> Self {
        Self {
            level: ExitLevel::Unknown,
            text: format!("{} - {}", ExitLevel::Unknown, err),
            trailer: None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.level.code()
    }

    /// Exact bytes written to standard output
    pub fn render(&self) -> String {
        match &self.trailer {
            Some(trailer) => format!("{}\n{}\n", self.text, trailer),
            None => format!("{}\n", self.text),
        }
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(self.render().as_bytes())?;
        out.flush()
    }

    /// Print to standard output and terminate with the level's exit code
    pub fn exit(self) -> ! {
        tracing::debug!(level = %self.level, code = self.exit_code(), "Exiting");

        if let Err(e) = self.write_to(io::stdout().lock()) {
            tracing::error!(error = %e, "Failed to write plugin output");
            std::process::exit(ExitLevel::Unknown.code());
        }

        std::process::exit(self.exit_code())
    }
}

impl fmt::Display for PluginExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
