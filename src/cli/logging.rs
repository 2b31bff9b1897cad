//! Verbosity handling for CLI output.

/// Log level for CLI output.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output except errors.
    Quiet,
    /// Normal output level.
    Normal,
    /// Verbose output with additional details.
    Verbose,
}

impl LogLevel {
    /// Resolve the level from the global CLI flags; quiet wins.
    #[must_use]
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    /// True iff a message at `required` should be printed.
    #[must_use]
    pub fn permits(self, required: LogLevel) -> bool {
        match self {
            LogLevel::Quiet => false,
            LogLevel::Normal => required == LogLevel::Normal,
            LogLevel::Verbose => true,
        }
    }
}

/// Print a message if the current level permits it.
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level.permits(required) {
        println!("{msg}");
    }
}
