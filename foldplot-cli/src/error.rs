//! Error handling for the foldplot CLI

use foldplot_core::PlotError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error("Rendering error: {message}")]
    Rendering { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn parse<S: Into<String>>(file: S, message: S) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn rendering<S: Into<String>>(message: S) -> Self {
        Self::Rendering { message: message.into() }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config(format!("TOML serialization error: {}", err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::io(format!("JSON serialization error: {}", err))
    }
}

pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file\n\
                 • Compressed input must carry a .gz extension or gzip header",
                path.display()
            ));
        }

        CliError::Plot(PlotError::Schema { .. }) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Input must be tab-separated with a header row\n\
                 • Use either q, q_st, q_en, r, r_st, r_en or the query_name/reference_name column set\n\
                 • Every file needs a perID_by_events column",
            );
        }

        CliError::Plot(PlotError::Config { .. }) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Palettes must have between 3 and 11 colors\n\
                 • Custom breakpoints need one value fewer than the number of colors, strictly ascending\n\
                 • Triangle plots need alignments starting at more than one position",
            );
        }

        CliError::Plot(PlotError::InvalidRecord { row, .. }) => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Inspect data row {} of the input\n\
                 • Interval ends must not precede their starts\n\
                 • Identity values are percentages between 0 and 100",
                row
            ));
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your foldplot.toml configuration file\n\
                 • Use 'foldplot config --example' to generate a sample configuration\n\
                 • Verify that all configuration values are valid",
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CliError::config("test message");
        assert!(matches!(err, CliError::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error: test message");
    }

    #[test]
    fn test_plot_error_passthrough() {
        let err: CliError = PlotError::EmptyDataset.into();
        assert_eq!(err.to_string(), PlotError::EmptyDataset.to_string());

        let err: CliError = PlotError::schema("missing column(s): r_en").into();
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("perID_by_events"));
    }

    #[test]
    fn test_error_suggestions() {
        let err = CliError::file_not_found(PathBuf::from("alignments.bed"));
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("Suggestions:"));
        assert!(formatted.contains("alignments.bed"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io { .. }));
    }
}
