use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::FIELD_SEP;

// os
#[cfg(not(windows))]
const TICK_SETTINGS: (&str, u64) = ("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ", 80);
#[cfg(windows)]
const TICK_SETTINGS: (&str, u64) = (r"+-x| ", 200);

/// return a pre-configured progress bar
pub fn get_progress_bar(length: u64, msg: &str) -> ProgressBar {
    let progressbar_style = ProgressStyle::default_spinner()
        .tick_chars(TICK_SETTINGS.0)
        .template(" {spinner} {msg:<30} {wide_bar} ETA {eta_precise} ")
        .expect("no template error");

    let progress_bar = ProgressBar::new(length);

    progress_bar.set_style(progressbar_style);
    progress_bar.enable_steady_tick(Duration::from_millis(TICK_SETTINGS.1));
    progress_bar.set_message(msg.to_owned());

    progress_bar
}

/// join a row of cells with the report field separator
pub fn fmt_row<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<&str>>()
        .join(FIELD_SEP)
}

/// write a header and a collection of rows to any writer
pub fn write_rows<W: Write>(writer: W, header: &[&str], rows: &[String]) -> Result<(), CliError> {
    let mut writer = BufWriter::new(writer);

    writeln!(writer, "{}", fmt_row(header))?;
    for line in rows.iter() {
        writeln!(writer, "{}", line)?;
    }

    writer.flush()?;
    Ok(())
}

/// write a report to a file or, if no path is given, to stdout
pub fn write_report(
    dest: Option<&PathBuf>,
    header: &[&str],
    rows: &[String],
) -> Result<(), CliError> {
    match dest {
        Some(path) => {
            log::info!("Rows in {}: {:?}. Writing...", path.display(), rows.len());
            let f = File::create(path)?;
            write_rows(f, header, rows)
        }
        None => {
            let stdout = std::io::stdout();
            write_rows(stdout.lock(), header, rows)
        }
    }
}

/// argument checker for all subcommands
pub trait ArgCheck {
    fn check(&self) -> Result<(), CliError> {
        self.validate_args()
    }

    fn validate_args(&self) -> Result<(), CliError> {
        let inputs = self.get_inputs();
        if inputs.is_empty() {
            let err = "No input files provided".to_string();
            return Err(CliError::InvalidInput(err));
        }

        for input in inputs {
            validate(input)?;
        }

        for input in self.get_maybe_empty() {
            validate_file(input)?;
        }

        Ok(())
    }

    fn get_inputs(&self) -> Vec<&PathBuf>;

    /// inputs that must exist but may have no content
    fn get_maybe_empty(&self) -> Vec<&PathBuf> {
        Vec::new()
    }
}

/// error handling for CLI
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// argument validation
pub fn validate<P: AsRef<Path>>(arg: P) -> Result<(), CliError> {
    let arg = arg.as_ref();
    validate_file(arg)?;

    match std::fs::metadata(arg) {
        Ok(metadata) if metadata.len() == 0 => Err(CliError::InvalidInput(format!(
            "ERROR: file {:?} is empty",
            arg
        ))),
        Ok(_) => Ok(()),
        Err(e) => Err(CliError::IoError(e)),
    }
}

pub fn validate_file<P: AsRef<Path>>(arg: P) -> Result<(), CliError> {
    let arg = arg.as_ref();

    if !arg.exists() {
        return Err(CliError::InvalidInput(format!(
            "ERROR: {:?} does not exist",
            arg
        )));
    }

    if !arg.is_file() {
        return Err(CliError::InvalidInput(format!(
            "ERROR: {:?} is not a file",
            arg
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_write_rows_with_header() {
        let mut buf = Vec::new();
        let rows = vec![fmt_row(&["RF00001", "rna-type", "rRNA"])];

        write_rows(&mut buf, &["family", "method", "rna_types"], &rows).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "family,method,rna_types\nRF00001,rna-type,rRNA\n"
        );
    }

    #[test]
    fn test_validate_rejects_empty_and_missing() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(validate(file.path()).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "RF00001\tSO\t0000652").unwrap();
        assert!(validate(file.path()).is_ok());

        assert!(validate("does/not/exist.txt").is_err());
    }

    struct Inputs {
        required: PathBuf,
        maybe_empty: PathBuf,
    }

    impl ArgCheck for Inputs {
        fn get_inputs(&self) -> Vec<&PathBuf> {
            vec![&self.required]
        }

        fn get_maybe_empty(&self) -> Vec<&PathBuf> {
            vec![&self.maybe_empty]
        }
    }

    #[test]
    fn test_check_allows_empty_optional_content() {
        let empty = tempfile::NamedTempFile::new().unwrap();
        let mut full = tempfile::NamedTempFile::new().unwrap();
        write!(full, "RF00001").unwrap();

        assert!(validate_file(empty.path()).is_ok());

        let inputs = Inputs {
            required: full.path().to_path_buf(),
            maybe_empty: empty.path().to_path_buf(),
        };
        assert!(inputs.check().is_ok());

        let inputs = Inputs {
            required: empty.path().to_path_buf(),
            maybe_empty: full.path().to_path_buf(),
        };
        assert!(inputs.check().is_err());

        let inputs = Inputs {
            required: full.path().to_path_buf(),
            maybe_empty: PathBuf::from("does/not/exist.txt"),
        };
        assert!(inputs.check().is_err());
    }
}
