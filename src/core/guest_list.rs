use crate::domain::model::GuestList;
use crate::utils::error::Result;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_GUEST_LIST_FILE: &str = "guest_list.txt";

/// Where a guest list ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestListOutput {
    Stdout,
    File(PathBuf),
}

impl GuestListOutput {
    /// A persisted list without a destination goes to `guest_list.txt`.
    pub fn from_flags(persist: bool, destination: Option<PathBuf>) -> Self {
        if persist {
            GuestListOutput::File(
                destination.unwrap_or_else(|| PathBuf::from(DEFAULT_GUEST_LIST_FILE)),
            )
        } else {
            GuestListOutput::Stdout
        }
    }
}

impl std::fmt::Display for GuestListOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuestListOutput::Stdout => write!(f, "stdout"),
            GuestListOutput::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Print or persist the guest list in ascending `user_id` order.
pub fn emit_guest_list(guests: &GuestList, output: &GuestListOutput) -> Result<()> {
    match output {
        GuestListOutput::Stdout => {
            let stdout = io::stdout();
            print_guest_list(guests, &mut stdout.lock())
        }
        GuestListOutput::File(path) => save_guest_list(guests, path),
    }
}

/// Screen format: `<user_id> - <name>`.
pub fn print_guest_list<W: Write>(guests: &GuestList, writer: &mut W) -> Result<()> {
    for (user_id, name) in guests {
        writeln!(writer, "{} - {}", user_id, name)?;
    }
    writer.flush()?;
    Ok(())
}

/// File format: `<user_id> - <name> ` followed by a newline. The trailing
/// space is part of the format.
pub fn write_guest_list<W: Write>(guests: &GuestList, writer: &mut W) -> Result<()> {
    for (user_id, name) in guests {
        tracing::info!("{} - {}", user_id, name);
        writeln!(writer, "{} - {} ", user_id, name)?;
    }
    writer.flush()?;
    Ok(())
}

fn save_guest_list(guests: &GuestList, path: &Path) -> Result<()> {
    if path.is_file() {
        tracing::warn!(
            "Removing existing file \"{}\" and create new",
            path.display()
        );
        fs::remove_file(path)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_guest_list(guests, &mut writer)?;
    tracing::debug!("Wrote {} guests to {}", guests.len(), path.display());
    Ok(())
}
