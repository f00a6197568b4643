//! Interactive region picker.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `afford afford` and choose a region" UX

use std::io::{self, BufRead, Write};

use crate::data::RegionTable;
use crate::error::{AppError, Result};

/// Resolve a region from an explicit `--region` value or by prompting on stdin.
pub fn resolve_region(table: &RegionTable, explicit: Option<&str>) -> Result<String> {
    match explicit {
        Some(name) => Ok(table.find(name)?.id.clone()),
        None => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            prompt_for_region(table, &mut stdin.lock(), &mut stdout)
        }
    }
}

/// Prompt the user to select a region.
///
/// Behavior:
/// - list the regions in table order
/// - accept either a number (from the list) or a region name
/// - `q` cancels
pub fn prompt_for_region<R: BufRead, W: Write>(table: &RegionTable, input: &mut R, out: &mut W) -> Result<String> {
    let ids = table.ids();

    writeln!(out, "Regions:").map_err(prompt_err)?;
    for (idx, id) in ids.iter().enumerate() {
        writeln!(out, "{:>3}) {id}", idx + 1).map_err(prompt_err)?;
    }

    loop {
        write!(out, "Select a region by number (1-{}) or name (q to quit): ", ids.len()).map_err(prompt_err)?;
        out.flush().map_err(prompt_err)?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::io(format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::invalid("No region selected. Pass one with `--region <id>`."));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::invalid("Canceled."));
        }

        if let Ok(choice) = line.parse::<usize>() {
            if (1..=ids.len()).contains(&choice) {
                return Ok(ids[choice - 1].to_string());
            }
            writeln!(out, "Invalid choice: {choice}. Enter a number between 1 and {}.", ids.len())
                .map_err(prompt_err)?;
            continue;
        }

        match table.find(line) {
            Ok(rule) => return Ok(rule.id.clone()),
            Err(err) => {
                writeln!(out, "{err}").map_err(prompt_err)?;
                continue;
            }
        }
    }
}

fn prompt_err(e: io::Error) -> AppError {
    AppError::io(format!("Failed to write prompt: {e}"))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn pick(input: &str) -> (Result<String>, String) {
        let table = RegionTable::canada();
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = prompt_for_region(&table, &mut reader, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn picks_by_number() {
        let (result, out) = pick("5\n");
        assert_eq!(result.unwrap(), "Quebec");
        assert!(out.contains("  6) Manitoba"));
    }

    #[test]
    fn picks_by_name_after_bad_input() {
        let (result, out) = pick("9\nYukon\nalberta\n");
        assert_eq!(result.unwrap(), "Alberta");
        assert!(out.contains("Invalid choice: 9"));
        assert!(out.contains("Unknown region 'Yukon'."));
    }

    #[test]
    fn quit_and_eof_cancel() {
        assert!(pick("q\n").0.is_err());
        assert!(pick("").0.is_err());
    }

    #[test]
    fn explicit_region_is_case_insensitive() {
        let table = RegionTable::canada();
        assert_eq!(resolve_region(&table, Some("ontario")).unwrap(), "Ontario");
        assert!(matches!(resolve_region(&table, Some("Mars")), Err(AppError::NotFound(_))));
    }
}
