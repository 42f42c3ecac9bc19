//! Interactive folder selection.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::path::PathBuf;

/// Ask for input folders one at a time until the user declines another.
pub fn prompt_input_folders() -> Result<Vec<PathBuf>> {
    let theme = ColorfulTheme::default();
    collect_folders(
        || {
            let answer: String = Input::with_theme(&theme)
                .with_prompt("Select a folder (empty to finish)")
                .allow_empty(true)
                .validate_with(|input: &String| -> Result<(), String> {
                    let trimmed = input.trim();
                    if trimmed.is_empty() || PathBuf::from(trimmed).is_dir() {
                        Ok(())
                    } else {
                        Err(format!("Not a folder: {trimmed}"))
                    }
                })
                .interact_text()?;
            Ok(non_empty_path(&answer))
        },
        || {
            Ok(Confirm::with_theme(&theme)
                .with_prompt("Would you like to add another folder?")
                .default(false)
                .interact()?)
        },
    )
}

/// Ask once for the output folder. An empty answer means none was chosen.
pub fn prompt_output_folder() -> Result<Option<PathBuf>> {
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Output folder")
        .allow_empty(true)
        .interact_text()?;
    Ok(non_empty_path(&answer))
}

fn non_empty_path(answer: &str) -> Option<PathBuf> {
    let trimmed = answer.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

/// Drive the "pick a folder, add another?" loop.
///
/// Stops when `ask_folder` yields nothing or `ask_more` says no.
fn collect_folders<F, G>(mut ask_folder: F, mut ask_more: G) -> Result<Vec<PathBuf>>
where
    F: FnMut() -> Result<Option<PathBuf>>,
    G: FnMut() -> Result<bool>,
{
    let mut folders = Vec::new();
    while let Some(folder) = ask_folder()? {
        folders.push(folder);
        if !ask_more()? {
            break;
        }
    }
    Ok(folders)
}
