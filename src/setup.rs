//! Interactive setup wizard for the API key and default model.

use std::path::Path;

use dialoguer::{Confirm, Input, Password};

use crate::config::{KEY_API_KEY, KEY_MODEL, SETUP_DEFAULT_MODEL, save_value};
use crate::output::Console;

/// Ask for an API key and default model and save both to `path`.
///
/// An empty key leaves the stored key untouched.
pub fn run_setup(console: &Console, path: &Path) -> anyhow::Result<()> {
    console.plain("git-massage setup");

    let api_key = Password::new()
        .with_prompt("Enter your OpenAI API Key")
        .allow_empty_password(true)
        .interact()?;

    if !api_key.trim().is_empty() {
        save_value(path, KEY_API_KEY, api_key.trim())?;
        console.success("API Key saved to config.");
    }

    let model: String = Input::new()
        .with_prompt("Enter default model")
        .default(SETUP_DEFAULT_MODEL.to_string())
        .interact_text()?;

    save_value(path, KEY_MODEL, model.trim())?;
    console.success(&format!("Default model set to {}.", model.trim()));

    Ok(())
}

/// Ask whether to run setup now because no API key was found.
pub fn offer_setup() -> anyhow::Result<bool> {
    Ok(Confirm::new()
        .with_prompt("Do you want to run setup now?")
        .default(false)
        .interact()?)
}
