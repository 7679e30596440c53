use std::{io, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use stos_webclient::Credential;

pub mod util {
    use dialoguer::{theme::ColorfulTheme, Input, Password};
    use std::io;

    fn theme() -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn ask_text(prompt: &str) -> io::Result<String> {
        Input::with_theme(&theme())
            .with_prompt(prompt)
            .interact_text()
    }

    pub fn ask_password(prompt: &str) -> io::Result<String> {
        Password::with_theme(&theme())
            .with_prompt(prompt)
            .interact()
    }
}

pub fn ask_credential() -> io::Result<Credential> {
    let username = util::ask_text("STOS username")?;
    let password = util::ask_password("STOS password")?;
    Ok(Credential { username, password })
}

/// Spinner ticking on its own until `finish_and_clear` is called.
pub fn spinner(msg: impl Into<String>) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let bar = ProgressBar::new_spinner()
        .with_style(style)
        .with_message(msg.into());
    bar.enable_steady_tick(Duration::from_millis(50));
    bar
}
