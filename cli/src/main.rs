use std::{io::Write as _, process::exit};

use clap::{error::ErrorKind, Parser};
use colored::Colorize as _;
use stos_cli::{cmd::GlobalArgs, util};
use stos_core::style::ColorTheme as _;

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            let level = record.level();
            writeln!(
                buf,
                "[{}] {}",
                level.as_str().color(level.color()),
                record.args()
            )
        })
        .init();
}

#[tokio::main]
async fn main() {
    init_logger();

    let app = GlobalArgs::try_parse().unwrap_or_else(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => {
            let _ = e.print();
            exit(1)
        }
    });

    app.exec_subcmd().await.unwrap_or_else(|e| {
        log::debug!("{:?}", e);
        eprintln!("fatal: {}", util::fatal_message(&e));
        exit(1);
    });
}
