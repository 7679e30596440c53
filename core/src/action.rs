pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use std::{io, path::Path};

use error::*;
use stos_webclient::{Credential, ProblemId};

use crate::{
    debug::DebugDump,
    interactive::{ask_credential, spinner},
    judge::Judge,
    poller::{StatusPoller, StatusSource},
    render,
    storage::Repository,
    verdict::{self, Verdict},
};

pub fn init(dir: impl AsRef<Path>, problem_id: ProblemId) -> Result<Repository> {
    Repository::init(dir, problem_id).context("Failed to init STOS repository")
}

/// Logs in with the stored credential, asking for one (and saving it) if there is none.
pub async fn login<J>(cli: &J, repo: &mut Repository) -> Result<()>
where
    J: Judge + Sync + ?Sized,
{
    login_with(cli, repo, ask_credential).await
}

/// Same as [`login`], with `ask` in place of the interactive prompt.
pub async fn login_with<J, F>(cli: &J, repo: &mut Repository, ask: F) -> Result<()>
where
    J: Judge + Sync + ?Sized,
    F: FnOnce() -> io::Result<Credential>,
{
    let cred = match repo.credential() {
        Some(cred) => cred,
        None => {
            let cred = ask().context("Failed to read credential")?;
            repo.save_credential(&cred)
                .context("Failed to save credential")?;
            log::info!(
                "Saved credential to {:?}",
                Repository::config_filepath(repo.root())
            );
            cred
        }
    };

    cli.login(&cred).await.context("Login unsuccessful")
}

pub async fn push<J>(
    cli: &J,
    repo: &mut Repository,
    poller: &StatusPoller,
    debug: &DebugDump,
) -> Result<Verdict>
where
    J: Judge + Sync + ?Sized,
{
    login(cli, repo).await?;

    let files = repo.source_files()?;
    log::info!(
        "Uploading {}",
        files
            .iter()
            .map(|f| f.filename.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    match cli.submit(repo.problem_id(), &files).await {
        Ok(_) => {}
        Err(stos_webclient::Error::UploadRejected { body, .. }) => {
            debug.dump(&body);
            bail!("Failed to upload files to STOS");
        }
        Err(e) => return Err(e.into()),
    }

    let verdict = await_verdict(cli, repo.problem_id(), poller, debug).await?;
    render::print_verdict(&verdict)?;
    Ok(verdict)
}

pub async fn status<J>(
    cli: &J,
    repo: &mut Repository,
    poller: &StatusPoller,
    debug: &DebugDump,
) -> Result<Verdict>
where
    J: Judge + Sync + ?Sized,
{
    login(cli, repo).await?;

    let verdict = await_verdict(cli, repo.problem_id(), poller, debug).await?;
    render::print_verdict(&verdict)?;
    Ok(verdict)
}

/// Polls until judging finishes, dumps the final page and parses it.
pub async fn await_verdict<S>(
    source: &S,
    problem_id: &ProblemId,
    poller: &StatusPoller,
    debug: &DebugDump,
) -> Result<Verdict>
where
    S: StatusSource + Sync + ?Sized,
{
    let bar = spinner(format!("Waiting for results of problem {} ...", problem_id));
    let page = poller.poll_until_judged(source, problem_id).await;
    bar.finish_and_clear();

    let page = page?;
    debug.dump(&page);
    verdict::parse_verdict(&page).context("Failed to parse STOS status page")
}
