use std::{path::Path, sync::Mutex};

use async_trait::async_trait;
use stos_core::{action, DebugDump, Judge, Repository, StatusPoller, StatusSource};
use stos_webclient::{Credential, ProblemId, SourceFile};

/// Scripted judge: fixed login and upload outcomes, status pages served in order.
#[derive(Default)]
struct FakeJudge {
    reject_login: bool,
    rejected_upload_body: Option<String>,
    pages: Mutex<Vec<String>>,
    logins: Mutex<Vec<String>>,
    uploads: Mutex<Vec<String>>,
}

#[async_trait]
impl StatusSource for FakeJudge {
    async fn fetch_status(&self, _: &ProblemId) -> anyhow::Result<String> {
        let mut pages = self.pages.lock().unwrap();
        anyhow::ensure!(!pages.is_empty(), "no status page");
        Ok(if pages.len() > 1 {
            pages.remove(0)
        } else {
            pages[0].clone()
        })
    }
}

#[async_trait]
impl Judge for FakeJudge {
    async fn login(&self, cred: &Credential) -> stos_webclient::Result<()> {
        self.logins.lock().unwrap().push(cred.username.clone());
        if self.reject_login {
            return Err(stos_webclient::Error::WrongCredential);
        }
        Ok(())
    }

    async fn submit(
        &self,
        problem_id: &ProblemId,
        files: &[SourceFile],
    ) -> stos_webclient::Result<String> {
        let mut uploads = self.uploads.lock().unwrap();
        uploads.extend(files.iter().map(|f| f.filename.clone()));
        match &self.rejected_upload_body {
            Some(body) => Err(stos_webclient::Error::UploadRejected {
                problem_id: problem_id.clone(),
                body: body.clone(),
            }),
            None => Ok("Zadanie przetwarzane".to_owned()),
        }
    }
}

fn alice() -> Credential {
    Credential {
        username: "alice".to_owned(),
        password: "secret".to_owned(),
    }
}

fn repo_with_sources(dir: &Path) -> Repository {
    let mut repo = Repository::init(dir, ProblemId::from("365")).unwrap();
    repo.save_credential(&alice()).unwrap();
    fsutil::write(dir.join("main.cpp"), "int main() {}\n").unwrap();
    fsutil::write(dir.join("list.h"), "#pragma once\n").unwrap();
    repo
}

const JUDGED_PAGE: &str = r#"<div id="result"><table>
<tr><th>Test</th><th>Wynik</th><th>Punkty</th><th>Czas</th><th></th><th></th><th></th></tr>
<tr class="testacc"><td>T1</td><td>OK</td><td>10</td><td>0.5</td><td></td><td></td><td></td></tr>
<tr><td>Suma</td></tr>
</table></div>"#;

#[tokio::test(start_paused = true)]
async fn rejected_upload_is_dumped_before_failing() {
    let dir = tempfile::tempdir().unwrap();
    let mut repo = repo_with_sources(dir.path());
    let dump_path = dir.path().join("last.html");
    let judge = FakeJudge {
        rejected_upload_body: Some("<p>Nieprawidłowy kod zadania</p>".to_owned()),
        ..Default::default()
    };

    let err = action::push(
        &judge,
        &mut repo,
        &StatusPoller::new(),
        &DebugDump::new(Some(dump_path.clone())),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Failed to upload files to STOS");
    assert_eq!(
        fsutil::read_to_string(&dump_path).unwrap(),
        "<p>Nieprawidłowy kod zadania</p>"
    );
    assert_eq!(*judge.uploads.lock().unwrap(), vec!["list.h", "main.cpp"]);
}

#[tokio::test(start_paused = true)]
async fn accepted_upload_waits_for_verdict() {
    let dir = tempfile::tempdir().unwrap();
    let mut repo = repo_with_sources(dir.path());
    let judge = FakeJudge {
        pages: Mutex::new(vec![
            "Zadanie przetwarzane".to_owned(),
            JUDGED_PAGE.to_owned(),
        ]),
        ..Default::default()
    };

    let verdict = action::push(
        &judge,
        &mut repo,
        &StatusPoller::new(),
        &DebugDump::disabled(),
    )
    .await
    .unwrap();

    assert_eq!(*judge.logins.lock().unwrap(), vec!["alice"]);
    assert_eq!(verdict.tests.len(), 1);
    assert!(verdict.tests[0].passed);
}

#[tokio::test]
async fn first_login_saves_prompted_credential() {
    let dir = tempfile::tempdir().unwrap();
    let mut repo = Repository::init(dir.path(), ProblemId::from("365")).unwrap();
    let judge = FakeJudge::default();

    action::login_with(&judge, &mut repo, || Ok(alice()))
        .await
        .unwrap();

    assert_eq!(*judge.logins.lock().unwrap(), vec!["alice"]);
    let reopened = Repository::open(dir.path()).unwrap();
    assert_eq!(reopened.credential(), Some(alice()));
}

#[tokio::test]
async fn stored_credential_is_used_without_asking() {
    let dir = tempfile::tempdir().unwrap();
    let mut repo = repo_with_sources(dir.path());
    let judge = FakeJudge::default();

    action::login_with(&judge, &mut repo, || -> std::io::Result<Credential> {
        panic!("must not ask for a stored credential")
    })
    .await
    .unwrap();

    assert_eq!(*judge.logins.lock().unwrap(), vec!["alice"]);
}

#[tokio::test]
async fn wrong_credential_is_reported_as_login_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut repo = repo_with_sources(dir.path());
    let judge = FakeJudge {
        reject_login: true,
        ..Default::default()
    };

    let err = action::status(
        &judge,
        &mut repo,
        &StatusPoller::new(),
        &DebugDump::disabled(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Login unsuccessful");
    assert!(judge.pages.lock().unwrap().is_empty());
}
