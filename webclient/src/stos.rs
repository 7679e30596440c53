use maplit::hashmap;

use crate::{
    error::*,
    http::{self, multipart},
    model::*,
    util,
};

pub const DEFAULT_BASE_URL: &str = "https://kaims.pl/~kmocet/stos/index.php";

/// Submission context STOS expects for uploads made outside of a contest.
pub const DEFAULT_CONTEXT: &str = "84";

/// Link text STOS shows only to a logged-in user.
const LOGGED_IN_MARKER: &str = "Wylogowanie";

/// Markers the judge shows right after taking an upload. `kolejce` is only
/// seen later, while polling.
const UPLOAD_ACK_MARKERS: [TransientMarker; 2] =
    [TransientMarker::Processing, TransientMarker::Pending];

fn upload_ack_marker(page: &str) -> Option<TransientMarker> {
    UPLOAD_ACK_MARKERS
        .into_iter()
        .find(|m| page.contains(m.as_ref()))
}

pub struct StosClient {
    http: http::Client,
    base_url: Url,
    context: String,
}

impl StosClient {
    pub fn new(base_url: Url, accept_invalid_certs: bool) -> Result<Self> {
        Ok(Self {
            http: http::Client::new(accept_invalid_certs)?,
            base_url,
            context: DEFAULT_CONTEXT.to_owned(),
        })
    }

    pub fn with_default_url() -> Result<Self> {
        Self::new(util::parse_url(DEFAULT_BASE_URL)?, true)
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn login(&self, cred: &Credential) -> Result<()> {
        let params = hashmap! {
            "login" => cred.username.as_str(),
            "password" => cred.password.as_str(),
        };
        let resp = self
            .http
            .post(self.base_url.clone())
            .query(&[("p", "login")])
            .form(&params)
            .send()
            .await?;
        let body = util::read_ok_text(resp).await?;

        if !body.contains(LOGGED_IN_MARKER) {
            return Err(Error::WrongCredential);
        }
        log::info!("Logged in to STOS as {}", cred.username);
        Ok(())
    }

    /// Uploads `files` as `afile1..N` and returns the response page.
    ///
    /// The judge answers an accepted upload with a page reporting the submission
    /// as processed or pending; anything else is `Error::UploadRejected`.
    pub async fn submit(&self, problem_id: &ProblemId, files: &[SourceFile]) -> Result<String> {
        let mut form = multipart::Form::new()
            .text("code", problem_id.to_string())
            .text("context", self.context.clone());
        for (i, file) in files.iter().enumerate() {
            let part = multipart::Part::bytes(file.content.clone()).file_name(file.filename.clone());
            form = form.part(format!("afile{}", i + 1), part);
        }

        let resp = self
            .http
            .post(self.base_url.clone())
            .query(&[("p", "put")])
            .multipart(form)
            .send()
            .await?;
        let body = util::read_ok_text(resp).await?;

        match upload_ack_marker(&body) {
            Some(marker) => {
                log::debug!("Upload accepted (marker: {:?})", marker);
                Ok(body)
            }
            None => Err(Error::UploadRejected {
                problem_id: problem_id.to_owned(),
                body,
            }),
        }
    }

    pub async fn fetch_status(&self, problem_id: &ProblemId) -> Result<String> {
        let resp = self
            .http
            .get(self.base_url.clone())
            .query(&[("p", "status"), ("probid", problem_id.as_str())])
            .send()
            .await?;
        util::read_ok_text(resp).await
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_client_points_to_stos() {
        let cli = StosClient::with_default_url().unwrap();
        assert_eq!(cli.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(cli.context, DEFAULT_CONTEXT);

        let cli = cli.context("12");
        assert_eq!(cli.context, "12");
    }

    #[test]
    fn upload_is_acknowledged_by_processing_or_pending_only() {
        assert_eq!(
            upload_ack_marker("Zadanie przetwarzane"),
            Some(TransientMarker::Processing)
        );
        assert_eq!(
            upload_ack_marker("Rozwiązanie oczekuje"),
            Some(TransientMarker::Pending)
        );
        assert_eq!(upload_ack_marker("Zgłoszenie w kolejce"), None);
        assert_eq!(upload_ack_marker("Brak uprawnień"), None);
    }
}
