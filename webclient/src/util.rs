use reqwest::{Response, StatusCode};
use url::Url;

use crate::error::*;

pub fn parse_url(url: impl AsRef<str>) -> Result<Url> {
    match Url::parse(url.as_ref()) {
        Ok(url) => Ok(url),
        Err(e) => Err(Error::InvalidSyntaxUrl {
            url: url.as_ref().to_owned(),
            source: e,
        }),
    }
}

/// Reads the response body, failing unless the status is `200 OK`.
pub async fn read_ok_text(resp: Response) -> Result<String> {
    let got = resp.status();
    if got != StatusCode::OK {
        return Err(Error::UnexpectedResponseCode {
            got,
            expected: StatusCode::OK,
            requested_url: resp.url().to_string(),
        });
    }
    Ok(resp.text().await?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_url() {
        let url = parse_url("https://kaims.pl/~kmocet/stos/index.php").unwrap();
        assert_eq!(url.path(), "/~kmocet/stos/index.php");

        let err = parse_url("kaims.pl/stos").unwrap_err();
        assert!(matches!(err, Error::InvalidSyntaxUrl { .. }));
    }
}
