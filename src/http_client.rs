use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

const REQUEST_TIMEOUT_SECS: u64 = 15;

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("inky_fixtures/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build http client")
    })
}

/// GET returning the body text. Non-2xx statuses are errors; `timeout`
/// overrides the client default for this request only.
pub fn get_text(
    url: &str,
    query: &[(&str, String)],
    headers: &[(&str, &str)],
    timeout: Option<Duration>,
) -> Result<String> {
    let mut request = http_client()?.get(url).query(query);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }
    log::debug!("GET {url} {query:?}");

    let resp = request
        .send()
        .with_context(|| format!("request to {url} failed"))?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow!("http {status} from {url}"));
    }
    Ok(body)
}
