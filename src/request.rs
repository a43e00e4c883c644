use std::time::Duration;

use reqwest::Client;

use crate::Result;

/// Requests a page and returns a `Result<String>` containing the HTML.
/// A non-success status or a timeout propagates as an error; no retries.
pub(crate) async fn fetch_page_html(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<String> {
    let res = client
        .get(url)
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?;
    let html = res.text().await?;
    Ok(html)
}
