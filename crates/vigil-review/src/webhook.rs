use vigil_core::VigilError;

/// POST the final report to a webhook URL as `text/plain`.
///
/// Single attempt, response body ignored; only transport success and
/// HTTP status are checked. The caller treats failure as recoverable —
/// the stdout report is the primary delivery channel.
///
/// # Errors
///
/// Returns [`VigilError::Webhook`] on transport failure or a non-success
/// status.
pub async fn send_report(url: &str, body: &str) -> Result<(), VigilError> {
    let client = reqwest::Client::new();
    let response = client
        .post(url)
        .header("Content-Type", "text/plain")
        .body(body.to_string())
        .send()
        .await
        .map_err(|e| VigilError::Webhook(format!("POST {url} failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(VigilError::Webhook(format!(
            "webhook returned {status} for {url}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unsupported_url_is_a_webhook_error() {
        // No network involved; reqwest rejects the scheme before sending.
        let err = send_report("ftp://example.com/hook", "report")
            .await
            .unwrap_err();
        assert!(matches!(err, VigilError::Webhook(_)));
    }
}
