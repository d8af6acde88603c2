use std::time::Duration;

/// Downloads a recipe page. Only http(s) URLs are accepted.
#[tracing::instrument(skip(timeout))]
pub async fn fetch(url: &str, timeout: Duration) -> mealbook_shared::Result<String> {
    let parsed = match reqwest::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => parsed,
        _ => mealbook_shared::user!("'{url}' is not an http(s) URL"),
    };

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("mealbook/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(anyhow::Error::from)?;

    let response = match client.get(parsed).send().await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "recipe page download failed");
            mealbook_shared::user!("could not download {url}");
        }
    };

    if !response.status().is_success() {
        mealbook_shared::user!("{url} answered {}", response.status());
    }

    Ok(response.text().await.map_err(anyhow::Error::from)?)
}

/// Local file path or URL, as given on the command line.
pub async fn read_source(source: &str, timeout: Duration) -> mealbook_shared::Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return fetch(source, timeout).await;
    }

    match tokio::fs::read_to_string(source).await {
        Ok(html) => Ok(html),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            mealbook_shared::not_found!("file {source}")
        }
        Err(err) => Err(anyhow::Error::from(err).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_non_http_urls() {
        for url in ["ftp://example.com/recipe", "not a url", "file:///etc/passwd"] {
            let err = fetch(url, Duration::from_secs(1)).await.unwrap_err();
            assert!(matches!(err, mealbook_shared::Error::User(_)), "{url}");
        }
    }

    #[tokio::test]
    async fn test_read_source_from_file() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("page.html");
        std::fs::write(&path, "<h1>Soup</h1>").unwrap();

        let html = read_source(path.to_str().unwrap(), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(html, "<h1>Soup</h1>");

        let err = read_source("missing.html", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, mealbook_shared::Error::NotFound(_)));
    }
}
