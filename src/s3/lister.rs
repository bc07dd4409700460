//! Streaming pagination over `ListObjectsV2` results.

use async_stream::try_stream;
use futures_core::Stream;

use super::client::S3Service;
use super::types::{ObjectPage, S3Error};

/// Stream listing pages under `prefix` until the listing is exhausted.
///
/// Pages are fetched lazily as the stream is polled, so callers that stop
/// early never pay for the remainder of the listing. A page failure is
/// yielded as the final item and ends the stream.
pub fn stream_pages<'a>(
    service: &'a S3Service,
    prefix: &'a str,
) -> impl Stream<Item = Result<ObjectPage, S3Error>> + 'a {
    try_stream! {
        let mut token: Option<String> = None;

        loop {
            let page = service.list_page(prefix, token.as_deref()).await?;
            let next = page.next_token.clone();
            yield page;

            match next {
                Some(value) => token = Some(value),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::{pin_mut, stream::StreamExt};
    use httpmock::{Method::GET, MockServer};

    fn service_for(server: &MockServer) -> S3Service {
        S3Service {
            client: reqwest::Client::builder()
                .user_agent("billdex-test")
                .build()
                .expect("client"),
            bucket: "test-bucket".to_string(),
            region: "us-east-1".to_string(),
            base_url: server.base_url(),
            path_style: true,
            credentials: None,
            page_size: None,
        }
    }

    fn listing_page(keys: &[&str], token: Option<&str>) -> String {
        let mut body = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><ListBucketResult>",
        );
        match token {
            Some(value) => {
                body.push_str("<IsTruncated>true</IsTruncated>");
                body.push_str(&format!(
                    "<NextContinuationToken>{value}</NextContinuationToken>"
                ));
            }
            None => body.push_str("<IsTruncated>false</IsTruncated>"),
        }
        for key in keys {
            body.push_str(&format!(
                "<Contents><Key>{key}</Key><Size>10</Size></Contents>"
            ));
        }
        body.push_str("</ListBucketResult>");
        body
    }

    #[tokio::test]
    async fn follows_continuation_tokens_across_pages() {
        let server = MockServer::start_async().await;
        let service = service_for(&server);

        // The resumed request is the more specific match, so register it first.
        let second = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/test-bucket")
                    .query_param("continuation-token", "page-two");
                then.status(200).body(listing_page(&["raw/b.txt"], None));
            })
            .await;
        let first = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/test-bucket")
                    .query_param("list-type", "2");
                then.status(200)
                    .body(listing_page(&["raw/a.txt"], Some("page-two")));
            })
            .await;

        let stream = stream_pages(&service, "raw").take(4);
        pin_mut!(stream);

        let mut pages = 0;
        let mut keys = Vec::new();
        while let Some(page) = stream.next().await {
            let page = page.expect("listing page");
            pages += 1;
            keys.extend(page.entries.into_iter().map(|entry| entry.key));
        }

        first.assert();
        second.assert();
        assert_eq!(pages, 2);
        assert_eq!(keys, ["raw/a.txt", "raw/b.txt"]);
    }

    #[tokio::test]
    async fn fetches_nothing_until_polled() {
        let server = MockServer::start_async().await;
        let service = service_for(&server);

        let listing = server
            .mock_async(|when, then| {
                when.method(GET).path("/test-bucket");
                then.status(200).body(listing_page(&[], None));
            })
            .await;

        let stream = stream_pages(&service, "raw");
        assert_eq!(listing.hits_async().await, 0);

        pin_mut!(stream);
        let page = stream.next().await.expect("one page").expect("page");
        assert!(page.entries.is_empty());
        assert!(stream.next().await.is_none());
        listing.assert();
    }

    #[tokio::test]
    async fn yields_the_listing_error_and_stops() {
        let server = MockServer::start_async().await;
        let service = service_for(&server);

        server
            .mock_async(|when, then| {
                when.method(GET).path("/test-bucket");
                then.status(500).body("internal error");
            })
            .await;

        let stream = stream_pages(&service, "raw");
        pin_mut!(stream);

        let err = stream
            .next()
            .await
            .expect("one item")
            .expect_err("listing error");
        match err {
            S3Error::UnexpectedStatus { status, .. } => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(stream.next().await.is_none());
    }
}
