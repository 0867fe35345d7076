use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{ForumMetadata, ReviewPlatform};
use crate::error::{Error, Result};

/// Notes requested per `/notes` call
const PAGE_SIZE: usize = 1000;

#[derive(Debug, Deserialize)]
struct NotesPage {
    #[serde(default)]
    notes: Vec<Note>,
    count: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct Note {
    forum: String,
    #[serde(default)]
    content: Value,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Parse one `/notes` response body into metadata plus the reported total
fn parse_notes_page(body: &str) -> Result<(Vec<ForumMetadata>, Option<usize>)> {
    let page: NotesPage = serde_json::from_str(body)
        .map_err(|e| Error::Platform(format!("invalid notes response: {}", e)))?;
    let notes = page
        .notes
        .into_iter()
        .map(|note| ForumMetadata {
            forum: note.forum,
            submission_content: note.content,
        })
        .collect();
    Ok((notes, page.count))
}

/// Blocking client for the OpenReview REST API
pub struct OpenReviewClient {
    http: Client,
    baseurl: String,
    token: Option<String>,
}

impl OpenReviewClient {
    /// Guest client for `baseurl` (e.g. `https://api.openreview.net`)
    pub fn new(baseurl: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(OpenReviewClient {
            http,
            baseurl: baseurl.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Exchange credentials for a bearer token used on later requests
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let response: LoginResponse = self
            .http
            .post(self.url("/login"))
            .json(&json!({ "id": username, "password": password }))
            .send()?
            .error_for_status()?
            .json()?;
        self.token = Some(response.token);
        info!("Logged in to {} as {}", self.baseurl, username);
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.baseurl, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.http.get(self.url(path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl ReviewPlatform for OpenReviewClient {
    fn fetch_metadata(&self, invitation: &str) -> Result<Vec<ForumMetadata>> {
        let mut all = Vec::new();
        let mut offset = 0usize;

        loop {
            let body = self
                .get("/notes")
                .query(&[
                    ("invitation", invitation.to_string()),
                    ("offset", offset.to_string()),
                    ("limit", PAGE_SIZE.to_string()),
                ])
                .send()?
                .error_for_status()?
                .text()?;
            let (notes, count) = parse_notes_page(&body)?;
            let fetched = notes.len();
            debug!("Fetched {} notes at offset {}", fetched, offset);

            all.extend(notes);
            offset += fetched;

            let done = match count {
                Some(total) => offset >= total,
                None => fetched < PAGE_SIZE,
            };
            if fetched == 0 || done {
                break;
            }
        }

        info!("Retrieved {} notes for {}", all.len(), invitation);
        Ok(all)
    }

    fn fetch_pdf(&self, forum_id: &str) -> Result<Vec<u8>> {
        let bytes = self
            .get("/pdf")
            .query(&[("id", forum_id)])
            .send()?
            .error_for_status()?
            .bytes()?;
        Ok(bytes.to_vec())
    }

    fn fetch_attachment(&self, forum_id: &str, field: &str) -> Result<Option<Vec<u8>>> {
        let response = self
            .get("/attachment")
            .query(&[("id", forum_id), ("name", field)])
            .send()?;

        if response.status().is_client_error() {
            debug!("{} has no {} ({})", forum_id, field, response.status());
            return Ok(None);
        }
        let bytes = response.error_for_status()?.bytes()?;
        Ok(Some(bytes.to_vec()))
    }
}
