//! HTTP client for the notes API.

use std::time::Duration;

use notes_core::models::{Note, NoteInput, ValidNote};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// The four calls the UI makes. Abstracted so the app can be driven
/// without a server.
pub trait NotesApi {
    fn list(&self) -> Result<Vec<Note>, ClientError>;
    fn create(&self, note: &ValidNote) -> Result<Note, ClientError>;
    fn update(&self, id: Uuid, note: &ValidNote) -> Result<Note, ClientError>;
    fn delete(&self, id: Uuid) -> Result<(), ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct NotesClient {
    http: Client,
    base_url: String,
}

impl NotesClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn note_url(&self, id: Uuid) -> String {
        self.url(&format!("/notes/{id}"))
    }
}

/// Turn a non-2xx response into [`ClientError::Status`].
fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .map(|body| body.error)
        .unwrap_or_default();
    Err(ClientError::Status { status, message })
}

fn body(note: &ValidNote) -> NoteInput {
    NoteInput::new(note.title.as_str(), note.content.as_str())
}

impl NotesApi for NotesClient {
    fn list(&self) -> Result<Vec<Note>, ClientError> {
        let response = self.http.get(self.url("/notes")).send()?;
        Ok(check(response)?.json()?)
    }

    fn create(&self, note: &ValidNote) -> Result<Note, ClientError> {
        let response = self.http.post(self.url("/notes")).json(&body(note)).send()?;
        Ok(check(response)?.json()?)
    }

    fn update(&self, id: Uuid, note: &ValidNote) -> Result<Note, ClientError> {
        let response = self.http.put(self.note_url(id)).json(&body(note)).send()?;
        Ok(check(response)?.json()?)
    }

    fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self.http.delete(self.note_url(id)).send()?;
        check(response)?;
        Ok(())
    }
}
