use std::fmt;

/// Supplies the `Authorization` header value for gallery requests.
pub trait GalleryCredentials: Send + Sync {
    fn authorization(&self) -> String;
}

pub struct ClientIdCredentials {
    client_id: String,
}

impl ClientIdCredentials {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }
}

impl GalleryCredentials for ClientIdCredentials {
    fn authorization(&self) -> String {
        format!("Client-ID {}", self.client_id)
    }
}

impl fmt::Debug for ClientIdCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientIdCredentials")
            .field("client_id", &"<redacted>")
            .finish()
    }
}
