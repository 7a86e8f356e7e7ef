use utoipa::ToSchema;

/// Form body of a vote. Both fields are optional at the wire level and checked by the handler.
#[derive(serde_derive::Deserialize, ToSchema, Debug)]
pub struct SubmitVoteRequest {
    pub url: Option<String>,
    /// `"up"` records an upvote; anything else, or nothing, records a downvote.
    pub up: Option<String>,
}

impl SubmitVoteRequest {
    /// The url exactly as sent, so it matches the feed's `link`. Blank counts as missing.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn is_up(&self) -> bool {
        self.up.as_deref().map(str::trim) == Some("up")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: Option<&str>, up: Option<&str>) -> SubmitVoteRequest {
        SubmitVoteRequest {
            url: url.map(str::to_string),
            up: up.map(str::to_string),
        }
    }

    #[test]
    fn test_blank_url_is_missing() {
        assert_eq!(request(None, None).url(), None);
        assert_eq!(request(Some("   "), None).url(), None);
        assert_eq!(
            request(Some(" https://i.imgur.com/a.jpg "), None).url(),
            Some(" https://i.imgur.com/a.jpg ")
        );
        assert_eq!(
            request(Some("https://i.imgur.com/a.jpg"), None).url(),
            Some("https://i.imgur.com/a.jpg")
        );
    }

    #[test]
    fn test_only_up_is_an_upvote() {
        assert!(request(None, Some("up")).is_up());
        assert!(!request(None, Some("down")).is_up());
        assert!(!request(None, Some("true")).is_up());
        assert!(!request(None, None).is_up());
    }
}
