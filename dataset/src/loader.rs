//! Seam for fetching remote documents. The dataset does not ship an HTTP
//! client; callers plug theirs in through [`DocumentLoader`].

use crate::error::FetchError;

/// Formats asked for when loading a remote document, best first.
pub const ACCEPT: &str = "application/trig;q=1,text/turtle;q=0.8,application/ld+json;q=0.5";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDocument {
    /// Value of the `Content-Type` response header.
    pub content_type: String,
    pub body: Vec<u8>,
}

pub trait DocumentLoader {
    /// Retrieves `uri`. Implementations map any non-success response to
    /// [`FetchError::Status`].
    fn fetch(&self, uri: &str, accept: &str) -> Result<RemoteDocument, FetchError>;
}

impl<F> DocumentLoader for F
where
    F: Fn(&str, &str) -> Result<RemoteDocument, FetchError>,
{
    fn fetch(&self, uri: &str, accept: &str) -> Result<RemoteDocument, FetchError> {
        self(uri, accept)
    }
}

/// Strips the fragment of `uri`.
pub fn defrag(uri: &str) -> &str {
    uri.split_once('#').map_or(uri, |(document, _)| document)
}

#[cfg(test)]
mod test {
    use super::{defrag, DocumentLoader, RemoteDocument, ACCEPT};
    use crate::error::FetchError;

    #[test]
    fn defrag_test() {
        assert_eq!("http://example.org/doc", defrag("http://example.org/doc#me"));
        assert_eq!("http://example.org/doc", defrag("http://example.org/doc"));
        assert_eq!("", defrag("#frag"));
    }

    #[test]
    fn closure_loader_test() {
        let loader = |uri: &str, accept: &str| {
            assert_eq!(ACCEPT, accept);
            if uri.ends_with("missing") {
                Err(FetchError::Status {
                    uri: uri.to_string(),
                    status: 404,
                })
            } else {
                Ok(RemoteDocument {
                    content_type: "text/turtle".into(),
                    body: b"<a> <b> <c> .".to_vec(),
                })
            }
        };
        assert!(loader.fetch("http://example.org/doc", ACCEPT).is_ok());
        assert_eq!(
            Err(FetchError::Status {
                uri: "http://example.org/missing".into(),
                status: 404
            }),
            loader.fetch("http://example.org/missing", ACCEPT)
        );
    }
}
