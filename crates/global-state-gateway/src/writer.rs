// Path: crates/global-state-gateway/src/writer.rs

use agora_types::error::GlobalStateError;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Serializes `data` completely before anything is written, so an encoding
/// failure never leaves a partial body behind.
pub fn write_json<T: Serialize + ?Sized>(data: &T) -> Result<Response, GlobalStateError> {
    let mut buf = serde_json::to_vec(data)
        .map_err(|e| GlobalStateError::EncodingFailed(e.to_string()))?;
    buf.push(b'\n');
    Ok((
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        Body::from(buf),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde::Serializer;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refused"))
        }
    }

    #[test]
    fn encoding_failure_is_reported() {
        assert!(matches!(
            write_json(&Unencodable),
            Err(GlobalStateError::EncodingFailed(msg)) if msg.contains("refused")
        ));
    }

    #[tokio::test]
    async fn writes_a_json_body() {
        let resp = write_json(&Vec::<u8>::new()).unwrap();
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
        let bytes = axum::body::to_bytes(resp.into_body(), 64).await.unwrap();
        assert_eq!(&bytes[..], b"[]\n");
    }
}
