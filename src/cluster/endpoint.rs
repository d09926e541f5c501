//! Endpoint descriptor display.
//!
//! Descriptors carry credentials, so anything that reaches logs or error
//! messages goes through [`redact`] first.

use url::Url;

const MASK: &str = "***";

/// Mask the password of an endpoint descriptor.
///
/// URL descriptors keep everything but the password. For anything else, the
/// part before the last `@` is masked.
pub fn redact(descriptor: &str) -> String {
    if let Ok(mut url) = Url::parse(descriptor) {
        if !url.cannot_be_a_base() {
            if url.password().is_some() {
                let _ = url.set_password(Some(MASK));
            }
            return url.to_string();
        }
    }

    match descriptor.rsplit_once('@') {
        Some((_, host)) => format!("{}@{}", MASK, host),
        None => descriptor.to_string(),
    }
}
