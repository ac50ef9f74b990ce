//! Blocking HTTP helpers on top of the curl crate (libcurl).
//!
//! Both the completions client and the Wikipedia client go through here so
//! that status handling and error mapping stay the same for every call.

use crate::retry::CallError;
use std::time::Duration;

/// Longest error body kept in a `CallError::Http` message.
const MAX_ERROR_BODY: usize = 512;

/// Raw response: status code and body bytes.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    pub body: Vec<u8>,
}

impl Response {
    /// Convert a non-2xx response into `CallError::Http`.
    pub fn error_for_status(self) -> Result<Self, CallError> {
        if (200..300).contains(&self.status) {
            return Ok(self);
        }
        let mut body = String::from_utf8_lossy(&self.body).trim().to_string();
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        Err(CallError::Http {
            status: self.status,
            body,
        })
    }
}

/// GET `url` with the given extra headers.
pub fn get(url: &str, headers: &[String], timeout: Duration) -> Result<Response, CallError> {
    let mut easy = new_easy(url, headers, timeout)?;
    easy.get(true)?;
    perform(&mut easy)
}

/// POST `body` as JSON to `url` with the given extra headers.
pub fn post_json(
    url: &str,
    headers: &[String],
    body: &[u8],
    timeout: Duration,
) -> Result<Response, CallError> {
    let mut all = Vec::with_capacity(headers.len() + 1);
    all.push("Content-Type: application/json".to_string());
    all.extend(headers.iter().cloned());
    let mut easy = new_easy(url, &all, timeout)?;
    easy.post(true)?;
    easy.post_fields_copy(body)?;
    perform(&mut easy)
}

fn new_easy(
    url: &str,
    headers: &[String],
    timeout: Duration,
) -> Result<curl::easy::Easy, CallError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(5)?;
    easy.useragent(concat!("scriptgen/", env!("CARGO_PKG_VERSION")))?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.timeout(timeout)?;

    let mut list = curl::easy::List::new();
    for h in headers {
        list.append(h)?;
    }
    if !headers.is_empty() {
        easy.http_headers(list)?;
    }
    Ok(easy)
}

fn perform(easy: &mut curl::easy::Easy) -> Result<Response, CallError> {
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    let status = easy.response_code()?;
    Ok(Response { status, body })
}
