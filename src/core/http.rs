//! HTTP utilities for ESPN API communication

use crate::config::EspnCredentials;
use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};

/// Default headers for ESPN requests.
///
/// The session cookies are only attached when credentials are configured;
/// public leagues are readable without them.
pub fn espn_header_map(credentials: Option<&EspnCredentials>) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(creds) = credentials {
        let cookie = format!("SWID={}; espn_s2={}", creds.swid, creds.espn_s2);
        h.insert(COOKIE, HeaderValue::from_str(&cookie)?);
    }
    Ok(h)
}
