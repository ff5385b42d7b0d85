use std::collections::HashMap;

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};

/// Cookie name/value pairs parsed from the request, available to handlers
/// via `Extension<Cookies>`.
#[derive(Debug, Clone, Default)]
pub struct Cookies(HashMap<String, String>);

impl Cookies {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Pipeline stage 5: parse the Cookie header into a map for downstream
/// handlers. Runs for every request; an absent or malformed header just
/// yields an empty map.
pub async fn parse(mut req: Request, next: Next) -> Response {
    let cookies = req
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(parse_header)
        .unwrap_or_default();
    req.extensions_mut().insert(Cookies(cookies));
    next.run(req).await
}

fn parse_header(raw: &str) -> HashMap<String, String> {
    raw.split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_value_pairs() {
        let cookies = parse_header("session_token=abc123; theme=dark");
        assert_eq!(cookies.get("session_token").map(String::as_str), Some("abc123"));
        assert_eq!(cookies.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn skips_fragments_without_a_value() {
        let cookies = parse_header("lonely; =empty; ok=1");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("ok").map(String::as_str), Some("1"));
    }

    #[test]
    fn empty_header_yields_empty_map() {
        assert!(parse_header("").is_empty());
    }

    #[test]
    fn value_may_contain_equals() {
        let cookies = parse_header("payload=a=b=c");
        assert_eq!(cookies.get("payload").map(String::as_str), Some("a=b=c"));
    }
}
