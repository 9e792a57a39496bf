use serde::{Deserialize, Serialize};

pub type Headers = Vec<(String, String)>;

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

fn default_request_headers() -> [(String, String); 1] {
    use http::header;

    [(header::ACCEPT.to_string(), mime_json().to_string())]
}

const fn mime_json() -> &'static str {
    "application/json"
}

#[derive(Debug)]
pub struct Request {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestContent>,
}

pub enum RequestContent {
    Json(serde_json::Value),
}

impl std::fmt::Debug for RequestContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Json(_) => "JsonRequestBody",
        })
    }
}

impl From<serde_json::Value> for RequestContent {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug)]
pub struct RequestBuilder {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestContent>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::Get,
            url: String::with_capacity(1024),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn attach_default_headers(mut self) -> Self {
        self.headers.extend(default_request_headers());
        self
    }

    pub fn header(mut self, header: &str, value: &str) -> Self {
        self.headers.push((header.into(), value.into()));
        self
    }

    pub fn set_body<T: Into<RequestContent>>(mut self, body: T) -> Self {
        self.body.replace(body.into());
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_attaches_default_headers() {
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url("http://localhost:8080/api/merchant/create")
            .attach_default_headers()
            .set_body(serde_json::json!({ "merchantName": "Cafe X" }))
            .build();

        assert_eq!(request.method, Method::Post);
        assert!(request
            .headers
            .iter()
            .any(|(name, value)| name == "accept" && value == "application/json"));
        assert!(matches!(request.body, Some(RequestContent::Json(_))));
    }

    #[test]
    fn test_method_display_is_uppercase() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!("POST".parse::<Method>().ok(), Some(Method::Post));
    }
}
