//! Reqwest Transport
//!
//! Sends requests to the real API. Works natively and in the browser, where
//! reqwest runs on top of `fetch`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::{ApiRequest, ApiResponse, HttpTransport, Method, RequestBody};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    api_root: String,
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// `api_root` is scheme, host and versioned prefix, e.g. `https://host/api/v1`
    pub fn new(api_root: impl Into<String>) -> Self {
        Self::with_client(api_root, reqwest::Client::new())
    }

    pub fn with_client(api_root: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            api_root: api_root.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn url_for(&self, request: &ApiRequest) -> String {
        let query = request.query_string();
        if query.is_empty() {
            format!("{}{}", self.api_root, request.path)
        } else {
            format!("{}{}?{}", self.api_root, request.path, query)
        }
    }

    fn build_form(form: super::MultipartForm) -> ApiResult<Form> {
        let mut multipart = Form::new();
        for (name, value) in form.fields {
            multipart = multipart.text(name, value);
        }
        for file in form.files {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)
                .map_err(|e| ApiError::validation(format!("Invalid attachment type: {}", e)))?;
            multipart = multipart.part(file.field, part);
        }
        Ok(multipart)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = self.url_for(&request);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, &url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            // Content-Type with the boundary is set by reqwest
            RequestBody::Multipart(form) => builder.multipart(Self::build_form(form)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_includes_encoded_query_only_when_present() {
        let transport = ReqwestTransport::new("https://api.example.com/api/v1/");
        let bare = ApiRequest::new(Method::Get, "/quests/q1");
        assert_eq!(transport.url_for(&bare), "https://api.example.com/api/v1/quests/q1");

        let listed = ApiRequest::new(Method::Get, "/quests")
            .with_query(vec![("key", "night walk".to_string()), ("pageNumber", "0".to_string())]);
        assert_eq!(
            transport.url_for(&listed),
            "https://api.example.com/api/v1/quests?key=night%20walk&pageNumber=0"
        );
    }
}
