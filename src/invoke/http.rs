use crate::invoke::{FunctionInvoker, InvokeRequest, InvokeResponse};
use anyhow::Result;

pub struct HttpFunctionInvoker {
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl FunctionInvoker for HttpFunctionInvoker {
    async fn invoke(&self, name: &str, request: InvokeRequest) -> Result<InvokeResponse> {
        let url = format!("{}/{}", self.base_url, name);
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await;

        match resp {
            Ok(r) if r.status().is_success() => {
                let parsed: InvokeResponse = r.json().await.unwrap_or_default();
                Ok(parsed)
            }
            Ok(r) => {
                let status = r.status();
                let body = r.text().await.unwrap_or_default();
                Ok(InvokeResponse {
                    success: false,
                    transaction_id: None,
                    status: None,
                    error: Some(format!("HTTP_{}: {}", status.as_u16(), body.chars().take(200).collect::<String>())),
                })
            }
            Err(e) if e.is_timeout() => Ok(InvokeResponse {
                success: false,
                transaction_id: None,
                status: None,
                error: Some("function invocation timeout".to_string()),
            }),
            Err(e) => Ok(InvokeResponse {
                success: false,
                transaction_id: None,
                status: None,
                error: Some(e.to_string()),
            }),
        }
    }
}
