//! HTTP 请求封装模块
//!
//! 基于 `gloo-net` 实现共享层的 `HttpClient`，供 AI 网关在浏览器中使用。

use async_trait::async_trait;
use foodrescue_shared::genai::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use foodrescue_shared::{AiError, AiResult};
use gloo_net::http::{Request, RequestBuilder};

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

fn builder(req: &HttpRequest) -> RequestBuilder {
    let mut builder = match req.method {
        HttpMethod::Get => Request::get(&req.url),
        HttpMethod::Post => Request::post(&req.url),
    };
    for (key, value) in &req.headers {
        builder = builder.header(key, value);
    }
    builder
}

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> AiResult<HttpResponse> {
        let builder = builder(&req);
        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| AiError::Transport(format!("请求构建失败: {}", e)))?;

        let resp = request
            .send()
            .await
            .map_err(|e| AiError::Transport(format!("网络错误: {}", e)))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| AiError::Transport(format!("响应读取失败: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
