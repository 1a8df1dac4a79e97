//! 安全响应头中间件

use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// 添加安全响应头的中间件
///
/// - X-Frame-Options: 防止点击劫持
/// - X-Content-Type-Options: 防止 MIME 类型嗅探
/// - Referrer-Policy: 控制 Referer 头信息
/// - Cache-Control: 页面内容依赖当前 Actor，不允许缓存
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    response
}
