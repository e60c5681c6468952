//! `fetch` transport for store requests.

use pn_editor::remote::{FORM_CONTENT_TYPE, Method};
use pn_editor::{RemoteRequest, Reply, SyncError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// Issue `request` against `url` once. Network-level failures become
/// `SyncError::Transport`; HTTP status is left for the caller to judge.
pub async fn send(url: &str, request: &RemoteRequest) -> Result<Reply, SyncError> {
    send_inner(url, request)
        .await
        .map_err(|e| SyncError::Transport(e.as_string().unwrap_or_else(|| format!("{e:?}"))))
}

async fn send_inner(url: &str, request: &RemoteRequest) -> Result<Reply, JsValue> {
    let init = RequestInit::new();
    init.set_method(request.method().as_str());
    if let Some(body) = request.form_body() {
        init.set_body(&JsValue::from_str(&body));
    }

    let req = Request::new_with_str_and_init(url, &init)?;
    if request.method() == Method::Post {
        req.headers().set("Content-Type", FORM_CONTENT_TYPE)?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp: Response = JsFuture::from(window.fetch_with_request(&req))
        .await?
        .dyn_into()?;
    let body = JsFuture::from(resp.text()?).await?;

    Ok(Reply {
        status: resp.status(),
        body: body.as_string().unwrap_or_default(),
    })
}
