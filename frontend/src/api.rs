use bilingual_reader_shared::{config::MANIFEST_PATH, ArticleStore, ReaderError};
use gloo_net::http::{Request, Response};
use js_sys::{Array, Function, Object, Promise, Reflect, Uint8Array};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::config::{asset_path, resource_url, DOCX_STYLE_MAP};

async fn fetch(url: &str) -> Result<Response, String> {
    let response = Request::get(url)
        .header("Cache-Control", "no-cache, no-store, max-age=0")
        .header("Pragma", "no-cache")
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }
    Ok(response)
}

pub async fn fetch_manifest() -> Result<ArticleStore, ReaderError> {
    let url = asset_path(MANIFEST_PATH);
    let body = async {
        fetch(&url)
            .await?
            .text()
            .await
            .map_err(|e| format!("Read error: {:?}", e))
    }
    .await
    .map_err(|cause| {
        warn!(%url, %cause, "manifest request failed");
        ReaderError::ManifestLoad(cause)
    })?;

    let store = ArticleStore::from_manifest_str(&body)?;
    debug!(%url, articles = store.len(), "manifest parsed");
    Ok(store)
}

/// Fetch a DOCX resource and convert it into sanitized HTML.
pub async fn load_docx(path: &str) -> Result<String, ReaderError> {
    let url = resource_url(path);
    let bytes = async {
        fetch(&url)
            .await?
            .binary()
            .await
            .map_err(|e| format!("Read error: {:?}", e))
    }
    .await
    .map_err(|cause| ReaderError::resource_load(path, cause))?;

    let html = convert_docx(&bytes)
        .await
        .map_err(|cause| ReaderError::resource_load(path, cause))?;
    debug!(%url, bytes = bytes.len(), "document converted");
    Ok(sanitize(&html))
}

/// Hand the bytes to the page-global `mammoth` converter.
async fn convert_docx(bytes: &[u8]) -> Result<String, String> {
    let window = web_sys::window().ok_or("no window")?;
    let mammoth = Reflect::get(&window, &JsValue::from_str("mammoth"))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
        .ok_or("DOCX converter is not loaded")?;
    let convert: Function = Reflect::get(&mammoth, &JsValue::from_str("convertToHtml"))
        .ok()
        .and_then(|value| value.dyn_into().ok())
        .ok_or("DOCX converter has no convertToHtml")?;

    let input = Object::new();
    let buffer = Uint8Array::from(bytes).buffer();
    Reflect::set(&input, &JsValue::from_str("arrayBuffer"), &buffer)
        .map_err(|e| format!("Converter input error: {:?}", e))?;

    let style_map: Array = DOCX_STYLE_MAP.iter().map(|rule| JsValue::from_str(rule)).collect();
    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("styleMap"), &style_map)
        .map_err(|e| format!("Converter options error: {:?}", e))?;

    let promise: Promise = convert
        .call2(&mammoth, &input, &options)
        .map_err(|e| format!("Conversion error: {:?}", e))?
        .dyn_into()
        .map_err(|_| "convertToHtml did not return a promise".to_string())?;
    let result = JsFuture::from(promise)
        .await
        .map_err(|e| format!("Conversion error: {:?}", e))?;

    Reflect::get(&result, &JsValue::from_str("value"))
        .ok()
        .and_then(|value| value.as_string())
        .ok_or_else(|| "converter returned no HTML".to_string())
}

/// Strip scripts and event handlers; keep inline images the converter
/// emits as `data:` URLs and the classes `DOCX_STYLE_MAP` puts on titles.
pub fn sanitize(html: &str) -> String {
    ammonia::Builder::default()
        .add_url_schemes(&["data"])
        .add_tag_attributes("h1", &["class"])
        .add_tag_attributes("p", &["class"])
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_map_classes_survive_sanitizing() {
        let html = sanitize(r#"<h1 class="doc-title">T</h1><p class="doc-subtitle">S</p>"#);
        assert_eq!(html, r#"<h1 class="doc-title">T</h1><p class="doc-subtitle">S</p>"#);
    }

    #[test]
    fn scripts_and_handlers_are_stripped() {
        let html = sanitize(r#"<p onclick="x()">ok</p><script>alert(1)</script>"#);
        assert_eq!(html, "<p>ok</p>");
    }

    #[test]
    fn inline_images_keep_data_urls() {
        let html = sanitize(r#"<img src="data:image/png;base64,AAAA">"#);
        assert!(html.contains(r#"src="data:image/png;base64,AAAA""#));
    }
}
