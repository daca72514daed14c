//! WASM bindings for resume extraction and portfolio rendering.
//!
//! This crate exposes the folio pipeline to browsers: upload bytes in,
//! profile JSON out, and a rendered site back from an edited profile.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use folio_core::{ExtractionError, PortfolioRenderer, PortfolioSite, ProfileAssembler, ProfileRecord, TemplateCatalog};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Error shape seen by JavaScript callers.
#[derive(Debug, Serialize)]
struct BindingError {
    kind: &'static str,
    message: String,
    remediation: &'static str,
}

impl BindingError {
    fn invalid_profile(message: impl ToString) -> Self {
        Self {
            kind: "invalid_profile",
            message: message.to_string(),
            remediation: "Pass a profile object returned by extractProfile or parseText.",
        }
    }

    fn serialization(message: impl ToString) -> Self {
        Self {
            kind: "serialization",
            message: message.to_string(),
            remediation: "Report this error; the result could not be converted for JavaScript.",
        }
    }

    fn into_js(self) -> JsValue {
        match serde_wasm_bindgen::to_value(&self) {
            Ok(value) => value,
            Err(_) => JsValue::from_str(&self.message),
        }
    }
}

impl From<ExtractionError> for BindingError {
    fn from(err: ExtractionError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            remediation: err.remediation(),
        }
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| BindingError::serialization(e).into_js())
}

fn report(err: ExtractionError) -> JsValue {
    web_sys::console::error_1(&JsValue::from_str(&format!("folio: {err}")));
    BindingError::from(err).into_js()
}

fn run_extraction(bytes: &[u8], hint: &str) -> Result<JsValue, JsValue> {
    let record = ProfileAssembler::default()
        .extract_profile(bytes, hint)
        .map_err(report)?;
    to_js(&record)
}

/// Extract a profile from an uploaded PDF or DOCX.
///
/// `hint` is the file name or MIME type of the upload.
#[wasm_bindgen(js_name = extractProfile)]
pub fn extract_profile(bytes: &[u8], hint: &str) -> Result<JsValue, JsValue> {
    run_extraction(bytes, hint)
}

/// Promise-returning variant of [`extract_profile`].
#[wasm_bindgen(js_name = extractProfileAsync)]
pub fn extract_profile_async(bytes: Vec<u8>, hint: String) -> js_sys::Promise {
    future_to_promise(async move { run_extraction(&bytes, &hint) })
}

/// Parse already-extracted resume text into a profile.
#[wasm_bindgen(js_name = parseText)]
pub fn parse_text(text: &str) -> Result<JsValue, JsValue> {
    let record = ProfileAssembler::default()
        .assemble_text(text)
        .map_err(report)?;
    to_js(&record)
}

fn render(profile: JsValue, template_id: &str, target_role: Option<String>) -> Result<PortfolioSite, JsValue> {
    let record: ProfileRecord = serde_wasm_bindgen::from_value(profile)
        .map_err(|e| BindingError::invalid_profile(e).into_js())?;

    let year = js_sys::Date::new_0().get_full_year() as i32;
    let renderer = PortfolioRenderer::new().with_copyright_year(year);
    Ok(renderer.render(&record, template_id, target_role.as_deref()))
}

/// Render a profile into `{html, css, templateId}`.
#[wasm_bindgen(js_name = renderPortfolio)]
pub fn render_portfolio(
    profile: JsValue,
    template_id: &str,
    target_role: Option<String>,
) -> Result<JsValue, JsValue> {
    let site = render(profile, template_id, target_role)?;
    to_js(&site)
}

/// Render a profile into one HTML document with the stylesheet inlined.
#[wasm_bindgen(js_name = previewDocument)]
pub fn preview_document(
    profile: JsValue,
    template_id: &str,
    target_role: Option<String>,
) -> Result<String, JsValue> {
    Ok(render(profile, template_id, target_role)?.preview_document())
}

/// List the built-in templates with their palettes.
#[wasm_bindgen(js_name = listTemplates)]
pub fn list_templates() -> Result<JsValue, JsValue> {
    let templates: Vec<_> = TemplateCatalog::new().iter().collect();
    to_js(&templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const RESUME: &str = "Jane Q. Doe\n\
        Senior Backend Engineer\n\
        jane.doe@example.com\n\
        (555) 234-5678\n\
        Portland, OR\n\
        \n\
        EXPERIENCE\n\
        Globex Payments | Senior Backend Engineer | 2020 - Present\n\
        \n\
        SKILLS\n\
        Rust, Python, PostgreSQL, Leadership";

    fn field(value: &JsValue, path: &[&str]) -> JsValue {
        path.iter().fold(value.clone(), |current, key| {
            js_sys::Reflect::get(&current, &JsValue::from_str(key)).unwrap()
        })
    }

    #[wasm_bindgen_test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_list_templates() {
        let templates = js_sys::Array::from(&list_templates().unwrap());
        assert_eq!(templates.length(), 4);
        assert_eq!(field(&templates.get(0), &["id"]).as_string().unwrap(), "modern");
    }

    #[wasm_bindgen_test]
    fn test_parse_text() {
        let profile = parse_text(RESUME).unwrap();
        assert_eq!(
            field(&profile, &["personalInfo", "name"]).as_string().unwrap(),
            "Jane Q. Doe"
        );
    }

    #[wasm_bindgen_test]
    fn test_parse_text_error_shape() {
        let err = parse_text("Jane Doe").unwrap_err();
        assert_eq!(field(&err, &["kind"]).as_string().unwrap(), "insufficient_text");
        assert!(field(&err, &["remediation"]).as_string().unwrap().contains("text-based"));
    }

    #[wasm_bindgen_test]
    fn test_extract_profile_unsupported() {
        let err = extract_profile(b"plain text", "notes.txt").unwrap_err();
        assert_eq!(field(&err, &["kind"]).as_string().unwrap(), "unsupported_format");
    }

    #[wasm_bindgen_test]
    fn test_render_portfolio() {
        let profile = parse_text(RESUME).unwrap();
        let site = render_portfolio(profile.clone(), "creative", Some("Staff Engineer".into())).unwrap();
        assert_eq!(field(&site, &["templateId"]).as_string().unwrap(), "creative");
        assert!(field(&site, &["html"]).as_string().unwrap().contains("Staff Engineer"));

        let preview = preview_document(profile, "creative", None).unwrap();
        assert!(preview.contains("<style>"));
    }

    #[wasm_bindgen_test]
    fn test_render_rejects_bad_profile() {
        let err = render_portfolio(JsValue::from_str("nope"), "modern", None).unwrap_err();
        assert_eq!(field(&err, &["kind"]).as_string().unwrap(), "invalid_profile");
    }
}
