use crate::api::{TrackId, TrackServiceClient};
use crate::error::PlayerError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlTemplateElement};

#[wasm_bindgen(js_namespace = bootstrap)]
extern "C" {
    /// The page's Bootstrap modal widget.
    #[wasm_bindgen(js_name = Modal)]
    type BootstrapModal;

    #[wasm_bindgen(constructor, catch, js_class = "Modal")]
    fn new(element: &Element) -> Result<BootstrapModal, JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Modal")]
    fn show(this: &BootstrapModal) -> Result<(), JsValue>;
}

fn js_failure(err: JsValue) -> PlayerError {
    PlayerError::dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Parse `html` and append its first element to `<body>`.
fn insert_fragment(document: &Document, html: &str) -> Result<Element, PlayerError> {
    let template: HtmlTemplateElement = document
        .create_element("template")
        .map_err(js_failure)?
        .dyn_into()
        .map_err(|_| PlayerError::dom("template element unavailable"))?;
    template.set_inner_html(html);

    let first = template
        .content()
        .first_element_child()
        .ok_or(PlayerError::EmptyFragment)?;
    let body = document
        .body()
        .ok_or_else(|| PlayerError::dom("document has no body"))?;
    body.append_child(&first).map_err(js_failure)?;
    Ok(first)
}

/// Fetch the playlist picker for `track`, add it to the page and open it.
pub(crate) async fn show_playlist_modal(
    client: &TrackServiceClient,
    modal_id: &str,
    track: &TrackId,
) -> Result<(), PlayerError> {
    let html = client.fetch_playlist_modal(track).await?;
    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| PlayerError::dom("no document"))?;

    insert_fragment(&document, &html)?;
    let modal_root = document
        .get_element_by_id(modal_id)
        .ok_or_else(|| PlayerError::MissingModal(modal_id.to_string()))?;

    let modal = BootstrapModal::new(&modal_root).map_err(js_failure)?;
    modal.show().map_err(js_failure)
}
