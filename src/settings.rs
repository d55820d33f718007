use web_sys::Document;

use tiltcard_core::WidgetConfig;

pub(crate) const CONFIG_ELEMENT_ID: &str = "widget-config";

/// Build-time defaults, overridden by a JSON object in
/// `<script id="widget-config" type="application/json">` when present.
pub(crate) fn load_config(document: &Document) -> WidgetConfig {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .filter(|text| !text.trim().is_empty());
    let Some(raw) = raw else {
        return WidgetConfig::default();
    };
    match WidgetConfig::from_json_overrides(&raw) {
        Ok(config) => {
            gloo::console::log!("config: applied page overrides");
            config
        }
        Err(err) => {
            gloo::console::warn!("config: ignoring page overrides", err.to_string());
            WidgetConfig::default()
        }
    }
}
