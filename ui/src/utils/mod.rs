/// Returns true if the application is running in development mode.
/// Checks if BACKEND_URL contains "localhost".
pub fn is_dev_mode() -> bool {
    option_env!("BACKEND_URL")
        .map(|url| url.contains("localhost"))
        .unwrap_or(false)
}

/// Make a backend-supplied file name safe to hand to the browser's
/// save dialog: path separators and other path-unsafe characters
/// become underscores, leading/trailing dots and whitespace are
/// stripped.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim().trim_matches('.').trim();
    if trimmed.is_empty() {
        "download".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Human-readable file size for table cells.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

/// Calendar date of a timestamp for table cells.
pub fn format_date(ts: &jiff::Timestamp) -> String {
    ts.strftime("%Y-%m-%d").to_string()
}

/// Materialize fetched bytes as a named file save via a temporary
/// object URL on an anchor element.
pub fn save_file(
    bytes: &[u8],
    mime_type: &str,
    file_name: &str,
) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob =
        web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .ok_or("no window")?
        .document()
        .ok_or("no document")?;
    let anchor: web_sys::HtmlAnchorElement =
        document.create_element("a")?.unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(&sanitize_filename(file_name));
    anchor.click();
    web_sys::Url::revoke_object_url(&url)?;
    Ok(())
}

/// Read the contents of a browser `File` selected in an input element.
pub async fn read_file(
    file: &web_sys::File,
) -> Result<Vec<u8>, wasm_bindgen::JsValue> {
    let buffer =
        wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_unsafe_characters_are_replaced() {
        assert_eq!(
            sanitize_filename("../../etc/passwd"),
            "_.._etc_passwd"
        );
        assert_eq!(sanitize_filename("CV: final?.pdf"), "CV_ final_.pdf");
        assert_eq!(sanitize_filename("a\\b|c<d>e"), "a_b_c_d_e");
    }

    #[test]
    fn empty_or_dot_only_names_fall_back() {
        assert_eq!(sanitize_filename(""), "download");
        assert_eq!(sanitize_filename("..."), "download");
        assert_eq!(sanitize_filename("  .  "), "download");
    }

    #[test]
    fn ordinary_names_pass_through() {
        assert_eq!(sanitize_filename("ijazah-2024.pdf"), "ijazah-2024.pdf");
    }

    #[test]
    fn sizes_format_with_binary_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
