/// Export helpers: client-side CSV for list views and binary downloads for
/// backend-produced Excel/PDF files.
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Types renderable as CSV rows.
pub trait CsvExportable {
    fn headers() -> Vec<&'static str>;
    fn to_csv_row(&self) -> Vec<String>;
}

/// Build a CSV file from `data` and start a browser download.
pub fn export_to_csv<T: CsvExportable>(data: &[T], filename: &str) -> Result<(), String> {
    if data.is_empty() {
        return Err("Không có dữ liệu để xuất".to_string());
    }

    let mut csv_content = String::new();
    // UTF-8 BOM so Excel renders Vietnamese correctly
    csv_content.push('\u{FEFF}');
    csv_content.push_str(&T::headers().join(";"));
    csv_content.push('\n');

    for item in data {
        let escaped: Vec<String> = item.to_csv_row().iter().map(|c| escape_csv_cell(c)).collect();
        csv_content.push_str(&escaped.join(";"));
        csv_content.push('\n');
    }

    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(&csv_content));
    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");
    let blob = Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    download_blob(&blob, filename)
}

/// Download raw bytes the backend produced (`responseType: blob` flows).
pub fn download_bytes(bytes: &[u8], mime: &str, filename: &str) -> Result<(), String> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes).into());
    let properties = BlobPropertyBag::new();
    properties.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    download_blob(&blob, filename)
}

fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Download via a temporary anchor element.
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    let _ = anchor.style().set_property("display", "none");

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    let _ = body.remove_child(&anchor);

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))
}
