//! Browser half of the scanner: device enumeration, media-stream lifecycle
//! and frame decoding via the Shape Detection API, bound as a narrow
//! capability so tests can drive the session without a camera.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    HtmlVideoElement, MediaDeviceInfo, MediaDeviceKind, MediaStream, MediaStreamConstraints,
    MediaStreamTrack,
};

#[wasm_bindgen]
extern "C" {
    /// Browser `BarcodeDetector` (Shape Detection API).
    #[wasm_bindgen(js_name = BarcodeDetector)]
    pub type BarcodeDetector;

    #[wasm_bindgen(constructor, js_class = "BarcodeDetector", catch)]
    pub fn new() -> Result<BarcodeDetector, JsValue>;

    #[wasm_bindgen(method, js_class = "BarcodeDetector", catch)]
    pub fn detect(this: &BarcodeDetector, source: &HtmlVideoElement)
        -> Result<js_sys::Promise, JsValue>;
}

/// Decode the current video frame; `None` when nothing decodes (the normal
/// case for most frames) or when the API is unavailable.
pub async fn decode_frame(detector: &BarcodeDetector, video: &HtmlVideoElement) -> Option<String> {
    let promise = match detector.detect(video) {
        Ok(p) => p,
        Err(e) => {
            log::debug!("barcode detect call failed: {:?}", e);
            return None;
        }
    };
    let detections = match JsFuture::from(promise).await {
        Ok(v) => v,
        Err(e) => {
            // unparsable frame: ignored except for logging
            log::debug!("frame decode rejected: {:?}", e);
            return None;
        }
    };
    let array = js_sys::Array::from(&detections);
    if array.length() == 0 {
        return None;
    }
    let first = array.get(0);
    js_sys::Reflect::get(&first, &JsValue::from_str("rawValue"))
        .ok()
        .and_then(|v| v.as_string())
}

/// Owns the media stream for one editor instance. `stop` is idempotent and
/// is also what the component's `on_cleanup` calls, so an unmount mid-scan
/// still releases the device.
#[derive(Clone)]
pub struct CameraScanner {
    stream: Rc<RefCell<Option<MediaStream>>>,
}

impl CameraScanner {
    pub fn new() -> Self {
        Self {
            stream: Rc::new(RefCell::new(None)),
        }
    }

    /// Acquire the first video input device and bind its stream to the
    /// video surface. Errors are user-facing strings.
    pub async fn start(&self, video: &HtmlVideoElement) -> Result<(), String> {
        let window = web_sys::window().ok_or("Không truy cập được cửa sổ trình duyệt")?;
        let media_devices = window
            .navigator()
            .media_devices()
            .map_err(|_| "Trình duyệt không hỗ trợ camera".to_string())?;

        let devices_promise = media_devices
            .enumerate_devices()
            .map_err(|_| "Không liệt kê được thiết bị camera".to_string())?;
        let devices = JsFuture::from(devices_promise)
            .await
            .map_err(|_| "Không liệt kê được thiết bị camera".to_string())?;

        let device_id = js_sys::Array::from(&devices)
            .iter()
            .filter_map(|d| d.dyn_into::<MediaDeviceInfo>().ok())
            .find(|d| d.kind() == MediaDeviceKind::Videoinput)
            .map(|d| d.device_id())
            .ok_or("Không tìm thấy thiết bị camera!")?;

        let constraints = MediaStreamConstraints::new();
        let video_constraint = js_sys::Object::new();
        js_sys::Reflect::set(
            &video_constraint,
            &JsValue::from_str("deviceId"),
            &JsValue::from_str(&device_id),
        )
        .map_err(|_| "Không tạo được cấu hình camera".to_string())?;
        constraints.set_video(&video_constraint.into());

        let stream_promise = media_devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|_| "Không thể truy cập camera!".to_string())?;
        let stream: MediaStream = JsFuture::from(stream_promise)
            .await
            .map_err(|_| "Không thể truy cập camera!".to_string())?
            .dyn_into()
            .map_err(|_| "Không thể truy cập camera!".to_string())?;

        video.set_src_object(Some(&stream));
        if let Ok(play) = video.play() {
            let _ = JsFuture::from(play).await;
        }

        *self.stream.borrow_mut() = Some(stream);
        Ok(())
    }

    /// Stop all media tracks and detach the video surface. Safe to call
    /// repeatedly or when nothing was started.
    pub fn stop(&self, video: Option<&HtmlVideoElement>) {
        if let Some(stream) = self.stream.borrow_mut().take() {
            for track in stream.get_tracks().iter() {
                if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                    track.stop();
                }
            }
        }
        if let Some(video) = video {
            let _ = video.pause();
            video.set_src_object(None);
        }
    }
}

impl Default for CameraScanner {
    fn default() -> Self {
        Self::new()
    }
}
