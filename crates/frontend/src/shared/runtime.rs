//! Browser-environment accessors kept out of the pure core: current local
//! time and the pseudo-random document-code suffix.

use chrono::NaiveDateTime;

/// Current local date-time taken from the browser clock.
pub fn now_local() -> NaiveDateTime {
    let js_now = js_sys::Date::new_0();
    chrono::NaiveDate::from_ymd_opt(
        js_now.get_full_year() as i32,
        js_now.get_month() + 1,
        js_now.get_date(),
    )
    .and_then(|d| {
        d.and_hms_opt(
            js_now.get_hours(),
            js_now.get_minutes(),
            js_now.get_seconds(),
        )
    })
    .unwrap_or_default()
}

/// Three-digit suffix (100..=999) for generated document codes.
pub fn random_code_suffix() -> u32 {
    (js_sys::Math::random() * 900.0).floor() as u32 + 100
}

/// Milliseconds since the epoch, for the scan cooldown window.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
