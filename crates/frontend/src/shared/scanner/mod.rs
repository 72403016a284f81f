//! Barcode scanning for the stock-adjustment editor.
//!
//! Split in two: [`session`] is the pure scan state machine (phases,
//! cooldown window, duplicate exclusion) and [`camera`] is the browser half
//! (device enumeration, media stream, frame decoding) behind a narrow
//! capability surface.

pub mod camera;
pub mod session;

pub use camera::CameraScanner;
pub use session::{ScanOutcome, ScanPhase, ScanSession, SCAN_COOLDOWN_MS};
