//! User-agent classification for the audit trail.
//!
//! Naive case-insensitive substring matching with a fixed priority order;
//! the first matching keyword wins. This intentionally mirrors what the
//! audit log consumers expect rather than attempting real UA parsing.

use crate::models::{BrowserFamily, DeviceClass};

/// Classify the device type from a User-Agent string.
///
/// Priority: Tablet before Mobile, because tablet UAs routinely contain
/// "Mobile" as well (e.g. iPad Safari).
pub fn classify_device(user_agent: &str) -> DeviceClass {
    let ua = user_agent.to_lowercase();
    if ua.contains("ipad") || ua.contains("tablet") {
        DeviceClass::Tablet
    } else if ua.contains("mobile") || ua.contains("android") || ua.contains("iphone") {
        DeviceClass::Mobile
    } else {
        DeviceClass::Desktop
    }
}

/// Classify the browser family from a User-Agent string.
///
/// Priority: Edge before Chrome (Edge UAs contain "Chrome"), Chrome before
/// Safari (Chrome UAs contain "Safari").
pub fn classify_browser(user_agent: &str) -> BrowserFamily {
    let ua = user_agent.to_lowercase();
    if ua.contains("edg") {
        BrowserFamily::Edge
    } else if ua.contains("chrome") || ua.contains("crios") {
        BrowserFamily::Chrome
    } else if ua.contains("firefox") || ua.contains("fxios") {
        BrowserFamily::Firefox
    } else if ua.contains("safari") {
        BrowserFamily::Safari
    } else {
        BrowserFamily::Other
    }
}
