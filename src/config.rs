// Site-wide constants. Outbound targets can be overridden at build time.

pub const MOBILE_MAX_WIDTH: f64 = 768.0;
pub const TABLET_MAX_WIDTH: f64 = 1024.0;

pub const RESIZE_DEBOUNCE_MS: u32 = 150;

pub const LOADER_DESKTOP_MS: f64 = 3200.0;
pub const LOADER_MOBILE_MS: f64 = 2200.0;
pub const LOADER_EXIT_DELAY_MS: u32 = 400;
pub const LOADER_SESSION_KEY: &str = "studio.loader.seen";

pub const SCROLL_TOP_THRESHOLD: f64 = 0.9;

const DEFAULT_BOOKING_URL: &str = "https://cal.com/north-studio/intro";
const DEFAULT_WHATSAPP_NUMBER: &str = "358401234567";
const WHATSAPP_MESSAGE: &str = "Hi North Studio! I'd like to talk about a new project.";

#[cfg(debug_assertions)]
pub fn loader_time_scale() -> f64 {
    0.5 // Faster loader while developing
}

#[cfg(not(debug_assertions))]
pub fn loader_time_scale() -> f64 {
    1.0
}

pub fn booking_url() -> &'static str {
    option_env!("STUDIO_BOOKING_URL").unwrap_or(DEFAULT_BOOKING_URL)
}

pub fn whatsapp_number() -> &'static str {
    option_env!("STUDIO_WHATSAPP_NUMBER").unwrap_or(DEFAULT_WHATSAPP_NUMBER)
}

/// Chat link with the pre-filled greeting.
pub fn whatsapp_link() -> String {
    format!(
        "https://wa.me/{}?text={}",
        whatsapp_number(),
        urlencoding::encode(WHATSAPP_MESSAGE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whatsapp_link_encodes_message() {
        let link = whatsapp_link();
        assert!(link.starts_with("https://wa.me/"));
        assert!(link.contains("?text=Hi%20North%20Studio%21%20I%27d%20like"));
        assert!(!link.contains(' '));
    }

    #[test]
    fn mobile_loader_is_shorter() {
        assert!(LOADER_MOBILE_MS < LOADER_DESKTOP_MS);
    }
}
