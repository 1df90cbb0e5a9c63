//! Event and command names understood by the host.

/// Outbound command carrying the full main-button configuration.
pub const SETUP_MAIN_BUTTON: &str = "web_app_setup_main_button";
/// Outbound command announcing the app has finished initializing.
pub const WEB_APP_READY: &str = "web_app_ready";
/// Outbound request for the host theme parameters.
pub const REQUEST_THEME: &str = "web_app_request_theme";
/// Outbound request for the host viewport dimensions.
pub const REQUEST_VIEWPORT: &str = "web_app_request_viewport";
/// Outbound command asking the host to close the app.
pub const WEB_APP_CLOSE: &str = "web_app_close";
/// Acknowledgment posted to the parent frame after every accepted envelope.
pub const IFRAME_READY: &str = "iframe_ready";

/// Startup commands, in the order they are sent.
pub const STARTUP_COMMANDS: [&str; 3] = [WEB_APP_READY, REQUEST_THEME, REQUEST_VIEWPORT];

/// Host notification that the main button was pressed.
pub const MAIN_BUTTON_PRESSED: &str = "main_button_pressed";
/// Host notification that the back button was pressed.
pub const BACK_BUTTON_PRESSED: &str = "back_button_pressed";

/// Application event dispatched for [`MAIN_BUTTON_PRESSED`].
pub const MAIN_BUTTON_PRESSED_EVENT: &str = "MainButtonPressed";
/// Application event dispatched for [`BACK_BUTTON_PRESSED`].
pub const BACK_BUTTON_PRESSED_EVENT: &str = "BackButtonPressed";

/// Inbound notifications translated into application events.
pub const TRANSLATED_EVENTS: [(&str, &str); 2] = [
    (MAIN_BUTTON_PRESSED, MAIN_BUTTON_PRESSED_EVENT),
    (BACK_BUTTON_PRESSED, BACK_BUTTON_PRESSED_EVENT),
];
