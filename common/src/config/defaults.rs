pub const DEFAULT_ICON: &str = "preferences-desktop-notification";
pub const DEFAULT_TIMEOUT_MS: i32 = 2000;

/// Values a request falls back to for every field not given on the command line.
///
/// The table is built once and handed to [`ArgParse`](super::flags::ArgParse); nothing mutates it
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub application: String,
    pub summary: String,
    pub body: String,
    pub icon: String,
    /// `0` keeps the notification open until dismissed.
    pub timeout_millis: i32,
}
impl Default for Defaults {
    fn default() -> Self {
        Self {
            application: String::new(),
            summary: String::new(),
            body: String::new(),
            icon: DEFAULT_ICON.into(),
            timeout_millis: DEFAULT_TIMEOUT_MS,
        }
    }
}
