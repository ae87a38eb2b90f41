pub(super) fn default_name() -> String {
    "courier".to_string()
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}
pub(super) fn default_poll_timeout() -> f64 {
    0.5
}
pub(super) fn default_allowed_updates() -> Vec<String> {
    vec!["message".into()]
}
pub(super) fn default_parse_mode() -> String {
    "Markdown".to_string()
}
pub(super) fn default_greeting() -> String {
    "Hi! Send me a message and I'll echo it back.".to_string()
}
