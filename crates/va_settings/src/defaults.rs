pub fn default_color() -> String {
    "#FF0000".to_string()
}

pub fn default_time_window_seconds() -> f64 {
    3.0
}

pub fn default_show_all_annotations() -> bool {
    false
}

pub fn default_autosave_on_comment() -> bool {
    true
}

pub fn default_history_depth() -> usize {
    100
}

pub fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

pub fn default_config_path() -> String {
    std::env::var("HOME").unwrap_or_else(|_| ".".to_string())
}
