use web_sys::window;

pub fn get_api_base_url() -> String {
    // In production the reward service serves the page itself, so relative
    // URLs work; during development the wasm bundle runs on a separate dev
    // server and has to reach the service explicitly.
    if let Some(window) = window() {
        if let Ok(location) = window.location().host() {
            if !location.contains("127.0.0.1") && !location.contains("localhost") {
                return "".to_string();
            }

            let protocol = window
                .location()
                .protocol()
                .unwrap_or_else(|_| "http:".to_string());

            return format!("{}//{}", protocol, location);
        }
    }

    // Default to 127.0.0.1 for development
    "http://127.0.0.1:3000".to_string()
}
