mod api;
mod app;
mod components;
mod models;
mod pages;
mod resource;
mod state;
mod storage;
mod util;

use crate::app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::api::ApiClient;
    use crate::storage::{clear_token, load_token, save_token, TOKEN_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_api_client_storage_roundtrip_token() {
        clear_token();

        let mut c = ApiClient::load_from_storage();
        assert!(!c.is_authenticated());

        c.set_token("t1".to_string());
        c.save_to_storage();

        let c2 = ApiClient::load_from_storage();
        assert_eq!(c2.get_token().map(|s| s.as_str()), Some("t1"));

        let mut c3 = ApiClient::load_from_storage();
        c3.logout();
        assert!(ApiClient::load_from_storage().get_token().is_none());
    }

    #[wasm_bindgen_test]
    fn test_token_lives_under_plain_key() {
        save_token("abc");
        let raw = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten());
        assert_eq!(raw.as_deref(), Some("abc"));
        clear_token();
        assert!(load_token().is_none());
    }

    #[wasm_bindgen_test]
    fn test_blank_token_counts_as_signed_out() {
        save_token("   ");
        assert!(load_token().is_none());
        clear_token();
    }
}
