//! ライトボックス（全画面画像ビューア）

use leptos::prelude::*;

use crate::dom;

#[component]
pub fn LightboxOverlay(image: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <div
            class="lightbox"
            style:display=move || if image.with(Option::is_some) { "block" } else { "none" }
        >
            <span class="close-lightbox">"×"</span>
            <img
                class="lightbox-content"
                id="lightbox-img"
                src=move || image.get().unwrap_or_default()
            />
        </div>
    }
}

/// ページ読み込み時に1つだけ生成し、`<body>` 末尾に追加する
#[derive(Clone, Copy)]
pub struct Lightbox {
    image: RwSignal<Option<String>>,
}

impl Lightbox {
    pub fn mount() -> Option<Self> {
        let body = dom::body()?;
        let image = RwSignal::new(None::<String>);
        leptos::mount::mount_to(body, move || view! { <LightboxOverlay image=image /> }).forget();
        Some(Self { image })
    }

    pub fn is_open(&self) -> bool {
        self.image.with(Option::is_some)
    }

    pub fn open(&self, src: String) {
        self.image.set(Some(src));
        dom::lock_scroll();
    }

    pub fn close(&self) {
        if self.is_open() {
            self.image.set(None);
            dom::restore_scroll();
        }
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn overflow() -> String {
        dom::body()
            .and_then(|b| b.style().get_property_value("overflow").ok())
            .unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn wasm_mount_appends_overlay() {
        dom::body().expect("body").set_inner_html("");
        let lightbox = Lightbox::mount().expect("lightbox");

        assert!(dom::by_id("lightbox-img").is_some());
        assert!(!lightbox.is_open());
    }

    #[wasm_bindgen_test]
    fn wasm_open_locks_and_close_restores_scroll() {
        dom::body().expect("body").set_inner_html("");
        dom::restore_scroll();
        let lightbox = Lightbox::mount().expect("lightbox");

        lightbox.open("/static/a.jpg".to_string());
        assert!(lightbox.is_open());
        assert_eq!(overflow(), "hidden");

        lightbox.close();
        assert!(!lightbox.is_open());
        assert_eq!(overflow(), "");
    }

    #[wasm_bindgen_test]
    fn wasm_close_when_closed_keeps_scroll_lock() {
        dom::body().expect("body").set_inner_html("");
        let lightbox = Lightbox::mount().expect("lightbox");

        // 他のモーダルがロック中
        dom::lock_scroll();
        lightbox.close();
        assert_eq!(overflow(), "hidden");
        dom::restore_scroll();
    }
}
