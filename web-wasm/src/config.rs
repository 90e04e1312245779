//! ページ埋め込み設定の読み込み

use gloo::console;
use photo_timeline_common::ArchiveConfig;

use crate::dom::{self, ids};

/// `#archive-config` のdata属性から設定を読む
///
/// 要素がなければ既定値（skip=20, limit=20, total=0）。
/// 不正な属性は警告を出してその項目だけ既定値にする。
pub fn read_archive_config() -> ArchiveConfig {
    let Some(el) = dom::by_id(ids::ARCHIVE_CONFIG) else {
        return ArchiveConfig::default();
    };

    let attr = |name: &str| el.get_attribute(name);
    let (config, errors) = ArchiveConfig::from_attrs(
        attr("data-skip").as_deref(),
        attr("data-limit").as_deref(),
        attr("data-total").as_deref(),
        attr("data-type").as_deref(),
    );
    for e in errors {
        console::warn!(format!("Invalid archive config: {}", e));
    }
    config
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_bad_total_keeps_limit_and_skip() {
        dom::body().expect("body").set_inner_html(
            r#"<div id="archive-config" data-limit="12" data-total="abc" data-type="photo"></div>"#,
        );

        let config = read_archive_config();
        assert_eq!(config.limit, 12);
        assert_eq!(config.initial_skip, 12);
        assert_eq!(config.total, 0);
        assert_eq!(config.media_type.as_deref(), Some("photo"));
    }

    #[wasm_bindgen_test]
    fn wasm_missing_element_uses_default() {
        dom::body().expect("body").set_inner_html("");
        assert_eq!(read_archive_config(), ArchiveConfig::default());
    }
}
