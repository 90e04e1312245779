//! クリック委譲のディスパッチテーブル
//!
//! ドキュメント全体で1つのクリックリスナーを持ち、クリック位置から
//! ルートまでの要素列を `ElementInfo` として受け取って、要素の役割
//! （`ElementRole`）から実行する動作（`ClickAction`）を決める。

/// DOM要素の判定に必要な情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementInfo {
    /// 小文字のタグ名
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub src: Option<String>,
    pub href: Option<String>,
    /// data-event-id
    pub event_id: Option<String>,
    /// data-stack-id
    pub stack_id: Option<String>,
    /// data-scroll-date
    pub scroll_date: Option<String>,
}

/// 要素の役割
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementRole {
    /// img.gallery-image
    GalleryImage,
    /// img.timeline-image
    TimelineImage,
    /// .masonry-item（アーカイブのタイル）
    ArchiveTile,
    /// .stack-item または data-stack-id を持つ要素
    StackTile,
    /// .timeline-item
    TimelineItem,
    /// .lightbox（背景）
    LightboxOverlay,
    /// .close-lightbox
    LightboxClose,
    /// #detailModal（背景）
    DetailModal,
    /// #stackModal（背景）
    StackModal,
    /// .close-modal
    ModalClose,
    DetailTrigger(String),
    StackTrigger(String),
    ScrollTrigger(String),
    /// href="#..." のページ内リンク
    AnchorLink(String),
}

impl ElementRole {
    /// 画像ライトボックスの対象外となるコンテナ（独自モーダルを持つ）
    pub fn owns_modal(&self) -> bool {
        matches!(
            self,
            ElementRole::ArchiveTile | ElementRole::StackTile | ElementRole::TimelineItem
        )
    }
}

impl ElementInfo {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn is_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// この要素が持つ役割（複数可）
    pub fn roles(&self) -> Vec<ElementRole> {
        let mut roles = Vec::new();

        if self.tag == "img" {
            if self.has_class("gallery-image") {
                roles.push(ElementRole::GalleryImage);
            }
            if self.has_class("timeline-image") {
                roles.push(ElementRole::TimelineImage);
            }
        }
        if self.has_class("masonry-item") {
            roles.push(ElementRole::ArchiveTile);
        }
        if self.has_class("stack-item") || self.stack_id.is_some() {
            roles.push(ElementRole::StackTile);
        }
        if self.has_class("timeline-item") {
            roles.push(ElementRole::TimelineItem);
        }
        if self.has_class("lightbox") {
            roles.push(ElementRole::LightboxOverlay);
        }
        if self.has_class("close-lightbox") {
            roles.push(ElementRole::LightboxClose);
        }
        if self.is_id("detailModal") {
            roles.push(ElementRole::DetailModal);
        }
        if self.is_id("stackModal") {
            roles.push(ElementRole::StackModal);
        }
        if self.has_class("close-modal") {
            roles.push(ElementRole::ModalClose);
        }
        if let Some(id) = self.event_id.as_deref().filter(|v| !v.is_empty()) {
            roles.push(ElementRole::DetailTrigger(id.to_string()));
        }
        if let Some(id) = self.stack_id.as_deref().filter(|v| !v.is_empty()) {
            roles.push(ElementRole::StackTrigger(id.to_string()));
        }
        if let Some(date) = self.scroll_date.as_deref().filter(|v| !v.is_empty()) {
            roles.push(ElementRole::ScrollTrigger(date.to_string()));
        }
        if self.tag == "a" {
            if let Some(href) = self.href.as_deref().filter(|h| h.starts_with('#')) {
                roles.push(ElementRole::AnchorLink(href.to_string()));
            }
        }

        roles
    }
}

/// クリックに対する動作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    OpenLightbox { src: String },
    CloseLightbox,
    OpenDetail { event_id: String },
    CloseDetail,
    /// 親要素のハンドラに伝播させない（preventDefault + stopPropagation）
    OpenStack { stack_id: String },
    CloseStack,
    ScrollToEvent { date: String },
    /// "#" を除いた要素ID
    ScrollToAnchor { target_id: String },
    Ignore,
}

/// クリックされた要素からルートまでの列（先頭がクリック対象）から動作を決定
pub fn resolve_click(path: &[ElementInfo]) -> ClickAction {
    let Some(target) = path.first() else {
        return ClickAction::Ignore;
    };
    let target_roles = target.roles();
    let has = |role: &ElementRole| target_roles.contains(role);

    // 背景・閉じるボタンは対象要素そのものがクリックされた場合のみ
    if has(&ElementRole::LightboxClose) || has(&ElementRole::LightboxOverlay) {
        return ClickAction::CloseLightbox;
    }
    if has(&ElementRole::DetailModal) {
        return ClickAction::CloseDetail;
    }
    if has(&ElementRole::StackModal) {
        return ClickAction::CloseStack;
    }
    if has(&ElementRole::ModalClose) {
        for role in path.iter().flat_map(ElementInfo::roles) {
            match role {
                ElementRole::DetailModal => return ClickAction::CloseDetail,
                ElementRole::StackModal => return ClickAction::CloseStack,
                _ => {}
            }
        }
    }

    if has(&ElementRole::GalleryImage) || has(&ElementRole::TimelineImage) {
        let inside_tile = path[1..]
            .iter()
            .flat_map(ElementInfo::roles)
            .any(|role| role.owns_modal());
        if !inside_tile {
            if let Some(src) = target.src.clone().filter(|s| !s.is_empty()) {
                return ClickAction::OpenLightbox { src };
            }
        }
    }

    // 最も近いトリガー要素を採用
    for element in path {
        for role in element.roles() {
            match role {
                ElementRole::StackTrigger(stack_id) => return ClickAction::OpenStack { stack_id },
                ElementRole::DetailTrigger(event_id) => return ClickAction::OpenDetail { event_id },
                ElementRole::ScrollTrigger(date) => return ClickAction::ScrollToEvent { date },
                ElementRole::AnchorLink(href) if href.len() > 1 => {
                    return ClickAction::ScrollToAnchor { target_id: href[1..].to_string() }
                }
                _ => {}
            }
        }
    }

    ClickAction::Ignore
}

/// Escapeキーでモーダル類を閉じる
pub fn is_dismiss_key(key: &str) -> bool {
    key == "Escape"
}
