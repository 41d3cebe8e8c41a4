//! Built-in catalog of navigable items.
//!
//! The search overlay ranks queries against this static list of pages,
//! sections, FAQs, features and news entries. Titles and keywords are kept
//! in Vietnamese where the UI shows Vietnamese; matching is
//! accent-insensitive (see [`super::normalize`]).

use super::{ItemKind, SearchItem};

fn item(
    id: &str,
    title: &str,
    description: &str,
    keywords: &[&str],
    kind: ItemKind,
    path: &str,
    anchor: Option<&str>,
) -> SearchItem {
    SearchItem {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        kind,
        path: path.to_string(),
        anchor: anchor.map(str::to_string),
    }
}

/// The built-in search catalog.
#[must_use]
pub fn catalog() -> Vec<SearchItem> {
    vec![
        item(
            "home",
            "SOS Miền Trung",
            "Trang chủ của nền tảng điều phối cứu hộ thiên tai",
            &["trang chủ", "home", "sos"],
            ItemKind::Page,
            "/",
            None,
        ),
        item(
            "about",
            "Về chúng tôi",
            "Sứ mệnh và đội ngũ đứng sau SOS Miền Trung",
            &["giới thiệu", "about", "đội ngũ"],
            ItemKind::Page,
            "/about",
            None,
        ),
        item(
            "services",
            "Dịch vụ",
            "Các dịch vụ hỗ trợ cứu hộ và cứu trợ",
            &["dịch vụ", "services", "cứu trợ"],
            ItemKind::Page,
            "/services",
            None,
        ),
        item(
            "news",
            "Tin tức",
            "Tin tức cứu hộ và cảnh báo thiên tai mới nhất",
            &["tin tức", "news", "bão lũ"],
            ItemKind::Page,
            "/news",
            None,
        ),
        item(
            "register",
            "Đăng ký tình nguyện viên",
            "Trở thành tình nguyện viên cứu hộ",
            &["đăng ký", "register", "tình nguyện"],
            ItemKind::Page,
            "/register",
            None,
        ),
        item(
            "profile",
            "Hồ sơ cứu hộ viên",
            "Xem và cập nhật hồ sơ cá nhân của bạn",
            &["hồ sơ", "profile", "cá nhân"],
            ItemKind::Page,
            "/profile",
            None,
        ),
        item(
            "section-mission",
            "Sứ mệnh",
            "Vì sao SOS Miền Trung ra đời",
            &["sứ mệnh", "mission"],
            ItemKind::Section,
            "/about",
            Some("mission"),
        ),
        item(
            "section-partners",
            "Đối tác",
            "Các tổ chức đồng hành cùng chúng tôi",
            &["đối tác", "partners"],
            ItemKind::Section,
            "/about",
            Some("partners"),
        ),
        item(
            "faq-signup",
            "Làm sao để đăng ký làm tình nguyện viên?",
            "Hướng dẫn các bước đăng ký và xác minh hồ sơ",
            &["đăng ký", "tình nguyện viên", "hướng dẫn"],
            ItemKind::Faq,
            "/faq",
            Some("signup"),
        ),
        item(
            "faq-request-help",
            "Làm sao để gửi yêu cầu cứu hộ?",
            "Cách gửi tín hiệu SOS khi cần trợ giúp khẩn cấp",
            &["cứu hộ", "khẩn cấp", "sos"],
            ItemKind::Faq,
            "/faq",
            Some("request-help"),
        ),
        item(
            "faq-donate",
            "Tôi có thể đóng góp như thế nào?",
            "Các hình thức quyên góp và cứu trợ",
            &["quyên góp", "đóng góp", "donate"],
            ItemKind::Faq,
            "/faq",
            Some("donate"),
        ),
        item(
            "feature-map",
            "Bản đồ cứu hộ",
            "Bản đồ thời gian thực các điểm cần trợ giúp",
            &["bản đồ", "map", "vị trí"],
            ItemKind::Feature,
            "/features",
            Some("map"),
        ),
        item(
            "feature-alerts",
            "Cảnh báo thiên tai",
            "Nhận cảnh báo bão lũ theo khu vực",
            &["cảnh báo", "alerts", "bão"],
            ItemKind::Feature,
            "/features",
            Some("alerts"),
        ),
        item(
            "feature-teams",
            "Đội cứu hộ",
            "Ghép nối cứu hộ viên thành đội theo kỹ năng",
            &["đội", "teams", "kỹ năng"],
            ItemKind::Feature,
            "/features",
            Some("teams"),
        ),
        item(
            "news-storm-season",
            "Chuẩn bị cho mùa bão 2026",
            "Hướng dẫn chuẩn bị trước mùa mưa bão",
            &["mùa bão", "chuẩn bị"],
            ItemKind::News,
            "/news/storm-season-2026",
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        let items = catalog();
        assert_eq!(items.len(), 15);
    }

    #[test]
    fn test_catalog_ids_unique() {
        let items = catalog();
        let mut ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_catalog_has_home_item() {
        let items = catalog();
        let home = items.iter().find(|i| i.id == "home").unwrap();
        assert_eq!(home.title, "SOS Miền Trung");
        assert_eq!(home.kind, ItemKind::Page);
    }

    #[test]
    fn test_catalog_covers_all_kinds() {
        let items = catalog();
        for kind in [
            ItemKind::Page,
            ItemKind::Section,
            ItemKind::Faq,
            ItemKind::Feature,
            ItemKind::News,
        ] {
            assert!(
                items.iter().any(|i| i.kind == kind),
                "no catalog item of kind {kind:?}"
            );
        }
    }

    #[test]
    fn test_sections_and_faqs_have_anchors() {
        let items = catalog();
        for i in items
            .iter()
            .filter(|i| matches!(i.kind, ItemKind::Section | ItemKind::Faq))
        {
            assert!(i.anchor.is_some(), "item '{}' is missing an anchor", i.id);
        }
    }
}
