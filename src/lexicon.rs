//! Static character facts shown in the info panel.
//!
//! Only the nine sample characters offered as example tiles are covered; any
//! other character resolves every field to [`UNKNOWN`].

/// Sentinel shown for fields we have no data for.
pub const UNKNOWN: &str = "未知";

/// (hanzi, stroke count, pinyin with tone marks, radical)
pub const SAMPLE_HANZI: &[(char, u8, &str, &str)] = &[
    ('永', 5, "yǒng", "水"),
    ('福', 13, "fú", "示"),
    ('爱', 10, "ài", "心"),
    ('中', 4, "zhōng", "丨"),
    ('国', 8, "guó", "囗"),
    ('春', 9, "chūn", "日"),
    ('夏', 10, "xià", "夊"),
    ('秋', 9, "qiū", "禾"),
    ('冬', 5, "dōng", "冫"),
];

/// Everything the info panel knows about one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharInfo {
    pub character: char,
    pub stroke_count: Option<u8>,
    pub pinyin: Option<&'static str>,
    pub radical: Option<&'static str>,
}

impl CharInfo {
    pub fn stroke_count_label(&self) -> String {
        self.stroke_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn pinyin_label(&self) -> &'static str {
        self.pinyin.unwrap_or(UNKNOWN)
    }

    pub fn radical_label(&self) -> &'static str {
        self.radical.unwrap_or(UNKNOWN)
    }

    /// Markup for the `#stroke-info` panel.
    pub fn to_panel_html(&self) -> String {
        format!(
            "<p><strong>当前汉字：</strong>{}</p>\
             <p><strong>笔画数：</strong>{}</p>\
             <p><strong>拼音：</strong>{}</p>\
             <p><strong>部首：</strong>{}</p>",
            escape_html(self.character),
            self.stroke_count_label(),
            self.pinyin_label(),
            self.radical_label(),
        )
    }
}

pub fn lookup(ch: char) -> CharInfo {
    match SAMPLE_HANZI.iter().find(|(h, ..)| *h == ch) {
        Some(&(character, strokes, pinyin, radical)) => CharInfo {
            character,
            stroke_count: Some(strokes),
            pinyin: Some(pinyin),
            radical: Some(radical),
        },
        None => CharInfo {
            character: ch,
            stroke_count: None,
            pinyin: None,
            radical: None,
        },
    }
}

// The panel is written with innerHTML and the character comes straight from the text input.
fn escape_html(ch: char) -> String {
    match ch {
        '<' => "&lt;".into(),
        '>' => "&gt;".into(),
        '&' => "&amp;".into(),
        '"' => "&quot;".into(),
        '\'' => "&#39;".into(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yong_has_tabulated_facts() {
        let info = lookup('永');
        assert_eq!(info.stroke_count_label(), "5");
        assert_eq!(info.pinyin_label(), "yǒng");
        assert_eq!(info.radical_label(), "水");
    }

    #[test]
    fn unknown_character_uses_sentinel_everywhere() {
        let info = lookup('x');
        assert_eq!(info.stroke_count_label(), UNKNOWN);
        assert_eq!(info.pinyin_label(), UNKNOWN);
        assert_eq!(info.radical_label(), UNKNOWN);
    }

    #[test]
    fn panel_html_escapes_markup_characters() {
        let html = lookup('<').to_panel_html();
        assert!(html.contains("&lt;"));
        assert!(!html.contains("</strong><</p>"));
    }

    #[test]
    fn panel_html_lists_all_fields() {
        let html = lookup('福').to_panel_html();
        assert!(html.contains("<strong>当前汉字：</strong>福"));
        assert!(html.contains("<strong>笔画数：</strong>13"));
        assert!(html.contains("<strong>拼音：</strong>fú"));
        assert!(html.contains("<strong>部首：</strong>示"));
    }
}
