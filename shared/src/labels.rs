//! Short-code vocabulary used by the UI controls and its translation into the
//! backend's display labels.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the three independent filter axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Country / region of the author.
    Country,
    /// Knowledge type of the post.
    Type,
    /// Industry / job of the author.
    Industry,
}

impl Dimension {
    /// All dimensions in display order.
    pub const ALL: [Dimension; 3] = [Dimension::Country, Dimension::Type, Dimension::Industry];

    /// Key used in persisted documents and UI data attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Country => "country",
            Dimension::Type => "type",
            Dimension::Industry => "industry",
        }
    }

    /// Heading shown above the dimension's chips.
    pub fn title(self) -> &'static str {
        match self {
            Dimension::Country => "国・地域",
            Dimension::Type => "知見の種類",
            Dimension::Industry => "業界・職種",
        }
    }

    fn table(self) -> &'static [LabelEntry] {
        match self {
            Dimension::Country => COUNTRY_LABELS,
            Dimension::Type => TYPE_LABELS,
            Dimension::Industry => INDUSTRY_LABELS,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "country" => Ok(Dimension::Country),
            "type" => Ok(Dimension::Type),
            "industry" => Ok(Dimension::Industry),
            other => Err(format!("unknown dimension `{other}` (expected country, type or industry)")),
        }
    }
}

struct LabelEntry {
    code: &'static str,
    backend: &'static str,
    chip: &'static str,
}

const fn entry(code: &'static str, backend: &'static str, chip: &'static str) -> LabelEntry {
    LabelEntry {
        code,
        backend,
        chip,
    }
}

const COUNTRY_LABELS: &[LabelEntry] = &[
    entry("usa", "アメリカ合衆国", "🇺🇸 アメリカ"),
    entry("singapore", "シンガポール", "🇸🇬 シンガポール"),
    entry("uk", "イギリス", "🇬🇧 イギリス"),
    entry("canada", "カナダ", "🇨🇦 カナダ"),
    entry("australia", "オーストラリア", "🇦🇺 オーストラリア"),
    entry("germany", "ドイツ", "🇩🇪 ドイツ"),
    entry("france", "フランス", "🇫🇷 フランス"),
];

const TYPE_LABELS: &[LabelEntry] = &[
    entry("housing", "住居", "🏠 住居"),
    entry("job", "職業", "💼 職業"),
    entry("visa", "ビザ", "📋 ビザ"),
    entry("cost", "生活コスト", "💰 生活コスト"),
    entry("culture", "文化", "🎭 文化"),
    entry("education", "教育", "🎓 教育"),
];

// Labels must match the backend's accepted industry_job values exactly.
const INDUSTRY_LABELS: &[LabelEntry] = &[
    entry("it", "IT・エンジニア", "💻 IT・エンジニア"),
    entry("finance", "金融", "💹 金融"),
    entry("consulting", "コンサル", "📊 コンサル"),
    entry("marketing", "マーケティング", "📱 マーケティング"),
    entry("medical", "医療", "⚕️ 医療"),
    entry("education", "教育", "👨‍🏫 教育"),
    entry("manufacturing", "製造業", "🏭 製造業"),
];

/// Backend display label for `code`, or `None` when the code has no mapping.
pub fn backend_label(dimension: Dimension, code: &str) -> Option<&'static str> {
    dimension
        .table()
        .iter()
        .find(|entry| entry.code == code)
        .map(|entry| entry.backend)
}

/// Reverse lookup used when pre-selecting controls from a server profile.
pub fn code_for_label(dimension: Dimension, label: &str) -> Option<&'static str> {
    dimension
        .table()
        .iter()
        .find(|entry| entry.backend == label)
        .map(|entry| entry.code)
}

/// Decorated chip label; unknown codes are shown as-is.
pub fn chip_label(dimension: Dimension, code: &str) -> String {
    dimension
        .table()
        .iter()
        .find(|entry| entry.code == code)
        .map(|entry| entry.chip.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Every known code of a dimension, in display order.
pub fn codes(dimension: Dimension) -> impl Iterator<Item = &'static str> {
    dimension.table().iter().map(|entry| entry.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_codes_translate_to_backend_labels() {
        assert_eq!(backend_label(Dimension::Country, "usa"), Some("アメリカ合衆国"));
        assert_eq!(backend_label(Dimension::Country, "canada"), Some("カナダ"));
        assert_eq!(backend_label(Dimension::Country, "mars"), None);
    }

    #[test]
    fn education_code_is_resolved_per_dimension() {
        assert_eq!(backend_label(Dimension::Type, "education"), Some("教育"));
        assert_eq!(backend_label(Dimension::Industry, "education"), Some("教育"));
        assert_eq!(chip_label(Dimension::Industry, "education"), "👨‍🏫 教育");
    }

    #[test]
    fn chip_label_falls_back_to_raw_code() {
        assert_eq!(chip_label(Dimension::Country, "usa"), "🇺🇸 アメリカ");
        assert_eq!(chip_label(Dimension::Country, "brazil"), "brazil");
    }

    #[test]
    fn reverse_lookup_and_parsing() {
        assert_eq!(code_for_label(Dimension::Industry, "金融"), Some("finance"));
        assert_eq!(" Industry ".parse::<Dimension>(), Ok(Dimension::Industry));
        assert!("region".parse::<Dimension>().is_err());
        assert_eq!(codes(Dimension::Type).count(), 6);
    }
}
