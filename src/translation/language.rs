//! 语言代码定义
//!
//! 服务接受的语言代码是一个固定集合。其中只有英语和四种印度语言
//! （印地语、泰米尔语、卡纳达语、孟加拉语）收录在内置词典中，其余代码
//! 仅在外部翻译服务模式下才有实际意义。

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::translation::error::ValidationError;

/// 受支持的语言代码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Hi,
    Ta,
    Kn,
    Bn,
    Te,
    Ml,
    Gu,
    Mr,
    Pa,
    Or,
    As,
    Fr,
    Es,
    De,
    It,
    Pt,
    Ru,
    Ja,
    Ko,
    Zh,
    Ar,
    Th,
    Vi,
}

impl LanguageCode {
    /// 全部可接受的语言代码
    pub const ALL: [LanguageCode; 24] = [
        LanguageCode::En,
        LanguageCode::Hi,
        LanguageCode::Ta,
        LanguageCode::Kn,
        LanguageCode::Bn,
        LanguageCode::Te,
        LanguageCode::Ml,
        LanguageCode::Gu,
        LanguageCode::Mr,
        LanguageCode::Pa,
        LanguageCode::Or,
        LanguageCode::As,
        LanguageCode::Fr,
        LanguageCode::Es,
        LanguageCode::De,
        LanguageCode::It,
        LanguageCode::Pt,
        LanguageCode::Ru,
        LanguageCode::Ja,
        LanguageCode::Ko,
        LanguageCode::Zh,
        LanguageCode::Ar,
        LanguageCode::Th,
        LanguageCode::Vi,
    ];

    /// 词典收录的非英语语言，顺序即枢轴查找顺序
    pub const DICTIONARY_TARGETS: [LanguageCode; 4] = [
        LanguageCode::Hi,
        LanguageCode::Ta,
        LanguageCode::Kn,
        LanguageCode::Bn,
    ];

    /// 解析语言代码（忽略大小写和首尾空白）
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let code = value.trim().to_lowercase();
        if !is_valid_language_code(&code) {
            return Err(ValidationError::UnsupportedLanguage(value.to_string()));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.as_str() == code)
            .ok_or_else(|| ValidationError::UnsupportedLanguage(value.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Hi => "hi",
            LanguageCode::Ta => "ta",
            LanguageCode::Kn => "kn",
            LanguageCode::Bn => "bn",
            LanguageCode::Te => "te",
            LanguageCode::Ml => "ml",
            LanguageCode::Gu => "gu",
            LanguageCode::Mr => "mr",
            LanguageCode::Pa => "pa",
            LanguageCode::Or => "or",
            LanguageCode::As => "as",
            LanguageCode::Fr => "fr",
            LanguageCode::Es => "es",
            LanguageCode::De => "de",
            LanguageCode::It => "it",
            LanguageCode::Pt => "pt",
            LanguageCode::Ru => "ru",
            LanguageCode::Ja => "ja",
            LanguageCode::Ko => "ko",
            LanguageCode::Zh => "zh",
            LanguageCode::Ar => "ar",
            LanguageCode::Th => "th",
            LanguageCode::Vi => "vi",
        }
    }

    /// 语言的英文名称
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageCode::En => "English",
            LanguageCode::Hi => "Hindi",
            LanguageCode::Ta => "Tamil",
            LanguageCode::Kn => "Kannada",
            LanguageCode::Bn => "Bengali",
            LanguageCode::Te => "Telugu",
            LanguageCode::Ml => "Malayalam",
            LanguageCode::Gu => "Gujarati",
            LanguageCode::Mr => "Marathi",
            LanguageCode::Pa => "Punjabi",
            LanguageCode::Or => "Odia",
            LanguageCode::As => "Assamese",
            LanguageCode::Fr => "French",
            LanguageCode::Es => "Spanish",
            LanguageCode::De => "German",
            LanguageCode::It => "Italian",
            LanguageCode::Pt => "Portuguese",
            LanguageCode::Ru => "Russian",
            LanguageCode::Ja => "Japanese",
            LanguageCode::Ko => "Korean",
            LanguageCode::Zh => "Chinese",
            LanguageCode::Ar => "Arabic",
            LanguageCode::Th => "Thai",
            LanguageCode::Vi => "Vietnamese",
        }
    }

    /// 是否为词典收录的非英语目标语言
    pub fn is_dictionary_target(&self) -> bool {
        Self::DICTIONARY_TARGETS.contains(self)
    }

    /// 是否被内置词典覆盖（包括英语枢轴）
    pub fn in_dictionary(&self) -> bool {
        *self == LanguageCode::En || self.is_dictionary_target()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// 检查语言代码格式（2-3个小写字母）
pub fn is_valid_language_code(code: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[a-z]{2,3}$").expect("language code pattern is valid"))
        .is_match(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(LanguageCode::parse("hi").unwrap(), LanguageCode::Hi);
        assert_eq!(LanguageCode::parse("  TA ").unwrap(), LanguageCode::Ta);
        assert_eq!("Bn".parse::<LanguageCode>().unwrap(), LanguageCode::Bn);
    }

    #[test]
    fn test_parse_rejects_unknown_codes() {
        assert!(matches!(
            LanguageCode::parse("xx"),
            Err(ValidationError::UnsupportedLanguage(code)) if code == "xx"
        ));
        assert!(LanguageCode::parse("").is_err());
        assert!(LanguageCode::parse("hindi").is_err());
        assert!(LanguageCode::parse("h1").is_err());
    }

    #[test]
    fn test_dictionary_coverage() {
        assert!(LanguageCode::En.in_dictionary());
        assert!(!LanguageCode::En.is_dictionary_target());
        assert!(LanguageCode::Kn.is_dictionary_target());
        assert!(!LanguageCode::Fr.in_dictionary());
    }

    #[test]
    fn test_round_trip_through_str() {
        for lang in LanguageCode::ALL {
            assert_eq!(LanguageCode::parse(lang.as_str()).unwrap(), lang);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_codes() {
        let json = serde_json::to_string(&LanguageCode::Kn).unwrap();
        assert_eq!(json, "\"kn\"");
        let parsed: LanguageCode = serde_json::from_str("\"vi\"").unwrap();
        assert_eq!(parsed, LanguageCode::Vi);
    }
}
