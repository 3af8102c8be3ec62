//! 词典查找引擎
//!
//! 在没有配置外部翻译服务时使用的规则式翻译。查找顺序：
//!
//! 1. 规范化输入（小写、去除首尾空白）
//! 2. 直接命中：英语短语 → 目标语言
//! 3. 枢轴命中：某印度语言短语 → 英语 → 目标语言
//! 4. 逐词分解：多个词时逐个查找，未命中的词原样保留
//! 5. 未命中：返回 [`TRANSLATION_NOT_AVAILABLE`]
//!
//! 引擎是纯函数，只读共享词典，可在任意多个请求中并发调用。

use std::sync::Arc;

use crate::translation::language::LanguageCode;
use crate::translation::storage::dictionary::{normalize, Dictionary};

/// 单个词或短语无法翻译时返回的哨兵值
pub const TRANSLATION_NOT_AVAILABLE: &str = "Translation not available";

/// 词典查找引擎
#[derive(Debug, Clone)]
pub struct TranslationEngine {
    dictionary: Arc<Dictionary>,
}

impl TranslationEngine {
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self { dictionary }
    }

    /// 使用内置词典创建引擎
    pub fn with_builtin_dictionary() -> Self {
        Self::new(Arc::new(Dictionary::builtin()))
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// 解析翻译，未命中时返回哨兵字符串
    pub fn resolve(&self, text: &str, target: LanguageCode) -> String {
        self.lookup(text, target)
            .unwrap_or_else(|| TRANSLATION_NOT_AVAILABLE.to_string())
    }

    /// 解析翻译，未命中时返回 `None`
    ///
    /// 多词输入总会得到结果（未命中的词原样保留），因此只有单个词
    /// 或整句直接查找失败且无法分解时才返回 `None`。
    pub fn lookup(&self, text: &str, target: LanguageCode) -> Option<String> {
        let normalized = normalize(text);

        if let Some(phrase) = self.lookup_phrase(&normalized, target) {
            return Some(phrase);
        }

        let words: Vec<&str> = normalized.split_whitespace().collect();
        if words.len() > 1 {
            let translated: Vec<String> = words
                .iter()
                .map(|word| {
                    self.lookup_phrase(word, target)
                        .unwrap_or_else(|| (*word).to_string())
                })
                .collect();
            return Some(translated.join(" "));
        }

        None
    }

    /// 对已规范化的短语执行直接查找和枢轴查找，不做分解
    fn lookup_phrase(&self, phrase: &str, target: LanguageCode) -> Option<String> {
        if target.is_dictionary_target() {
            if let Some(translated) = self.dictionary.translation_of(phrase, target) {
                return Some(translated.to_string());
            }
        }

        for lang in LanguageCode::DICTIONARY_TARGETS {
            let Some(english) = self.dictionary.english_of(lang, phrase) else {
                continue;
            };

            if target == LanguageCode::En {
                return Some(english.to_string());
            }

            if target.is_dictionary_target() {
                // 枢轴短语缺失时继续尝试下一种语言
                if let Some(translated) = self.dictionary.translation_of(english, target) {
                    return Some(translated.to_string());
                }
            }
        }

        None
    }
}

impl Default for TranslationEngine {
    fn default() -> Self {
        Self::with_builtin_dictionary()
    }
}
