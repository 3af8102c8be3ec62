//! 内置双语词典
//!
//! 词典以英语为枢轴：每个英语短语对应四种印度语言的译文，反向映射
//! （印度语言 → 英语）在构建时从正向条目推导，因此两个方向始终一致。
//! 词典在进程启动时构建一次，之后只读，通过 `Arc` 在请求之间共享。

use std::collections::HashMap;

use crate::translation::language::LanguageCode;

/// 一条词典条目：英语短语及其在各词典语言中的译文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    pub english: String,
    pub translations: HashMap<LanguageCode, String>,
}

/// 内置词典数据，列顺序与 `LanguageCode::DICTIONARY_TARGETS` 一致（hi, ta, kn, bn）
const BUILTIN_ENTRIES: &[(&str, [&str; 4])] = &[
    ("hello", ["नमस्ते", "வணக்கம்", "ನಮಸ್ಕಾರ", "নমস্কার"]),
    ("goodbye", ["अलविदा", "பிரியாவிடை", "ವಿದಾಯ", "বিদায়"]),
    ("thank you", ["धन्यवाद", "நன்றி", "ಧನ್ಯವಾದಗಳು", "ধন্যবাদ"]),
    ("good morning", ["शुभ प्रभात", "காலை வணக்கம்", "ಶುಭೋದಯ", "সুপ্রভাত"]),
    ("good night", ["शुभ रात्रि", "இனிய இரவு", "ಶುಭ ರಾತ್ರಿ", "শুভ রাত্রি"]),
    (
        "how are you",
        ["आप कैसे हैं", "நீங்கள் எப்படி இருக்கிறீர்கள்", "ನೀವು ಹೇಗಿದ್ದೀರಿ", "আপনি কেমন আছেন"],
    ),
    ("please", ["कृपया", "தயவு செய்து", "ದಯವಿಟ್ಟು", "দয়া করে"]),
    ("sorry", ["माफ़ कीजिये", "மன்னிக்கவும்", "ಕ್ಷಮಿಸಿ", "ক্ষমা করুন"]),
    ("yes", ["हाँ", "ஆம்", "ಹೌದು", "হ্যাঁ"]),
    ("no", ["नहीं", "இல்லை", "ಇಲ್ಲ", "না"]),
    ("i", ["मैं", "நான்", "ನಾನು", "আমি"]),
    ("you", ["आप", "நீங்கள்", "ನೀವು", "আপনি"]),
    ("am", ["हूँ", "இருக்கிறேன்", "ಇದ್ದೇನೆ", "আছি"]),
    ("is", ["है", "இருக்கிறது", "ಇದೆ", "আছে"]),
    ("are", ["हैं", "இருக்கிறீர்கள்", "ಇದ್ದೀರಿ", "আছেন"]),
    ("good", ["अच्छा", "நல்ல", "ಒಳ್ಳೆಯ", "ভাল"]),
    ("fine", ["ठीक", "நன்றாக", "ಚೆನ್ನಾಗಿ", "ভাল"]),
    ("happy", ["खुश", "மகிழ்ச்சி", "ಸಂತೋಷ", "খুশি"]),
    ("sad", ["दुखी", "சோகம்", "ದುಃಖ", "দুঃখী"]),
    ("today", ["आज", "இன்று", "ಇಂದು", "আজ"]),
    ("tomorrow", ["कल", "நாளை", "ನಾಳೆ", "আগামীকাল"]),
    ("friend", ["दोस्त", "நண்பர்", "ಸ್ನೇಹಿತ", "বন্ধু"]),
    ("family", ["परिवार", "குடும்பம்", "ಕುಟುಂಬ", "পরিবার"]),
    ("food", ["खाना", "உணவு", "ಆಹಾರ", "খাবার"]),
    ("water", ["पानी", "தண்ணீர்", "ನೀರು", "পানি"]),
];

/// 不可变的双语词典
///
/// 构建完成后没有任何修改接口；并发读取无需加锁。
#[derive(Debug, Clone)]
pub struct Dictionary {
    /// 英语短语 → {语言 → 译文}
    forward: HashMap<String, HashMap<LanguageCode, String>>,
    /// 语言 → {译文 → 英语短语}
    reverse: HashMap<LanguageCode, HashMap<String, String>>,
    /// 按编写顺序保存的英语短语
    order: Vec<String>,
}

impl Dictionary {
    /// 使用内置词典数据构建
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_ENTRIES.iter().map(|(english, phrases)| {
            let translations = LanguageCode::DICTIONARY_TARGETS
                .iter()
                .copied()
                .zip(phrases.iter().map(|p| p.to_string()))
                .collect();
            TranslationEntry {
                english: english.to_string(),
                translations,
            }
        }))
    }

    /// 从条目构建词典
    ///
    /// 所有键都经过规范化（小写、去除首尾空白）。重复的键以最后一次
    /// 定义为准，这同样适用于推导出的反向映射。
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = TranslationEntry>,
    {
        let mut forward: HashMap<String, HashMap<LanguageCode, String>> = HashMap::new();
        let mut reverse: HashMap<LanguageCode, HashMap<String, String>> = LanguageCode::DICTIONARY_TARGETS
            .iter()
            .map(|lang| (*lang, HashMap::new()))
            .collect();
        let mut order = Vec::new();

        for entry in entries {
            let english = normalize(&entry.english);
            if english.is_empty() {
                continue;
            }

            let mut translations = HashMap::new();
            for (lang, phrase) in entry.translations {
                if !lang.is_dictionary_target() {
                    continue;
                }
                let phrase = normalize(&phrase);
                if let Some(map) = reverse.get_mut(&lang) {
                    map.insert(phrase.clone(), english.clone());
                }
                translations.insert(lang, phrase);
            }

            if forward.insert(english.clone(), translations).is_none() {
                order.push(english);
            }
        }

        tracing::debug!("词典构建完成: {} 个英语短语", order.len());

        Self {
            forward,
            reverse,
            order,
        }
    }

    /// 查询英语短语在目标语言中的译文
    pub fn translation_of(&self, english: &str, target: LanguageCode) -> Option<&str> {
        self.forward
            .get(english)
            .and_then(|translations| translations.get(&target))
            .map(String::as_str)
    }

    /// 英语短语是否存在
    pub fn contains_english(&self, english: &str) -> bool {
        self.forward.contains_key(english)
    }

    /// 查询某语言短语对应的英语短语
    pub fn english_of(&self, lang: LanguageCode, phrase: &str) -> Option<&str> {
        self.reverse
            .get(&lang)
            .and_then(|map| map.get(phrase))
            .map(String::as_str)
    }

    /// 按编写顺序遍历词典条目
    pub fn entries(&self) -> impl Iterator<Item = (&str, &HashMap<LanguageCode, String>)> + '_ {
        self.order
            .iter()
            .filter_map(|english| self.forward.get_key_value(english.as_str()))
            .map(|(english, translations)| (english.as_str(), translations))
    }

    /// 英语短语数量
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// 某语言反向映射的条目数量
    pub fn reverse_len(&self, lang: LanguageCode) -> usize {
        self.reverse.get(&lang).map_or(0, HashMap::len)
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

/// 规范化查找键：去除首尾空白并转为小写
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
