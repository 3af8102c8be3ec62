//! 词典查找引擎集成测试
//!
//! 覆盖直接命中、枢轴命中、逐词分解与未命中的完整行为

use std::collections::HashMap;
use std::sync::Arc;

use bhashantar::translation::{
    resolve, Dictionary, LanguageCode, TranslationEngine, TranslationEntry, TRANSLATION_NOT_AVAILABLE,
};

fn entry(english: &str, translations: &[(LanguageCode, &str)]) -> TranslationEntry {
    TranslationEntry {
        english: english.to_string(),
        translations: translations
            .iter()
            .map(|(lang, phrase)| (*lang, phrase.to_string()))
            .collect::<HashMap<_, _>>(),
    }
}

/// 每个词典短语都能通过英语枢轴翻译到其他任意词典语言
#[test]
fn test_pivot_round_trip_for_every_pair() {
    let engine = TranslationEngine::with_builtin_dictionary();
    let dictionary = engine.dictionary();
    let mut checked = 0;

    for (english, translations) in dictionary.entries() {
        for (&source, phrase) in translations {
            // 孟加拉语 "ভাল" 同时表示 good 与 fine，反向映射以最后定义（fine）为准
            let pivot = if source == LanguageCode::Bn && phrase == "ভাল" {
                "fine"
            } else {
                english
            };

            assert_eq!(
                engine.resolve(phrase, LanguageCode::En),
                pivot,
                "{} ({}) → en",
                phrase,
                source
            );

            for target in LanguageCode::DICTIONARY_TARGETS {
                if target == source {
                    continue;
                }
                let expected = dictionary.translation_of(pivot, target).unwrap();
                assert_eq!(
                    engine.resolve(phrase, target),
                    expected,
                    "{} ({}) → {}",
                    phrase,
                    source,
                    target
                );
                checked += 1;
            }
        }
    }

    assert_eq!(checked, 25 * 4 * 3);
}

#[test]
fn test_english_to_every_dictionary_language() {
    let engine = TranslationEngine::default();
    let expected = [
        (LanguageCode::Hi, "नमस्ते"),
        (LanguageCode::Ta, "வணக்கம்"),
        (LanguageCode::Kn, "ನಮಸ್ಕಾರ"),
        (LanguageCode::Bn, "নমস্কার"),
    ];
    for (target, phrase) in expected {
        assert_eq!(engine.resolve("HELLO", target), phrase);
    }
}

#[test]
fn test_word_by_word_examples() {
    assert_eq!(resolve("hello world", LanguageCode::Hi), "नमस्ते world");
    assert_eq!(resolve("good food today", LanguageCode::Bn), "ভাল খাবার আজ");
    // 每个词只做直接/枢轴查找，不再继续分解
    assert_eq!(resolve("नमस्ते दोस्त", LanguageCode::En), "hello friend");
}

#[test]
fn test_sentinel_only_for_single_token_misses() {
    assert_eq!(resolve("xyzzy", LanguageCode::Ta), TRANSLATION_NOT_AVAILABLE);
    assert_eq!(resolve("   ", LanguageCode::Ta), TRANSLATION_NOT_AVAILABLE);
    assert_eq!(resolve("xyzzy plugh", LanguageCode::Ta), "xyzzy plugh");
}

#[test]
fn test_resolve_is_deterministic() {
    let engine = TranslationEngine::with_builtin_dictionary();
    for text in ["hello", "how are you", "i am fine today", "unknown", "ভাল"] {
        for target in LanguageCode::ALL {
            assert_eq!(engine.resolve(text, target), engine.resolve(text, target));
        }
    }
}

#[test]
fn test_pivot_miss_continues_to_next_language() {
    // "x" 同时出现在印地语与泰米尔语中；第一个枢轴没有卡纳达语译文
    let dictionary = Dictionary::from_entries(vec![
        entry("alpha", &[(LanguageCode::Hi, "x")]),
        entry("beta", &[(LanguageCode::Ta, "x"), (LanguageCode::Kn, "kb")]),
    ]);
    let engine = TranslationEngine::new(Arc::new(dictionary));

    assert_eq!(engine.resolve("x", LanguageCode::Kn), "kb");
    // 到英语时第一个命中的枢轴直接返回
    assert_eq!(engine.resolve("x", LanguageCode::En), "alpha");
}

#[test]
fn test_pivot_miss_without_fallback_is_unresolved() {
    let dictionary = Dictionary::from_entries(vec![entry(
        "water",
        &[(LanguageCode::Hi, "पानी"), (LanguageCode::Bn, "পানি")],
    )]);
    let engine = TranslationEngine::new(Arc::new(dictionary));

    assert_eq!(engine.resolve("पानी", LanguageCode::Bn), "পানি");
    assert_eq!(engine.resolve("पानी", LanguageCode::Kn), TRANSLATION_NOT_AVAILABLE);
    assert_eq!(engine.lookup("पानी", LanguageCode::Ta), None);
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine = Arc::new(TranslationEngine::with_builtin_dictionary());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || engine.resolve("thank you", LanguageCode::Ta))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "நன்றி");
    }
}
