//! 存储模块
//!
//! 提供进程内只读的词典存储。

pub mod dictionary;

pub use dictionary::{normalize, Dictionary, TranslationEntry};
