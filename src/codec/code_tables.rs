//! # 코드 테이블
//!
//! 에이전시 속성(지역, MBTI, 메인 카테고리, 서브 카테고리)을 한 글자 코드로
//! 변환하는 고정 매핑 테이블입니다. 아임웹 상품의 `brand` 필드 하나에
//! 네 가지 속성을 담기 위해 사용됩니다.
//!
//! 모든 테이블은 프로세스 전역 불변 상수이며, 정방향/역방향 매핑이
//! 정확히 1:1로 대응합니다. 코드는 `[0-9a-zA-Z]` 범위의 한 글자입니다.
//!
//! ```rust,ignore
//! use crate::codec::code_tables::MBTI_TYPES;
//!
//! assert_eq!(MBTI_TYPES.code_of("ENFJ"), Some("1"));
//! assert_eq!(MBTI_TYPES.label_of("1"), Some("ENFJ"));
//! ```

use std::collections::HashMap;
use once_cell::sync::Lazy;
use crate::errors::errors::{AppError, AppResult};

const LOCATION_PAIRS: &[(&str, &str)] = &[("서울", "s"), ("그 외", "e")];

const MBTI_PAIRS: &[(&str, &str)] = &[
    ("ENFJ", "1"),
    ("ENFP", "2"),
    ("ENTJ", "3"),
    ("ENTP", "4"),
    ("ESFJ", "5"),
    ("ESFP", "6"),
    ("ESTJ", "7"),
    ("ESTP", "8"),
    ("INFJ", "9"),
    ("INFP", "0"),
    ("INTJ", "a"),
    ("INTP", "b"),
    ("ISFJ", "c"),
    ("ISFP", "d"),
    ("ISTJ", "e"),
    ("ISTP", "f"),
];

const CATEGORY_PAIRS: &[(&str, &str)] = &[
    ("웹개발", "w"),
    ("디자인", "d"),
    ("앱개발", "a"),
    ("영상/사진", "p"),
    ("브랜딩", "b"),
    ("마케팅", "m"),
    ("번역/통역", "t"),
    ("컨설팅", "c"),
];

const SUB_CATEGORY_PAIRS: &[(&str, &str)] = &[
    // 웹개발
    ("프론트엔드", "1"),
    ("백엔드", "2"),
    ("풀스택", "3"),
    ("쇼핑몰", "4"),
    ("랜딩페이지", "5"),
    ("기타 웹개발", "6"),
    // 디자인/브랜딩
    ("UI/UX", "a"),
    ("그래픽", "b"),
    ("3D", "c"),
    ("일러스트", "d"),
    ("편집", "e"),
    ("CI/BI", "f"),
    ("패키지", "g"),
    ("네이밍", "h"),
    ("브랜드전략", "i"),
    ("기타 디자인", "j"),
    ("기타 브랜딩", "k"),
    // 앱개발
    ("안드로이드", "l"),
    ("iOS", "m"),
    ("크로스플랫폼", "n"),
    ("하이브리드", "o"),
    ("기타 앱개발", "p"),
    // 영상/사진
    ("영상촬영", "q"),
    ("영상편집", "r"),
    ("사진촬영", "s"),
    ("사진편집", "t"),
    ("기타 영상/사진", "u"),
    // 마케팅
    ("SNS마케팅", "v"),
    ("퍼포먼스", "w"),
    ("콘텐츠제작", "x"),
    ("PR", "y"),
    ("기타 마케팅", "z"),
    // 번역/통역
    ("영어", "7"),
    ("중국어", "8"),
    ("일본어", "9"),
    ("기타 번역/통역", "0"),
    // 컨설팅
    ("경영컨설팅", "A"),
    ("IT컨설팅", "B"),
    ("마케팅컨설", "C"),
    ("기타 컨설팅", "D"),
];

/// 라벨 ↔ 코드 양방향 매핑 테이블
pub struct CodeTable {
    name: &'static str,
    pairs: &'static [(&'static str, &'static str)],
    forward: HashMap<&'static str, &'static str>,
    reverse: HashMap<&'static str, &'static str>,
}

impl CodeTable {
    fn from_pairs(name: &'static str, pairs: &'static [(&'static str, &'static str)]) -> Self {
        let forward = pairs.iter().map(|&(label, code)| (label, code)).collect();
        let reverse = pairs.iter().map(|&(label, code)| (code, label)).collect();

        Self { name, pairs, forward, reverse }
    }

    /// 테이블 이름 (에러 메시지용)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 라벨에 해당하는 코드
    pub fn code_of(&self, label: &str) -> Option<&'static str> {
        self.forward.get(label).copied()
    }

    /// 코드에 해당하는 라벨
    pub fn label_of(&self, code: &str) -> Option<&'static str> {
        self.reverse.get(code).copied()
    }

    /// 라벨을 코드로 변환하고, 테이블에 없으면 `UnknownCode` 에러를 반환합니다.
    pub fn encode(&self, label: &str) -> AppResult<&'static str> {
        self.code_of(label).ok_or_else(|| AppError::UnknownCode {
            table: self.name,
            value: label.to_string(),
        })
    }

    /// 선언 순서대로의 (라벨, 코드) 목록
    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.pairs
    }
}

/// 지역 테이블
pub static LOCATIONS: Lazy<CodeTable> = Lazy::new(|| CodeTable::from_pairs("location", LOCATION_PAIRS));

/// MBTI 유형 테이블
pub static MBTI_TYPES: Lazy<CodeTable> = Lazy::new(|| CodeTable::from_pairs("mbti", MBTI_PAIRS));

/// 메인 카테고리 테이블
pub static CATEGORIES: Lazy<CodeTable> = Lazy::new(|| CodeTable::from_pairs("category", CATEGORY_PAIRS));

/// 서브 카테고리 테이블
pub static SUB_CATEGORIES: Lazy<CodeTable> =
    Lazy::new(|| CodeTable::from_pairs("sub_category", SUB_CATEGORY_PAIRS));

/// 네 개의 테이블 전체
pub fn all_tables() -> [&'static CodeTable; 4] {
    [&*LOCATIONS, &*MBTI_TYPES, &*CATEGORIES, &*SUB_CATEGORIES]
}
