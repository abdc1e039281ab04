//! # MBTI 궁합 테이블
//!
//! 유형별로 가장 잘 맞는 유형(`best_match`)과 잘 맞는 유형(`good_match`)을
//! 정적으로 보관합니다. 원본 데이터는 `", "`로 이어진 문자열이며
//! 응답할 때 목록으로 나눕니다.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// (유형, best_match, good_match)
const COMPATIBILITY_ROWS: &[(&str, &str, &str)] = &[
    ("ENFJ", "INFP, ISFP", "ENFP, INFJ, ENFJ, INTJ, ENTJ, INTP, ENTP"),
    ("ENFP", "INFJ, INTJ", "INFP, ENFP, ENFJ, ENTJ, INTP, ENTP"),
    ("ENTJ", "INFP, INTP", "ENFP, INFJ, ENFJ, INTJ, ENTJ, ENTP"),
    ("ENTP", "INFJ, INTJ", "INFP, ENFP, ENFJ, ENTJ, INTP, ENTP"),
    ("ESFJ", "ISFP, ISTP", "ISFJ, ESFJ, ISTJ, ESTJ"),
    ("ESFP", "ISFJ, ISTJ", "ISFP, ESFP, ISTP, ESTP"),
    ("ESTJ", "ISFP, ISTP, INTP", "ISFJ, ESFJ, ISTJ, ESTJ"),
    ("ESTP", "ISFJ, ISTJ", "ISFP, ESFP, ISTP, ESTP"),
    ("INFJ", "ENFP, ENTP", "INFP, INFJ, ENFJ, INTJ, ENTJ, INTP"),
    ("INFP", "ENFJ, ENTJ", "INFP, ENFP, INFJ, INTJ, INTP, ENTP"),
    ("INTJ", "ENFP, ENTP", "INFP, INFJ, ENFJ, INTJ, ENTJ, INTP"),
    ("INTP", "ENTJ, ESTJ", "INFP, ENFP, INFJ, ENFJ, INTJ, INTP, ENTP"),
    ("ISFJ", "ESFP, ESTP", "ISFJ, ESFJ, ISTJ, ESTJ"),
    ("ISFP", "ENFJ, ESFJ, ESTJ", "ISFP, ESFP, ISTP, ESTP"),
    ("ISTJ", "ESFP, ESTP", "ISFJ, ESFJ, ISTJ, ESTJ"),
    ("ISTP", "ESFJ, ESTJ", "ISFP, ESFP, ISTP, ESTP"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionMatch {
    pub best_match: Vec<String>,
    pub good_match: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MbtiCompatibility {
    pub section_match: SectionMatch,
}

fn split_types(joined: &str) -> Vec<String> {
    joined
        .split(", ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

static TABLE: Lazy<BTreeMap<&'static str, MbtiCompatibility>> = Lazy::new(|| {
    COMPATIBILITY_ROWS
        .iter()
        .map(|&(mbti, best, good)| {
            let entry = MbtiCompatibility {
                section_match: SectionMatch {
                    best_match: split_types(best),
                    good_match: split_types(good),
                },
            };
            (mbti, entry)
        })
        .collect()
});

/// 전체 궁합 테이블 `{MBTI: {section_match: {...}}}`
pub fn matching_table() -> &'static BTreeMap<&'static str, MbtiCompatibility> {
    &TABLE
}

/// 유형 하나의 궁합. 대소문자는 구분하지 않습니다.
pub fn matching_for(mbti: &str) -> Option<&'static MbtiCompatibility> {
    TABLE.get(mbti.trim().to_uppercase().as_str())
}
