//! Lookup tables for Korean personal names

/// One-syllable surnames
pub const SINGLE_SURNAMES: &[char] = &[
    '김', '이', '박', '최', '정', '강', '조', '윤', '장', '임', '한', '오', '서', '신', '권', '황',
    '안', '송', '홍', '류', '유', '전', '고', '문', '손', '배', '백', '허', '남', '노', '심', '하',
    '곽', '성', '차', '주', '우', '구', '민', '진', '나', '지', '엄', '채', '원', '천', '방', '현',
    '함', '변', '염', '여', '추', '도', '소', '석', '선', '설', '마', '길', '연', '위', '표', '명',
    '기', '라', '왕', '금', '반', '옥', '육', '인', '맹', '제', '모', '피', '형', '양',
];

/// Two-syllable (compound) surnames
pub const DOUBLE_SURNAMES: &[&str] = &[
    "남궁", "황보", "제갈", "선우", "서문", "독고", "사공", "동방", "탁발", "왕손", "어금", "향목",
];

/// Honorifics and job titles that may trail a name; discarded
pub const TITLES: &[&str] = &[
    "님", "씨", "군", "양", "과장", "차장", "부장", "팀장", "원장", "교수", "박사", "선생님", "대표",
    "사원", "대리", "실장", "연구원", "주임", "계장",
];

/// Terms marking an institution rather than a person
pub const ORG_KEYWORDS: &[&str] = &[
    "대학교", "대학", "병원", "의료원", "센터", "연구소", "주식회사", "유한회사", "법인",
];

/// Separators tolerated inside a name: space, middle dots, period, hyphen
pub const SEPARATORS: &[char] = &[' ', '\u{00B7}', '\u{2027}', '.', '-'];

/// Precomposed Hangul syllable (가..힣)
pub fn is_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

pub fn is_single_surname(c: char) -> bool {
    SINGLE_SURNAMES.contains(&c)
}

pub fn is_double_surname(s: &str) -> bool {
    DOUBLE_SURNAMES.contains(&s)
}
