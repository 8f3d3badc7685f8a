//! 문자 체계(스크립트) 판정
//!
//! 길이 2 이상의 n-gram이 서로 섞일 수 없는 문자 체계를 포함하면 잡음으로 보고 버립니다.
//! 파일명처럼 확장자가 붙은 문자열("刷新eclipse")이 엉뚱한 n-gram을 만들지 않게 합니다.

use unicode_script::{Script, UnicodeScript};

/// n-gram 호환성 판정에 쓰는 문자 체계 묶음
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptFamily {
    /// Common / Inherited: 어느 문자 체계와도 섞일 수 있음 (장음 부호 "ー", 결합 부호 등)
    Neutral,
    /// 한자, 히라가나, 가타카나, 주음부호: 한 문장 안에서 섞여 쓰임
    Cjk,
    /// 그 외 문자 체계는 각각 독립
    Other(Script),
}

/// 문자의 문자 체계 묶음
pub fn script_family(c: char) -> ScriptFamily {
    match c.script() {
        Script::Common | Script::Inherited | Script::Unknown => ScriptFamily::Neutral,
        Script::Han | Script::Hiragana | Script::Katakana | Script::Bopomofo => ScriptFamily::Cjk,
        other => ScriptFamily::Other(other),
    }
}

/// 중립 문자를 제외한 모든 문자가 같은 묶음에 속하는지 검사
pub fn is_single_script(chars: &[char]) -> bool {
    let mut family = None;
    for &c in chars {
        match script_family(c) {
            ScriptFamily::Neutral => continue,
            current => match family {
                None => family = Some(current),
                Some(seen) if seen == current => {}
                Some(_) => return false,
            },
        }
    }
    true
}
