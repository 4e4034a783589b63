// compat_replace.rs - Template and function replacement, plus the
// cross-check between replacing and splitting.

use rextra::prelude::*;

fn r(pattern: &str, subject: &str, template: &str, expected: &str) {
    let re = Regex::new(pattern).unwrap_or_else(|e| {
        panic!("compile failed for {:?}: {}", pattern, e);
    });
    let out = re.replace_template(subject, template).unwrap_or_else(|e| {
        panic!("replace failed for {:?} with {:?}: {}", pattern, template, e);
    });
    assert_eq!(
        out, expected,
        "replace {:?} in {:?} with {:?}",
        pattern, subject, template
    );
}

// === Templates ===

#[test]
fn escaped_dollar() {
    r("a", "aaa", "$$", "$$$");
    r("a", "a", "$$1", "$1");
}

#[test]
fn numbered_references() {
    r(r"(\w+)@(\w+)", "me@host", "$2 at $1", "host at me");
    r(r"(\d)", "a1b2", "<$0>", "a<1>b<2>");
    r(r"(a)(b)(c)(d)(e)(f)(g)(h)(i)(j)", "abcdefghij", "$10$1", "ja");
}

#[test]
fn braced_references() {
    r(r"(?<n>\d+)", "x12y", "[${n}]", "x[12]y");
    r(r"(\d)", "7", "${1}0", "70");
}

#[test]
fn unset_group_is_empty() {
    r(r"(a)|(b)", "ab", "<$2>", "<><b>");
}

#[test]
fn empty_matches_are_replaced() {
    r(r"", "abc", "-", "-a-b-c-");
    r(r"x*", "axb", "-", "-a--b-");
}

#[test]
fn no_match_keeps_subject() {
    r(r"\d", "letters only", "#", "letters only");
}

#[test]
fn template_syntax_errors() {
    let re = Regex::new("a").unwrap();
    for (template, offset) in [("$", 0), ("ab$", 2), ("$a", 0), ("${}", 0), ("x${1", 1)] {
        match re.replace_template("a", template) {
            Err(Error::TemplateSyntax { offset: at, .. }) => {
                assert_eq!(at, offset, "offset for {:?}", template)
            }
            other => panic!("expected TemplateSyntax for {:?}, got {:?}", template, other),
        }
    }
}

#[test]
fn template_unknown_references() {
    let re = Regex::new(r"(?<word>\w+)").unwrap();
    assert_eq!(
        re.replace_template("hi", "${nope}").unwrap_err(),
        Error::NoSuchCaptureName {
            name: "nope".to_string()
        }
    );
    assert_eq!(
        re.replace_template("hi", "$2").unwrap_err(),
        Error::NoSuchCaptureIndex { index: 2 }
    );
}

#[test]
fn template_reuse() {
    let re = Regex::new(r"(\w)(\w)").unwrap();
    let t = Template::parse("$2$1").unwrap();
    assert_eq!(re.replace("abcd", &t).unwrap(), "badc");
    assert_eq!(re.replace("wxyz", &t).unwrap(), "xwzy");
    assert_eq!(t.as_str(), "$2$1");
}

// === Functions ===

#[test]
fn function_called_once_per_match() {
    let re = Regex::new(r"\w+").unwrap();
    let mut calls = 0;
    let out = re
        .replace("one two three", |caps: &Captures| {
            calls += 1;
            caps.as_str().to_uppercase()
        })
        .unwrap();
    assert_eq!(out, "ONE TWO THREE");
    assert_eq!(calls, 3);
}

#[test]
fn function_output_is_verbatim() {
    let re = Regex::new(r"x").unwrap();
    let out = re.replace("axb", |_: &Captures| "$1").unwrap();
    assert_eq!(out, "a$1b");
}

#[test]
fn function_sees_captures() {
    let re = Regex::new(r"(?<k>\w+)=(?<v>\w+)").unwrap();
    let out = re
        .replace("a=1,b=2", |caps: &Captures| {
            let k = caps.text("k").unwrap().unwrap_or("");
            let v = caps.text("v").unwrap().unwrap_or("");
            format!("{}:{}", v, k)
        })
        .unwrap();
    assert_eq!(out, "1:a,2:b");
}

#[test]
fn no_expand() {
    let re = Regex::new(r"\d").unwrap();
    assert_eq!(re.replace("a1b2", NoExpand("${x}")).unwrap(), "a${x}b${x}");
}

#[test]
fn replacen() {
    let re = Regex::new(r"\d").unwrap();
    assert_eq!(re.replacen("1234", 2, NoExpand("_")).unwrap(), "__34");
}

// === Cross-checks ===

#[test]
fn constant_function_equals_split_join() {
    let cases = [
        (",", "a,b,,c"),
        (",", ",lead,trail,"),
        (r"\s+", "  many   spaces here "),
        (r"\d+", "no digits"),
        (r"ab", "abab"),
        (r"[aeiou]", "education"),
    ];
    for (pattern, subject) in cases {
        let re = Regex::new(pattern).unwrap();
        let replaced = re.replace(subject, |_: &Captures| "X").unwrap();
        let pieces: Vec<&str> = re.split(subject).flatten().collect();
        assert_eq!(
            replaced,
            pieces.join("X"),
            "pattern {:?} on {:?}",
            pattern,
            subject
        );
    }
}

#[test]
fn whole_match_template_is_identity() {
    let re = Regex::new(r"\w+|\s+").unwrap();
    let subject = "keep everything  as is";
    assert_eq!(re.replace_template(subject, "$0").unwrap(), subject);
}
