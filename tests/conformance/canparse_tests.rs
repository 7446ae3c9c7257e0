/// `Url::can_parse` cases drawn from
/// https://github.com/web-platform-tests/wpt/blob/master/url/url-statics-canparse.any.js
/// plus base-resolution edge cases.
use urlstate::Url;

/// (input, base, expected); an `undefined` input is the empty string
const CAN_PARSE_TESTS: &[(&str, Option<&str>, bool)] = &[
    ("", None, false),
    ("aaa:b", None, true),
    ("", Some("aaa:b"), false),
    ("", Some("https://test:test/"), false),
    ("aaa:/b", None, true),
    ("", Some("aaa:/b"), true),
    ("https://test:test", None, false),
    ("a", Some("https://b/"), true),
    // Fragment-only input against a URL with an opaque path
    ("#x", Some("aaa:b"), true),
    ("?x", Some("aaa:b"), false),
    // The base must itself be absolute
    ("a", Some("/relative"), false),
    ("//h/p", Some("file:///c:/x"), true),
    ("http://[::1", None, false),
    ("http://h:65535", None, true),
    ("http://h:65536", None, false),
];

#[test]
fn test_canparse_table() {
    let failures: Vec<String> = CAN_PARSE_TESTS
        .iter()
        .enumerate()
        .filter_map(|(idx, &(input, base, expected))| {
            let actual = Url::can_parse(input, base);
            (actual != expected).then(|| {
                format!("Test {idx}: can_parse({input:?}, {base:?}) = {actual} (expected {expected})")
            })
        })
        .collect();

    for failure in &failures {
        eprintln!("  {failure}");
    }
    println!(
        "can_parse: {} passed, {} failed",
        CAN_PARSE_TESTS.len() - failures.len(),
        failures.len()
    );
    assert!(failures.is_empty(), "Failed {} can_parse tests", failures.len());
}

#[test]
fn test_can_parse_matches_parse() {
    for &(input, base, expected) in CAN_PARSE_TESTS {
        assert_eq!(Url::parse(input, base).is_ok(), expected, "{input:?} {base:?}");
    }
}
