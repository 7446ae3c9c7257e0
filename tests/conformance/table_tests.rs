/// Runs the bundled `url_cases.json` table
use super::loader::{TestCase, load_url_cases};
use super::runner::{report_failures, run_cases};
use urlstate::Url;

#[test]
fn test_url_cases() {
    let tests = load_url_cases();
    let result = run_cases(&tests);

    println!("\nurl_cases.json results:");
    println!("{}", result.summary());
    if !result.failures.is_empty() {
        eprintln!("\nFailed cases:");
        report_failures(&result);
    }

    assert!(result.passed > 0);
    assert_eq!(
        result.failed, 0,
        "Failed {} cases. See output above for details.",
        result.failed
    );
}

#[test]
fn test_can_parse_agrees_with_parse() {
    for test in load_url_cases() {
        let TestCase::UrlTest(case) = test else {
            continue;
        };
        assert_eq!(
            Url::can_parse(&case.input, case.base.as_deref()),
            !case.failure,
            "can_parse({:?}, {:?})",
            case.input,
            case.base
        );
    }
}

#[test]
fn test_href_reparses_to_itself() {
    for test in load_url_cases() {
        let TestCase::UrlTest(case) = test else {
            continue;
        };
        if case.failure {
            continue;
        }
        let url = Url::parse(&case.input, case.base.as_deref()).unwrap();
        let again = Url::parse(url.href(), None).unwrap();
        assert_eq!(again.href(), url.href(), "input {:?}", case.input);
    }
}
