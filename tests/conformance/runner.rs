/// Conformance table runner
///
/// Runs URL test cases against `urlstate::Url`.
use super::loader::{CaseFailure, TableResult, TestCase, UrlTestCase};
use urlstate::Url;

/// Run every case and tally the results
pub fn run_cases(tests: &[TestCase]) -> TableResult {
    let mut result = TableResult::default();

    let cases = tests.iter().filter_map(|test| match test {
        TestCase::UrlTest(case) => Some(case),
        TestCase::Comment(_) => None,
    });
    for (test_num, case) in cases.enumerate() {
        let failures = check_case(test_num + 1, case);
        if failures.is_empty() {
            result.passed += 1;
        } else {
            result.failed += 1;
            result.failures.extend(failures);
        }
    }

    result
}

fn check_case(test_num: usize, case: &UrlTestCase) -> Vec<CaseFailure> {
    let failure = |field: &'static str, expected: &str, actual: &str| CaseFailure {
        test_num,
        input: case.input.clone(),
        base: case.base.clone(),
        field,
        expected: expected.to_string(),
        actual: actual.to_string(),
    };

    let url = match (Url::parse(&case.input, case.base.as_deref()), case.failure) {
        (Err(_), true) => return Vec::new(),
        (Ok(url), true) => return vec![failure("parsing", "failure", url.href())],
        (Err(e), false) => return vec![failure("parsing", "success", &e.to_string())],
        (Ok(url), false) => url,
    };

    let origin = url.origin();
    let fields = [
        ("href", &case.href, url.href()),
        ("origin", &case.origin, origin.as_str()),
        ("protocol", &case.protocol, url.protocol()),
        ("username", &case.username, url.username()),
        ("password", &case.password, url.password()),
        ("host", &case.host, url.host()),
        ("hostname", &case.hostname, url.hostname()),
        ("port", &case.port, url.port()),
        ("pathname", &case.pathname, url.pathname()),
        ("search", &case.search, url.search()),
        ("hash", &case.hash, url.hash()),
    ];

    fields
        .into_iter()
        .filter_map(|(field, expected, actual)| {
            let expected = expected.as_deref()?;
            (expected != actual).then(|| failure(field, expected, actual))
        })
        .collect()
}

/// Print every failure to stderr
pub fn report_failures(result: &TableResult) {
    for f in &result.failures {
        eprintln!(
            "  #{} {:?} (base {:?}) {}: expected {:?}, got {:?}",
            f.test_num, f.input, f.base, f.field, f.expected, f.actual
        );
    }
}

#[cfg(test)]
mod tests {
    use super::super::loader::get_inline_tests;
    use super::*;

    #[test]
    fn test_run_inline_tests() {
        let result = run_cases(&get_inline_tests());
        report_failures(&result);
        assert_eq!(result.failed, 0, "{}", result.summary());
        assert_eq!(result.passed, 5);
    }

    #[test]
    fn test_mismatch_is_reported_per_field() {
        let case = UrlTestCase {
            input: "http://h/p".to_string(),
            href: Some("http://h/p".to_string()),
            pathname: Some("/q".to_string()),
            search: Some("?x".to_string()),
            ..UrlTestCase::default()
        };
        let result = run_cases(&[TestCase::UrlTest(case)]);
        assert_eq!(result.failed, 1);
        let fields: Vec<_> = result.failures.iter().map(|f| f.field).collect();
        assert_eq!(fields, ["pathname", "search"]);
        assert_eq!(result.failures[0].actual, "/p");
    }

    #[test]
    fn test_unexpected_success() {
        let case = UrlTestCase {
            input: "http://h/".to_string(),
            failure: true,
            ..UrlTestCase::default()
        };
        let result = run_cases(&[TestCase::UrlTest(case)]);
        assert_eq!(result.failed, 1);
        assert_eq!(result.failures[0].field, "parsing");
        assert_eq!(result.failures[0].actual, "http://h/");
    }
}
