use form_glue::{behaviors, Page};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};

const BEHAVIOR_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/behavior_property_fuzz_test.txt";
const DEFAULT_BEHAVIOR_PROPTEST_CASES: u32 = 128;

const REGISTER_HTML: &str = r#"
    <form id="register_form" action="/account/register" method="post">
      <input id="id_password1" type="password" class="form-control">
      <input id="id_password2" type="password" class="form-control">
    </form>
"#;

const PASSWORD_HELP_HTML: &str = r#"
    <input id="new_password" type="password">
    <div id="password_help" class="d-none">
      <span id="password_length_check" class="unchecked"></span>
      <span id="password_variety_check" class="unchecked"></span>
    </div>
"#;

fn behavior_proptest_cases() -> u32 {
    std::env::var("FORM_GLUE_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_BEHAVIOR_PROPTEST_CASES)
}

fn password_strategy() -> BoxedStrategy<String> {
    vec(
        prop_oneof![
            Just('a'),
            Just('b'),
            Just('c'),
            Just('x'),
            Just('y'),
            Just('z'),
            Just('A'),
            Just('Z'),
            Just('0'),
            Just('1'),
            Just('9'),
            Just('!'),
            Just('?'),
            Just(' '),
            Just('ä'),
        ],
        0..=14,
    )
    .prop_map(|chars| chars.into_iter().collect())
    .boxed()
}

fn fail(err: form_glue::Error) -> TestCaseError {
    TestCaseError::fail(err.to_string())
}

fn register_page() -> form_glue::Result<Page> {
    let mut page = Page::from_html(REGISTER_HTML)?;
    behaviors::password_check::install(&mut page)?;
    Ok(page)
}

fn help_page() -> form_glue::Result<Page> {
    let mut page = Page::from_html(PASSWORD_HELP_HTML)?;
    behaviors::password_help::install(&mut page)?;
    Ok(page)
}

fn field_state(page: &Page, selector: &str) -> form_glue::Result<(bool, bool)> {
    Ok((
        page.has_class(selector, "is-valid")?,
        page.has_class(selector, "is-invalid")?,
    ))
}

fn check_pair_classification(a: &str, b: &str) -> TestCaseResult {
    let mut page = register_page().map_err(fail)?;
    page.type_text("#id_password1", a).map_err(fail)?;
    page.type_text("#id_password2", b).map_err(fail)?;

    let expected = if a.is_empty() || b.is_empty() {
        (false, false)
    } else if a == b {
        (true, false)
    } else {
        (false, true)
    };

    for field in ["#id_password1", "#id_password2"] {
        let actual = field_state(&page, field).map_err(fail)?;
        prop_assert_eq!(actual, expected, "field {} for pair ({:?}, {:?})", field, a, b);
    }

    // Re-applying the same pair must not change the class state.
    page.type_text("#id_password2", b).map_err(fail)?;
    for field in ["#id_password1", "#id_password2"] {
        let actual = field_state(&page, field).map_err(fail)?;
        prop_assert_eq!(actual, expected, "idempotence broke on {}", field);
    }

    Ok(())
}

fn check_submit_guard(a: &str, b: &str) -> TestCaseResult {
    let mut page = register_page().map_err(fail)?;
    page.type_text("#id_password1", a).map_err(fail)?;
    page.type_text("#id_password2", b).map_err(fail)?;
    page.submit("#register_form").map_err(fail)?;

    let expected = usize::from(a == b);
    prop_assert_eq!(
        page.take_form_submissions().len(),
        expected,
        "pair ({:?}, {:?})",
        a,
        b
    );
    Ok(())
}

fn check_strength_indicators(s: &str) -> TestCaseResult {
    let mut page = help_page().map_err(fail)?;
    page.type_text("#new_password", s).map_err(fail)?;

    let trimmed = s.trim();
    let expect_length = trimmed.chars().count() >= 8;
    let expect_variety = trimmed.chars().any(|ch| !ch.is_ascii_alphabetic());

    prop_assert_eq!(
        page.has_class("#password_length_check", "checked").map_err(fail)?,
        expect_length,
        "length for {:?}",
        s
    );
    prop_assert_eq!(
        page.has_class("#password_variety_check", "checked").map_err(fail)?,
        expect_variety,
        "variety for {:?}",
        s
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: behavior_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(BEHAVIOR_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn password_pair_classification_holds(
        a in password_strategy(),
        b in password_strategy(),
    ) {
        check_pair_classification(&a, &b)?;
    }

    #[test]
    fn password_pair_classification_holds_for_equal_pairs(a in password_strategy()) {
        check_pair_classification(&a, &a)?;
    }

    #[test]
    fn submit_guard_matches_equality(
        a in password_strategy(),
        b in password_strategy(),
    ) {
        check_submit_guard(&a, &b)?;
    }

    #[test]
    fn strength_indicators_follow_trimmed_value(s in password_strategy()) {
        check_strength_indicators(&s)?;
    }
}
