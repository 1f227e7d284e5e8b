use fetch_types::{Method, RedirectMode, RequestPlan};
use url::Url;

fn plan_with(redirects_followed: u8, max_redirects: u8) -> RequestPlan {
    RequestPlan {
        method: Method::GET,
        url: Url::parse("https://example.com/resource").unwrap(),
        headers: vec![],
        body: None,
        redirect_mode: RedirectMode::Follow,
        max_redirects,
        redirects_followed,
        signal: None,
    }
}

#[test]
fn test_budget_not_exhausted_below_max() {
    let plan = plan_with(3, 20);
    assert!(!plan.redirect_budget_exhausted());
}

#[test]
fn test_budget_exhausted_at_max() {
    let plan = plan_with(20, 20);
    assert!(plan.redirect_budget_exhausted());
}

#[test]
fn test_budget_exhausted_past_max() {
    let plan = plan_with(21, 20);
    assert!(plan.redirect_budget_exhausted());
}

#[test]
fn test_default_max_redirects_is_twenty() {
    // Mirrors the orchestrator's documented default.
    let plan = plan_with(0, 20);
    assert_eq!(plan.max_redirects, 20);
}
