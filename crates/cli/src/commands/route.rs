//! Evaluate the navigation guard against the stored session.

use serde_json::json;
use shopfront_client::AppState;
use shopfront_client::router::{NavigationDecision, NavigationOutcome, guard, resolve};

use super::{CommandResult, print_json};

pub fn run(state: &AppState, path: &str) -> CommandResult {
    let requested = resolve(path);
    let decision = match guard(&requested, state.auth().is_authenticated()) {
        NavigationDecision::Proceed => "proceed".to_string(),
        NavigationDecision::Redirect(to) => format!("redirect {to}"),
    };

    let landed = match state.router().push(path) {
        NavigationOutcome::Navigated(route) => route.path,
        NavigationOutcome::Duplicate => state
            .router()
            .current()
            .map(|route| route.path)
            .unwrap_or_default(),
    };

    print_json(&json!({
        "requested": requested.path,
        "requires_auth": requested.meta.requires_auth,
        "decision": decision,
        "path": landed,
        "title": state.router().title(),
    }))
}
