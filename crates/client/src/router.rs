//! Route table, navigation guard and the host-side router.
//!
//! The guard is a pure function of the destination's `requires_auth` flag and
//! the current authentication state, so hosts can evaluate it without a
//! router. [`Router`] wraps it with a current location and history and is the
//! [`Navigator`] the HTTP client and stores redirect through.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;

use crate::messages::{Locale, Message};
use crate::storage::TokenStorage;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Path of the home page.
pub const HOME_PATH: &str = "/";

/// Redirect chains longer than this are cut off.
const MAX_REDIRECTS: usize = 4;

/// Named routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Login,
    Register,
    Home,
    Products,
    ProductDetail,
    Cart,
    Orders,
    Profile,
    NotFound,
}

/// Per-route metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub title: Option<Message>,
}

struct RouteDef {
    pattern: &'static str,
    name: RouteName,
    meta: RouteMeta,
}

const fn route(
    pattern: &'static str,
    name: RouteName,
    requires_auth: bool,
    title: Message,
) -> RouteDef {
    RouteDef {
        pattern,
        name,
        meta: RouteMeta {
            requires_auth,
            title: Some(title),
        },
    }
}

static ROUTES: &[RouteDef] = &[
    route("/login", RouteName::Login, false, Message::TitleLogin),
    route("/register", RouteName::Register, false, Message::TitleRegister),
    route("/", RouteName::Home, false, Message::TitleHome),
    route("/products", RouteName::Products, false, Message::TitleProducts),
    route("/products/:id", RouteName::ProductDetail, false, Message::TitleProductDetail),
    route("/cart", RouteName::Cart, true, Message::TitleCart),
    route("/orders", RouteName::Orders, true, Message::TitleOrders),
    route("/profile", RouteName::Profile, true, Message::TitleProfile),
];

const NOT_FOUND_META: RouteMeta = RouteMeta {
    requires_auth: false,
    title: Some(Message::TitleNotFound),
};

/// A path resolved against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: RouteName,
    /// Normalized path: leading slash, no trailing slash, no query or fragment.
    pub path: String,
    /// Value of the `:id` segment, for parameterized routes.
    pub id: Option<String>,
    pub meta: RouteMeta,
}

/// Outcome of the navigation guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Redirect(&'static str),
}

/// Resolve a path against the route table. Unknown paths resolve to
/// [`RouteName::NotFound`].
#[must_use]
pub fn resolve(path: &str) -> RouteMatch {
    let path = normalize(path);

    for def in ROUTES {
        if let Some(id) = match_pattern(def.pattern, &path) {
            return RouteMatch {
                name: def.name,
                path,
                id,
                meta: def.meta,
            };
        }
    }

    RouteMatch {
        name: RouteName::NotFound,
        path,
        id: None,
        meta: NOT_FOUND_META,
    }
}

/// Decide whether navigation to `to` may proceed.
///
/// Protected routes send anonymous visitors to the login page; the login and
/// register pages send authenticated users home.
#[must_use]
pub const fn guard(to: &RouteMatch, is_authenticated: bool) -> NavigationDecision {
    if to.meta.requires_auth && !is_authenticated {
        return NavigationDecision::Redirect(LOGIN_PATH);
    }
    if is_authenticated && matches!(to.name, RouteName::Login | RouteName::Register) {
        return NavigationDecision::Redirect(HOME_PATH);
    }
    NavigationDecision::Proceed
}

/// Document title for a route: `"<title> - E-Commerce"`, or the bare app
/// name when the route has no title.
#[must_use]
pub fn document_title(meta: &RouteMeta, locale: Locale) -> String {
    let app = Message::AppName.text(locale);
    meta.title.map_or_else(
        || app.to_string(),
        |title| format!("{} - {app}", title.text(locale)),
    )
}

fn normalize(path: &str) -> String {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_matches('/');
    format!("/{trimmed}")
}

/// Returns `Some(id)` when `path` matches `pattern`; `id` is `None` for
/// patterns without a parameter. Static segments ignore ASCII case.
#[allow(clippy::option_option)]
fn match_pattern(pattern: &str, path: &str) -> Option<Option<String>> {
    let mut pattern_segments = pattern.split('/').filter(|s| !s.is_empty());
    let mut path_segments = path.split('/').filter(|s| !s.is_empty());
    let mut id = None;

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(id),
            (Some(p), Some(s)) if p.starts_with(':') => id = Some(s.to_string()),
            (Some(p), Some(s)) if p.eq_ignore_ascii_case(s) => {}
            _ => return None,
        }
    }
}

/// Something that can move the host to another page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Result of [`Router::push`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The router moved to this route (possibly after redirects).
    Navigated(RouteMatch),
    /// The final destination was already the current location.
    Duplicate,
}

#[derive(Debug, Default)]
struct RouterState {
    current: Option<RouteMatch>,
    title: String,
    history: Vec<String>,
}

/// Host-side router: guarded navigation over the static route table.
///
/// Authentication is read from token storage at every navigation.
#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterInner>,
}

struct RouterInner {
    tokens: TokenStorage,
    locale: Locale,
    state: RwLock<RouterState>,
}

impl Router {
    #[must_use]
    pub fn new(tokens: TokenStorage, locale: Locale) -> Self {
        Self {
            inner: Arc::new(RouterInner {
                tokens,
                locale,
                state: RwLock::new(RouterState {
                    title: Message::AppName.text(locale).to_string(),
                    ..RouterState::default()
                }),
            }),
        }
    }

    /// Navigate to `path`, running the guard before every hop.
    pub fn push(&self, path: &str) -> NavigationOutcome {
        let is_authenticated = self.inner.tokens.has_access_token();
        let mut target = resolve(path);

        for _ in 0..MAX_REDIRECTS {
            match guard(&target, is_authenticated) {
                NavigationDecision::Proceed => break,
                NavigationDecision::Redirect(to) => {
                    debug!(from = %target.path, to, "navigation redirected by guard");
                    target = resolve(to);
                }
            }
        }

        let mut state = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        state.title = document_title(&target.meta, self.inner.locale);
        if state.current.as_ref().is_some_and(|c| c.path == target.path) {
            return NavigationOutcome::Duplicate;
        }

        state.history.push(target.path.clone());
        state.current = Some(target.clone());
        drop(state);

        NavigationOutcome::Navigated(target)
    }

    /// The current route, if any navigation has happened.
    #[must_use]
    pub fn current(&self) -> Option<RouteMatch> {
        self.read_state().current.clone()
    }

    /// The current document title.
    #[must_use]
    pub fn title(&self) -> String {
        self.read_state().title.clone()
    }

    /// Every path navigated to, oldest first. Duplicates are not recorded.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.read_state().history.clone()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, RouterState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for Router {
    fn navigate(&self, path: &str) {
        self.push(path);
    }
}

/// Records navigation requests without performing them.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigator {
    requested: Arc<Mutex<Vec<String>>>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every path requested so far, in order.
    #[must_use]
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many times `path` was requested.
    #[must_use]
    pub fn count(&self, path: &str) -> usize {
        self.requested().iter().filter(|p| *p == path).count()
    }
}

impl Navigator for MemoryNavigator {
    fn navigate(&self, path: &str) {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::TokenPair;

    use super::*;
    use crate::storage::MemoryStore;

    fn tokens(authenticated: bool) -> TokenStorage {
        let tokens = TokenStorage::new(Arc::new(MemoryStore::new()));
        if authenticated {
            tokens
                .save(&TokenPair {
                    access_token: "a".to_string(),
                    refresh_token: "r".to_string(),
                })
                .unwrap();
        }
        tokens
    }

    #[test]
    fn test_resolve_static_and_param_routes() {
        assert_eq!(resolve("/").name, RouteName::Home);
        assert_eq!(resolve("/cart/").name, RouteName::Cart);
        assert_eq!(resolve("/orders?page=2#top").name, RouteName::Orders);

        let detail = resolve("/products/42");
        assert_eq!(detail.name, RouteName::ProductDetail);
        assert_eq!(detail.id.as_deref(), Some("42"));

        let missing = resolve("/products/42/reviews");
        assert_eq!(missing.name, RouteName::NotFound);
        assert!(!missing.meta.requires_auth);
    }

    #[test]
    fn test_resolve_ignores_case_of_static_segments() {
        let cart = resolve("/Cart");
        assert_eq!(cart.name, RouteName::Cart);
        assert_eq!(guard(&cart, false), NavigationDecision::Redirect(LOGIN_PATH));

        let detail = resolve("/PRODUCTS/Ab12");
        assert_eq!(detail.name, RouteName::ProductDetail);
        assert_eq!(detail.id.as_deref(), Some("Ab12"));
    }

    #[test]
    fn test_guard_redirects_anonymous_from_protected_routes() {
        for path in ["/cart", "/orders", "/profile"] {
            assert_eq!(
                guard(&resolve(path), false),
                NavigationDecision::Redirect(LOGIN_PATH),
                "{path}"
            );
            assert_eq!(guard(&resolve(path), true), NavigationDecision::Proceed);
        }
    }

    #[test]
    fn test_guard_sends_authenticated_users_home_from_auth_pages() {
        assert_eq!(
            guard(&resolve("/login"), true),
            NavigationDecision::Redirect(HOME_PATH)
        );
        assert_eq!(
            guard(&resolve("/register"), true),
            NavigationDecision::Redirect(HOME_PATH)
        );
        assert_eq!(guard(&resolve("/login"), false), NavigationDecision::Proceed);
        assert_eq!(guard(&resolve("/products/1"), false), NavigationDecision::Proceed);
    }

    #[test]
    fn test_document_title() {
        assert_eq!(
            document_title(&resolve("/cart").meta, Locale::En),
            "Cart - E-Commerce"
        );
        assert_eq!(
            document_title(&resolve("/cart").meta, Locale::ZhCn),
            "购物车 - E-Commerce"
        );
        let untitled = RouteMeta {
            requires_auth: false,
            title: None,
        };
        assert_eq!(document_title(&untitled, Locale::En), "E-Commerce");
    }

    #[test]
    fn test_router_push_follows_guard() {
        let router = Router::new(tokens(false), Locale::En);
        let outcome = router.push("/cart");
        assert!(matches!(
            outcome,
            NavigationOutcome::Navigated(RouteMatch { name: RouteName::Login, .. })
        ));
        assert_eq!(router.title(), "Log in - E-Commerce");

        let router = Router::new(tokens(true), Locale::En);
        router.push("/login");
        assert_eq!(router.current().unwrap().path, "/");
    }

    #[test]
    fn test_router_ignores_duplicate_navigation() {
        let router = Router::new(tokens(false), Locale::En);
        router.push("/login");
        assert_eq!(router.push("/login"), NavigationOutcome::Duplicate);
        assert_eq!(router.push("/cart"), NavigationOutcome::Duplicate);
        assert_eq!(router.history(), vec!["/login".to_string()]);
    }

    #[test]
    fn test_memory_navigator_counts() {
        let nav = MemoryNavigator::new();
        nav.navigate("/login");
        nav.navigate("/");
        nav.navigate("/login");
        assert_eq!(nav.count("/login"), 2);
        assert_eq!(nav.requested().len(), 3);
    }
}
