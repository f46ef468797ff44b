use axum::http::Method;
use std::collections::HashMap;
use thiserror::Error;

use super::pattern::{PathParams, PathPattern, PatternError};
use super::RouteHandler;

/// Route table configuration errors. Everything except `MissingParameter` is
/// raised by `build()` and aborts startup before the server listens.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid pattern for route '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: PatternError,
    },

    #[error("duplicate route name: {0}")]
    DuplicateName(String),

    #[error("no route named '{0}'")]
    UnknownName(String),

    #[error("missing parameter '{param}' for route '{name}'")]
    MissingParameter { name: String, param: String },
}

/// How failures on a route surface: rendered pages (redirect to login,
/// not-found page) or plain JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Page,
    Api,
}

pub struct RouteEntry {
    methods: Vec<Method>,
    pattern: PathPattern,
    name: String,
    requires_auth: bool,
    kind: RouteKind,
    handler: RouteHandler,
}

impl RouteEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    pub fn handler(&self) -> RouteHandler {
        self.handler.clone()
    }
}

pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    pub params: PathParams,
}

/// Immutable route table. Built once at startup, then only read; concurrent
/// lookups from simultaneously handled requests are safe.
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// Find the entry for an inbound request.
    ///
    /// When several patterns match the same path, the one with the most
    /// literal segments wins; ties fall back to registration order. This makes
    /// `/restaurants/featured` beat `/restaurants/{slug}` regardless of the
    /// order they were registered in.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let mut best: Option<(usize, RouteMatch<'_>)> = None;
        for entry in &self.entries {
            if !entry.methods.contains(method) {
                continue;
            }
            let Some(params) = entry.pattern.matches(path) else {
                continue;
            };
            let score = entry.pattern.literal_segments();
            match &best {
                Some((top, _)) if *top >= score => {}
                _ => best = Some((score, RouteMatch { entry, params })),
            }
        }
        best.map(|(_, found)| found)
    }

    /// Reverse URL generation by route name.
    pub fn url_for(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let idx = self
            .by_name
            .get(name)
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))?;
        self.entries[*idx]
            .pattern
            .fill(params)
            .map_err(|param| RouteError::MissingParameter {
                name: name.to_string(),
                param,
            })
    }

    pub fn has(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }
}

/// Handlers for the conventional seven-entry CRUD resource.
pub struct ResourceHandlers {
    pub index: RouteHandler,
    pub create: RouteHandler,
    pub store: RouteHandler,
    pub show: RouteHandler,
    pub edit: RouteHandler,
    pub update: RouteHandler,
    pub destroy: RouteHandler,
}

struct PendingRoute {
    methods: Vec<Method>,
    path: String,
    name: String,
    requires_auth: bool,
    kind: RouteKind,
    handler: RouteHandler,
}

/// Declarative registration. Patterns are validated and names checked for
/// uniqueness in `build()`.
pub struct RouteTableBuilder {
    pending: Vec<PendingRoute>,
    prefix: String,
    requires_auth: bool,
    kind: RouteKind,
}

impl RouteTableBuilder {
    fn new() -> Self {
        Self {
            pending: Vec::new(),
            prefix: String::new(),
            requires_auth: false,
            kind: RouteKind::Page,
        }
    }

    fn push(mut self, methods: Vec<Method>, path: &str, name: &str, handler: RouteHandler) -> Self {
        let path = format!("{}{}", self.prefix, path);
        self.pending.push(PendingRoute {
            methods,
            path,
            name: name.to_string(),
            requires_auth: self.requires_auth,
            kind: self.kind,
            handler,
        });
        self
    }

    pub fn get(self, path: &str, name: &str, handler: RouteHandler) -> Self {
        self.push(vec![Method::GET], path, name, handler)
    }

    pub fn post(self, path: &str, name: &str, handler: RouteHandler) -> Self {
        self.push(vec![Method::POST], path, name, handler)
    }

    pub fn put(self, path: &str, name: &str, handler: RouteHandler) -> Self {
        self.push(vec![Method::PUT], path, name, handler)
    }

    pub fn patch(self, path: &str, name: &str, handler: RouteHandler) -> Self {
        self.push(vec![Method::PATCH], path, name, handler)
    }

    pub fn delete(self, path: &str, name: &str, handler: RouteHandler) -> Self {
        self.push(vec![Method::DELETE], path, name, handler)
    }

    /// Register a group of routes behind the auth gate.
    pub fn guarded(mut self, register: impl FnOnce(Self) -> Self) -> Self {
        let saved = self.requires_auth;
        self.requires_auth = true;
        let mut built = register(self);
        built.requires_auth = saved;
        built
    }

    /// Register a group of JSON routes under the `/api` prefix.
    pub fn api(mut self, register: impl FnOnce(Self) -> Self) -> Self {
        let saved_prefix = self.prefix.clone();
        let saved_kind = self.kind;
        self.prefix.push_str("/api");
        self.kind = RouteKind::Api;
        let mut built = register(self);
        built.prefix = saved_prefix;
        built.kind = saved_kind;
        built
    }

    /// Synthesize the conventional seven CRUD entries for a resource from a
    /// single registration call: index, create, store, show, edit, update
    /// (PUT or PATCH) and destroy, named `<resource>.<action>`.
    pub fn resource(self, name: &str, param: &str, handlers: ResourceHandlers) -> Self {
        let base = format!("/{}", name);
        let member = format!("/{}/{{{}}}", name, param);
        self.get(&base, &format!("{}.index", name), handlers.index)
            .get(
                &format!("{}/create", base),
                &format!("{}.create", name),
                handlers.create,
            )
            .post(&base, &format!("{}.store", name), handlers.store)
            .get(&member, &format!("{}.show", name), handlers.show)
            .get(
                &format!("{}/edit", member),
                &format!("{}.edit", name),
                handlers.edit,
            )
            .push(
                vec![Method::PUT, Method::PATCH],
                &member,
                &format!("{}.update", name),
                handlers.update,
            )
            .delete(&member, &format!("{}.destroy", name), handlers.destroy)
    }

    pub fn build(self) -> Result<RouteTable, RouteError> {
        let mut entries = Vec::with_capacity(self.pending.len());
        let mut by_name = HashMap::new();

        for route in self.pending {
            let pattern =
                PathPattern::parse(&route.path).map_err(|source| RouteError::InvalidPattern {
                    name: route.name.clone(),
                    source,
                })?;
            if by_name.insert(route.name.clone(), entries.len()).is_some() {
                return Err(RouteError::DuplicateName(route.name));
            }
            entries.push(RouteEntry {
                methods: route.methods,
                pattern,
                name: route.name,
                requires_auth: route.requires_auth,
                kind: route.kind,
                handler: route.handler,
            });
        }

        Ok(RouteTable { entries, by_name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{handler, RequestContext};
    use axum::response::IntoResponse;

    fn noop() -> RouteHandler {
        handler(|_ctx: RequestContext| async { Ok(axum::http::StatusCode::OK.into_response()) })
    }

    #[test]
    fn duplicate_route_name_fails_build() {
        let result = RouteTable::builder()
            .get("/a", "home", noop())
            .get("/b", "home", noop())
            .build();
        assert!(matches!(result, Err(RouteError::DuplicateName(name)) if name == "home"));
    }

    #[test]
    fn malformed_pattern_fails_build() {
        let result = RouteTable::builder()
            .get("/a/{broken", "broken", noop())
            .build();
        assert!(matches!(result, Err(RouteError::InvalidPattern { .. })));
    }

    #[test]
    fn literal_segments_beat_parameters_regardless_of_order() {
        let table = RouteTable::builder()
            .get("/restaurants/{slug}", "restaurants.show", noop())
            .get("/restaurants/featured", "restaurants.featured", noop())
            .build()
            .unwrap();

        let found = table.resolve(&Method::GET, "/restaurants/featured").unwrap();
        assert_eq!(found.entry.name(), "restaurants.featured");

        let found = table.resolve(&Method::GET, "/restaurants/thai-garden").unwrap();
        assert_eq!(found.entry.name(), "restaurants.show");
        assert_eq!(found.params.get("slug"), Some("thai-garden"));
    }

    #[test]
    fn ties_fall_back_to_registration_order() {
        let table = RouteTable::builder()
            .get("/things/{a}", "first", noop())
            .get("/things/{b}", "second", noop())
            .build()
            .unwrap();
        let found = table.resolve(&Method::GET, "/things/x").unwrap();
        assert_eq!(found.entry.name(), "first");
    }

    #[test]
    fn shared_prefix_routes_stay_distinct() {
        let table = RouteTable::builder()
            .get("/restaurants/{slug}/menu", "menu.customer", noop())
            .get("/restaurants/{slug}", "restaurants.show", noop())
            .build()
            .unwrap();

        let show = table.resolve(&Method::GET, "/restaurants/my-slug").unwrap();
        assert_eq!(show.entry.name(), "restaurants.show");

        let menu = table
            .resolve(&Method::GET, "/restaurants/my-slug/menu")
            .unwrap();
        assert_eq!(menu.entry.name(), "menu.customer");
    }

    #[test]
    fn methods_disambiguate_the_same_path() {
        let table = RouteTable::builder()
            .get("/profile", "profile.edit", noop())
            .patch("/profile", "profile.update", noop())
            .delete("/profile", "profile.destroy", noop())
            .build()
            .unwrap();

        assert_eq!(
            table.resolve(&Method::PATCH, "/profile").unwrap().entry.name(),
            "profile.update"
        );
        assert!(table.resolve(&Method::POST, "/profile").is_none());
    }

    #[test]
    fn unmatched_path_resolves_to_none() {
        let table = RouteTable::builder().get("/", "welcome", noop()).build().unwrap();
        assert!(table.resolve(&Method::GET, "/nope").is_none());
    }

    #[test]
    fn resource_generates_the_conventional_seven() {
        let table = RouteTable::builder()
            .resource(
                "menus",
                "menu",
                ResourceHandlers {
                    index: noop(),
                    create: noop(),
                    store: noop(),
                    show: noop(),
                    edit: noop(),
                    update: noop(),
                    destroy: noop(),
                },
            )
            .build()
            .unwrap();

        assert_eq!(table.len(), 7);
        for action in ["index", "create", "store", "show", "edit", "update", "destroy"] {
            assert!(table.has(&format!("menus.{}", action)), "missing menus.{}", action);
        }

        // create is literal and must not be captured by the show parameter
        assert_eq!(
            table.resolve(&Method::GET, "/menus/create").unwrap().entry.name(),
            "menus.create"
        );
        assert_eq!(
            table.resolve(&Method::GET, "/menus/42").unwrap().entry.name(),
            "menus.show"
        );

        // update accepts both PUT and PATCH
        assert_eq!(
            table.resolve(&Method::PUT, "/menus/42").unwrap().entry.name(),
            "menus.update"
        );
        assert_eq!(
            table.resolve(&Method::PATCH, "/menus/42").unwrap().entry.name(),
            "menus.update"
        );
    }

    #[test]
    fn url_for_round_trips_names() {
        let table = RouteTable::builder()
            .get("/restaurants/{restaurant}/edit", "restaurants.edit", noop())
            .get("/", "welcome", noop())
            .build()
            .unwrap();

        assert_eq!(
            table.url_for("restaurants.edit", &[("restaurant", "7")]).unwrap(),
            "/restaurants/7/edit"
        );
        assert_eq!(table.url_for("welcome", &[]).unwrap(), "/");
        assert!(matches!(
            table.url_for("restaurants.edit", &[]),
            Err(RouteError::MissingParameter { .. })
        ));
        assert!(matches!(
            table.url_for("nope", &[]),
            Err(RouteError::UnknownName(_))
        ));
    }

    #[test]
    fn groups_set_auth_and_prefix() {
        let table = RouteTable::builder()
            .get("/", "welcome", noop())
            .guarded(|r| r.get("/dashboard", "dashboard", noop()))
            .api(|r| r.get("/restaurants", "api.restaurants", noop()))
            .build()
            .unwrap();

        let dashboard = table.resolve(&Method::GET, "/dashboard").unwrap();
        assert!(dashboard.entry.requires_auth());
        assert_eq!(dashboard.entry.kind(), RouteKind::Page);

        let api = table.resolve(&Method::GET, "/api/restaurants").unwrap();
        assert!(!api.entry.requires_auth());
        assert_eq!(api.entry.kind(), RouteKind::Api);

        let welcome = table.resolve(&Method::GET, "/").unwrap();
        assert!(!welcome.entry.requires_auth());
    }
}
