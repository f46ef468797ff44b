//! Declarative route registration.
//!
//! Built once at startup; a duplicate name or malformed pattern aborts before
//! the server starts listening. The table itself carries the auth and
//! response-kind tags, so this file is the single place the URL surface is
//! defined.

use std::sync::Arc;

use crate::handlers::{api, menus, pages, profile, restaurants};
use crate::routing::handler;
use crate::routing::table::{ResourceHandlers, RouteError, RouteTable};

pub fn build() -> Result<Arc<RouteTable>, RouteError> {
    let table = RouteTable::builder()
        // Public entry points
        .get("/", "welcome", handler(pages::welcome))
        .get("/login", "login", handler(pages::login))
        // Role-based landing redirect plus the owner/customer home pages
        .guarded(|r| {
            r.get("/dashboard", "dashboard", handler(pages::dashboard))
                .get("/restaurant", "restaurant.home", handler(pages::restaurant_home))
                .get(
                    "/customer/dashboard",
                    "customer.dashboard",
                    handler(pages::customer_dashboard),
                )
                .get(
                    "/restaurant/add",
                    "restaurants.create",
                    handler(restaurants::create),
                )
                .post("/restaurants", "restaurants.store", handler(restaurants::store))
                .get(
                    "/restaurants/{restaurant}/edit",
                    "restaurants.edit",
                    handler(restaurants::edit),
                )
                .put(
                    "/restaurants/{restaurant}",
                    "restaurants.update",
                    handler(restaurants::update),
                )
                .get(
                    "/restaurant/dashboard",
                    "restaurant.dashboard",
                    handler(pages::restaurant_dashboard),
                )
        })
        // Account profile
        .guarded(|r| {
            r.get("/profile", "profile.edit", handler(profile::edit))
                .patch("/profile", "profile.update", handler(profile::update))
                .delete("/profile", "profile.destroy", handler(profile::destroy))
        })
        // Public browsing
        .get("/restaurantlist", "restaurantlist.index", handler(restaurants::index))
        .get("/browse", "browse.index", handler(restaurants::restaurant_menu_list))
        .get(
            "/restaurantmenulist",
            "restaurantmenulist.index",
            handler(restaurants::restaurant_menu_list),
        )
        .get("/menu", "menu.index", handler(menus::index))
        .get("/about", "about.index", handler(pages::about))
        .get("/contactus", "contactus.index", handler(pages::contact))
        .get("/cart", "cart.index", handler(pages::cart))
        .get("/customers", "customers.index", handler(pages::customers))
        .get("/staff", "staff.index", handler(pages::staff))
        .get(
            "/restaurantmenus",
            "restaurantmenus.index",
            handler(pages::restaurant_menus_page),
        )
        .get("/report", "report.index", handler(pages::report))
        .get("/setting", "setting.index", handler(pages::setting))
        .get("/menuform", "menuform.index", handler(pages::menu_form))
        .get("/rhome", "rhome.index", handler(pages::restaurant_dashboard))
        // Conventional CRUD for the menus resource
        .resource(
            "menus",
            "menu",
            ResourceHandlers {
                index: handler(menus::index),
                create: handler(menus::create),
                store: handler(menus::store),
                show: handler(menus::show),
                edit: handler(menus::edit),
                update: handler(menus::update),
                destroy: handler(menus::destroy),
            },
        )
        // Slug-scoped public pages. The literal-segment rule keeps these
        // distinct from the id-scoped edit/update entries above.
        .get(
            "/restaurants/{slug}/menu",
            "menu.customer",
            handler(menus::customer_menu),
        )
        .get("/restaurants/{slug}", "restaurants.show", handler(restaurants::show))
        // JSON API
        .api(|r| {
            r.get("/restaurants", "api.restaurants", handler(api::restaurants))
                .get("/menus", "api.menus", handler(api::menus))
                .get(
                    "/restaurants-with-menus",
                    "api.restaurants_with_menus",
                    handler(api::restaurants_with_menus),
                )
                .get(
                    "/restaurant/menus",
                    "api.restaurant_menus",
                    handler(api::restaurant_menus),
                )
                .delete(
                    "/restaurantmenus/{id}",
                    "api.menus.destroy",
                    handler(api::delete_menu),
                )
        })
        .build()?;

    Ok(Arc::new(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    #[test]
    fn table_builds_cleanly() {
        let table = build().expect("route table must build");
        assert!(table.len() > 30);
        assert!(table.has("login"));
        assert!(!table.has("register"));
    }

    #[test]
    fn every_surface_route_resolves() {
        let table = build().unwrap();
        let cases = [
            (Method::GET, "/", "welcome"),
            (Method::GET, "/dashboard", "dashboard"),
            (Method::GET, "/restaurant", "restaurant.home"),
            (Method::GET, "/customer/dashboard", "customer.dashboard"),
            (Method::GET, "/restaurant/add", "restaurants.create"),
            (Method::POST, "/restaurants", "restaurants.store"),
            (Method::GET, "/restaurants/7/edit", "restaurants.edit"),
            (Method::PUT, "/restaurants/7", "restaurants.update"),
            (Method::GET, "/restaurant/dashboard", "restaurant.dashboard"),
            (Method::GET, "/profile", "profile.edit"),
            (Method::PATCH, "/profile", "profile.update"),
            (Method::DELETE, "/profile", "profile.destroy"),
            (Method::GET, "/restaurantlist", "restaurantlist.index"),
            (Method::GET, "/browse", "browse.index"),
            (Method::GET, "/restaurantmenulist", "restaurantmenulist.index"),
            (Method::GET, "/menu", "menu.index"),
            (Method::GET, "/menus", "menus.index"),
            (Method::GET, "/menus/create", "menus.create"),
            (Method::POST, "/menus", "menus.store"),
            (Method::GET, "/menus/9", "menus.show"),
            (Method::GET, "/menus/9/edit", "menus.edit"),
            (Method::PUT, "/menus/9", "menus.update"),
            (Method::PATCH, "/menus/9", "menus.update"),
            (Method::DELETE, "/menus/9", "menus.destroy"),
            (Method::GET, "/restaurants/my-slug/menu", "menu.customer"),
            (Method::GET, "/restaurants/my-slug", "restaurants.show"),
            (Method::GET, "/api/restaurants", "api.restaurants"),
            (Method::GET, "/api/menus", "api.menus"),
            (
                Method::GET,
                "/api/restaurants-with-menus",
                "api.restaurants_with_menus",
            ),
            (Method::GET, "/api/restaurant/menus", "api.restaurant_menus"),
            (Method::DELETE, "/api/restaurantmenus/42", "api.menus.destroy"),
        ];

        for (method, path, expected) in cases {
            let found = table
                .resolve(&method, path)
                .unwrap_or_else(|| panic!("no route for {} {}", method, path));
            assert_eq!(found.entry.name(), expected, "{} {}", method, path);
        }
    }

    #[test]
    fn show_and_customer_menu_are_distinct_handlers() {
        let table = build().unwrap();
        let show = table.resolve(&Method::GET, "/restaurants/my-slug").unwrap();
        let menu = table
            .resolve(&Method::GET, "/restaurants/my-slug/menu")
            .unwrap();
        assert_ne!(show.entry.name(), menu.entry.name());
        assert_eq!(show.params.get("slug"), Some("my-slug"));
        assert_eq!(menu.params.get("slug"), Some("my-slug"));
    }

    #[test]
    fn guarded_routes_are_tagged() {
        let table = build().unwrap();
        for (method, path) in [
            (Method::GET, "/dashboard"),
            (Method::GET, "/restaurant"),
            (Method::POST, "/restaurants"),
            (Method::PATCH, "/profile"),
        ] {
            assert!(
                table.resolve(&method, path).unwrap().entry.requires_auth(),
                "{} {} must require auth",
                method,
                path
            );
        }
        for (method, path) in [
            (Method::GET, "/"),
            (Method::GET, "/restaurantlist"),
            (Method::GET, "/api/restaurants"),
            (Method::GET, "/menus"),
        ] {
            assert!(
                !table.resolve(&method, path).unwrap().entry.requires_auth(),
                "{} {} must be public",
                method,
                path
            );
        }
    }

    #[test]
    fn url_generation_covers_parameterized_routes() {
        let table = build().unwrap();
        assert_eq!(
            table.url_for("restaurants.edit", &[("restaurant", "7")]).unwrap(),
            "/restaurants/7/edit"
        );
        assert_eq!(
            table.url_for("menu.customer", &[("slug", "thai-garden")]).unwrap(),
            "/restaurants/thai-garden/menu"
        );
        assert_eq!(table.url_for("restaurant.home", &[]).unwrap(), "/restaurant");
        assert_eq!(
            table.url_for("customer.dashboard", &[]).unwrap(),
            "/customer/dashboard"
        );
    }
}
