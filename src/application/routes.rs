// src/application/routes.rs
//
// Navigation targets and the session guard in front of them

use std::str::FromStr;

use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    Features,
    About,
    Login,
    Dashboard,
    Marketplace,
    TokenMarketplace,
    Property(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
}

impl Route {
    pub fn path(self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Features => "/features".to_string(),
            Route::About => "/about".to_string(),
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Marketplace => "/marketplace".to_string(),
            Route::TokenMarketplace => "/token-marketplace".to_string(),
            Route::Property(id) => format!("/property/{}", id),
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Marketplace | Route::TokenMarketplace
        )
    }
}

pub fn guard(route: Route, authenticated: bool) -> RouteDecision {
    if route.requires_auth() && !authenticated {
        RouteDecision::RedirectToLogin
    } else {
        RouteDecision::Allow
    }
}

impl FromStr for Route {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim().trim_end_matches('/');
        let route = match path {
            "" => Route::Home,
            "/features" => Route::Features,
            "/about" => Route::About,
            "/login" => Route::Login,
            "/dashboard" => Route::Dashboard,
            "/marketplace" => Route::Marketplace,
            "/token-marketplace" => Route::TokenMarketplace,
            other => {
                let id = other
                    .strip_prefix("/property/")
                    .and_then(|id| id.parse().ok())
                    .ok_or_else(|| AppError::Validation(format!("Unknown route: {}", s)))?;
                Route::Property(id)
            }
        };
        Ok(route)
    }
}
