//! Test app builder that mirrors main.rs wiring with a manual clock.
//!
//! Constructs the same router as production, but on a [`ManualClock`] so
//! tests can march logical time forward deterministically.

use std::sync::Arc;

use axum::Router;
use cap_engine::Principal;
use capitol_api::{
    app::build_router,
    config::{CorsConfig, SwaggerConfig},
    state::{mock::ManualClock, AppState},
};

/// Default administrator principal used by tests.
pub const ADMIN: &str = "admin-principal";

/// Builder for test applications that mirrors main.rs wiring.
pub struct TestAppBuilder {
    admin: String,
    start_time: u64,
    cors: CorsConfig,
    swagger: SwaggerConfig,
}

impl TestAppBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            admin: ADMIN.to_string(),
            start_time: 1_000,
            cors: CorsConfig::default(),
            swagger: SwaggerConfig::default(),
        }
    }

    /// Override the administrator principal.
    #[must_use]
    pub fn with_admin(mut self, admin: &str) -> Self {
        self.admin = admin.to_string();
        self
    }

    /// Start the clock at a specific logical time.
    #[must_use]
    pub fn at_time(mut self, now: u64) -> Self {
        self.start_time = now;
        self
    }

    #[must_use]
    pub fn build(self) -> TestApp {
        let clock = Arc::new(ManualClock::new(self.start_time));
        let state = AppState::new(Principal::new(self.admin.clone()), clock.clone());
        let router = build_router(state, &self.cors, &self.swagger);
        TestApp {
            router,
            clock,
            admin: self.admin,
        }
    }
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A built test application: router plus the handles tests drive.
pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub admin: String,
}
