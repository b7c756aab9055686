pub mod fixtures;

use axum_test::TestServer;
use imagesmith_core::Config;

/// Test application wrapping an in-process server
pub struct TestApp {
    pub server: TestServer,
    pub config: Config,
}

impl TestApp {
    /// Get the HTTP test client
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup a test application with default configuration
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(Config::default())
}

/// Setup a test application with a custom configuration
pub fn setup_test_app_with(config: Config) -> TestApp {
    let (_state, router) = imagesmith_api::setup::initialize_app(config.clone())
        .expect("Failed to initialize app");
    let server = TestServer::new(router).expect("Failed to create test server");
    TestApp { server, config }
}
