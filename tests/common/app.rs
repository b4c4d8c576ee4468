use axum_test::TestServer;
use trip_packer::build_router;
use trip_packer::state::AppState;

/// Test application wrapper
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application over an in-memory store
    pub async fn new() -> Self {
        let state = AppState::in_memory();

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, state }
    }
}
