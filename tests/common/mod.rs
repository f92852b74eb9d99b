use std::time::Duration;

use records_console::repository::HttpRepository;
use records_console::session::{Session, SessionHandle};
use wiremock::MockServer;

/// Session carrying `token`, or an anonymous one.
pub fn session(token: Option<&str>) -> SessionHandle {
    SessionHandle::new(Session {
        token: token.map(str::to_string),
        ..Session::default()
    })
}

/// Client pointed at the mock server.
pub fn repository(server: &MockServer, session: SessionHandle) -> HttpRepository {
    HttpRepository::new(server.uri(), Duration::from_secs(5), session)
        .expect("failed to build HTTP client")
}
