use axum::response::Response;

use bookstore_session::Session;

// ── GET /reports ─────────────────────────────────────────────────────────────

pub async fn reports(session: Session) -> Response {
    session.render("reports.html", ())
}
