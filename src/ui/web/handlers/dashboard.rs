//! Single-page dashboard

use axum::response::Html;

use crate::config::{APP_DESCRIPTION, APP_TITLE};

const PAGE: &str = include_str!("../dashboard.html");

pub async fn index() -> Html<String> {
    Html(
        PAGE.replace("{{title}}", APP_TITLE)
            .replace("{{description}}", APP_DESCRIPTION),
    )
}
