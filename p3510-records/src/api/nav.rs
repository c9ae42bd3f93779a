//! Home and navigation tab pages

use axum::response::Html;

use crate::entities::Tab;
use crate::render;

/// GET /
pub async fn home() -> Html<String> {
    Html(render::home_page())
}

/// GET /peopletab
pub async fn people_tab() -> Html<String> {
    Html(render::tab_page(Tab::People))
}

/// GET /visitstab
pub async fn visits_tab() -> Html<String> {
    Html(render::tab_page(Tab::Visits))
}

/// GET /followupstab
pub async fn followups_tab() -> Html<String> {
    Html(render::tab_page(Tab::FollowUps))
}

/// GET /misctab
pub async fn misc_tab() -> Html<String> {
    Html(render::tab_page(Tab::Misc))
}
