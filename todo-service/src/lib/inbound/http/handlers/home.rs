use axum::Json;
use serde::Serialize;

/// Public landing payload.
pub async fn home() -> Json<HomeData> {
    Json(HomeData {
        name: "Todoing",
        description: "A sleek and simple task manager built to keep you productive",
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeData {
    pub name: &'static str,
    pub description: &'static str,
}
