//! 受保护页面
//!
//! 页面目录中的每个路径都挂在 protect_page 之后；这里只负责渲染。

use axum::{Json, Router, extract::State, middleware, routing::get};
use hostel_auth_core::{AccessView, Page, Permission, Requirement, navigation::PAGES};
use serde::Serialize;

use crate::middleware::{CurrentAccess, PageProtection, protect_page};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PageView {
    pub path: &'static str,
    pub title: &'static str,
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widgets: Option<Vec<Widget>>,
}

impl PageView {
    fn new(page: &Page, view: &AccessView) -> Self {
        Self {
            path: page.path,
            title: page.title,
            actor: view.actor().map(|actor| actor.display_name.clone()),
            widgets: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Widget {
    pub name: &'static str,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Widget {
    fn visible(name: &'static str) -> Self {
        Self {
            name,
            visible: true,
            message: None,
        }
    }

    fn denied(name: &'static str, title: &str) -> Self {
        Self {
            name,
            visible: false,
            message: Some(title.to_string()),
        }
    }
}

const DASHBOARD_WIDGETS: &[(&str, Permission)] = &[
    ("attendance", Permission::ViewAttendance),
    ("meals", Permission::ViewMeals),
    ("inventory", Permission::ManageInventory),
    ("finance", Permission::ViewFinance),
    ("complaints", Permission::ManageComplaints),
    ("visitors", Permission::ManageVisitors),
    ("settings", Permission::ManageSettings),
];

/// 仪表盘小组件：无权限的位置渲染默认拒绝占位
pub fn dashboard_widgets(view: &AccessView, denied_title: &str) -> Vec<Widget> {
    DASHBOARD_WIDGETS
        .iter()
        .map(|&(name, permission)| {
            view.guard(Requirement::Permission(permission), Widget::visible(name), None)
                .unwrap_or_else(|| Widget::denied(name, denied_title))
        })
        .collect()
}

pub fn page_routes(state: &AppState) -> Router<AppState> {
    PAGES.iter().fold(Router::new(), |router, page| {
        let route = if page.path == "/dashboard" {
            get(
                move |State(app): State<AppState>, CurrentAccess(view): CurrentAccess| async move {
                    let mut page_view = PageView::new(page, &view);
                    page_view.widgets = Some(dashboard_widgets(&view, &app.denied_title));
                    Json(page_view)
                },
            )
        } else {
            get(move |CurrentAccess(view): CurrentAccess| async move {
                Json(PageView::new(page, &view))
            })
        };

        router.route(
            page.path,
            route.route_layer(middleware::from_fn_with_state(
                PageProtection::new(page, state),
                protect_page,
            )),
        )
    })
}
