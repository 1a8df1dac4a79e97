//! 页面目录与导航菜单
//!
//! 每个页面只声明一个访问要求；菜单按当前 Actor 过滤。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::gate::{AccessView, Requirement};
use crate::permission::Permission;
use crate::role::Role;

/// 受保护页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub path: &'static str,
    pub title: &'static str,
    pub requirement: Requirement,
}

const fn page(path: &'static str, title: &'static str, requirement: Requirement) -> Page {
    Page {
        path,
        title,
        requirement,
    }
}

/// 全部页面，路径唯一
pub const PAGES: &[Page] = &[
    page("/dashboard", "Dashboard", Requirement::Permission(Permission::ViewDashboard)),
    page("/attendance", "Attendance", Requirement::Permission(Permission::ViewAttendance)),
    page("/attendance/register", "Mark Attendance", Requirement::Permission(Permission::ManageAttendance)),
    page("/meals", "Meals", Requirement::Permission(Permission::ViewMeals)),
    page("/meals/plan", "Meal Planning", Requirement::Permission(Permission::ManageMeals)),
    page("/inventory", "Inventory", Requirement::Permission(Permission::ManageInventory)),
    page("/finance", "Finance", Requirement::Permission(Permission::ViewFinance)),
    page("/finance/ledger", "Ledger", Requirement::Permission(Permission::ManageFinance)),
    page("/invoices", "Invoices", Requirement::Permission(Permission::ViewInvoices)),
    page("/invoices/manage", "Invoicing", Requirement::Permission(Permission::ManageInvoices)),
    page("/users", "Users", Requirement::Permission(Permission::ManageUsers)),
    page("/students", "Students", Requirement::Permission(Permission::ManageStudents)),
    page("/rooms", "Rooms", Requirement::Permission(Permission::ViewRooms)),
    page("/rooms/allocate", "Room Allocation", Requirement::Permission(Permission::ManageRooms)),
    page("/complaints", "Complaints", Requirement::Permission(Permission::ManageComplaints)),
    page("/visitors", "Visitors", Requirement::Permission(Permission::ManageVisitors)),
    page("/reports", "Reports", Requirement::Permission(Permission::ViewReports)),
    page("/settings", "Settings", Requirement::Permission(Permission::ManageSettings)),
    page("/admin", "Administration", Requirement::Role(Role::Admin)),
    page("/portal", "My Hostel", Requirement::Role(Role::Student)),
    page("/portal/complaints", "Raise a Complaint", Requirement::Permission(Permission::SubmitComplaints)),
];

const CONSOLE_MENU: &[&str] = &[
    "/dashboard",
    "/attendance",
    "/attendance/register",
    "/meals",
    "/meals/plan",
    "/inventory",
    "/finance",
    "/finance/ledger",
    "/invoices/manage",
    "/students",
    "/rooms",
    "/rooms/allocate",
    "/complaints",
    "/visitors",
    "/reports",
    "/users",
    "/settings",
    "/admin",
];

const PORTAL_MENU: &[&str] = &[
    "/portal",
    "/attendance",
    "/meals",
    "/invoices",
    "/rooms",
    "/portal/complaints",
];

pub fn find_page(path: &str) -> Option<&'static Page> {
    PAGES.iter().find(|page| page.path == path)
}

/// 前端应用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum App {
    /// 员工后台
    Console,
    /// 学生门户
    Portal,
}

impl App {
    pub const fn as_str(&self) -> &'static str {
        match self {
            App::Console => "console",
            App::Portal => "portal",
        }
    }

    /// 菜单中的全部页面（未过滤）
    pub fn menu(&self) -> Vec<&'static Page> {
        let paths = match self {
            App::Console => CONSOLE_MENU,
            App::Portal => PORTAL_MENU,
        };
        paths.iter().filter_map(|path| find_page(path)).collect()
    }
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for App {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(App::Console),
            "portal" => Ok(App::Portal),
            other => Err(format!("Unknown app: {}", other)),
        }
    }
}

/// 当前 Actor 可见的菜单项，保持菜单顺序
pub fn visible_items(app: App, view: &AccessView) -> Vec<&'static Page> {
    app.menu()
        .into_iter()
        .filter(|page| view.check(page.requirement))
        .collect()
}
