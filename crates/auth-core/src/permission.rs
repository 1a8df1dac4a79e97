//! 权限标签

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TagError;

/// 权限
///
/// 细粒度能力标签，字符串形式为 snake_case（如 `manage_attendance`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ViewAttendance,
    ManageAttendance,
    ViewMeals,
    ManageMeals,
    ManageInventory,
    ViewFinance,
    ManageFinance,
    ViewInvoices,
    ManageInvoices,
    ManageUsers,
    ManageStudents,
    ViewRooms,
    ManageRooms,
    SubmitComplaints,
    ManageComplaints,
    ManageVisitors,
    ViewReports,
    ManageSettings,
}

impl Permission {
    pub const ALL: [Permission; 19] = [
        Permission::ViewDashboard,
        Permission::ViewAttendance,
        Permission::ManageAttendance,
        Permission::ViewMeals,
        Permission::ManageMeals,
        Permission::ManageInventory,
        Permission::ViewFinance,
        Permission::ManageFinance,
        Permission::ViewInvoices,
        Permission::ManageInvoices,
        Permission::ManageUsers,
        Permission::ManageStudents,
        Permission::ViewRooms,
        Permission::ManageRooms,
        Permission::SubmitComplaints,
        Permission::ManageComplaints,
        Permission::ManageVisitors,
        Permission::ViewReports,
        Permission::ManageSettings,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ViewAttendance => "view_attendance",
            Permission::ManageAttendance => "manage_attendance",
            Permission::ViewMeals => "view_meals",
            Permission::ManageMeals => "manage_meals",
            Permission::ManageInventory => "manage_inventory",
            Permission::ViewFinance => "view_finance",
            Permission::ManageFinance => "manage_finance",
            Permission::ViewInvoices => "view_invoices",
            Permission::ManageInvoices => "manage_invoices",
            Permission::ManageUsers => "manage_users",
            Permission::ManageStudents => "manage_students",
            Permission::ViewRooms => "view_rooms",
            Permission::ManageRooms => "manage_rooms",
            Permission::SubmitComplaints => "submit_complaints",
            Permission::ManageComplaints => "manage_complaints",
            Permission::ManageVisitors => "manage_visitors",
            Permission::ViewReports => "view_reports",
            Permission::ManageSettings => "manage_settings",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|permission| permission.as_str() == s)
            .ok_or_else(|| TagError::UnknownPermission(s.to_string()))
    }
}
