//! Route table for the nursery application's API and UI.

// API
pub const AUTH_LOGIN: &str = "/api/auth/login";

pub const CATEGORIES: &str = "/api/categories";
pub const CATEGORIES_SUMMARY: &str = "/api/categories/summary";
pub const CATEGORIES_MAIN: &str = "/api/categories/main";

pub const PLANTS: &str = "/api/plants";
pub const PLANTS_SUMMARY: &str = "/api/plants/summary";
pub const PLANTS_BY_CATEGORY: &str = "/api/plants/category";

pub const SALES_PLANT: &str = "/api/sales/plant";
pub const SALES: &str = "/api/sales";
pub const SALES_PAGE: &str = "/api/sales/page";

pub const HEALTH: &str = "/api/health";

// UI
pub const UI_LOGIN: &str = "/ui/login";
pub const UI_DASHBOARD: &str = "/ui/dashboard";
pub const UI_CATEGORIES: &str = "/ui/categories";
pub const UI_CATEGORIES_ADD: &str = "/ui/categories/add";
pub const UI_PLANTS: &str = "/ui/plants";
pub const UI_PLANTS_ADD: &str = "/ui/plants/add";
pub const UI_SALES: &str = "/ui/sales";
pub const UI_SALES_NEW: &str = "/ui/sales/new";
