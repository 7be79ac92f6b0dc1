//! CSS selectors of the nursery web UI.

pub mod login {
    pub const USERNAME: &str = r#"input[name="username"]"#;
    pub const PASSWORD: &str = r#"input[name="password"]"#;
    pub const SUBMIT: &str = r#"button[type="submit"]"#;
    pub const USERNAME_ERROR: &str = r#"input[name="username"] + .invalid-feedback"#;
    pub const PASSWORD_ERROR: &str = r#"input[name="password"] + .invalid-feedback"#;
}

pub mod layout {
    /// Bootstrap alerts and toasts.
    pub const ALERT: &str = r#".alert, .toast, [role="alert"]"#;
    pub const SUCCESS_ALERT: &str = r#".alert-success, .toast-success, [role="alert"]"#;
    pub const LOGOUT: &str = r#"button:has-text("Logout"), a:has-text("Logout")"#;
    pub const BODY: &str = "body";
}

pub mod table {
    pub const ROWS: &str = "tbody tr";
    pub const CELL: &str = "td";
    pub const BODY: &str = "tbody";
    pub const EDIT_ACTION: &str = r#"a[title="Edit"], button[title="Edit"]"#;
    pub const DELETE_ACTION: &str = r#"a[title="Delete"], button[title="Delete"]"#;
}

pub mod plants {
    pub const TABLE: &str = "table.table.table-striped.table-bordered";
    pub const HEADER: &str = "thead.table-dark";
    pub const ADD_BUTTON: &str = r#"a[href="/ui/plants/add"]"#;
    pub const HEADER_NAMES: &[&str] = &["Name", "Category", "Price", "Stock", "Actions"];
}

pub mod plant_form {
    pub const NAME: &str = r#"input[name="name"]"#;
    pub const CATEGORY: &str = r#"select[name="categoryId"]"#;
    pub const PRICE: &str = r#"input[name="price"]"#;
    pub const QUANTITY: &str = r#"input[name="quantity"]"#;
    pub const SAVE: &str = r#"button:has-text("Save")"#;
    pub const CANCEL: &str = r#"button:has-text("Cancel"), a:has-text("Cancel")"#;
}

pub mod categories {
    pub const TABLE: &str = "table";
    pub const ADD_BUTTON: &str = r#"a[href="/ui/categories/add"]"#;
    pub const NAME: &str = r#"input[name="name"]"#;
    pub const SAVE: &str = r#"button[type="submit"]"#;
    pub const NAME_ERROR: &str = r#"input[name="name"] + .invalid-feedback, .invalid-feedback"#;
    pub const SEARCH: &str = r#"input[name="name"], input[name="search"]"#;
    pub const SEARCH_BUTTON: &str = r#"button:has-text("Search")"#;
    pub const RESET: &str = r#"a:has-text("Reset"), button:has-text("Reset")"#;
}

pub mod sales {
    pub const TABLE: &str = "table";
    pub const PAGINATION: &str = ".pagination";
}
