//! Page objects. Each borrows the scenario's [`Browser`](super::Browser)
//! and exposes navigation, actions and `expect_*` assertions.

mod add_plant;
mod base;
mod categories;
mod dashboard;
mod edit_plant;
mod login;
mod logout;
mod plants;
mod sales;

pub use add_plant::{AddPlantPage, PlantForm};
pub use base::BasePage;
pub use categories::CategoriesPage;
pub use dashboard::{DashboardPage, NavItem};
pub use edit_plant::EditPlantPage;
pub use login::LoginPage;
pub use logout::LogoutPage;
pub use plants::PlantsPage;
pub use sales::SalesPage;
