#![allow(deprecated)]
use cucumber::{then, when};
use nursery_qa::ui::pages::SalesPage;

use super::ok;
use crate::NurseryWorld;

#[when("I navigate to the sales page")]
async fn open_sales(world: &mut NurseryWorld) {
    ok(SalesPage::new(world.browser()).open().await, "open sales");
}

#[then("I should see the sales list")]
async fn sales_list(world: &mut NurseryWorld) {
    let page = SalesPage::new(world.browser());
    ok(page.expect_on_sales_page().await, "sales page");
    ok(page.expect_table_visible().await, "sales table");
}

/// Pagination only renders past one page, so its absence passes.
#[then("I should see pagination controls if there are multiple pages")]
async fn pagination_if_paged(world: &mut NurseryWorld) {
    let page = SalesPage::new(world.browser());
    if ok(page.has_pagination().await, "count pagination") {
        ok(page.expect_pagination_visible().await, "pagination");
    } else {
        tracing::debug!("single page of sales, no pagination rendered");
    }
}
