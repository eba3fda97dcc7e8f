use roster_auth::{Role, RouteAccess};

use crate::route_table::RouteTable;
use crate::state::AppState;

use super::controller::{admin_demo, user_demo};

pub fn init_protected_routes(state: AppState) -> RouteTable {
    RouteTable::new(state)
        .get("/user_demo", user_demo, RouteAccess::roles([Role::User]))
        .get("/admin_demo", admin_demo, RouteAccess::roles([Role::Admin]))
}
