use roster_auth::{Role, RouteAccess};

use crate::route_table::RouteTable;
use crate::state::AppState;

use super::controller::{add_role, login, register, remove_role, verify};

pub fn init_auth_routes(state: AppState) -> RouteTable {
    RouteTable::new(state)
        .post("/login", login, RouteAccess::public())
        .post("/register", register, RouteAccess::public())
        // Open route; the handler's extractor checks the token itself.
        .get("/verify", verify, RouteAccess::public())
        .post("/user/addrole", add_role, RouteAccess::roles([Role::Admin]))
        .post("/user/removerole", remove_role, RouteAccess::roles([Role::Admin]))
}
