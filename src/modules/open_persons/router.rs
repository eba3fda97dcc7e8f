use roster_auth::RouteAccess;

use crate::route_table::RouteTable;
use crate::state::AppState;

use super::controller::{create, delete, get_all, get_by_email, get_by_id, update};

pub fn init_open_persons_routes(state: AppState) -> RouteTable {
    RouteTable::new(state)
        .get("/", get_all, RouteAccess::public())
        .post("/", create, RouteAccess::public())
        .get("/email/{email}", get_by_email, RouteAccess::public())
        .get("/{id}", get_by_id, RouteAccess::public())
        .put("/{id}", update, RouteAccess::public())
        .delete("/{id}", delete, RouteAccess::public())
}
