use roster_auth::{Role, RouteAccess};

use crate::route_table::RouteTable;
use crate::state::AppState;

use super::controller::{
    create_person, delete_person, get_all_persons, get_person, get_person_by_email, reset_data,
    update_person,
};

pub fn init_persons_routes(state: AppState) -> RouteTable {
    let admin = || RouteAccess::roles([Role::Admin]);

    RouteTable::new(state)
        .get("/", get_all_persons, RouteAccess::public())
        .post("/", create_person, admin())
        .get("/resetdata", reset_data, admin())
        .get("/email/{email}", get_person_by_email, RouteAccess::public())
        .get("/{id}", get_person, RouteAccess::public())
        .put("/{id}", update_person, admin())
        .delete("/{id}", delete_person, admin())
}
