//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::error::MessageResponse;
use super::handlers::{self, HealthResponse};
use super::state::AppState;
use crate::db::{
    Attendance, AttendanceFields, Database, Student, StudentFields, Transaction,
    TransactionFields,
};

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tally API",
        version = "0.1.0",
        description = "CRUD service over single-table SQL records",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::list_transactions,
        handlers::get_transaction,
        handlers::create_transaction,
        handlers::update_transaction,
        handlers::delete_transaction,
        handlers::list_students,
        handlers::get_student,
        handlers::create_student,
        handlers::update_student,
        handlers::delete_student,
        handlers::list_attendance,
        handlers::get_attendance,
        handlers::create_attendance,
        handlers::update_attendance,
        handlers::delete_attendance,
        handlers::mark_present,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponse,
            Transaction,
            TransactionFields,
            Student,
            StudentFields,
            Attendance,
            AttendanceFields,
        )
    ),
    tags(
        (name = "system", description = "System health endpoints"),
        (name = "transactions", description = "Financial transaction records"),
        (name = "students", description = "Student records"),
        (name = "attendance", description = "Attendance roll")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = routes!(D => {
        get "/health" => handlers::health,
    });

    let transaction_routes = routes!(D => {
        get "/transactions" => handlers::list_transactions,
        get "/transactions/{id}" => handlers::get_transaction,
        post "/transactions" => handlers::create_transaction,
        put "/transactions/{id}" => handlers::update_transaction,
        delete "/transactions/{id}" => handlers::delete_transaction,
    });

    let student_routes = routes!(D => {
        get "/students" => handlers::list_students,
        get "/students/{id}" => handlers::get_student,
        post "/students" => handlers::create_student,
        put "/students/{id}" => handlers::update_student,
        delete "/students/{id}" => handlers::delete_student,
    });

    let attendance_routes = routes!(D => {
        get "/attendance" => handlers::list_attendance,
        get "/attendance/{id}" => handlers::get_attendance,
        post "/attendance" => handlers::create_attendance,
        put "/attendance/{id}" => handlers::update_attendance,
        delete "/attendance/{id}" => handlers::delete_attendance,
        put "/attendance/{id}/present" => handlers::mark_present,
    });

    system_routes
        .merge(transaction_routes)
        .merge(student_routes)
        .merge(attendance_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
