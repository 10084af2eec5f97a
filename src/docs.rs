use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::attendance::model::{
    AttendanceMark, CourseSheetRow, MarkAttendanceDto, MarkAttendanceResponse,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::cashier::model::{
    CashSummary, CashTransaction, CreateTransactionDto, PaginatedTransactionsResponse,
    TransactionKind,
};
use crate::modules::students::model::{
    CreateStudentDto, EnrollStudentDto, EnrollmentWithCourse, PaginatedStudentsResponse, Student,
    UpdateStudentDto,
};
use crate::modules::users::model::{
    CreateUserDto, PaginatedUsersResponse, PermissionCategoryGroup, PermissionInfo,
    UpdatePermissionsDto, UpdateUserDto, User, UserWithPermissions,
};
use robokademi_core::{AttendanceStatus, Category, PaginationMeta, Role, SubjectKind};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_me,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::update_user_permissions,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::get_permission_catalog,
        crate::modules::users::controller::get_role_defaults,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::enroll_student,
        crate::modules::students::controller::get_student_enrollments,
        crate::modules::students::controller::unenroll_student,
        crate::modules::attendance::controller::mark_attendance,
        crate::modules::attendance::controller::get_marks,
        crate::modules::attendance::controller::get_course_sheet,
        crate::modules::cashier::controller::record_transaction,
        crate::modules::cashier::controller::get_transactions,
        crate::modules::cashier::controller::get_summary,
        crate::modules::cashier::controller::delete_transaction,
    ),
    components(schemas(
        ErrorResponse,
        LoginRequest,
        LoginResponse,
        User,
        UserWithPermissions,
        CreateUserDto,
        UpdateUserDto,
        UpdatePermissionsDto,
        PaginatedUsersResponse,
        PermissionInfo,
        PermissionCategoryGroup,
        Role,
        Category,
        Student,
        CreateStudentDto,
        UpdateStudentDto,
        PaginatedStudentsResponse,
        EnrollStudentDto,
        EnrollmentWithCourse,
        AttendanceMark,
        MarkAttendanceDto,
        MarkAttendanceResponse,
        CourseSheetRow,
        AttendanceStatus,
        SubjectKind,
        CashTransaction,
        CreateTransactionDto,
        PaginatedTransactionsResponse,
        CashSummary,
        TransactionKind,
        PaginationMeta,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and profile"),
        (name = "Users", description = "Staff accounts and permission management"),
        (name = "Students", description = "Student records and course enrollments"),
        (name = "Attendance", description = "Attendance marks and session balances"),
        (name = "Cashier", description = "Cash ledger"),
    ),
    info(
        title = "Robokademi API",
        description = "Administrative back-office for a robotics-education business",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
