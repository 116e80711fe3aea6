use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::analytics::model::{FinancialSummary, GenderDistribution};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, Principal, RegisterRequestDto, Role};
use crate::modules::classes::model::{Class, CreateClassDto, UpdateClassDto};
use crate::modules::students::model::{CreateStudentDto, Student, UpdateStudentDto};
use crate::modules::teachers::model::{CreateTeacherDto, Teacher, UpdateTeacherDto};
use crate::modules::value_types::Gender;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::analytics::controller::get_gender_distribution,
        crate::modules::analytics::controller::get_financial_summary,
    ),
    components(
        schemas(
            Principal,
            Role,
            Gender,
            RegisterRequestDto,
            LoginRequest,
            LoginResponse,
            Class,
            CreateClassDto,
            UpdateClassDto,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            GenderDistribution,
            FinancialSummary,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Classes", description = "Class management"),
        (name = "Teachers", description = "Teacher management"),
        (name = "Students", description = "Student management"),
        (name = "Analytics", description = "Derived read-only views"),
    ),
    info(
        title = "Schoolhouse API",
        description = "School management REST API with role-based access control",
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
