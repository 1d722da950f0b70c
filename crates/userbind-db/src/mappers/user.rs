//! User entity <-> model mapper

use userbind_core::entities::User;
use userbind_core::value_objects::{Privileges, UserId};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            handle: model.handle,
            email: model.email,
            privileges: Privileges::from_i64(model.privileges),
            student_id: model.student_id,
            student_name: model.student_name,
            is_school_student: model.is_school_student,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
