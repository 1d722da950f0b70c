//! StudentInvite entity <-> model mapper

use userbind_core::entities::StudentInvite;
use userbind_core::value_objects::UserId;

use crate::models::StudentInviteModel;

impl From<StudentInviteModel> for StudentInvite {
    fn from(model: StudentInviteModel) -> Self {
        StudentInvite {
            code: model.code,
            student_id: model.student_id,
            student_name: model.student_name,
            created_at: model.created_at,
            used: model.used,
            used_by: model.used_by.map(UserId::new),
            used_at: model.used_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_used_model_maps_marker() {
        let now = Utc::now();
        let invite = StudentInvite::from(StudentInviteModel {
            code: "abc".to_string(),
            student_id: "S001".to_string(),
            student_name: "Alice".to_string(),
            created_at: now,
            used: true,
            used_by: Some(7),
            used_at: Some(now),
        });

        assert!(invite.is_used());
        assert_eq!(invite.used_by, Some(UserId::new(7)));
        assert_eq!(invite.used_at, Some(now));
    }
}
