//! Account settings registry
//!
//! Descriptors for the per-account settings exposed through the generic
//! settings endpoints. The identity fields are registered here so that the
//! settings write path can change them without going through an invite.

use serde::Serialize;

/// Value type of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    Text,
    Boolean,
}

/// One registered account setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingDescriptor {
    pub key: &'static str,
    pub family: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
    pub kind: SettingKind,
}

pub const STUDENT_ID: &str = "student_id";
pub const STUDENT_NAME: &str = "student_name";
pub const IS_SCHOOL_STUDENT: &str = "is_school_student";

pub static ACCOUNT_SETTINGS: &[SettingDescriptor] = &[
    SettingDescriptor {
        key: STUDENT_ID,
        family: "setting_info",
        name: "Student ID",
        desc: "Student ID",
        kind: SettingKind::Text,
    },
    SettingDescriptor {
        key: STUDENT_NAME,
        family: "setting_info",
        name: "Student Name",
        desc: "Real name of the student",
        kind: SettingKind::Text,
    },
    SettingDescriptor {
        key: IS_SCHOOL_STUDENT,
        family: "setting_info",
        name: "Is School Student",
        desc: "Account must bind a student identity before using the site",
        kind: SettingKind::Boolean,
    },
];

/// Look up a descriptor by key
pub fn find(key: &str) -> Option<&'static SettingDescriptor> {
    ACCOUNT_SETTINGS.iter().find(|d| d.key == key)
}
