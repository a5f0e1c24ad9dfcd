//! Student record and request payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Row of the `student` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    pub s_id: i32,
    pub s_name: String,
    pub s_course: String,
    pub course_fee: f64,
}

/// Body of `POST /students`. Fields are optional so that missing ones reach
/// validation instead of failing deserialization.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct NewStudent {
    pub s_name: Option<String>,
    pub s_course: Option<String>,
    pub course_fee: Option<f64>,
}

/// Validated create payload.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidStudent {
    pub s_name: String,
    pub s_course: String,
    pub course_fee: f64,
}

impl NewStudent {
    /// All three fields present and the text ones non-blank.
    pub fn validate(self) -> Option<ValidStudent> {
        let s_name = self.s_name.filter(|s| !s.trim().is_empty())?;
        let s_course = self.s_course.filter(|s| !s.trim().is_empty())?;
        let course_fee = self.course_fee?;
        Some(ValidStudent {
            s_name,
            s_course,
            course_fee,
        })
    }
}

/// Body of `PATCH /students/:id`. `None` means "leave unchanged"; JSON `null`
/// is treated the same as an absent key.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, ToSchema)]
pub struct StudentPatch {
    pub s_name: Option<String>,
    pub s_course: Option<String>,
    pub course_fee: Option<f64>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.s_name.is_none() && self.s_course.is_none() && self.course_fee.is_none()
    }

    /// A supplied name or course that is empty after trimming, which create would reject.
    pub fn has_blank_text(&self) -> bool {
        [&self.s_name, &self.s_course]
            .into_iter()
            .flatten()
            .any(|s| s.trim().is_empty())
    }

    /// Apply supplied fields onto a record.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(name) = &self.s_name {
            student.s_name = name.clone();
        }
        if let Some(course) = &self.s_course {
            student.s_course = course.clone();
        }
        if let Some(fee) = self.course_fee {
            student.course_fee = fee;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_every_field() {
        let full = NewStudent {
            s_name: Some("A".into()),
            s_course: Some("CS".into()),
            course_fee: Some(0.0),
        };
        assert!(full.clone().validate().is_some());

        let mut blank_name = full.clone();
        blank_name.s_name = Some("   ".into());
        assert!(blank_name.validate().is_none());

        let mut no_course = full.clone();
        no_course.s_course = None;
        assert!(no_course.validate().is_none());

        let mut no_fee = full;
        no_fee.course_fee = None;
        assert!(no_fee.validate().is_none());
    }

    #[test]
    fn patch_from_json_ignores_nulls_and_unknown_keys() {
        let patch: StudentPatch =
            serde_json::from_str(r#"{"s_name": null, "nickname": "x"}"#).unwrap();
        assert!(patch.is_empty());

        let patch: StudentPatch = serde_json::from_str(r#"{"course_fee": 150}"#).unwrap();
        assert!(!patch.is_empty());
        assert_eq!(patch.course_fee, Some(150.0));
    }

    #[test]
    fn blank_text_in_patch_is_detected() {
        let patch = StudentPatch {
            s_course: Some("  ".into()),
            ..Default::default()
        };
        assert!(patch.has_blank_text());
        let patch = StudentPatch {
            s_name: Some("".into()),
            course_fee: Some(1.0),
            ..Default::default()
        };
        assert!(patch.has_blank_text());
        let patch = StudentPatch {
            s_name: Some("B".into()),
            ..Default::default()
        };
        assert!(!patch.has_blank_text());
        assert!(!StudentPatch::default().has_blank_text());
    }

    #[test]
    fn apply_changes_only_supplied_fields() {
        let mut student = Student {
            s_id: 1,
            s_name: "A".into(),
            s_course: "CS".into(),
            course_fee: 100.0,
        };
        StudentPatch {
            s_course: Some("Math".into()),
            ..Default::default()
        }
        .apply_to(&mut student);
        assert_eq!(student.s_name, "A");
        assert_eq!(student.s_course, "Math");
        assert_eq!(student.course_fee, 100.0);
    }
}
