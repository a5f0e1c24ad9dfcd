//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the `student` table.

use crate::model::{StudentPatch, ValidStudent};
use crate::sql::params::BindValue;

pub const STUDENT_TABLE: &str = "student";
pub const PK_COLUMN: &str = "s_id";
const COLUMNS: &str = "s_id, s_name, s_course, course_fee";

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Append a parameter and return its 1-based placeholder number.
    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// DDL for the backing table; idempotent.
pub fn create_table() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\
         {} SERIAL PRIMARY KEY, \
         s_name TEXT NOT NULL, \
         s_course TEXT NOT NULL, \
         course_fee DOUBLE PRECISION NOT NULL)",
        STUDENT_TABLE, PK_COLUMN
    )
}

/// SELECT every row in storage order.
pub fn select_all() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {} ORDER BY {}", COLUMNS, STUDENT_TABLE, PK_COLUMN);
    q
}

/// SELECT by primary key.
pub fn select_by_id(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id.into());
    q.sql = format!("SELECT {} FROM {} WHERE {} = ${}", COLUMNS, STUDENT_TABLE, PK_COLUMN, n);
    q
}

/// INSERT returning the assigned id.
pub fn insert(student: &ValidStudent) -> QueryBuf {
    let mut q = QueryBuf::new();
    let name = q.push_param(student.s_name.as_str().into());
    let course = q.push_param(student.s_course.as_str().into());
    let fee = q.push_param(student.course_fee.into());
    q.sql = format!(
        "INSERT INTO {} (s_name, s_course, course_fee) VALUES (${}, ${}, ${}) RETURNING {}",
        STUDENT_TABLE, name, course, fee, PK_COLUMN
    );
    q
}

/// UPDATE by id setting only the supplied columns. `None` when the patch is empty.
pub fn update(id: i32, patch: &StudentPatch) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    if let Some(name) = &patch.s_name {
        let n = q.push_param(name.as_str().into());
        sets.push(format!("s_name = ${}", n));
    }
    if let Some(course) = &patch.s_course {
        let n = q.push_param(course.as_str().into());
        sets.push(format!("s_course = ${}", n));
    }
    if let Some(fee) = patch.course_fee {
        let n = q.push_param(fee.into());
        sets.push(format!("course_fee = ${}", n));
    }
    if sets.is_empty() {
        return None;
    }
    let id_param = q.push_param(id.into());
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        STUDENT_TABLE,
        sets.join(", "),
        PK_COLUMN,
        id_param
    );
    Some(q)
}

/// DELETE by id.
pub fn delete(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id.into());
    q.sql = format!("DELETE FROM {} WHERE {} = ${}", STUDENT_TABLE, PK_COLUMN, n);
    q
}
