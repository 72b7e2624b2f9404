//! Entity definitions driving the generic CRUD screen.
//!
//! Each entity is a static [`EntitySpec`]: its columns, its endpoints and
//! how records map onto request paths.

use serde_json::Value;

use crate::Record;
use crate::error::{ApiError, ApiErrorKind, ApiResult};
use crate::field::{FieldDescriptor, lookup, value_text};
use crate::protocol::{ApiRequest, encode_segment};
use crate::school::ClassScope;
use crate::table::Paging;

/// Endpoint templates. `{name}` placeholders are filled from the record (or
/// draft) the request is about; list templates take `{class}` and `{section}`
/// from the class scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub list: &'static str,
    /// `None` for read-only lists.
    pub create: Option<&'static str>,
    /// `false` when everything the backend needs is in the create path.
    pub create_sends_body: bool,
    pub update: Option<&'static str>,
    pub delete: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySpec {
    /// Plural, used as the screen heading.
    pub name: &'static str,
    /// Used in modal titles and notices.
    pub singular: &'static str,
    pub fields: &'static [FieldDescriptor],
    pub endpoints: Endpoints,
    pub add_defaults: &'static [(&'static str, &'static str)],
    pub paging: Paging,
    /// Lists are filtered by class and section.
    pub scoped: bool,
    /// Teachers carry the class-teacher assign/remove action.
    pub class_teacher_action: bool,
}

// =========================================================
// 实体定义
// =========================================================

pub const STUDENT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("regNo", "Reg No"),
    FieldDescriptor::new("firstName", "First Name"),
    FieldDescriptor::new("lastName", "Last Name"),
    FieldDescriptor::new("fatherName", "Father Name"),
    FieldDescriptor::new("motherName", "Mother Name"),
    FieldDescriptor::new("phno", "Phone No"),
    FieldDescriptor::new("address", "Address"),
    FieldDescriptor::new("password", "Password"),
    FieldDescriptor::new("classesEntity", "Class").disabled(),
    FieldDescriptor::new("classSection", "Section").disabled(),
    FieldDescriptor::new("role", "Role").disabled(),
];

pub const TEACHER_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("regNo", "Employee ID"),
    FieldDescriptor::new("firstName", "First Name"),
    FieldDescriptor::new("lastName", "Last Name"),
    FieldDescriptor::new("password", "Password"),
    FieldDescriptor::new("address", "Address"),
    FieldDescriptor::new("phno", "Phone No"),
    FieldDescriptor::new("role", "Role").disabled(),
];

pub const SUBJECT_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::new("name", "Subject Name")];

pub const STUDENTS: EntitySpec = EntitySpec {
    name: "Students",
    singular: "Student",
    fields: STUDENT_FIELDS,
    endpoints: Endpoints {
        list: "/student/pagination/getClassStudents/{class}/{section}",
        create: Some("/student/add"),
        create_sends_body: true,
        update: Some("/student/update/{studentId}"),
        delete: None,
    },
    add_defaults: &[("role", "Student")],
    paging: Paging::Server,
    scoped: true,
    class_teacher_action: false,
};

pub const TEACHERS: EntitySpec = EntitySpec {
    name: "Teachers",
    singular: "Teacher",
    fields: TEACHER_FIELDS,
    endpoints: Endpoints {
        list: "/teacher/all",
        create: Some("/teacher/add"),
        create_sends_body: true,
        update: Some("/teacher/update/{teacherId}"),
        delete: Some("/teacher/delete/{regNo}"),
    },
    add_defaults: &[("role", "Teacher")],
    paging: Paging::Server,
    scoped: false,
    class_teacher_action: true,
};

pub const SUBJECTS: EntitySpec = EntitySpec {
    name: "Subjects",
    singular: "Subject",
    fields: SUBJECT_FIELDS,
    endpoints: Endpoints {
        list: "/subject/all",
        create: Some("/subject/{name}"),
        create_sends_body: false,
        update: None,
        delete: Some("/subject/{id}"),
    },
    add_defaults: &[],
    paging: Paging::Client,
    scoped: false,
    class_teacher_action: false,
};

pub const FEE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("Name", "Student Name"),
    FieldDescriptor::new("1st Term.amount", "1st Term Fee"),
    FieldDescriptor::new("1st Term.paidDate", "1st Term Paid Date"),
    FieldDescriptor::new("2nd Term.amount", "2nd Term Fee"),
    FieldDescriptor::new("2nd Term.paidDate", "2nd Term Paid Date"),
    FieldDescriptor::new("3rd Term.amount", "3rd Term Fee"),
    FieldDescriptor::new("3rd Term.paidDate", "3rd Term Paid Date"),
    FieldDescriptor::new("Total Fee", "Total Fee"),
    FieldDescriptor::new("Fee After Discount", "Fee After Discount"),
];

/// Read-only fee overview of one class section.
pub const FEES: EntitySpec = EntitySpec {
    name: "Fee Details",
    singular: "Fee Record",
    fields: FEE_FIELDS,
    endpoints: Endpoints {
        list: "/api/fee-details/class/{class}/section/{section}",
        create: None,
        create_sends_body: false,
        update: None,
        delete: None,
    },
    add_defaults: &[],
    paging: Paging::Client,
    scoped: true,
    class_teacher_action: false,
};

/// Draft keys that receive the current class scope in add and edit mode.
const SCOPE_KEYS: (&str, &str) = ("classesEntity", "classSection");

// =========================================================
// 路径模板
// =========================================================

/// Replaces every `{key}` in `template` with the encoded value from `lookup`.
/// Values are trimmed; a blank value counts as missing.
fn expand(template: &str, lookup: impl Fn(&str) -> Option<String>) -> ApiResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let end = tail
            .find('}')
            .ok_or_else(|| ApiError::new(ApiErrorKind::Rejected, "malformed endpoint template"))?;
        let key = &tail[..end];
        let value = lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::new(ApiErrorKind::Rejected, format!("missing {}", key)))?;
        out.push_str(&encode_segment(&value));
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn record_lookup(record: &Record) -> impl Fn(&str) -> Option<String> + '_ {
    move |key| lookup(record, key).map(value_text)
}

impl EntitySpec {
    pub fn is_creatable(&self) -> bool {
        self.endpoints.create.is_some()
    }

    pub fn is_editable(&self) -> bool {
        self.endpoints.update.is_some()
    }

    pub fn is_deletable(&self) -> bool {
        self.endpoints.delete.is_some()
    }

    /// Add-mode defaults; scoped entities also take the current class and
    /// section.
    pub fn defaults(&self, scope: &ClassScope) -> Record {
        let mut defaults: Record = self
            .add_defaults
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        defaults.extend(self.edit_overrides(scope));
        defaults
    }

    /// Values forced into the edit draft: scoped entities move the record to
    /// the class and section currently selected.
    pub fn edit_overrides(&self, scope: &ClassScope) -> Record {
        let mut overrides = Record::new();
        if self.scoped {
            let (class_key, section_key) = SCOPE_KEYS;
            overrides.insert(class_key.to_string(), scope.class_name().into());
            overrides.insert(section_key.to_string(), scope.section().into());
        }
        overrides
    }

    pub fn list_request(&self, page: usize, page_size: usize, scope: &ClassScope) -> ApiResult<ApiRequest> {
        let path = expand(self.endpoints.list, |key| match key {
            "class" => Some(scope.class_name().to_string()),
            "section" => Some(scope.section().to_string()),
            _ => None,
        })?;
        let req = ApiRequest::get(path).named("entity.list");
        Ok(match self.paging {
            Paging::Server => req.with_query("page", page).with_query("size", page_size),
            Paging::Client => req,
        })
    }

    pub fn create_request(&self, draft: &Record) -> ApiResult<ApiRequest> {
        let template = self.endpoints.create.ok_or_else(|| {
            ApiError::new(ApiErrorKind::Rejected, format!("{} cannot be added", self.name))
        })?;
        let path = expand(template, record_lookup(draft))?;
        let req = ApiRequest::post(path).named("entity.create");
        Ok(if self.endpoints.create_sends_body {
            req.with_body(Value::Object(draft.clone()))
        } else {
            req
        })
    }

    /// Path ids come from the original entity, so editing the id field
    /// itself still targets the stored record.
    pub fn update_request(&self, entity: &Record, draft: &Record) -> ApiResult<ApiRequest> {
        let template = self.endpoints.update.ok_or_else(|| {
            ApiError::new(ApiErrorKind::Rejected, format!("{} cannot be edited", self.name))
        })?;
        let path = expand(template, record_lookup(entity))?;
        Ok(ApiRequest::put(path)
            .with_body(Value::Object(draft.clone()))
            .named("entity.update"))
    }

    pub fn delete_request(&self, entity: &Record) -> ApiResult<ApiRequest> {
        let template = self.endpoints.delete.ok_or_else(|| {
            ApiError::new(ApiErrorKind::Rejected, format!("{} cannot be deleted", self.name))
        })?;
        let path = expand(template, record_lookup(entity))?;
        Ok(ApiRequest::delete(path).named("entity.delete"))
    }
}

// =========================================================
// 班主任操作 (Class-teacher action)
// =========================================================

pub fn class_details_request(reg_no: &str) -> ApiRequest {
    ApiRequest::get(format!("/teacher/class-details/{}", encode_segment(reg_no)))
        .named("teacher.class_details")
}

pub fn assign_class_teacher_request(reg_no: &str, scope: &ClassScope) -> ApiRequest {
    ApiRequest::post("/teacher/assign")
        .with_query("regNo", reg_no)
        .with_query("classEntity", scope.class_name())
        .with_query("classSection", scope.section())
        .named("teacher.assign")
}

pub fn remove_class_teacher_request(reg_no: &str) -> ApiRequest {
    ApiRequest::delete(format!(
        "/teacher/remove-classTeacher/{}",
        encode_segment(reg_no)
    ))
    .named("teacher.remove_class")
}

/// Which form the class-teacher dialog shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassTeacherStatus {
    /// Not a class teacher yet; offer class and section pickers.
    Unassigned,
    /// Currently in charge of a class; offer removal.
    Assigned(Record),
}

impl ClassTeacherStatus {
    /// Interprets the class-details lookup; 404 means unassigned and any
    /// other error is passed through.
    pub fn from_lookup(result: ApiResult<Value>) -> ApiResult<Self> {
        match result {
            Ok(Value::Object(details)) => Ok(ClassTeacherStatus::Assigned(details)),
            Ok(_) => Ok(ClassTeacherStatus::Assigned(Record::new())),
            Err(e) if e.is_not_found() => Ok(ClassTeacherStatus::Unassigned),
            Err(e) => Err(e),
        }
    }

    /// Short description, e.g. "Class 5 - B".
    pub fn summary(&self) -> Option<String> {
        match self {
            ClassTeacherStatus::Unassigned => None,
            ClassTeacherStatus::Assigned(details) => {
                let text = |key: &str| details.get(key).map(value_text).unwrap_or_default();
                let class = text("className");
                let section = text("classSection");
                if class.is_empty() {
                    Some("an assigned class".to_string())
                } else if section.is_empty() {
                    Some(format!("Class {}", class))
                } else {
                    Some(format!("Class {} - {}", class, section))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::keys_are_unique;
    use crate::protocol::HttpMethod;
    use serde_json::json;

    fn record(v: Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn descriptor_keys_are_unique() {
        for spec in [STUDENTS, TEACHERS, SUBJECTS, FEES] {
            assert!(keys_are_unique(spec.fields), "{}", spec.name);
        }
    }

    #[test]
    fn student_list_is_scoped_and_paged() {
        let scope = ClassScope::new("LKG");
        let req = STUDENTS.list_request(2, 10, &scope).unwrap();
        assert_eq!(
            req.url("/api"),
            "/api/student/pagination/getClassStudents/LKG/A?page=2&size=10"
        );
    }

    #[test]
    fn subject_list_has_no_paging_params() {
        let req = SUBJECTS.list_request(3, 10, &ClassScope::default()).unwrap();
        assert_eq!(req.url("/api"), "/api/subject/all");
    }

    #[test]
    fn student_defaults_take_the_scope() {
        let mut scope = ClassScope::new("4");
        scope.set_section("C");
        assert_eq!(
            STUDENTS.defaults(&scope),
            record(json!({"role": "Student", "classesEntity": "4", "classSection": "C"}))
        );
        assert_eq!(TEACHERS.defaults(&scope), record(json!({"role": "Teacher"})));
    }

    #[test]
    fn subject_create_puts_name_in_path() {
        let req = SUBJECTS
            .create_request(&record(json!({"name": "Social Science"})))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/subject/Social%20Science");
        assert!(req.body.is_none());

        let err = SUBJECTS.create_request(&record(json!({"name": ""}))).unwrap_err();
        assert_eq!(err.message, "missing name");
    }

    #[test]
    fn subject_name_is_trimmed_and_blank_rejected() {
        let req = SUBJECTS
            .create_request(&record(json!({"name": "  Maths "})))
            .unwrap();
        assert_eq!(req.path, "/subject/Maths");

        let err = SUBJECTS
            .create_request(&record(json!({"name": "   "})))
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Rejected);
        assert_eq!(err.message, "missing name");
    }

    #[test]
    fn student_update_targets_student_id() {
        let entity = record(json!({"studentId": 42, "regNo": "S1"}));
        let req = STUDENTS.update_request(&entity, &record(json!({"regNo": "S1"}))).unwrap();
        assert_eq!(req.path, "/student/update/42");

        let without_id = record(json!({"regNo": "S1"}));
        assert_eq!(
            STUDENTS.update_request(&without_id, &Record::new()).unwrap_err().message,
            "missing studentId"
        );
    }

    #[test]
    fn edit_overrides_only_for_scoped_entities() {
        let mut scope = ClassScope::new("5");
        scope.set_section("B");
        assert_eq!(
            STUDENTS.edit_overrides(&scope),
            record(json!({"classesEntity": "5", "classSection": "B"}))
        );
        assert!(TEACHERS.edit_overrides(&scope).is_empty());
    }

    #[test]
    fn fee_list_is_scoped_and_read_only() {
        let mut scope = ClassScope::new("10");
        scope.set_section("B");
        let req = FEES.list_request(4, 10, &scope).unwrap();
        assert_eq!(req.url(""), "/api/fee-details/class/10/section/B");

        assert!(!FEES.is_creatable());
        assert!(!FEES.is_editable());
        assert!(!FEES.is_deletable());
        assert!(FEES.create_request(&Record::new()).is_err());
    }

    #[test]
    fn teacher_update_uses_stored_id() {
        let entity = record(json!({"teacherId": 12, "regNo": "E1"}));
        let draft = record(json!({"regNo": "E2"}));
        let req = TEACHERS.update_request(&entity, &draft).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "/teacher/update/12");
        assert_eq!(req.body, Some(json!({"regNo": "E2"})));
    }

    #[test]
    fn delete_endpoints() {
        let teacher = record(json!({"teacherId": 1, "regNo": "E 7"}));
        assert_eq!(
            TEACHERS.delete_request(&teacher).unwrap().path,
            "/teacher/delete/E%207"
        );
        let subject = record(json!({"id": 4, "name": "Maths"}));
        assert_eq!(SUBJECTS.delete_request(&subject).unwrap().path, "/subject/4");
        assert!(STUDENTS.delete_request(&subject).is_err());
        assert!(!STUDENTS.is_deletable());
        assert!(!SUBJECTS.is_editable());
    }

    #[test]
    fn class_teacher_requests() {
        let mut scope = ClassScope::new("7");
        scope.set_section("B");
        assert_eq!(
            assign_class_teacher_request("E1", &scope).url("/api"),
            "/api/teacher/assign?regNo=E1&classEntity=7&classSection=B"
        );
        assert_eq!(
            remove_class_teacher_request("E1").path,
            "/teacher/remove-classTeacher/E1"
        );
        assert_eq!(class_details_request("E1").path, "/teacher/class-details/E1");
    }

    #[test]
    fn class_teacher_status_from_lookup() {
        let not_found = Err(ApiError::from_response(404, "not a class teacher"));
        assert_eq!(
            ClassTeacherStatus::from_lookup(not_found).unwrap(),
            ClassTeacherStatus::Unassigned
        );

        let assigned =
            ClassTeacherStatus::from_lookup(Ok(json!({"className": "5", "classSection": "B"})))
                .unwrap();
        assert_eq!(assigned.summary().as_deref(), Some("Class 5 - B"));

        let server = Err(ApiError::from_response(500, "boom"));
        assert!(ClassTeacherStatus::from_lookup(server).is_err());
    }
}
