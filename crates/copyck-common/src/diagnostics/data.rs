use super::{DiagnosticCategory, DiagnosticMessage};

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: 1001,
        category: DiagnosticCategory::Advisory,
        message: "Copy constructor does not copy all fields",
    },
    DiagnosticMessage {
        code: 1002,
        category: DiagnosticCategory::Advisory,
        message: "Suspicious assignment in copy constructor of '{0}' to field {1}",
    },
    DiagnosticMessage {
        code: 1003,
        category: DiagnosticCategory::Advisory,
        message: "Copy constructor does not call copy constructor of superclass",
    },
    DiagnosticMessage {
        code: 1004,
        category: DiagnosticCategory::Message,
        message: "Field '{0}' is not copied from '{1}'.",
    },
    DiagnosticMessage {
        code: 1005,
        category: DiagnosticCategory::Message,
        message: "Superclass copy constructor '{0}' is declared here.",
    },
    DiagnosticMessage {
        code: 1006,
        category: DiagnosticCategory::Message,
        message: "Copy constructor already exists",
    },
];

pub mod diagnostic_messages {
    pub const COPY_CONSTRUCTOR_DOES_NOT_COPY_ALL_FIELDS: &str =
        "Copy constructor does not copy all fields";
    pub const SUSPICIOUS_ASSIGNMENT_IN_COPY_CONSTRUCTOR_OF_TO_FIELD: &str =
        "Suspicious assignment in copy constructor of '{0}' to field {1}";
    pub const COPY_CONSTRUCTOR_DOES_NOT_CALL_COPY_CONSTRUCTOR_OF_SUPERCLASS: &str =
        "Copy constructor does not call copy constructor of superclass";
    pub const FIELD_IS_NOT_COPIED_FROM: &str = "Field '{0}' is not copied from '{1}'.";
    pub const SUPERCLASS_COPY_CONSTRUCTOR_IS_DECLARED_HERE: &str =
        "Superclass copy constructor '{0}' is declared here.";
    pub const COPY_CONSTRUCTOR_ALREADY_EXISTS: &str = "Copy constructor already exists";
}

pub mod diagnostic_codes {
    pub const COPY_CONSTRUCTOR_DOES_NOT_COPY_ALL_FIELDS: u32 = 1001;
    pub const SUSPICIOUS_ASSIGNMENT_IN_COPY_CONSTRUCTOR_OF_TO_FIELD: u32 = 1002;
    pub const COPY_CONSTRUCTOR_DOES_NOT_CALL_COPY_CONSTRUCTOR_OF_SUPERCLASS: u32 = 1003;
    pub const FIELD_IS_NOT_COPIED_FROM: u32 = 1004;
    pub const SUPERCLASS_COPY_CONSTRUCTOR_IS_DECLARED_HERE: u32 = 1005;
    pub const COPY_CONSTRUCTOR_ALREADY_EXISTS: u32 = 1006;
}
