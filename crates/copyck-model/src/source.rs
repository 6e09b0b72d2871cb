//! JSON program sources.
//!
//! A `ProgramSource` is one file's worth of class declarations with
//! constructor bodies written as nested statement/expression trees. Names
//! are plain strings; the binder resolves them.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramSource {
    pub file: String,
    #[serde(default)]
    pub classes: Vec<ClassSource>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassSource {
    pub name: String,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSource>,
    #[serde(default)]
    pub constructors: Vec<ConstructorSource>,
    /// Method names; bodies are not modelled.
    #[serde(default)]
    pub methods: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSource {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    /// Initializer expression text, if the field has one.
    #[serde(default)]
    pub initializer: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructorSource {
    #[serde(default)]
    pub parameters: Vec<ParameterSource>,
    #[serde(default)]
    pub body: Vec<StatementSource>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterSource {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementSource {
    Assign {
        lhs: ExprSource,
        #[serde(default)]
        rhs: Option<ExprSource>,
    },
    Expr(ExprSource),
    Block(Vec<StatementSource>),
    If {
        condition: ExprSource,
        #[serde(default)]
        then: Vec<StatementSource>,
        #[serde(default, rename = "else")]
        otherwise: Option<Vec<StatementSource>>,
    },
    While {
        #[serde(default)]
        condition: Option<ExprSource>,
        #[serde(default)]
        body: Vec<StatementSource>,
    },
    Local {
        name: String,
        #[serde(rename = "type")]
        ty: String,
        #[serde(default)]
        init: Option<ExprSource>,
    },
    Other(String),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExprSource {
    This,
    Super,
    /// Bare name (`x`).
    Name(String),
    /// Qualified name (`q.x`); without a qualifier this is the same as `Name`.
    Field {
        #[serde(default)]
        qualifier: Option<Box<ExprSource>>,
        name: String,
    },
    /// `receiver.name(args)`, `name(args)`, `super(args)` or `this(args)`.
    Call {
        #[serde(default)]
        receiver: Option<Box<ExprSource>>,
        name: String,
        #[serde(default)]
        args: Vec<ExprSource>,
    },
    /// `new class(args)`.
    New {
        class: String,
        #[serde(default)]
        args: Vec<ExprSource>,
    },
    Binary {
        op: String,
        operands: Vec<ExprSource>,
    },
    Conditional {
        condition: Box<ExprSource>,
        then: Box<ExprSource>,
        #[serde(rename = "else")]
        otherwise: Box<ExprSource>,
    },
    Paren(Box<ExprSource>),
    Literal(String),
    Other(String),
}

impl ProgramSource {
    pub fn from_json(text: &str) -> serde_json::Result<ProgramSource> {
        serde_json::from_str(text)
    }
}
