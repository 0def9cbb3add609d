//! Plain data records exchanged by compiler-interface operations
//!
//! Everything here is owned, immutable data with no identity, so it crosses
//! the interception boundary by value and can be serialized as-is.

use serde::{Deserialize, Serialize};

/// Access and property flags of classes, methods and fields.
pub mod modifiers {
    pub const PUBLIC: i32 = 0x0001;
    pub const PRIVATE: i32 = 0x0002;
    pub const PROTECTED: i32 = 0x0004;
    pub const STATIC: i32 = 0x0008;
    pub const FINAL: i32 = 0x0010;
    pub const SYNCHRONIZED: i32 = 0x0020;
    pub const VOLATILE: i32 = 0x0040;
    pub const BRIDGE: i32 = 0x0040;
    pub const TRANSIENT: i32 = 0x0080;
    pub const VARARGS: i32 = 0x0080;
    pub const NATIVE: i32 = 0x0100;
    pub const INTERFACE: i32 = 0x0200;
    pub const ABSTRACT: i32 = 0x0400;
    pub const SYNTHETIC: i32 = 0x1000;
    pub const ENUM: i32 = 0x4000;

    /// Whether `flag` is set in `modifiers`
    #[inline]
    pub fn has(modifiers: i32, flag: i32) -> bool {
        modifiers & flag != 0
    }
}

/// Basic kind of a value or storage slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JavaKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Float,
    Long,
    Double,
    Object,
    Void,
    Illegal,
}

impl JavaKind {
    /// Descriptor character of this kind
    pub fn type_char(self) -> char {
        match self {
            JavaKind::Boolean => 'Z',
            JavaKind::Byte => 'B',
            JavaKind::Short => 'S',
            JavaKind::Char => 'C',
            JavaKind::Int => 'I',
            JavaKind::Float => 'F',
            JavaKind::Long => 'J',
            JavaKind::Double => 'D',
            JavaKind::Object => 'A',
            JavaKind::Void => 'V',
            JavaKind::Illegal => '-',
        }
    }

    /// Kind denoted by a descriptor character (`L` and `[` are objects)
    pub fn from_type_char(c: char) -> Option<JavaKind> {
        Some(match c {
            'Z' => JavaKind::Boolean,
            'B' => JavaKind::Byte,
            'S' => JavaKind::Short,
            'C' => JavaKind::Char,
            'I' => JavaKind::Int,
            'F' => JavaKind::Float,
            'J' => JavaKind::Long,
            'D' => JavaKind::Double,
            'A' | 'L' | '[' => JavaKind::Object,
            'V' => JavaKind::Void,
            _ => return None,
        })
    }

    /// Source-level name of a primitive kind
    pub fn java_name(self) -> &'static str {
        match self {
            JavaKind::Boolean => "boolean",
            JavaKind::Byte => "byte",
            JavaKind::Short => "short",
            JavaKind::Char => "char",
            JavaKind::Int => "int",
            JavaKind::Float => "float",
            JavaKind::Long => "long",
            JavaKind::Double => "double",
            JavaKind::Object => "Object",
            JavaKind::Void => "void",
            JavaKind::Illegal => "illegal",
        }
    }

    pub fn is_primitive(self) -> bool {
        !matches!(self, JavaKind::Object | JavaKind::Void | JavaKind::Illegal)
    }

    /// Number of stack slots a value of this kind occupies
    pub fn slot_count(self) -> i32 {
        match self {
            JavaKind::Long | JavaKind::Double => 2,
            JavaKind::Void | JavaKind::Illegal => 0,
            _ => 1,
        }
    }
}

/// Converts an internal type name (`Ljava/lang/String;`, `[I`) to its
/// source-level form (`java.lang.String`, `int[]`).
pub fn to_java_name(internal: &str) -> String {
    if let Some(component) = internal.strip_prefix('[') {
        return format!("{}[]", to_java_name(component));
    }
    if let Some(class) = internal.strip_prefix('L').and_then(|s| s.strip_suffix(';')) {
        return class.replace('/', ".");
    }
    let mut chars = internal.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => match JavaKind::from_type_char(c) {
            Some(kind) if kind != JavaKind::Object => kind.java_name().to_string(),
            _ => internal.to_string(),
        },
        _ => internal.to_string(),
    }
}

/// Three-valued profile answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TriState {
    True,
    False,
    #[default]
    Unknown,
}

impl TriState {
    pub fn from_bool(value: bool) -> Self {
        if value {
            TriState::True
        } else {
            TriState::False
        }
    }

    pub fn is_known(self) -> bool {
        self != TriState::Unknown
    }
}

/// What the runtime does after a deoptimization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeoptimizationAction {
    None,
    RecompileIfTooManyDeopts,
    InvalidateReprofile,
    InvalidateRecompile,
    InvalidateStopCompiling,
}

/// Why compiled code deoptimized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeoptimizationReason {
    None,
    NullCheckException,
    BoundsCheckException,
    ClassCastException,
    ArrayStoreException,
    UnreachedCode,
    TypeCheckedInliningViolated,
    OptimizedTypeCheckViolated,
    NotCompiledExceptionHandler,
    Unresolved,
    JavaSubroutineMismatch,
    ArithmeticException,
    RuntimeConstraint,
    LoopLimitCheck,
    Aliasing,
    TransferToInterpreter,
}

/// Signature-polymorphic method handle intrinsics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodHandleIntrinsic {
    InvokeBasic,
    LinkToVirtual,
    LinkToStatic,
    LinkToSpecial,
    LinkToInterface,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackTraceElement {
    pub class_name: String,
    pub method_name: String,
    pub file_name: Option<String>,
    pub line_number: i32,
}

/// Exception table entry of a method
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExceptionHandler {
    pub start_bci: i32,
    pub end_bci: i32,
    pub handler_bci: i32,
    pub catch_type_cpi: i32,
    /// Internal name of the caught type, `None` for catch-all handlers
    pub catch_type: Option<String>,
}

impl ExceptionHandler {
    pub fn is_catch_all(&self) -> bool {
        self.catch_type_cpi == 0
    }

    pub fn covers(&self, bci: i32) -> bool {
        self.start_bci <= bci && bci < self.end_bci
    }
}

/// Mapping from bytecode indices to source lines
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineNumberTable {
    pub line_numbers: Vec<i32>,
    pub bcis: Vec<i32>,
}

impl LineNumberTable {
    /// Source line of `bci`, or -1 if the table does not cover it
    pub fn get_line_number(&self, bci: i32) -> i32 {
        let mut line = -1;
        for (start, number) in self.bcis.iter().zip(self.line_numbers.iter()) {
            if *start > bci {
                break;
            }
            line = *number;
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfiledType {
    pub type_name: String,
    pub probability: f64,
}

/// Receiver type profile at a call or type-check site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JavaTypeProfile {
    pub null_seen: TriState,
    pub not_recorded_probability: f64,
    pub types: Vec<ProfiledType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfiledMethod {
    pub method_name: String,
    pub probability: f64,
}

/// Call target profile at a virtual call site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JavaMethodProfile {
    pub not_recorded_probability: f64,
    pub methods: Vec<ProfiledMethod>,
}

/// Identifies a speculation made by compiled code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeculationReason {
    pub group: String,
    pub context: Vec<String>,
}

/// A speculation registered with a speculation log
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Speculation {
    pub reason: Option<SpeculationReason>,
    pub id: i64,
}

impl Speculation {
    /// Placeholder used when no speculation was made
    pub const NO_SPECULATION: Speculation = Speculation { reason: None, id: 0 };

    pub fn is_none(&self) -> bool {
        self.reason.is_none()
    }
}

/// Result of a compilation handed to the code cache
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompiledCode {
    pub name: String,
    pub code_size: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_names() {
        assert_eq!(to_java_name("Ljava/lang/String;"), "java.lang.String");
        assert_eq!(to_java_name("[I"), "int[]");
        assert_eq!(to_java_name("[[Ljava/lang/Object;"), "java.lang.Object[][]");
        assert_eq!(to_java_name("J"), "long");
    }

    #[test]
    fn test_kind_chars() {
        assert_eq!(JavaKind::from_type_char('J'), Some(JavaKind::Long));
        assert_eq!(JavaKind::from_type_char('L'), Some(JavaKind::Object));
        assert_eq!(JavaKind::from_type_char('x'), None);
        assert_eq!(JavaKind::Double.slot_count(), 2);
        assert!(JavaKind::Char.is_primitive());
        assert!(!JavaKind::Object.is_primitive());
    }

    #[test]
    fn test_line_numbers() {
        let table = LineNumberTable {
            line_numbers: vec![10, 12, 15],
            bcis: vec![0, 4, 9],
        };
        assert_eq!(table.get_line_number(0), 10);
        assert_eq!(table.get_line_number(5), 12);
        assert_eq!(table.get_line_number(20), 15);
        assert_eq!(LineNumberTable::default().get_line_number(3), -1);
    }

    #[test]
    fn test_serde_records() {
        let handler = ExceptionHandler {
            start_bci: 0,
            end_bci: 10,
            handler_bci: 12,
            catch_type_cpi: 0,
            catch_type: None,
        };
        let json = serde_json::to_string(&handler).unwrap();
        let back: ExceptionHandler = serde_json::from_str(&json).unwrap();
        assert_eq!(back, handler);
        assert!(back.is_catch_all());
        assert!(back.covers(9));
        assert!(!back.covers(10));
    }
}
