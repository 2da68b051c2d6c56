use std::fmt;

use enum_dispatch::enum_dispatch;
use nom::{branch::alt, combinator::map, IResult};
use paste::paste;

/// Data structure, parser and ir generator for `br` statements.
pub mod branch;
/// Data structure, parser and ir generator for binary calculations.
pub mod calculate;
/// Data structure, parser and ir generator for `call` statements.
pub mod call;
/// Data structure, parser and ir generator for `zext` statements.
pub mod extend;
/// Data structure, parser and ir generator for `j` statements.
pub mod jump;
/// Data structure, parser and ir generator for `phi` statements.
pub mod phi;
/// Data structure, parser and ir generator for `ret` statements.
pub mod ret;

use crate::{ir::quantity::RegisterName, utility::data_type::Type};
pub use branch::{Branch, BranchType};
pub use calculate::{BinaryCalculate, BinaryOperation};
pub use call::Call;
pub use extend::ZeroExtend;
pub use jump::Jump;
pub use phi::Phi;
pub use ret::Ret;

/// This trait is implemented for all IR statements; the verifier leans on it
/// to track definitions and uses.
#[enum_dispatch]
pub trait IsIRStatement {
    fn use_register(&self) -> Vec<RegisterName>;
    fn generate_register(&self) -> Option<(RegisterName, Type)>;
}

/// A statement in a function.
#[enum_dispatch(IsIRStatement)]
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum IRStatement {
    Phi,
    BinaryCalculate,
    ZeroExtend,
    Call,
    Branch,
    Jump,
    Ret,
}

impl IRStatement {
    /// Whether this statement ends a basic block.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            IRStatement::Branch(_) | IRStatement::Jump(_) | IRStatement::Ret(_)
        )
    }
}

macro_rules! variant {
    ($name:ident, $variant:ident) => {
        paste! {
        impl IRStatement {
            /// Returns `Some(variant)` if the statement is this variant,
            /// return `None` if it is not.
            #[allow(dead_code)]
            pub fn [<try_as_ $name>](&self) -> Option<&$variant> {
                match self {
                    IRStatement::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            /// Like `try_as_`, but for in-place edits.
            #[allow(dead_code)]
            pub fn [<try_as_ $name _mut>](&mut self) -> Option<&mut $variant> {
                match self {
                    IRStatement::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            /// Returns the variant if the statement is this variant,
            /// panic if it is not.
            #[allow(dead_code)]
            pub fn [<as_ $name>](&self) -> &$variant {
                match self {
                    IRStatement::$variant(inner) => inner,
                    _ => panic!("Expected {} but got {:?}", stringify!($name), self),
                }
            }
        }
        }
    };
}

variant!(phi, Phi);
variant!(binary_calculate, BinaryCalculate);
variant!(zero_extend, ZeroExtend);
variant!(call, Call);
variant!(branch, Branch);
variant!(jump, Jump);
variant!(ret, Ret);

/// Parse ir code to get an [`IRStatement`].
pub fn parse(code: &str) -> IResult<&str, IRStatement> {
    alt((
        map(phi::parse, IRStatement::Phi),
        map(calculate::parse, IRStatement::BinaryCalculate),
        map(extend::parse, IRStatement::ZeroExtend),
        map(call::parse, IRStatement::Call),
        map(branch::parse, IRStatement::Branch),
        map(jump::parse, IRStatement::Jump),
        map(ret::parse, IRStatement::Ret),
    ))(code)
}

impl fmt::Display for IRStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IRStatement::Phi(x) => x.fmt(f),
            IRStatement::BinaryCalculate(x) => x.fmt(f),
            IRStatement::ZeroExtend(x) => x.fmt(f),
            IRStatement::Call(x) => x.fmt(f),
            IRStatement::Branch(x) => x.fmt(f),
            IRStatement::Jump(x) => x.fmt(f),
            IRStatement::Ret(x) => x.fmt(f),
        }
    }
}
