use crate::operator::OperatorName;
use crate::token::Kw;
use crate::token::TT;

/// The operator a token introduces after an operand, including calls, member access and `?`.
pub fn infix_operator(typ: TT) -> Option<OperatorName> {
  use OperatorName::*;
  let name = match typ {
    TT::Ampersand => BitwiseAnd,
    TT::AmpersandAmpersand => LogicalAnd,
    TT::AmpersandAmpersandEquals => AssignmentLogicalAnd,
    TT::AmpersandEquals => AssignmentBitwiseAnd,
    TT::Asterisk => Multiplication,
    TT::AsteriskAsterisk => Exponentiation,
    TT::AsteriskAsteriskEquals => AssignmentExponentiation,
    TT::AsteriskEquals => AssignmentMultiplication,
    TT::Bar => BitwiseOr,
    TT::BarBar => LogicalOr,
    TT::BarBarEquals => AssignmentLogicalOr,
    TT::BarEquals => AssignmentBitwiseOr,
    TT::BracketOpen => ComputedMemberAccess,
    TT::Caret => BitwiseXor,
    TT::CaretEquals => AssignmentBitwiseXor,
    TT::ChevronLeft => LessThan,
    TT::ChevronLeftChevronLeft => BitwiseLeftShift,
    TT::ChevronLeftChevronLeftEquals => AssignmentBitwiseLeftShift,
    TT::ChevronLeftEquals => LessThanOrEqual,
    TT::ChevronRight => GreaterThan,
    TT::ChevronRightChevronRight => BitwiseRightShift,
    TT::ChevronRightChevronRightChevronRight => BitwiseUnsignedRightShift,
    TT::ChevronRightChevronRightChevronRightEquals => AssignmentBitwiseUnsignedRightShift,
    TT::ChevronRightChevronRightEquals => AssignmentBitwiseRightShift,
    TT::ChevronRightEquals => GreaterThanOrEqual,
    TT::Comma => Comma,
    TT::Dot => MemberAccess,
    TT::Equals => Assignment,
    TT::EqualsEquals => Equality,
    TT::EqualsEqualsEquals => StrictEquality,
    TT::ExclamationEquals => Inequality,
    TT::ExclamationEqualsEquals => StrictInequality,
    TT::Hyphen => Subtraction,
    TT::HyphenEquals => AssignmentSubtraction,
    TT::Kw(Kw::In) => In,
    TT::Kw(Kw::Instanceof) => Instanceof,
    TT::ParenthesisOpen => Call,
    TT::Percent => Remainder,
    TT::PercentEquals => AssignmentRemainder,
    TT::Plus => Addition,
    TT::PlusEquals => AssignmentAddition,
    TT::Question => Conditional,
    TT::QuestionDot => OptionalChainingMemberAccess,
    TT::QuestionDotBracketOpen => OptionalChainingComputedMemberAccess,
    TT::QuestionDotParenthesisOpen => OptionalChainingCall,
    TT::QuestionQuestion => NullishCoalescing,
    TT::QuestionQuestionEquals => AssignmentNullishCoalescing,
    TT::Slash => Division,
    TT::SlashEquals => AssignmentDivision,
    _ => return None,
  };
  Some(name)
}

/// The operator a token introduces at the start of an operand. Postfix `++`/`--` and `yield*` are
/// recognised by the expression parser itself.
pub fn prefix_operator(typ: TT) -> Option<OperatorName> {
  use OperatorName::*;
  let name = match typ {
    TT::Exclamation => LogicalNot,
    TT::Hyphen => UnaryNegation,
    TT::HyphenHyphen => PrefixDecrement,
    TT::Kw(Kw::Await) => Await,
    TT::Kw(Kw::Delete) => Delete,
    TT::Kw(Kw::New) => New,
    TT::Kw(Kw::Typeof) => Typeof,
    TT::Kw(Kw::Void) => Void,
    TT::Kw(Kw::Yield) => Yield,
    TT::Plus => UnaryPlus,
    TT::PlusPlus => PrefixIncrement,
    TT::Tilde => BitwiseNot,
    _ => return None,
  };
  Some(name)
}
