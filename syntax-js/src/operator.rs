use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentExponentiation,
  AssignmentLogicalAnd,
  AssignmentLogicalOr,
  AssignmentMultiplication,
  AssignmentNullishCoalescing,
  AssignmentRemainder,
  AssignmentSubtraction,
  Await,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Call,
  Comma,
  ComputedMemberAccess,
  Conditional,
  ConditionalAlternate,
  Delete,
  Division,
  Equality,
  Exponentiation,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  MemberAccess,
  Multiplication,
  New,
  NullishCoalescing,
  OptionalChainingCall,
  OptionalChainingComputedMemberAccess,
  OptionalChainingMemberAccess,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
  Yield,
  YieldDelegated,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    matches!(
      self,
      OperatorName::Assignment
        | OperatorName::AssignmentAddition
        | OperatorName::AssignmentBitwiseAnd
        | OperatorName::AssignmentBitwiseLeftShift
        | OperatorName::AssignmentBitwiseOr
        | OperatorName::AssignmentBitwiseRightShift
        | OperatorName::AssignmentBitwiseUnsignedRightShift
        | OperatorName::AssignmentBitwiseXor
        | OperatorName::AssignmentDivision
        | OperatorName::AssignmentExponentiation
        | OperatorName::AssignmentLogicalAnd
        | OperatorName::AssignmentLogicalOr
        | OperatorName::AssignmentMultiplication
        | OperatorName::AssignmentNullishCoalescing
        | OperatorName::AssignmentRemainder
        | OperatorName::AssignmentSubtraction
    )
  }

  pub fn is_prefix(self) -> bool {
    use OperatorName::*;
    matches!(
      self,
      LogicalNot
        | BitwiseNot
        | UnaryPlus
        | UnaryNegation
        | PrefixIncrement
        | PrefixDecrement
        | Typeof
        | Void
        | Delete
        | Await
    )
  }

  /// Higher binds tighter. The comma operator is 1 and member access is 19.
  pub fn precedence(self) -> u8 {
    use OperatorName::*;
    match self {
      Comma => 1,
      Yield | YieldDelegated => 2,
      Conditional => 4,
      LogicalOr | NullishCoalescing => 5,
      LogicalAnd => 6,
      BitwiseOr => 7,
      BitwiseXor => 8,
      BitwiseAnd => 9,
      Equality | Inequality | StrictEquality | StrictInequality => 10,
      LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual | In | Instanceof => 11,
      BitwiseLeftShift | BitwiseRightShift | BitwiseUnsignedRightShift => 12,
      Addition | Subtraction => 13,
      Multiplication | Division | Remainder => 14,
      Exponentiation => 15,
      op if op.is_prefix() => 16,
      PostfixIncrement | PostfixDecrement => 17,
      New => 18,
      MemberAccess
      | ComputedMemberAccess
      | Call
      | OptionalChainingMemberAccess
      | OptionalChainingComputedMemberAccess
      | OptionalChainingCall => 19,
      // Assignments, and the alternate of `a ? b : c`, which parses at assignment level.
      _ => 3,
    }
  }

  pub fn associativity(self) -> Associativity {
    use OperatorName::*;
    match self {
      New | Exponentiation | Conditional | ConditionalAlternate | Yield | YieldDelegated => {
        Associativity::Right
      }
      op if op.is_assignment() || op.is_prefix() => Associativity::Right,
      _ => Associativity::Left,
    }
  }

  /// Minimum precedence for an operator in the operand to the right of this one. Left-associative
  /// operators exclude their own level, so `a - b - c` groups as `(a - b) - c`.
  pub fn right_operand_precedence(self) -> u8 {
    self.precedence() + u8::from(self.associativity() == Associativity::Left)
  }
}

#[cfg(test)]
mod tests {
  use super::Associativity;
  use super::OperatorName;

  #[test]
  fn test_precedence_ordering() {
    assert!(OperatorName::Multiplication.precedence() > OperatorName::Addition.precedence());
    assert!(OperatorName::LogicalAnd.precedence() > OperatorName::LogicalOr.precedence());
    assert_eq!(
      OperatorName::AssignmentAddition.precedence(),
      OperatorName::Assignment.precedence()
    );
    assert_eq!(OperatorName::Typeof.precedence(), OperatorName::LogicalNot.precedence());
    assert_eq!(OperatorName::Comma.precedence(), 1);
  }

  #[test]
  fn test_associativity() {
    assert_eq!(OperatorName::Subtraction.associativity(), Associativity::Left);
    assert_eq!(OperatorName::Exponentiation.associativity(), Associativity::Right);
    assert_eq!(OperatorName::Assignment.associativity(), Associativity::Right);
    assert_eq!(OperatorName::Await.associativity(), Associativity::Right);
    assert_eq!(
      OperatorName::Subtraction.right_operand_precedence(),
      OperatorName::Subtraction.precedence() + 1
    );
  }
}
