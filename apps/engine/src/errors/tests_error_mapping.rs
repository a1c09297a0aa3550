use super::domain::{DomainError, IllegalMoveKind};
use super::error_code::ErrorCode;

#[test]
fn illegal_moves_map_to_recoverable_codes() {
    let err = DomainError::illegal(IllegalMoveKind::OutOfTurn, "seat 2 played on seat 1's turn");
    let code = ErrorCode::from(&err);
    assert_eq!(code, ErrorCode::OutOfTurn);
    assert_eq!(code.as_str(), "OUT_OF_TURN");
    assert!(code.is_recoverable());
    assert_eq!(err.illegal_kind(), Some(IllegalMoveKind::OutOfTurn));
}

#[test]
fn invariant_violation_is_fatal() {
    let err = DomainError::invariant("39 cards accounted");
    let code = ErrorCode::from(&err);
    assert_eq!(code, ErrorCode::InvariantViolation);
    assert!(!code.is_recoverable());
    assert_eq!(err.illegal_kind(), None);
}

#[test]
fn display_includes_detail() {
    let err = DomainError::parse_card("x_99");
    assert_eq!(err.to_string(), "parse card: x_99");
    assert_eq!(ErrorCode::ConfigError.to_string(), "CONFIG_ERROR");
}
