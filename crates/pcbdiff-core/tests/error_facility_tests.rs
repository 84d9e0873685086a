use pcbdiff_core::errors::{ExError, ExErrorKind, PcbDiffError};
use pcbdiff_core_types::Slot;

#[test]
fn test_not_found_verifiable_by_kind() {
    let err = PcbDiffError::RecordNotFound {
        reference_id: "Q1".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::NotFound);
    assert_eq!(ex_err.code(), "ERR_NOT_FOUND");
    assert_eq!(ex_err.reference_id(), Some("Q1"));
}

#[test]
fn test_slot_errors_carry_slot() {
    let ex_err: ExError = PcbDiffError::SlotEmpty { slot: Slot::B }.into();
    assert_eq!(ex_err.kind(), ExErrorKind::SlotEmpty);
    assert_eq!(ex_err.slot(), Some(Slot::B));

    let ex_err: ExError = PcbDiffError::GoldenNotLoaded.into();
    assert_eq!(ex_err.kind(), ExErrorKind::SlotEmpty);
    assert_eq!(ex_err.slot(), Some(Slot::A));
}

#[test]
fn test_malformed_distinct_from_missing() {
    let missing: ExError = PcbDiffError::MissingCoordinate {
        reference_id: "R1".to_string(),
        field: "X".to_string(),
    }
    .into();
    let malformed: ExError = PcbDiffError::MalformedCoordinate {
        reference_id: "R1".to_string(),
        field: "X".to_string(),
        raw: "abc".to_string(),
    }
    .into();

    assert_eq!(missing.kind(), ExErrorKind::InvalidInput);
    assert_eq!(malformed.kind(), ExErrorKind::MalformedField);
    assert!(malformed.message().contains("'abc'"));
}

#[test]
fn test_invalid_viewport_structured_fields() {
    let ex_err: ExError = PcbDiffError::InvalidViewport {
        width: 0.0,
        height: 600.0,
    }
    .into();

    assert_eq!(ex_err.code(), "ERR_INVALID_VIEWPORT");
    assert_eq!(ex_err.op(), Some("compute_geometry"));
    assert!(ex_err.message().contains("0x600"));
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        (ExErrorKind::SlotEmpty, "ERR_SLOT_EMPTY"),
        (ExErrorKind::StructuralMismatch, "ERR_STRUCTURAL_MISMATCH"),
        (ExErrorKind::InvalidViewport, "ERR_INVALID_VIEWPORT"),
        (ExErrorKind::MalformedField, "ERR_MALFORMED_FIELD"),
        (ExErrorKind::MissingHeader, "ERR_MISSING_HEADER"),
        (ExErrorKind::Parse, "ERR_PARSE"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}
