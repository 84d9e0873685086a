use pcbdiff_core_types::Slot;
use thiserror::Error;

/// Result type alias using PcbDiffError
pub type Result<T> = std::result::Result<T, PcbDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    SlotEmpty,
    /// Shared component placed at different coordinates in A and B
    StructuralMismatch,
    /// Zero, negative or non-finite viewport dimension
    InvalidViewport,
    /// X/Y present but not a finite number
    MalformedField,

    // Tabular input
    /// Required column absent from the header row
    MissingHeader,
    Parse,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::SlotEmpty => "ERR_SLOT_EMPTY",
            ExErrorKind::StructuralMismatch => "ERR_STRUCTURAL_MISMATCH",
            ExErrorKind::InvalidViewport => "ERR_INVALID_VIEWPORT",
            ExErrorKind::MalformedField => "ERR_MALFORMED_FIELD",
            ExErrorKind::MissingHeader => "ERR_MISSING_HEADER",
            ExErrorKind::Parse => "ERR_PARSE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and rich context
/// for display at the shell boundary.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    reference_id: Option<String>,
    slot: Option<Slot>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            reference_id: None,
            slot: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add component reference context
    pub fn with_reference_id(mut self, id: impl Into<String>) -> Self {
        self.reference_id = Some(id.into());
        self
    }

    /// Add slot context
    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the component reference context, if any
    pub fn reference_id(&self) -> Option<&str> {
        self.reference_id.as_deref()
    }

    /// Get the slot context, if any
    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(reference_id) = &self.reference_id {
            write!(f, " (reference_id: {})", reference_id)?;
        }
        if let Some(slot) = self.slot {
            write!(f, " (slot: {})", slot)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for pcbdiff operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PcbDiffError {
    // ===== Lookup Errors =====
    /// No record with this reference in the store
    #[error("Component not found: {reference_id}")]
    RecordNotFound { reference_id: String },

    /// Operation needs a layout in a slot that has none
    #[error("No layout loaded in slot {slot}")]
    SlotEmpty { slot: Slot },

    /// Unit Under Test loaded before the Golden Reference
    #[error("Load the golden reference (A) before the unit under test (B)")]
    GoldenNotLoaded,

    // ===== Comparison Errors =====
    /// Shared component placed at different coordinates; wrong board or revision
    #[error(
        "Position mismatch at {reference_id}: golden {golden:?} vs unit under test {under_test:?}; wrong board or revision"
    )]
    StructuralMismatch {
        reference_id: String,
        golden: (f64, f64),
        under_test: (f64, f64),
    },

    // ===== Geometry Errors =====
    /// Viewport dimension is zero, negative or not finite
    #[error("Invalid viewport {width}x{height}: dimensions must be positive")]
    InvalidViewport { width: f64, height: f64 },

    /// Rendering configuration is unusable
    #[error("Invalid geometry config: {reason}")]
    InvalidGeometryConfig { reason: String },

    // ===== Record Validation Errors =====
    /// Coordinate supplied as blank in an update
    #[error("Component {reference_id}: {field} is required")]
    MissingCoordinate { reference_id: String, field: String },

    /// Coordinate supplied but not a finite number
    #[error("Component {reference_id}: {field} value '{raw}' is not a number")]
    MalformedCoordinate {
        reference_id: String,
        field: String,
        raw: String,
    },

    /// Reference designator is empty
    #[error("Reference designator cannot be empty")]
    EmptyReference,

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from PcbDiffError to ExError
impl From<PcbDiffError> for ExError {
    fn from(err: PcbDiffError) -> Self {
        let message = err.to_string();
        match err {
            PcbDiffError::RecordNotFound { reference_id } => ExError::new(ExErrorKind::NotFound)
                .with_reference_id(reference_id)
                .with_message(message),
            PcbDiffError::SlotEmpty { slot } => ExError::new(ExErrorKind::SlotEmpty)
                .with_slot(slot)
                .with_message(message),
            PcbDiffError::GoldenNotLoaded => ExError::new(ExErrorKind::SlotEmpty)
                .with_slot(Slot::A)
                .with_message(message),
            PcbDiffError::StructuralMismatch { reference_id, .. } => {
                ExError::new(ExErrorKind::StructuralMismatch)
                    .with_op("validate_structure")
                    .with_reference_id(reference_id)
                    .with_message(message)
            }
            PcbDiffError::InvalidViewport { .. } => ExError::new(ExErrorKind::InvalidViewport)
                .with_op("compute_geometry")
                .with_message(message),
            PcbDiffError::InvalidGeometryConfig { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            PcbDiffError::MissingCoordinate { reference_id, .. } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_reference_id(reference_id)
                    .with_message(message)
            }
            PcbDiffError::MalformedCoordinate { reference_id, .. } => {
                ExError::new(ExErrorKind::MalformedField)
                    .with_reference_id(reference_id)
                    .with_message(message)
            }
            PcbDiffError::EmptyReference => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            PcbDiffError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            PcbDiffError::Internal { .. } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for PcbDiffError {
    fn from(err: serde_json::Error) -> Self {
        PcbDiffError::Serialization {
            message: err.to_string(),
        }
    }
}
